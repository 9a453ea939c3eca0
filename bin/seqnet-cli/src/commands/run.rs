// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `seqnet run` command: feed one input vector through a model for a
//! number of steps and print each output.

use model_loader::{LoaderConfig, ModelBuilder};
use network::Model;
use std::path::PathBuf;
use tensor_core::{DType, Scalar};

pub fn execute(
    model: PathBuf,
    dtype: DType,
    input: &str,
    steps: usize,
    config: LoaderConfig,
) -> anyhow::Result<()> {
    let values = parse_input(input)?;
    let builder = ModelBuilder::new(config);
    match dtype {
        DType::F32 => run_steps(builder.build_file::<f32>(&model)?, &values, steps),
        DType::F64 => run_steps(builder.build_file::<f64>(&model)?, &values, steps),
    }
}

fn run_steps<T: Scalar>(mut model: Model<T>, values: &[f64], steps: usize) -> anyhow::Result<()> {
    let input = values
        .iter()
        .map(|&v| {
            T::from_f64(v).ok_or_else(|| anyhow::anyhow!("input {v} does not fit {}", T::DTYPE))
        })
        .collect::<anyhow::Result<Vec<T>>>()?;

    tracing::info!("running {steps} step(s) on {}", model.summary());
    for step in 0..steps {
        let output = model.forward(&input)?;
        let line: Vec<String> = output.iter().map(|y| format!("{y:.6}")).collect();
        println!("  step {step:>3}: [{}]", line.join(", "));
    }
    Ok(())
}

/// Parses "0.5, -1,2" into numbers.
fn parse_input(input: &str) -> anyhow::Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| anyhow::anyhow!("invalid input value '{s}': {e}"))
        })
        .collect()
}
