// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `seqnet inspect` command: print the layer stack a description builds into.

use model_loader::{ArchitectureDescription, LoaderConfig, ModelBuilder};
use network::Model;
use std::path::PathBuf;
use tensor_core::{DType, Scalar};

pub fn execute(model: PathBuf, dtype: DType, config: LoaderConfig) -> anyhow::Result<()> {
    let description = ArchitectureDescription::from_file(&model).map_err(|e| {
        anyhow::anyhow!("failed to read model from '{}': {e}", model.display())
    })?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               seqnet · Model Inspector               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  File:    {}", model.display());
    println!("  Entries: {}", description.num_layers());
    println!();

    let builder = ModelBuilder::new(config);
    match dtype {
        DType::F32 => print_model(&builder.build::<f32>(&description)?),
        DType::F64 => print_model(&builder.build::<f64>(&description)?),
    }
    Ok(())
}

fn print_model<T: Scalar>(model: &Model<T>) {
    println!("  {}", model.summary());
    println!();
    println!(
        "  {:<4} {:<12} {:>8} {:>8} {:>12}",
        "Idx", "Kind", "In", "Out", "Parameters",
    );
    println!("  {}", "-".repeat(48));

    for (idx, layer) in model.iter_layers().enumerate() {
        println!(
            "  {:<4} {:<12} {:>8} {:>8} {:>12}",
            idx,
            layer.name(),
            layer.in_size(),
            layer.out_size(),
            layer.parameter_count(),
        );
    }

    let bytes = model.parameter_count() * T::DTYPE.size_bytes();
    println!();
    println!(
        "  Weights: {} values, {:.2} KB as {}",
        model.parameter_count(),
        bytes as f64 / 1024.0,
        T::DTYPE,
    );
    println!();
}
