// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `seqnet check` command: build a model, then validate it layer by layer
//! against the description it was built from.

use model_loader::{
    ArchitectureDescription, LoaderConfig, ModelBuilder, ValidationReport, Validator,
};
use std::path::PathBuf;
use tensor_core::DType;

pub fn execute(model: PathBuf, dtype: DType, config: LoaderConfig) -> anyhow::Result<()> {
    let description = ArchitectureDescription::from_file(&model).map_err(|e| {
        anyhow::anyhow!("failed to read model from '{}': {e}", model.display())
    })?;

    let builder = ModelBuilder::new(config.clone());
    let validator = Validator::new(true);
    let report = match dtype {
        DType::F32 => {
            let built = builder.build::<f32>(&description)?;
            validator.validate_model(&built, &description, &config)?
        }
        DType::F64 => {
            let built = builder.build::<f64>(&description)?;
            validator.validate_model(&built, &description, &config)?
        }
    };

    print_report(&report);

    if !report.all_passed() {
        anyhow::bail!(
            "{} check(s) failed, {} extra layer(s)",
            report.failures().count(),
            report.extra_layers,
        );
    }
    println!("  All {} checks passed.", report.entries.len());
    Ok(())
}

fn print_report(report: &ValidationReport) {
    println!("  {:<6} {:<6} {:<24} Result", "Entry", "Layer", "Expected");
    println!("  {}", "-".repeat(60));
    for entry in &report.entries {
        let layer = entry
            .layer
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<6} {:<6} {:<24} {}",
            entry.entry, layer, entry.expected, entry.verdict,
        );
    }
    if report.extra_layers > 0 {
        println!("  model has {} layer(s) past the description", report.extra_layers);
    }
    println!();
}
