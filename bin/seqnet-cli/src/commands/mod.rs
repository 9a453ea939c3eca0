// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the helpers they share.

pub mod check;
pub mod inspect;
pub mod run;

use model_loader::LoaderConfig;
use std::path::Path;
use tensor_core::DType;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the loader configuration, or returns the strict default.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => {
            let config = LoaderConfig::from_file(path)?;
            tracing::info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(LoaderConfig::default()),
    }
}

pub fn parse_dtype_arg(s: &str) -> anyhow::Result<DType> {
    tensor_core::parse_dtype(s)
        .ok_or_else(|| anyhow::anyhow!("unsupported dtype '{s}', expected f32 or f64"))
}
