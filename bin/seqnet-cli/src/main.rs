// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # seqnet
//!
//! Command-line interface for building and exercising sequential models
//! described in JSON.
//!
//! ## Usage
//! ```bash
//! # Print the layer stack a description builds into
//! seqnet inspect --model ./models/amp.json
//!
//! # Check the built model against its description
//! seqnet check --model ./models/amp.json --dtype f64
//!
//! # Feed the same input through the model for a few steps
//! seqnet run --model ./models/amp.json --input 0.1,0.2 --steps 4
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seqnet",
    about = "Build and run sequential neural networks from JSON model descriptions",
    version,
    author
)]
struct Cli {
    /// Path to a TOML loader configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a model and print its layers.
    Inspect {
        /// Path to the JSON model description.
        #[arg(short, long)]
        model: PathBuf,

        /// Precision to build with: f32 or f64.
        #[arg(short, long, default_value = "f32")]
        dtype: String,
    },

    /// Build a model and validate every layer against its description.
    Check {
        /// Path to the JSON model description.
        #[arg(short, long)]
        model: PathBuf,

        /// Precision to build with: f32 or f64.
        #[arg(short, long, default_value = "f32")]
        dtype: String,
    },

    /// Build a model and run forward steps on one input vector.
    Run {
        /// Path to the JSON model description.
        #[arg(short, long)]
        model: PathBuf,

        /// Precision to build with: f32 or f64.
        #[arg(short, long, default_value = "f32")]
        dtype: String,

        /// Comma-separated input values, e.g. "0.5,-1,2".
        #[arg(short, long)]
        input: String,

        /// Number of forward steps; recurrent state carries between steps.
        #[arg(short, long, default_value_t = 1)]
        steps: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { model, dtype } => {
            commands::inspect::execute(model, commands::parse_dtype_arg(&dtype)?, config)
        }
        Commands::Check { model, dtype } => {
            commands::check::execute(model, commands::parse_dtype_arg(&dtype)?, config)
        }
        Commands::Run {
            model,
            dtype,
            input,
            steps,
        } => commands::run::execute(
            model,
            commands::parse_dtype_arg(&dtype)?,
            &input,
            steps,
            config,
        ),
    }
}
