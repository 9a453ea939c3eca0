// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-loader
//!
//! Builds runnable [`network::Model`]s from JSON architecture descriptions.
//!
//! - [`ArchitectureDescription`] — read-only view over the document
//!   (`in_shape` plus ordered [`LayerSpec`] entries).
//! - [`ShapeResolver`] — reduces a 2- or 4-axis shape to a feature count.
//! - [`weights`] — reads weight blocks into layer kernels, transposing
//!   dense kernels and copying LSTM kernels as written.
//! - [`create_layer`] / [`create_activation`] — tag to instance.
//! - [`ModelBuilder`] — the build pass over a description.
//! - [`Validator`] — checks built layers against their description.
//! - [`LoaderConfig`] — policies for unknown tags and unbounded axes.
//!
//! The build is generic over [`tensor_core::Scalar`], so the same
//! document can produce an `f32` or an `f64` model.
//!
//! # Example
//! ```no_run
//! use model_loader::ModelBuilder;
//! use network::Model;
//! use std::path::Path;
//!
//! let mut model: Model<f32> = ModelBuilder::default()
//!     .build_file(Path::new("./models/guitar_amp.json"))
//!     .unwrap();
//! println!("{}", model.summary());
//! let out = model.forward(&[0.25]).unwrap();
//! ```

mod builder;
mod config;
mod description;
mod error;
mod factory;
mod shape;
mod validator;
pub mod weights;

pub use builder::ModelBuilder;
pub use config::{LoaderConfig, UnknownKindPolicy};
pub use description::{ArchitectureDescription, LayerSpec};
pub use error::LoadError;
pub use factory::{create_activation, create_layer, LayerKind};
pub use shape::ShapeResolver;
pub use validator::{ReportEntry, ValidationReport, Validator, Verdict};
