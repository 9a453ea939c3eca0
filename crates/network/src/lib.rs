// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # network
//!
//! Runtime layer types and the sequential model they are assembled into.
//!
//! - [`Dense`] — fully connected layer, kernel stored `[out, in]`.
//! - [`Lstm`] — LSTM layer with gate order input, forget, cell, output.
//! - [`Activation`] — element-wise activation tagged by [`ActivationKind`].
//! - [`Layer`] — the closed sum over those three kinds.
//! - [`Model`] — an owned, ordered stack of layers with a **type-state**
//!   marker (`Building` → `Built`).
//!
//! Every type is generic over the element precision via
//! [`tensor_core::Scalar`].
//!
//! # Example
//! ```
//! use network::{Activation, ActivationKind, Building, Dense, Model};
//!
//! let mut model: Model<f32, Building> = Model::new(3);
//! model.add_layer(Dense::new(3, 2)).unwrap();
//! model.add_layer(Activation::new(ActivationKind::Relu, 2)).unwrap();
//! let mut model = model.finish();
//!
//! let out = model.forward(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(out, vec![0.0, 0.0]);
//! ```

mod activation;
mod dense;
mod error;
mod layer;
mod lstm;
pub mod model;

pub use activation::{Activation, ActivationKind};
pub use dense::Dense;
pub use error::ModelError;
pub use layer::Layer;
pub use lstm::{Lstm, LSTM_GATES};
pub use model::{Building, Built, Model, ModelState};
