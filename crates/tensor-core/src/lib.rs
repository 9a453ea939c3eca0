// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Numeric building blocks for small sequential networks.
//!
//! This crate provides:
//! - [`Scalar`] — the element precision a network is generic over (`f32`, `f64`).
//! - [`DType`] — a runtime label for that precision, parseable from strings.
//! - [`Shape`] — a plain dimension list used in diagnostics.
//! - Kernels consumed by layers: an affine matrix-vector product and the
//!   element-wise activations (tanh, relu, sigmoid, elu, softmax).
//!
//! # Design Goals
//! - Kernels write into caller-provided buffers and never allocate.
//! - Matrices are `ndarray` views, so transposed kernels need no copy.
//! - Clean error types via `thiserror`.

mod dtype;
mod error;
mod ops;
mod shape;

pub use dtype::{parse_dtype, DType, Scalar};
pub use error::TensorError;
pub use ops::{affine, elu, matvec_accumulate, relu, sigmoid, softmax, tanh};
pub use shape::Shape;
