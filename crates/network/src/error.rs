// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for layer construction and execution.

use tensor_core::{Shape, TensorError};

/// Errors that can occur when populating layers or running a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A weight tensor handed to a layer mutator has the wrong shape.
    #[error("{layer} {what} has shape {actual}, expected {expected}")]
    WeightShapeMismatch {
        layer: &'static str,
        what: &'static str,
        expected: Shape,
        actual: Shape,
    },

    /// A layer's input size does not chain onto the model's current output.
    #[error("cannot append {layer} layer with input size {actual}: model expects {expected}")]
    InputSizeMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },

    /// The vector passed to a forward pass has the wrong length.
    #[error("forward input has {actual} values, expected {expected}")]
    ForwardInputMismatch { expected: usize, actual: usize },

    /// A kernel rejected its operands.
    #[error("tensor error: {0}")]
    Tensor(#[from] TensorError),
}

/// Checks a matrix handed to a layer mutator against the expected `(rows, cols)`.
pub(crate) fn check_matrix(
    layer: &'static str,
    what: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::WeightShapeMismatch {
            layer,
            what,
            expected: Shape::matrix(expected.0, expected.1),
            actual: Shape::matrix(actual.0, actual.1),
        });
    }
    Ok(())
}

/// Checks a vector handed to a layer mutator against the expected length.
pub(crate) fn check_vector(
    layer: &'static str,
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::WeightShapeMismatch {
            layer,
            what,
            expected: Shape::vector(expected),
            actual: Shape::vector(actual),
        });
    }
    Ok(())
}

/// Checks the length of a forward-pass input.
pub(crate) fn check_input(expected: usize, actual: usize) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::ForwardInputMismatch { expected, actual });
    }
    Ok(())
}
