// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Arithmetic kernels consumed by the network layers.
//!
//! Each kernel writes into a caller-provided output buffer and checks
//! operand sizes up front, returning [`crate::TensorError`] instead of
//! panicking inside `ndarray`.

mod activation_op;
mod affine_op;
mod softmax_op;

pub use activation_op::{elu, relu, sigmoid, tanh};
pub use affine_op::{affine, matvec_accumulate};
pub use softmax_op::softmax;

use crate::TensorError;

/// Checks that an element-wise kernel's input and output agree in length.
pub(crate) fn check_same_len(
    op: &'static str,
    input: usize,
    output: usize,
) -> Result<(), TensorError> {
    if input != output {
        return Err(TensorError::LengthMismatch {
            op,
            expected: input,
            actual: output,
        });
    }
    Ok(())
}
