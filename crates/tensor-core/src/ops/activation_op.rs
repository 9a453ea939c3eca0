// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise activation kernels.

use super::check_same_len;
use crate::{Scalar, TensorError};

/// Applies `tanh` element-wise.
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
pub fn tanh<T: Scalar>(input: &[T], output: &mut [T]) -> Result<(), TensorError> {
    check_same_len("tanh", input.len(), output.len())?;
    for (d, &x) in output.iter_mut().zip(input) {
        *d = x.tanh();
    }
    Ok(())
}

/// Applies `max(x, 0)` element-wise.
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
pub fn relu<T: Scalar>(input: &[T], output: &mut [T]) -> Result<(), TensorError> {
    check_same_len("relu", input.len(), output.len())?;
    for (d, &x) in output.iter_mut().zip(input) {
        *d = x.max(T::zero());
    }
    Ok(())
}

/// Applies the logistic function `1 / (1 + exp(-x))` element-wise.
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
pub fn sigmoid<T: Scalar>(input: &[T], output: &mut [T]) -> Result<(), TensorError> {
    check_same_len("sigmoid", input.len(), output.len())?;
    for (d, &x) in output.iter_mut().zip(input) {
        *d = sigmoid_scalar(x);
    }
    Ok(())
}

/// Applies the exponential linear unit with `alpha = 1`:
/// `x` for `x > 0`, `exp(x) - 1` otherwise.
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
pub fn elu<T: Scalar>(input: &[T], output: &mut [T]) -> Result<(), TensorError> {
    check_same_len("elu", input.len(), output.len())?;
    for (d, &x) in output.iter_mut().zip(input) {
        *d = if x > T::zero() { x } else { x.exp_m1() };
    }
    Ok(())
}

#[inline(always)]
fn sigmoid_scalar<T: Scalar>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}
