// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Softmax activation kernel.

use super::check_same_len;
use crate::{Scalar, TensorError};

/// Computes `output[i] = exp(x[i] - max) / sum(exp(x - max))` over the
/// whole vector.
///
/// Uses the numerically stable variant that subtracts the maximum value
/// before exponentiation to prevent overflow.
///
/// # Errors
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
pub fn softmax<T: Scalar>(input: &[T], output: &mut [T]) -> Result<(), TensorError> {
    check_same_len("softmax", input.len(), output.len())?;
    if input.is_empty() {
        return Ok(());
    }

    let max_val = input.iter().copied().fold(T::neg_infinity(), T::max);

    let mut sum = T::zero();
    for (d, &s) in output.iter_mut().zip(input) {
        let e = (s - max_val).exp();
        *d = e;
        sum = sum + e;
    }

    if sum > T::zero() {
        let inv_sum = T::one() / sum;
        for d in output.iter_mut() {
            *d = *d * inv_sum;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_softmax_uniform() {
        let input = [1.0f32, 1.0, 1.0, 1.0];
        let mut output = [0.0f32; 4];
        softmax(&input, &mut output).unwrap();
        assert!(approx_eq(&output, &[0.25, 0.25, 0.25, 0.25], 1e-5));
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let input = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let mut output = [0.0f64; 5];
        softmax(&input, &mut output).unwrap();
        let sum: f64 = output.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_monotonic() {
        let input = [1.0f32, 2.0, 3.0];
        let mut output = [0.0f32; 3];
        softmax(&input, &mut output).unwrap();
        assert!(output[0] < output[1]);
        assert!(output[1] < output[2]);
    }

    #[test]
    fn test_softmax_numerical_stability() {
        // Large values that would overflow without the max-subtraction trick.
        let input = [1000.0f32, 1001.0, 1002.0];
        let mut output = [0.0f32; 3];
        softmax(&input, &mut output).unwrap();
        let sum: f32 = output.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(output.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_softmax_empty() {
        let input: [f32; 0] = [];
        let mut output: [f32; 0] = [];
        softmax(&input, &mut output).unwrap();
    }
}
