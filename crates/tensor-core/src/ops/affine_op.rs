// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Affine matrix-vector products.

use crate::{Scalar, Shape, TensorError};
use ndarray::{linalg, ArrayView1, ArrayView2, ArrayViewMut1};

/// Computes `output = weights · input + bias`.
///
/// `weights` is `[M, K]`, `input` is `[K]`, `bias` and `output` are `[M]`.
/// Any view layout is accepted, so a transposed kernel can be passed as
/// `kernel.t()` without copying.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the operand sizes disagree.
pub fn affine<T: Scalar>(
    weights: ArrayView2<'_, T>,
    input: ArrayView1<'_, T>,
    bias: ArrayView1<'_, T>,
    mut output: ArrayViewMut1<'_, T>,
) -> Result<(), TensorError> {
    check_matvec("affine", &weights, input.len(), output.len())?;
    if bias.len() != output.len() {
        return Err(TensorError::ShapeMismatch {
            op: "affine (bias)",
            lhs: Shape::vector(output.len()),
            rhs: Shape::vector(bias.len()),
        });
    }

    output.assign(&bias);
    linalg::general_mat_vec_mul(T::one(), &weights, &input, T::one(), &mut output);
    Ok(())
}

/// Computes `output += weights · input`.
///
/// Used to fold a second (e.g. recurrent) contribution into an already
/// computed affine result.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the operand sizes disagree.
pub fn matvec_accumulate<T: Scalar>(
    weights: ArrayView2<'_, T>,
    input: ArrayView1<'_, T>,
    mut output: ArrayViewMut1<'_, T>,
) -> Result<(), TensorError> {
    check_matvec("matvec_accumulate", &weights, input.len(), output.len())?;
    linalg::general_mat_vec_mul(T::one(), &weights, &input, T::one(), &mut output);
    Ok(())
}

fn check_matvec<T>(
    op: &'static str,
    weights: &ArrayView2<'_, T>,
    input_len: usize,
    output_len: usize,
) -> Result<(), TensorError> {
    let (rows, cols) = weights.dim();
    if cols != input_len {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: Shape::matrix(rows, cols),
            rhs: Shape::vector(input_len),
        });
    }
    if rows != output_len {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: Shape::matrix(rows, cols),
            rhs: Shape::vector(output_len),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array1, Array2};

    #[test]
    fn test_affine_2x3() {
        // W = [[1, 2, 3], [4, 5, 6]], x = [1, 1, 1], b = [0.5, -0.5]
        let w = arr2(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let x = arr1(&[1.0f32, 1.0, 1.0]);
        let b = arr1(&[0.5f32, -0.5]);
        let mut out = Array1::<f32>::zeros(2);

        affine(w.view(), x.view(), b.view(), out.view_mut()).unwrap();

        assert!((out[0] - 6.5).abs() < 1e-6);
        assert!((out[1] - 14.5).abs() < 1e-6);
    }

    #[test]
    fn test_affine_transposed_view() {
        // Kernel stored as [K, M]; passing `.t()` must equal the [M, K] product.
        let stored = arr2(&[[1.0f64, 4.0], [2.0, 5.0], [3.0, 6.0]]);
        let x = arr1(&[1.0f64, 0.0, -1.0]);
        let b = arr1(&[0.0f64, 0.0]);
        let mut out = Array1::<f64>::zeros(2);

        affine(stored.t(), x.view(), b.view(), out.view_mut()).unwrap();

        assert_eq!(out, arr1(&[-2.0, -2.0]));
    }

    #[test]
    fn test_affine_shape_mismatch() {
        let w = Array2::<f32>::zeros((2, 3));
        let x = Array1::<f32>::zeros(4);
        let b = Array1::<f32>::zeros(2);
        let mut out = Array1::<f32>::zeros(2);

        let result = affine(w.view(), x.view(), b.view(), out.view_mut());
        assert!(matches!(result, Err(TensorError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_affine_bias_mismatch() {
        let w = arr2(&[[1.0f32, 0.0], [0.0, 1.0]]);
        let x = arr1(&[1.0f32, 2.0]);
        let b = arr1(&[0.0f32]);
        let mut out = Array1::<f32>::zeros(2);

        assert!(affine(w.view(), x.view(), b.view(), out.view_mut()).is_err());
    }

    #[test]
    fn test_matvec_accumulate() {
        let w = arr2(&[[2.0f32, 0.0], [0.0, 3.0]]);
        let x = arr1(&[1.0f32, 1.0]);
        let mut out = arr1(&[1.0f32, 1.0]);

        matvec_accumulate(w.view(), x.view(), out.view_mut()).unwrap();

        assert_eq!(out, arr1(&[3.0, 4.0]));
    }
}
