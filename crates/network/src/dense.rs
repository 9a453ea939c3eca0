// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fully connected layer.

use crate::error::{check_input, check_matrix, check_vector};
use crate::ModelError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use tensor_core::Scalar;

/// A dense (fully connected) layer computing `kernel · x + bias`.
///
/// The kernel is stored `[out_size, in_size]` so each output is a
/// contiguous row dot product.
#[derive(Debug, Clone)]
pub struct Dense<T: Scalar> {
    in_size: usize,
    out_size: usize,
    kernel: Array2<T>,
    bias: Array1<T>,
}

impl<T: Scalar> Dense<T> {
    /// Creates a zero-initialised dense layer.
    pub fn new(in_size: usize, out_size: usize) -> Self {
        Self {
            in_size,
            out_size,
            kernel: Array2::zeros((out_size, in_size)),
            bias: Array1::zeros(out_size),
        }
    }

    /// Creates a dense layer from an `[out_size, in_size]` kernel and an
    /// `out_size` bias, taking ownership of both.
    pub fn from_parts(kernel: Array2<T>, bias: Array1<T>) -> Result<Self, ModelError> {
        let (out_size, in_size) = kernel.dim();
        check_vector("dense", "bias", out_size, bias.len())?;
        Ok(Self {
            in_size,
            out_size,
            kernel,
            bias,
        })
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    /// The `[out_size, in_size]` kernel.
    pub fn kernel(&self) -> ArrayView2<'_, T> {
        self.kernel.view()
    }

    pub fn bias(&self) -> ArrayView1<'_, T> {
        self.bias.view()
    }

    /// Replaces the kernel. It must be `[out_size, in_size]`.
    pub fn set_kernel(&mut self, kernel: Array2<T>) -> Result<(), ModelError> {
        check_matrix(
            "dense",
            "kernel",
            (self.out_size, self.in_size),
            kernel.dim(),
        )?;
        self.kernel = kernel;
        Ok(())
    }

    /// Replaces the bias. It must have `out_size` entries.
    pub fn set_bias(&mut self, bias: Array1<T>) -> Result<(), ModelError> {
        check_vector("dense", "bias", self.out_size, bias.len())?;
        self.bias = bias;
        Ok(())
    }

    /// Number of trainable values (kernel + bias).
    pub fn parameter_count(&self) -> usize {
        self.kernel.len() + self.bias.len()
    }

    /// Runs the layer on a single input vector.
    pub fn forward(&self, input: &[T]) -> Result<Vec<T>, ModelError> {
        check_input(self.in_size, input.len())?;
        let mut output = vec![T::zero(); self.out_size];
        tensor_core::affine(
            self.kernel.view(),
            ArrayView1::from(input),
            self.bias.view(),
            ArrayViewMut1::from(&mut output[..]),
        )?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_new_is_zeroed() {
        let d = Dense::<f32>::new(3, 2);
        assert_eq!(d.kernel().dim(), (2, 3));
        assert!(d.kernel().iter().all(|&w| w == 0.0));
        assert_eq!(d.bias().len(), 2);
        assert_eq!(d.parameter_count(), 8);
    }

    #[test]
    fn test_from_parts() {
        let d = Dense::<f64>::from_parts(arr2(&[[1.0, 2.0, 3.0]]), arr1(&[0.5])).unwrap();
        assert_eq!((d.in_size(), d.out_size()), (3, 1));
        assert_eq!(d.forward(&[1.0, 1.0, 1.0]).unwrap(), vec![6.5]);

        let err = Dense::<f64>::from_parts(arr2(&[[1.0, 2.0]]), arr1(&[0.0, 0.0])).unwrap_err();
        assert!(matches!(err, ModelError::WeightShapeMismatch { what: "bias", .. }));
    }

    #[test]
    fn test_set_kernel_wrong_shape() {
        let mut d = Dense::<f32>::new(3, 2);
        // [in, out] instead of [out, in].
        let result = d.set_kernel(Array2::zeros((3, 2)));
        assert!(matches!(
            result,
            Err(ModelError::WeightShapeMismatch { what: "kernel", .. })
        ));
    }

    #[test]
    fn test_set_bias_wrong_len() {
        let mut d = Dense::<f64>::new(3, 2);
        assert!(d.set_bias(Array1::zeros(3)).is_err());
    }

    #[test]
    fn test_forward() {
        let mut d = Dense::<f32>::new(2, 2);
        d.set_kernel(arr2(&[[1.0, 2.0], [3.0, 4.0]])).unwrap();
        d.set_bias(arr1(&[0.5, -1.0])).unwrap();

        let out = d.forward(&[1.0, 1.0]).unwrap();
        assert_eq!(out, vec![3.5, 6.0]);
    }

    #[test]
    fn test_forward_wrong_input_len() {
        let d = Dense::<f32>::new(2, 2);
        assert!(matches!(
            d.forward(&[1.0]),
            Err(ModelError::ForwardInputMismatch { expected: 2, actual: 1 })
        ));
    }
}
