// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Long short-term memory layer.
//!
//! Weights are laid out with the four gates concatenated along the output
//! axis in the order input, forget, cell (candidate), output:
//!
//! ```text
//! input_kernel      [in_size,  4 * out_size]
//! recurrent_kernel  [out_size, 4 * out_size]
//! bias              [4 * out_size]
//! ```
//!
//! No reordering is performed, so weights must already follow this order.

use crate::error::{check_input, check_matrix, check_vector};
use crate::ModelError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use tensor_core::Scalar;

/// Number of gates packed into each LSTM weight tensor.
pub const LSTM_GATES: usize = 4;

/// A single-layer LSTM that keeps its hidden and cell state between calls.
#[derive(Debug, Clone)]
pub struct Lstm<T: Scalar> {
    in_size: usize,
    out_size: usize,
    input_kernel: Array2<T>,
    recurrent_kernel: Array2<T>,
    bias: Array1<T>,
    hidden: Vec<T>,
    cell: Vec<T>,
}

impl<T: Scalar> Lstm<T> {
    /// Creates a zero-initialised LSTM with zeroed state.
    pub fn new(in_size: usize, out_size: usize) -> Self {
        let gates = LSTM_GATES * out_size;
        Self {
            in_size,
            out_size,
            input_kernel: Array2::zeros((in_size, gates)),
            recurrent_kernel: Array2::zeros((out_size, gates)),
            bias: Array1::zeros(gates),
            hidden: vec![T::zero(); out_size],
            cell: vec![T::zero(); out_size],
        }
    }

    /// Creates an LSTM from its three weight tensors with zeroed state.
    ///
    /// Sizes are taken from the tensors: `recurrent_kernel` fixes the unit
    /// count `n`, and the other two must agree with it.
    pub fn from_parts(
        input_kernel: Array2<T>,
        recurrent_kernel: Array2<T>,
        bias: Array1<T>,
    ) -> Result<Self, ModelError> {
        let out_size = recurrent_kernel.nrows();
        let in_size = input_kernel.nrows();
        let gates = LSTM_GATES.saturating_mul(out_size);
        check_matrix("lstm", "recurrent kernel", (out_size, gates), recurrent_kernel.dim())?;
        check_matrix("lstm", "input kernel", (in_size, gates), input_kernel.dim())?;
        check_vector("lstm", "bias", gates, bias.len())?;
        Ok(Self {
            in_size,
            out_size,
            input_kernel,
            recurrent_kernel,
            bias,
            hidden: vec![T::zero(); out_size],
            cell: vec![T::zero(); out_size],
        })
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    /// The `[in_size, 4 * out_size]` input-to-hidden kernel.
    pub fn input_kernel(&self) -> ArrayView2<'_, T> {
        self.input_kernel.view()
    }

    /// The `[out_size, 4 * out_size]` hidden-to-hidden kernel.
    pub fn recurrent_kernel(&self) -> ArrayView2<'_, T> {
        self.recurrent_kernel.view()
    }

    pub fn bias(&self) -> ArrayView1<'_, T> {
        self.bias.view()
    }

    /// Current hidden state (the last output).
    pub fn hidden_state(&self) -> &[T] {
        &self.hidden
    }

    pub fn set_input_kernel(&mut self, kernel: Array2<T>) -> Result<(), ModelError> {
        check_matrix(
            "lstm",
            "input kernel",
            (self.in_size, LSTM_GATES * self.out_size),
            kernel.dim(),
        )?;
        self.input_kernel = kernel;
        Ok(())
    }

    pub fn set_recurrent_kernel(&mut self, kernel: Array2<T>) -> Result<(), ModelError> {
        check_matrix(
            "lstm",
            "recurrent kernel",
            (self.out_size, LSTM_GATES * self.out_size),
            kernel.dim(),
        )?;
        self.recurrent_kernel = kernel;
        Ok(())
    }

    pub fn set_bias(&mut self, bias: Array1<T>) -> Result<(), ModelError> {
        check_vector("lstm", "bias", LSTM_GATES * self.out_size, bias.len())?;
        self.bias = bias;
        Ok(())
    }

    /// Number of trainable values (both kernels + bias).
    pub fn parameter_count(&self) -> usize {
        self.input_kernel.len() + self.recurrent_kernel.len() + self.bias.len()
    }

    /// Zeroes the hidden and cell state.
    pub fn reset(&mut self) {
        self.hidden.iter_mut().for_each(|h| *h = T::zero());
        self.cell.iter_mut().for_each(|c| *c = T::zero());
    }

    /// Advances the recurrence by one time step and returns the new hidden state.
    pub fn forward(&mut self, input: &[T]) -> Result<Vec<T>, ModelError> {
        check_input(self.in_size, input.len())?;
        let n = self.out_size;

        // gates = Wkᵀ·x + Wrᵀ·h + b
        let mut gates = vec![T::zero(); LSTM_GATES * n];
        tensor_core::affine(
            self.input_kernel.t(),
            ArrayView1::from(input),
            self.bias.view(),
            ArrayViewMut1::from(&mut gates[..]),
        )?;
        tensor_core::matvec_accumulate(
            self.recurrent_kernel.t(),
            ArrayView1::from(&self.hidden[..]),
            ArrayViewMut1::from(&mut gates[..]),
        )?;

        let mut input_gate = vec![T::zero(); n];
        let mut forget_gate = vec![T::zero(); n];
        let mut candidate = vec![T::zero(); n];
        let mut output_gate = vec![T::zero(); n];
        tensor_core::sigmoid(&gates[..n], &mut input_gate)?;
        tensor_core::sigmoid(&gates[n..2 * n], &mut forget_gate)?;
        tensor_core::tanh(&gates[2 * n..3 * n], &mut candidate)?;
        tensor_core::sigmoid(&gates[3 * n..], &mut output_gate)?;

        for k in 0..n {
            self.cell[k] = forget_gate[k] * self.cell[k] + input_gate[k] * candidate[k];
        }

        let mut cell_act = vec![T::zero(); n];
        tensor_core::tanh(&self.cell, &mut cell_act)?;
        for k in 0..n {
            self.hidden[k] = output_gate[k] * cell_act[k];
        }

        Ok(self.hidden.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shapes() {
        let l = Lstm::<f32>::new(6, 10);
        assert_eq!(l.input_kernel().dim(), (6, 40));
        assert_eq!(l.recurrent_kernel().dim(), (10, 40));
        assert_eq!(l.bias().len(), 40);
        assert_eq!(l.parameter_count(), 6 * 40 + 10 * 40 + 40);
    }

    #[test]
    fn test_from_parts() {
        let l = Lstm::<f32>::from_parts(
            Array2::zeros((3, 8)),
            Array2::zeros((2, 8)),
            Array1::zeros(8),
        )
        .unwrap();
        assert_eq!((l.in_size(), l.out_size()), (3, 2));
        assert_eq!(l.hidden_state(), &[0.0, 0.0]);

        let bad_gates = Lstm::<f32>::from_parts(
            Array2::zeros((3, 8)),
            Array2::zeros((2, 6)),
            Array1::zeros(8),
        );
        assert!(bad_gates.is_err());

        let bad_bias = Lstm::<f32>::from_parts(
            Array2::zeros((3, 8)),
            Array2::zeros((2, 8)),
            Array1::zeros(7),
        );
        assert!(matches!(
            bad_bias,
            Err(ModelError::WeightShapeMismatch { what: "bias", .. })
        ));
    }

    #[test]
    fn test_setters_reject_wrong_shapes() {
        let mut l = Lstm::<f32>::new(2, 3);
        assert!(l.set_input_kernel(Array2::zeros((12, 2))).is_err());
        assert!(l.set_recurrent_kernel(Array2::zeros((2, 12))).is_err());
        assert!(l.set_bias(Array1::zeros(3)).is_err());
        l.set_input_kernel(Array2::zeros((2, 12))).unwrap();
        l.set_recurrent_kernel(Array2::zeros((3, 12))).unwrap();
        l.set_bias(Array1::zeros(12)).unwrap();
    }

    #[test]
    fn test_zero_weights_step() {
        // All-zero weights: every gate is σ(0) = 0.5 and the candidate is 0,
        // so cell and hidden stay at zero.
        let mut l = Lstm::<f64>::new(2, 2);
        let h = l.forward(&[1.0, -1.0]).unwrap();
        assert_eq!(h, vec![0.0, 0.0]);
    }

    #[test]
    fn test_state_carries_and_resets() {
        let mut l = Lstm::<f64>::new(1, 1);
        // Input gate, forget gate and output gate saturated open; candidate = tanh(x).
        l.set_input_kernel(Array2::from_shape_vec((1, 4), vec![0.0, 0.0, 1.0, 0.0]).unwrap())
            .unwrap();
        l.set_bias(Array1::from(vec![50.0, 50.0, 0.0, 50.0])).unwrap();

        let first = l.forward(&[1.0]).unwrap()[0];
        let second = l.forward(&[1.0]).unwrap()[0];
        let c1 = 1.0f64.tanh();
        assert!((first - c1.tanh()).abs() < 1e-9);
        assert!((second - (2.0 * c1).tanh()).abs() < 1e-9);

        l.reset();
        assert!(l.hidden_state().iter().all(|&h| h == 0.0));
        let again = l.forward(&[1.0]).unwrap()[0];
        assert!((again - first).abs() < 1e-12);
    }
}
