// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The owned sequential model.
//!
//! # Type-State Pattern
//!
//! ```text
//! Model<T, Building>  — layers are appended one by one.
//!       │  .finish()
//!       ▼
//! Model<T, Built>     — structure frozen, ready for forward passes.
//! ```
//!
//! `add_layer` only exists on `Building` and `forward` only on `Built`,
//! so a model cannot be run half-assembled or extended after the build.

use crate::{Layer, ModelError};
use std::fmt;
use tensor_core::Scalar;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: layers are still being appended.
#[derive(Debug, Clone)]
pub struct Building;

/// Marker: the layer stack is complete.
#[derive(Debug, Clone)]
pub struct Built;

/// Sealed trait for model states.
pub trait ModelState: fmt::Debug + Clone {}
impl ModelState for Building {}
impl ModelState for Built {}

// ── Model ──────────────────────────────────────────────────────────

/// An ordered stack of layers that owns every layer it holds.
///
/// The output size of layer `i` always equals the input size of layer
/// `i + 1`; [`Model::add_layer`] rejects anything else.
#[derive(Debug, Clone)]
pub struct Model<T: Scalar, S: ModelState = Built> {
    in_size: usize,
    layers: Vec<Layer<T>>,
    _state: std::marker::PhantomData<S>,
}

// ── Building state ─────────────────────────────────────────────────

impl<T: Scalar> Model<T, Building> {
    /// Creates an empty model that expects `in_size` inputs.
    pub fn new(in_size: usize) -> Self {
        Self {
            in_size,
            layers: Vec::new(),
            _state: std::marker::PhantomData,
        }
    }

    /// Appends a layer, taking ownership of it.
    ///
    /// # Errors
    /// Returns [`ModelError::InputSizeMismatch`] if the layer's input size
    /// differs from [`next_in_size`](Model::next_in_size).
    pub fn add_layer(&mut self, layer: impl Into<Layer<T>>) -> Result<(), ModelError> {
        let layer = layer.into();
        let expected = self.next_in_size();
        if layer.in_size() != expected {
            return Err(ModelError::InputSizeMismatch {
                layer: layer.name().to_string(),
                expected,
                actual: layer.in_size(),
            });
        }

        tracing::trace!(index = self.layers.len(), "appending {}", layer.summary());
        self.layers.push(layer);
        Ok(())
    }

    /// Freezes the layer stack.
    pub fn finish(self) -> Model<T, Built> {
        Model {
            in_size: self.in_size,
            layers: self.layers,
            _state: std::marker::PhantomData,
        }
    }
}

// ── Built state ────────────────────────────────────────────────────

impl<T: Scalar> Model<T, Built> {
    /// Output size of the whole model.
    pub fn out_size(&self) -> usize {
        self.next_in_size()
    }

    /// Runs one input vector through every layer in order.
    ///
    /// Recurrent layers advance their state; call [`reset`](Model::reset)
    /// to start a new sequence.
    pub fn forward(&mut self, input: &[T]) -> Result<Vec<T>, ModelError> {
        if input.len() != self.in_size {
            return Err(ModelError::ForwardInputMismatch {
                expected: self.in_size,
                actual: input.len(),
            });
        }

        let mut x = input.to_vec();
        for layer in &mut self.layers {
            x = layer.forward(&x)?;
        }
        Ok(x)
    }

    /// Clears the state of every recurrent layer.
    pub fn reset(&mut self) {
        self.layers.iter_mut().for_each(Layer::reset);
    }

    /// Returns a reference to a layer by index.
    pub fn layer(&self, index: usize) -> Option<&Layer<T>> {
        self.layers.get(index)
    }

    /// Returns an iterator over the layers in execution order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &Layer<T>> {
        self.layers.iter()
    }

    /// Total number of trainable values across all layers.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Returns a summary string describing the model.
    pub fn summary(&self) -> String {
        format!(
            "Model<{}>: {} layers, {} -> {}, {} parameters",
            T::DTYPE,
            self.num_layers(),
            self.in_size,
            self.out_size(),
            self.parameter_count(),
        )
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<T: Scalar, S: ModelState> Model<T, S> {
    /// Input size the model was created with.
    pub fn in_size(&self) -> usize {
        self.in_size
    }

    /// Input size the next appended layer must have: the last layer's
    /// output size, or the model input size when empty.
    pub fn next_in_size(&self) -> usize {
        self.layers
            .last()
            .map_or(self.in_size, |layer| layer.out_size())
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// The layers in execution order.
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }
}

impl<T: Scalar, S: ModelState> fmt::Display for Model<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model ({} layers, input {}):", self.layers.len(), self.in_size)?;
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  [{i}] {}", layer.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, ActivationKind, Dense, Lstm};
    use ndarray::{arr1, arr2};

    #[test]
    fn test_next_in_size_tracks_last_layer() {
        let mut model: Model<f32, Building> = Model::new(8);
        assert_eq!(model.next_in_size(), 8);

        model.add_layer(Dense::new(8, 4)).unwrap();
        assert_eq!(model.next_in_size(), 4);

        model.add_layer(Activation::new(ActivationKind::Tanh, 4)).unwrap();
        model.add_layer(Lstm::new(4, 6)).unwrap();
        assert_eq!(model.next_in_size(), 6);
        assert_eq!(model.num_layers(), 3);
    }

    #[test]
    fn test_add_layer_rejects_size_break() {
        let mut model: Model<f32, Building> = Model::new(8);
        let result = model.add_layer(Dense::new(7, 4));
        assert!(matches!(
            result,
            Err(ModelError::InputSizeMismatch { expected: 8, actual: 7, .. })
        ));
        assert_eq!(model.num_layers(), 0);

        model.add_layer(Dense::new(8, 4)).unwrap();
        assert!(model
            .add_layer(Activation::new(ActivationKind::Relu, 5))
            .is_err());
    }

    #[test]
    fn test_forward_dense_relu() {
        let mut dense = Dense::<f64>::new(2, 2);
        dense.set_kernel(arr2(&[[1.0, -1.0], [-1.0, 1.0]])).unwrap();
        dense.set_bias(arr1(&[0.0, 0.5])).unwrap();

        let mut model = Model::new(2);
        model.add_layer(dense).unwrap();
        model.add_layer(Activation::new(ActivationKind::Relu, 2)).unwrap();
        let mut model = model.finish();

        assert_eq!(model.forward(&[3.0, 1.0]).unwrap(), vec![2.0, 0.0]);
        assert_eq!(model.out_size(), 2);
    }

    #[test]
    fn test_forward_wrong_input() {
        let mut model = Model::<f32, Building>::new(3).finish();
        assert!(matches!(
            model.forward(&[1.0]),
            Err(ModelError::ForwardInputMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_model_is_identity() {
        let mut model = Model::<f32, Building>::new(2).finish();
        assert_eq!(model.forward(&[1.5, -2.0]).unwrap(), vec![1.5, -2.0]);
        assert_eq!(model.out_size(), 2);
    }

    #[test]
    fn test_summary_and_display() {
        let mut model: Model<f32, Building> = Model::new(8);
        model.add_layer(Dense::new(8, 4)).unwrap();
        model.add_layer(Activation::new(ActivationKind::Softmax, 4)).unwrap();
        let model = model.finish();

        let s = model.summary();
        assert!(s.contains("f32"));
        assert!(s.contains("2 layers"));
        assert!(s.contains("36 parameters"));

        let display = format!("{model}");
        assert!(display.contains("[0] dense"));
        assert!(display.contains("[1] softmax"));
    }

    #[test]
    fn test_iter_layers() {
        let mut model: Model<f32, Building> = Model::new(4);
        model.add_layer(Dense::new(4, 3)).unwrap();
        model.add_layer(Activation::new(ActivationKind::Elu, 3)).unwrap();
        let model = model.finish();

        let names: Vec<_> = model.iter_layers().map(Layer::name).collect();
        assert_eq!(names, &["dense", "elu"]);
        assert!(model.layer(2).is_none());
    }
}
