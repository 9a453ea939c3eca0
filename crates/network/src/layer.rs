// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The closed set of layer kinds a model holds.

use crate::{Activation, Dense, Lstm, ModelError};
use tensor_core::Scalar;

/// One layer of a sequential model.
///
/// Dispatch is an exhaustive `match`; adding a kind means adding a variant.
#[derive(Debug, Clone)]
pub enum Layer<T: Scalar> {
    /// Fully connected layer.
    Dense(Dense<T>),
    /// Recurrent layer with carried state.
    Lstm(Lstm<T>),
    /// Element-wise nonlinearity.
    Activation(Activation<T>),
}

impl<T: Scalar> Layer<T> {
    /// Number of values the layer consumes.
    pub fn in_size(&self) -> usize {
        match self {
            Self::Dense(l) => l.in_size(),
            Self::Lstm(l) => l.in_size(),
            Self::Activation(l) => l.in_size(),
        }
    }

    /// Number of values the layer produces.
    pub fn out_size(&self) -> usize {
        match self {
            Self::Dense(l) => l.out_size(),
            Self::Lstm(l) => l.out_size(),
            Self::Activation(l) => l.out_size(),
        }
    }

    /// Human-readable kind label: `"dense"`, `"lstm"`, or the activation tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense(_) => "dense",
            Self::Lstm(_) => "lstm",
            Self::Activation(a) => a.name(),
        }
    }

    /// Returns `true` for kinds that carry weights.
    pub fn has_weights(&self) -> bool {
        !matches!(self, Self::Activation(_))
    }

    pub fn parameter_count(&self) -> usize {
        match self {
            Self::Dense(l) => l.parameter_count(),
            Self::Lstm(l) => l.parameter_count(),
            Self::Activation(_) => 0,
        }
    }

    /// Runs the layer on one input vector. Recurrent layers advance their state.
    pub fn forward(&mut self, input: &[T]) -> Result<Vec<T>, ModelError> {
        match self {
            Self::Dense(l) => l.forward(input),
            Self::Lstm(l) => l.forward(input),
            Self::Activation(l) => l.forward(input),
        }
    }

    /// Clears any recurrent state. A no-op for stateless kinds.
    pub fn reset(&mut self) {
        if let Self::Lstm(l) = self {
            l.reset();
        }
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "{} ({} -> {}), {} parameters",
            self.name(),
            self.in_size(),
            self.out_size(),
            self.parameter_count(),
        )
    }
}

impl<T: Scalar> From<Dense<T>> for Layer<T> {
    fn from(layer: Dense<T>) -> Self {
        Self::Dense(layer)
    }
}

impl<T: Scalar> From<Lstm<T>> for Layer<T> {
    fn from(layer: Lstm<T>) -> Self {
        Self::Lstm(layer)
    }
}

impl<T: Scalar> From<Activation<T>> for Layer<T> {
    fn from(layer: Activation<T>) -> Self {
        Self::Activation(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActivationKind;

    #[test]
    fn test_sizes_and_names() {
        let dense: Layer<f32> = Dense::new(8, 4).into();
        let lstm: Layer<f32> = Lstm::new(6, 10).into();
        let act: Layer<f32> = Activation::new(ActivationKind::Tanh, 4).into();

        assert_eq!((dense.in_size(), dense.out_size(), dense.name()), (8, 4, "dense"));
        assert_eq!((lstm.in_size(), lstm.out_size(), lstm.name()), (6, 10, "lstm"));
        assert_eq!((act.in_size(), act.out_size(), act.name()), (4, 4, "tanh"));
        assert!(dense.has_weights());
        assert!(!act.has_weights());
    }

    #[test]
    fn test_parameter_count() {
        let dense: Layer<f64> = Dense::new(8, 4).into();
        let act: Layer<f64> = Activation::new(ActivationKind::Relu, 4).into();
        assert_eq!(dense.parameter_count(), 36);
        assert_eq!(act.parameter_count(), 0);
    }

    #[test]
    fn test_summary() {
        let layer: Layer<f32> = Dense::new(8, 4).into();
        let s = layer.summary();
        assert!(s.contains("dense"));
        assert!(s.contains("8 -> 4"));
        assert!(s.contains("36 parameters"));
    }
}
