// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise activation layers.

use crate::error::check_input;
use crate::ModelError;
use std::fmt;
use std::marker::PhantomData;
use tensor_core::Scalar;

/// The activation functions a model can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    /// Hyperbolic tangent.
    Tanh,
    /// Rectified linear unit.
    Relu,
    /// Logistic sigmoid.
    Sigmoid,
    /// Softmax over the whole vector.
    Softmax,
    /// Exponential linear unit (alpha = 1).
    Elu,
}

impl ActivationKind {
    /// Parses an activation tag as written in a model file.
    ///
    /// Tags are matched exactly; `None` means the tag is not recognised.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tanh" => Some(Self::Tanh),
            "relu" => Some(Self::Relu),
            "sigmoid" => Some(Self::Sigmoid),
            "softmax" => Some(Self::Softmax),
            "elu" => Some(Self::Elu),
            _ => None,
        }
    }

    /// Returns the tag this kind is written as.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tanh => "tanh",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Softmax => "softmax",
            Self::Elu => "elu",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An activation layer of fixed size. Input and output sizes are equal.
#[derive(Debug, Clone)]
pub struct Activation<T: Scalar> {
    kind: ActivationKind,
    size: usize,
    _precision: PhantomData<T>,
}

impl<T: Scalar> Activation<T> {
    pub fn new(kind: ActivationKind, size: usize) -> Self {
        Self {
            kind,
            size,
            _precision: PhantomData,
        }
    }

    pub fn kind(&self) -> ActivationKind {
        self.kind
    }

    /// The tag this activation reports itself as (e.g. `"tanh"`).
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_size(&self) -> usize {
        self.size
    }

    pub fn out_size(&self) -> usize {
        self.size
    }

    pub fn forward(&self, input: &[T]) -> Result<Vec<T>, ModelError> {
        check_input(self.size, input.len())?;
        let mut output = vec![T::zero(); self.size];
        match self.kind {
            ActivationKind::Tanh => tensor_core::tanh(input, &mut output)?,
            ActivationKind::Relu => tensor_core::relu(input, &mut output)?,
            ActivationKind::Sigmoid => tensor_core::sigmoid(input, &mut output)?,
            ActivationKind::Softmax => tensor_core::softmax(input, &mut output)?,
            ActivationKind::Elu => tensor_core::elu(input, &mut output)?,
        }
        Ok(output)
    }
}
