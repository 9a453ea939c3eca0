// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Mapping from document tags to layer and activation instances.

use crate::weights::{load_dense, load_lstm};
use crate::LoadError;
use network::{Activation, ActivationKind, Layer};
use serde_json::Value;
use std::fmt;
use tensor_core::Scalar;

/// The layer `type` tags the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// `"dense"`
    Dense,
    /// `"time-distributed-dense"`, built exactly like `Dense`.
    TimeDistributedDense,
    /// `"lstm"`
    Lstm,
    /// `"activation"`, a standalone nonlinearity with no weights.
    Activation,
}

impl LayerKind {
    /// Maps a `type` tag to a kind. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dense" => Some(Self::Dense),
            "time-distributed-dense" => Some(Self::TimeDistributedDense),
            "lstm" => Some(Self::Lstm),
            "activation" => Some(Self::Activation),
            _ => None,
        }
    }

    /// The document tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::TimeDistributedDense => "time-distributed-dense",
            Self::Lstm => "lstm",
            Self::Activation => "activation",
        }
    }

    /// Whether entries of this kind are built from weight blocks.
    pub fn has_weights(&self) -> bool {
        !matches!(self, Self::Activation)
    }

    /// Whether entries of this kind may carry a trailing activation.
    pub fn takes_trailing_activation(&self) -> bool {
        matches!(self, Self::Dense | Self::TimeDistributedDense)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constructs a weight-bearing layer for `tag` and fills it from `weights`.
///
/// Standalone `"activation"` entries are not weight-bearing and are built
/// with [`create_activation`]; passing that tag here is an
/// [`LoadError::UnknownLayerKind`].
pub fn create_layer<T: Scalar>(
    tag: &str,
    in_size: usize,
    out_size: usize,
    weights: &[Value],
    context: &str,
) -> Result<Layer<T>, LoadError> {
    match LayerKind::from_tag(tag) {
        Some(LayerKind::Dense | LayerKind::TimeDistributedDense) => {
            Ok(Layer::Dense(load_dense(in_size, out_size, weights, context)?))
        }
        Some(LayerKind::Lstm) => Ok(Layer::Lstm(load_lstm(in_size, out_size, weights, context)?)),
        Some(LayerKind::Activation) | None => Err(LoadError::UnknownLayerKind {
            context: context.to_string(),
            tag: tag.to_string(),
        }),
    }
}

/// Constructs an activation of width `size`.
///
/// An absent tag yields `Ok(None)`. A tag outside the supported set is an
/// [`LoadError::UnknownActivation`]; whether that fails the build is up to
/// the caller.
pub fn create_activation<T: Scalar>(
    tag: Option<&str>,
    size: usize,
    context: &str,
) -> Result<Option<Activation<T>>, LoadError> {
    let Some(tag) = tag else {
        return Ok(None);
    };
    let kind = ActivationKind::from_tag(tag).ok_or_else(|| LoadError::UnknownActivation {
        context: context.to_string(),
        tag: tag.to_string(),
    })?;
    Ok(Some(Activation::new(kind, size)))
}
