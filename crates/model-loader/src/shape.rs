// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reduction of a declared shape to a single feature dimensionality.
//!
//! Shapes are written batch-first by the exporter. Rank 2 is
//! `[batch, features]`; rank 4 is `[batch, time, height, width]`, whose
//! last two axes are flattened into one feature vector.

use crate::error::json_kind;
use crate::{LoadError, LoaderConfig};
use serde_json::Value;

/// Resolves `shape` arrays to a feature count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeResolver {
    allow_unbounded_axes: bool,
}

impl ShapeResolver {
    /// Creates a strict resolver: rank 2 or 4, every element an integer.
    pub fn strict() -> Self {
        Self {
            allow_unbounded_axes: false,
        }
    }

    /// Creates a resolver that accepts `null` on axes which do not
    /// contribute to the result, and any non-zero rank.
    pub fn lenient() -> Self {
        Self {
            allow_unbounded_axes: true,
        }
    }

    /// Creates a resolver matching the loader configuration.
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            allow_unbounded_axes: config.allow_unbounded_axes,
        }
    }

    /// Resolves a shape to its feature count.
    ///
    /// Rank 4 yields the product of the third and fourth elements, every
    /// other accepted rank yields the last element. The result must be
    /// positive.
    pub fn resolve(&self, shape: &Value, context: &str) -> Result<usize, LoadError> {
        let malformed = |detail: String| LoadError::MalformedShape {
            context: context.to_string(),
            detail,
        };

        let axes = shape
            .as_array()
            .ok_or_else(|| malformed(format!("expected an array, found {}", json_kind(shape))))?;

        let rank = axes.len();
        if rank == 0 || (!self.allow_unbounded_axes && rank != 2 && rank != 4) {
            return Err(malformed(format!("rank {rank} is not supported, expected 2 or 4")));
        }

        let contributing = if rank == 4 { 2..4 } else { rank - 1..rank };

        let mut dims = 1usize;
        for (axis, value) in axes.iter().enumerate() {
            let contributes = contributing.contains(&axis);
            let extent = match value {
                Value::Null if self.allow_unbounded_axes && !contributes => continue,
                other => other.as_u64().ok_or_else(|| {
                    malformed(format!(
                        "axis {axis} must be a non-negative integer, found {other}"
                    ))
                })?,
            };
            if contributes {
                let extent = usize::try_from(extent)
                    .map_err(|_| malformed(format!("axis {axis} is too large")))?;
                dims = dims
                    .checked_mul(extent)
                    .ok_or_else(|| malformed("feature count overflows".to_string()))?;
            }
        }

        if dims == 0 {
            return Err(malformed("resolves to zero features".to_string()));
        }
        Ok(dims)
    }
}
