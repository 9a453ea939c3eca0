// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading.
//!
//! Every variant that points into the document carries a `context` path
//! such as `layers[2].weights[0][3]`, so a failure names the exact value
//! that caused it.

use network::ModelError;

/// Errors that can occur while turning a model description into a model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The model file could not be read.
    #[error("failed to read model description: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("failed to parse model description: {0}")]
    Json(#[from] serde_json::Error),

    /// A required key is absent.
    #[error("{context}: missing required field '{field}'")]
    MissingField {
        context: String,
        field: &'static str,
    },

    /// A key is present but holds the wrong kind of value.
    #[error("{context}: expected {expected}")]
    InvalidField {
        context: String,
        expected: &'static str,
    },

    /// A shape is not a 2- or 4-element list of non-negative integers.
    #[error("{context}: malformed shape: {detail}")]
    MalformedShape { context: String, detail: String },

    /// A weight block or layer size disagrees with the size the layer implies.
    #[error("{context}: {what} has size {actual}, expected {expected}")]
    DimensionMismatch {
        context: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A layer `type` tag outside the supported set.
    #[error("{context}: unknown layer type '{tag}'")]
    UnknownLayerKind { context: String, tag: String },

    /// A non-empty `activation` tag outside the supported set.
    #[error("{context}: unknown activation '{tag}'")]
    UnknownActivation { context: String, tag: String },

    /// A weight leaf is not a number or does not fit the target precision.
    #[error("{context}: {detail}")]
    NumericConversion { context: String, detail: String },

    /// The loader configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A constructed layer was rejected by the model.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Names the JSON type of a value for diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
