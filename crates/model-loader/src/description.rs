// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Read-only view over a model description document.
//!
//! The document is produced by a training-side exporter and has two
//! required top-level keys.
//!
//! # Format
//! ```json
//! {
//!   "in_shape": [null, 8],
//!   "layers": [
//!     {
//!       "type": "dense",
//!       "shape": [null, 16],
//!       "weights": [[[0.1, ...], ...], [0.0, ...]],
//!       "activation": "tanh"
//!     },
//!     { "type": "lstm", "shape": [null, 16], "weights": [...] },
//!     { "type": "activation", "shape": [null, 16], "activation": "relu" }
//!   ]
//! }
//! ```
//!
//! Only the structure is checked here. Shapes are resolved by
//! [`crate::ShapeResolver`] and weight blocks are read by [`crate::weights`].

use crate::error::json_kind;
use crate::LoadError;
use serde_json::Value;
use std::io::{BufReader, Read};
use std::path::Path;

/// The whole model description: input shape plus ordered layer entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureDescription {
    in_shape: Value,
    layers: Vec<LayerSpec>,
}

/// One entry of the `layers` list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    index: usize,
    kind: String,
    shape: Value,
    weights: Vec<Value>,
    activation: Option<String>,
}

impl ArchitectureDescription {
    /// Builds a view over an already parsed JSON tree.
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        let root = value.as_object().ok_or_else(|| LoadError::InvalidField {
            context: "document".to_string(),
            expected: "an object at the top level",
        })?;

        let in_shape = root
            .get("in_shape")
            .ok_or_else(|| LoadError::MissingField {
                context: "document".to_string(),
                field: "in_shape",
            })?
            .clone();

        let layers = root
            .get("layers")
            .ok_or_else(|| LoadError::MissingField {
                context: "document".to_string(),
                field: "layers",
            })?
            .as_array()
            .ok_or_else(|| LoadError::InvalidField {
                context: "layers".to_string(),
                expected: "an array of layer entries",
            })?
            .iter()
            .enumerate()
            .map(|(index, entry)| LayerSpec::from_value(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { in_shape, layers })
    }

    /// Parses a description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parses a description from any byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_reader(BufReader::new(reader))?;
        Self::from_value(&value)
    }

    /// Loads a description from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// The raw `in_shape` value.
    pub fn in_shape(&self) -> &Value {
        &self.in_shape
    }

    /// Layer entries in document order.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Number of layer entries, including ones a build may skip.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
}

impl LayerSpec {
    fn from_value(index: usize, value: &Value) -> Result<Self, LoadError> {
        let context = format!("layers[{index}]");
        let entry = value.as_object().ok_or_else(|| LoadError::InvalidField {
            context: context.clone(),
            expected: "an object",
        })?;

        let kind = match entry.get("type") {
            None => {
                return Err(LoadError::MissingField {
                    context,
                    field: "type",
                })
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(LoadError::InvalidField {
                    context: format!("{context}.type"),
                    expected: "a string",
                })
            }
        };

        let shape = match entry.get("shape") {
            None => {
                return Err(LoadError::MissingField {
                    context,
                    field: "shape",
                })
            }
            Some(shape @ Value::Array(_)) => shape.clone(),
            Some(other) => {
                return Err(LoadError::MalformedShape {
                    context: format!("{context}.shape"),
                    detail: format!("expected an array, found {}", json_kind(other)),
                })
            }
        };

        let weights = match entry.get("weights") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(blocks)) => blocks.clone(),
            Some(_) => {
                return Err(LoadError::InvalidField {
                    context: format!("{context}.weights"),
                    expected: "an array of weight blocks",
                })
            }
        };

        // Exporters write "" or null for layers without a trailing nonlinearity.
        let activation = match entry.get("activation") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(LoadError::InvalidField {
                    context: format!("{context}.activation"),
                    expected: "a string",
                })
            }
        };

        Ok(Self {
            index,
            kind,
            shape,
            weights,
            activation,
        })
    }

    /// Position in the `layers` list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The `type` tag, verbatim.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The raw `shape` array.
    pub fn shape(&self) -> &Value {
        &self.shape
    }

    /// Weight blocks in document order. Empty when the entry has none.
    pub fn weights(&self) -> &[Value] {
        &self.weights
    }

    /// The `activation` tag, if present and non-empty.
    pub fn activation(&self) -> Option<&str> {
        self.activation.as_deref()
    }

    /// Path prefix used in error messages, e.g. `layers[3]`.
    pub fn context(&self) -> String {
        format!("layers[{}]", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_minimal() {
        let doc = json!({
            "in_shape": [null, 2],
            "layers": [
                { "type": "dense", "shape": [null, 3], "weights": [[], []], "activation": "tanh" },
                { "type": "activation", "shape": [null, 3], "activation": "relu" }
            ]
        });
        let desc = ArchitectureDescription::from_value(&doc).unwrap();
        assert_eq!(desc.num_layers(), 2);
        assert_eq!(desc.in_shape(), &json!([null, 2]));

        let dense = &desc.layers()[0];
        assert_eq!(dense.index(), 0);
        assert_eq!(dense.kind(), "dense");
        assert_eq!(dense.weights().len(), 2);
        assert_eq!(dense.activation(), Some("tanh"));

        let act = &desc.layers()[1];
        assert!(act.weights().is_empty());
        assert_eq!(act.context(), "layers[1]");
    }

    #[test]
    fn test_missing_in_shape() {
        let doc = json!({ "layers": [] });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { field: "in_shape", .. }
        ));
    }

    #[test]
    fn test_missing_layers() {
        let doc = json!({ "in_shape": [null, 2] });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { field: "layers", .. }));
    }

    #[test]
    fn test_layers_not_array() {
        let doc = json!({ "in_shape": [null, 2], "layers": {} });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { .. }));
    }

    #[test]
    fn test_layer_missing_type() {
        let doc = json!({ "in_shape": [null, 2], "layers": [{ "shape": [null, 2] }] });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        match err {
            LoadError::MissingField { context, field } => {
                assert_eq!(context, "layers[0]");
                assert_eq!(field, "type");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_layer_shape_not_array() {
        let doc = json!({
            "in_shape": [null, 2],
            "layers": [{ "type": "dense", "shape": 4 }]
        });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        assert!(matches!(err, LoadError::MalformedShape { .. }));
    }

    #[test]
    fn test_empty_and_null_activation() {
        let doc = json!({
            "in_shape": [null, 2],
            "layers": [
                { "type": "dense", "shape": [null, 2], "weights": [], "activation": "" },
                { "type": "dense", "shape": [null, 2], "weights": [], "activation": null },
                { "type": "dense", "shape": [null, 2], "weights": [] }
            ]
        });
        let desc = ArchitectureDescription::from_value(&doc).unwrap();
        assert!(desc.layers().iter().all(|l| l.activation().is_none()));
    }

    #[test]
    fn test_activation_wrong_type() {
        let doc = json!({
            "in_shape": [null, 2],
            "layers": [{ "type": "dense", "shape": [null, 2], "activation": 3 }]
        });
        let err = ArchitectureDescription::from_value(&doc).unwrap_err();
        assert!(err.to_string().contains("layers[0].activation"));
    }

    #[test]
    fn test_from_json_syntax_error() {
        let err = ArchitectureDescription::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_from_reader() {
        let json = r#"{ "in_shape": [1, 4], "layers": [] }"#;
        let desc = ArchitectureDescription::from_reader(json.as_bytes()).unwrap();
        assert_eq!(desc.num_layers(), 0);
    }

    #[test]
    fn test_from_file_not_found() {
        let path = Path::new("/nonexistent/model.json");
        let err = ArchitectureDescription::from_file(path).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
