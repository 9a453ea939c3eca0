// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Loader configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! unknown_layers = "reject"        # or "skip"
//! unknown_activations = "reject"   # or "skip"
//! allow_unbounded_axes = false
//! ```

use crate::LoadError;
use std::fmt;
use std::path::Path;

/// What to do with a `type` or `activation` tag the loader does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKindPolicy {
    /// Fail the whole build.
    #[default]
    Reject,
    /// Log a warning and leave the entry out of the model.
    Skip,
}

impl fmt::Display for UnknownKindPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        })
    }
}

/// Configuration for [`crate::ModelBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoaderConfig {
    /// Policy for layer entries whose `type` is not supported.
    #[serde(default)]
    pub unknown_layers: UnknownKindPolicy,
    /// Policy for non-empty `activation` tags that are not supported.
    #[serde(default)]
    pub unknown_activations: UnknownKindPolicy,
    /// Accept `null` on shape axes that do not take part in dimensionality
    /// resolution, and shapes of any non-zero rank.
    #[serde(default)]
    pub allow_unbounded_axes: bool,
}

impl LoaderConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, LoadError> {
        toml::from_str(toml_str)
            .map_err(|e| LoadError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, LoadError> {
        toml::to_string_pretty(self)
            .map_err(|e| LoadError::Config(format!("TOML serialise error: {e}")))
    }

    /// A configuration that skips unknown kinds and tolerates `null` axes,
    /// for exports that carry layer types this loader does not build.
    pub fn permissive() -> Self {
        Self {
            unknown_layers: UnknownKindPolicy::Skip,
            unknown_activations: UnknownKindPolicy::Skip,
            allow_unbounded_axes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let c = LoaderConfig::default();
        assert_eq!(c.unknown_layers, UnknownKindPolicy::Reject);
        assert_eq!(c.unknown_activations, UnknownKindPolicy::Reject);
        assert!(!c.allow_unbounded_axes);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
unknown_layers = "skip"
allow_unbounded_axes = true
"#;
        let c = LoaderConfig::from_toml(toml).unwrap();
        assert_eq!(c.unknown_layers, UnknownKindPolicy::Skip);
        assert_eq!(c.unknown_activations, UnknownKindPolicy::Reject);
        assert!(c.allow_unbounded_axes);
    }

    #[test]
    fn test_from_toml_empty() {
        let c = LoaderConfig::from_toml("").unwrap();
        assert_eq!(c, LoaderConfig::default());
    }

    #[test]
    fn test_from_toml_bad_policy() {
        let result = LoaderConfig::from_toml(r#"unknown_layers = "ignore""#);
        assert!(matches!(result, Err(LoadError::Config(_))));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = LoaderConfig::permissive();
        let toml = c.to_toml().unwrap();
        assert!(toml.contains("unknown_layers = \"skip\""));
        let back = LoaderConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_file_missing() {
        let path = std::env::temp_dir().join("seqnet_no_such_config.toml");
        assert!(matches!(
            LoaderConfig::from_file(&path),
            Err(LoadError::Config(_))
        ));
    }
}
