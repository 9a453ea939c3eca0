// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Checks that built layers match the description they came from.
//!
//! The per-layer checks are pure: they compare a layer against a kind tag
//! and a dimensionality and return a [`Verdict`]. [`Validator::validate_model`]
//! walks a whole description in build order and collects one verdict per
//! expected layer into a [`ValidationReport`].

use crate::factory::LayerKind;
use crate::{ArchitectureDescription, LoadError, LoaderConfig, ShapeResolver, UnknownKindPolicy};
use network::{Activation, Dense, Layer, Lstm, Model};
use std::fmt;
use tensor_core::Scalar;

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the layer matched.
    pub passed: bool,
    /// What did not match. Always `None` on a pass.
    pub diagnostic: Option<String>,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            passed: true,
            diagnostic: None,
        }
    }

    fn fail(diagnostic: String) -> Self {
        Self {
            passed: false,
            diagnostic: Some(diagnostic),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.passed, &self.diagnostic) {
            (true, _) => f.write_str("PASS"),
            (false, Some(d)) => write!(f, "FAIL: {d}"),
            (false, None) => f.write_str("FAIL"),
        }
    }
}

/// One line of a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Index of the description entry the check came from.
    pub entry: usize,
    /// Index of the model layer that was checked, if one existed.
    pub layer: Option<usize>,
    /// The tag the layer was checked against.
    pub expected: String,
    pub verdict: Verdict,
}

/// Every verdict produced by [`Validator::validate_model`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub entries: Vec<ReportEntry>,
    /// Model layers left over once the description was exhausted.
    pub extra_layers: usize,
}

impl ValidationReport {
    /// True if every check passed and the model has no extra layers.
    pub fn all_passed(&self) -> bool {
        self.extra_layers == 0 && self.entries.iter().all(|e| e.verdict.passed)
    }

    /// The entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.verdict.passed)
    }
}

/// Compares layers against expected kind tags and dimensionalities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    verbose: bool,
}

impl Validator {
    /// Creates a validator. A verbose one also logs each failure at
    /// `debug` level.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Dense check: tag must be `dense` or `time-distributed-dense`, and
    /// the output size must equal `dims`.
    pub fn check_dense<T: Scalar>(&self, dense: &Dense<T>, tag: &str, dims: usize) -> Verdict {
        if !matches!(
            LayerKind::from_tag(tag),
            Some(LayerKind::Dense | LayerKind::TimeDistributedDense)
        ) {
            return self.fail(format!("wrong layer type '{tag}', expected dense"));
        }
        if dense.out_size() != dims {
            return self.fail(format!(
                "wrong layer size {}, expected {dims}",
                dense.out_size()
            ));
        }
        Verdict::pass()
    }

    /// LSTM check: tag must be `lstm` and the output size must equal `dims`.
    pub fn check_lstm<T: Scalar>(&self, lstm: &Lstm<T>, tag: &str, dims: usize) -> Verdict {
        if LayerKind::from_tag(tag) != Some(LayerKind::Lstm) {
            return self.fail(format!("wrong layer type '{tag}', expected lstm"));
        }
        if lstm.out_size() != dims {
            return self.fail(format!(
                "wrong layer size {}, expected {dims}",
                lstm.out_size()
            ));
        }
        Verdict::pass()
    }

    /// Activation check: size must equal `dims` and the activation's own
    /// name must equal `tag`.
    pub fn check_activation<T: Scalar>(
        &self,
        activation: &Activation<T>,
        tag: &str,
        dims: usize,
    ) -> Verdict {
        if activation.size() != dims {
            return self.fail(format!(
                "wrong activation size {}, expected {dims}",
                activation.size()
            ));
        }
        if activation.name() != tag {
            return self.fail(format!(
                "wrong activation type '{}', expected '{tag}'",
                activation.name()
            ));
        }
        Verdict::pass()
    }

    /// Dispatches to the check matching the layer's variant.
    pub fn check_layer<T: Scalar>(&self, layer: &Layer<T>, tag: &str, dims: usize) -> Verdict {
        match layer {
            Layer::Dense(d) => self.check_dense(d, tag, dims),
            Layer::Lstm(l) => self.check_lstm(l, tag, dims),
            Layer::Activation(a) => self.check_activation(a, tag, dims),
        }
    }

    /// Checks a built model against a description, layer by layer.
    ///
    /// The walk mirrors [`crate::ModelBuilder::build`]: a dense-kind entry
    /// expects its layer followed by its activation (if any), `lstm`
    /// expects one layer, and `activation` expects one activation layer
    /// when it names one. Entries with unknown tags are expected to be
    /// absent when `config` skips them and are reported as failures
    /// otherwise.
    ///
    /// # Errors
    /// Fails only if a shape in the description cannot be resolved.
    pub fn validate_model<T: Scalar>(
        &self,
        model: &Model<T>,
        description: &ArchitectureDescription,
        config: &LoaderConfig,
    ) -> Result<ValidationReport, LoadError> {
        let resolver = ShapeResolver::from_config(config);
        let layers = model.layers();
        let mut cursor = 0usize;
        let mut report = ValidationReport::default();

        for spec in description.layers() {
            let Some(kind) = LayerKind::from_tag(spec.kind()) else {
                if config.unknown_layers == UnknownKindPolicy::Reject {
                    report.entries.push(ReportEntry {
                        entry: spec.index(),
                        layer: None,
                        expected: spec.kind().to_string(),
                        verdict: self.fail(format!("unknown layer type '{}'", spec.kind())),
                    });
                }
                continue;
            };
            let dims = resolver.resolve(spec.shape(), &format!("{}.shape", spec.context()))?;

            let mut expected: Vec<&str> = Vec::with_capacity(2);
            if kind.has_weights() {
                expected.push(kind.as_str());
            }
            if !kind.has_weights() || kind.takes_trailing_activation() {
                if let Some(tag) = spec.activation() {
                    let known = network::ActivationKind::from_tag(tag).is_some();
                    if known || config.unknown_activations == UnknownKindPolicy::Reject {
                        expected.push(tag);
                    }
                }
            }

            for tag in expected {
                let verdict = match layers.get(cursor) {
                    Some(layer) => self.check_layer(layer, tag, dims),
                    None => self.fail(format!("model has no layer at index {cursor}")),
                };
                report.entries.push(ReportEntry {
                    entry: spec.index(),
                    layer: (cursor < layers.len()).then_some(cursor),
                    expected: tag.to_string(),
                    verdict,
                });
                cursor += 1;
            }
        }

        report.extra_layers = layers.len().saturating_sub(cursor);
        if report.extra_layers > 0 && self.verbose {
            tracing::debug!("model has {} layers beyond the description", report.extra_layers);
        }
        Ok(report)
    }

    fn fail(&self, diagnostic: String) -> Verdict {
        if self.verbose {
            tracing::debug!("validation failed: {diagnostic}");
        }
        Verdict::fail(diagnostic)
    }
}
