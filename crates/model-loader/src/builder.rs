// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Turning an [`ArchitectureDescription`] into a built [`Model`].
//!
//! The build is one pass over the layer entries in document order. Each
//! entry is sized from the model's running `next_in_size` and its own
//! resolved shape, and every constructed layer is moved into the model as
//! soon as it is complete. Any failure drops the partial model.

use crate::factory::{create_activation, create_layer, LayerKind};
use crate::{
    ArchitectureDescription, LayerSpec, LoadError, LoaderConfig, ShapeResolver, UnknownKindPolicy,
};
use network::{Building, Model};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tensor_core::Scalar;

/// Builds models from descriptions under a fixed [`LoaderConfig`].
///
/// # Example
/// ```
/// use model_loader::ModelBuilder;
/// use network::Model;
/// use serde_json::json;
///
/// let doc = json!({
///     "in_shape": [1, 2],
///     "layers": [{
///         "type": "dense",
///         "shape": [1, 1],
///         "weights": [[[0.5], [0.5]], [0.0]],
///         "activation": "relu"
///     }]
/// });
/// let mut model: Model<f32> = ModelBuilder::default().build_value(&doc).unwrap();
/// assert_eq!(model.num_layers(), 2);
/// assert_eq!(model.forward(&[2.0, 4.0]).unwrap(), vec![3.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    config: LoaderConfig,
}

impl ModelBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder applies.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Builds a model from a parsed description.
    ///
    /// Steps:
    /// 1. Resolve `in_shape` and seed an empty model with it.
    /// 2. For each entry: check its type, resolve its shape, construct the
    ///    layer and append it, then append any trailing activation.
    /// 3. Freeze the model.
    pub fn build<T: Scalar>(
        &self,
        description: &ArchitectureDescription,
    ) -> Result<Model<T>, LoadError> {
        let _span = tracing::debug_span!(
            "build_model",
            dtype = %T::DTYPE,
            entries = description.num_layers()
        )
        .entered();

        let resolver = ShapeResolver::from_config(&self.config);
        let in_size = resolver.resolve(description.in_shape(), "in_shape")?;
        let mut model = Model::<T, Building>::new(in_size);
        let mut skipped = 0usize;

        for spec in description.layers() {
            let context = spec.context();

            let Some(kind) = LayerKind::from_tag(spec.kind()) else {
                match self.config.unknown_layers {
                    UnknownKindPolicy::Reject => {
                        return Err(LoadError::UnknownLayerKind {
                            context,
                            tag: spec.kind().to_string(),
                        })
                    }
                    UnknownKindPolicy::Skip => {
                        tracing::warn!("{context}: skipping unknown layer type '{}'", spec.kind());
                        skipped += 1;
                        continue;
                    }
                }
            };

            let dims = resolver.resolve(spec.shape(), &format!("{context}.shape"))?;
            tracing::debug!(
                index = spec.index(),
                kind = %kind,
                in_size = model.next_in_size(),
                dims,
                activation = spec.activation().unwrap_or("none"),
                "building layer"
            );

            if kind.has_weights() {
                let layer = create_layer::<T>(
                    kind.as_str(),
                    model.next_in_size(),
                    dims,
                    spec.weights(),
                    &context,
                )?;
                model.add_layer(layer)?;
                if kind.takes_trailing_activation()
                    && !self.append_activation(&mut model, spec, dims)?
                {
                    skipped += 1;
                }
            } else if !self.append_activation(&mut model, spec, dims)? {
                skipped += 1;
            }
        }

        let model = model.finish();
        tracing::info!(
            "built model: {} layers, {} -> {}, {} parameters ({} entries skipped)",
            model.num_layers(),
            model.in_size(),
            model.out_size(),
            model.parameter_count(),
            skipped,
        );
        Ok(model)
    }

    /// Parses a JSON tree and builds a model from it.
    pub fn build_value<T: Scalar>(&self, value: &Value) -> Result<Model<T>, LoadError> {
        self.build(&ArchitectureDescription::from_value(value)?)
    }

    /// Parses a JSON string and builds a model from it.
    pub fn build_json<T: Scalar>(&self, json: &str) -> Result<Model<T>, LoadError> {
        self.build(&ArchitectureDescription::from_json(json)?)
    }

    /// Reads a JSON document from a stream and builds a model from it.
    pub fn build_reader<T: Scalar, R: Read>(&self, reader: R) -> Result<Model<T>, LoadError> {
        self.build(&ArchitectureDescription::from_reader(reader)?)
    }

    /// Reads a JSON file and builds a model from it.
    pub fn build_file<T: Scalar>(&self, path: &Path) -> Result<Model<T>, LoadError> {
        tracing::debug!("loading model description from {}", path.display());
        self.build(&ArchitectureDescription::from_file(path)?)
    }

    /// Appends the entry's activation, if it names one.
    ///
    /// Returns `Ok(false)` when an unknown tag was skipped by policy.
    fn append_activation<T: Scalar>(
        &self,
        model: &mut Model<T, Building>,
        spec: &LayerSpec,
        dims: usize,
    ) -> Result<bool, LoadError> {
        let context = format!("{}.activation", spec.context());
        let activation = match create_activation::<T>(spec.activation(), dims, &context) {
            Ok(Some(activation)) => activation,
            Ok(None) => return Ok(true),
            Err(err @ LoadError::UnknownActivation { .. })
                if self.config.unknown_activations == UnknownKindPolicy::Skip =>
            {
                tracing::warn!("{err}, skipping");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        if activation.in_size() != model.next_in_size() {
            return Err(LoadError::DimensionMismatch {
                context: format!("{}.shape", spec.context()),
                what: "activation width",
                expected: model.next_in_size(),
                actual: activation.in_size(),
            });
        }
        model.add_layer(activation)?;
        Ok(true)
    }
}
