// SPDX-License-Identifier: Apache-2.0

//! The prediction seam: model frameworks live behind the `Predictor` trait,
//! and concrete implementations are resolved by model class name through a
//! registry rather than loaded dynamically from user code.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{BridgeError, Result};

/// A loaded model that maps one input vector to one output vector.
pub trait Predictor: Send + Sync {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>>;
}

/// Constructs a predictor from a downloaded weights file.
pub type PredictorLoader = fn(&Path) -> Result<Box<dyn Predictor>>;

/// Maps model class names to predictor loaders.
pub struct PredictorRegistry {
    loaders: HashMap<String, PredictorLoader>,
}

impl PredictorRegistry {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Registry holding the predictors compiled into this server.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("LinearModel", |path| {
            Ok(Box::new(LinearPredictor::from_weights_file(path)?))
        });
        registry
    }

    pub fn register(&mut self, class_name: &str, loader: PredictorLoader) {
        self.loaders.insert(class_name.to_string(), loader);
    }

    pub fn load(&self, class_name: &str, weights: &Path) -> Result<Box<dyn Predictor>> {
        let loader = self.loaders.get(class_name).ok_or_else(|| {
            BridgeError::ModelLoad(format!(
                "no predictor registered for model class '{}'",
                class_name
            ))
        })?;
        loader(weights)
    }
}

impl Default for PredictorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct LinearWeights {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

/// Dense linear model `y = Wx + b`, weights stored as JSON.
pub struct LinearPredictor {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl LinearPredictor {
    pub fn from_weights_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::ModelLoad(format!("cannot read weights file: {}", e)))?;
        let parsed: LinearWeights = serde_json::from_str(&raw)
            .map_err(|e| BridgeError::ModelLoad(format!("malformed weights file: {}", e)))?;

        if parsed.weights.len() != parsed.bias.len() {
            return Err(BridgeError::ModelLoad(format!(
                "weight rows ({}) do not match bias length ({})",
                parsed.weights.len(),
                parsed.bias.len()
            )));
        }

        Ok(Self {
            weights: parsed.weights,
            bias: parsed.bias,
        })
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| {
                if row.len() != input.len() {
                    return Err(BridgeError::ModelLoad(format!(
                        "input length {} does not match model input size {}",
                        input.len(),
                        row.len()
                    )));
                }
                Ok(row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_weights(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("model.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_linear_predictor_math() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_weights(
            dir.path(),
            r#"{"weights": [[1.0, 2.0], [0.0, 1.0]], "bias": [0.5, -1.0]}"#,
        );

        let predictor = LinearPredictor::from_weights_file(&path).unwrap();
        let output = predictor.predict(&[1.0, 1.0]).unwrap();

        assert_eq!(output, vec![3.5, 0.0]);
    }

    #[test]
    fn test_linear_predictor_rejects_wrong_input_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_weights(dir.path(), r#"{"weights": [[1.0, 2.0]], "bias": [0.0]}"#);

        let predictor = LinearPredictor::from_weights_file(&path).unwrap();
        assert!(predictor.predict(&[1.0]).is_err());
    }

    #[test]
    fn test_weights_dimension_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_weights(dir.path(), r#"{"weights": [[1.0]], "bias": [0.0, 1.0]}"#);

        assert!(matches!(
            LinearPredictor::from_weights_file(&path),
            Err(BridgeError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_registry_resolves_builtin_class() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_weights(dir.path(), r#"{"weights": [[2.0]], "bias": [1.0]}"#);

        let registry = PredictorRegistry::builtin();
        let predictor = registry.load("LinearModel", &path).unwrap();

        assert_eq!(predictor.predict(&[2.0]).unwrap(), vec![5.0]);
    }

    #[test]
    fn test_registry_unknown_class_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_weights(dir.path(), r#"{"weights": [[1.0]], "bias": [0.0]}"#);

        let registry = PredictorRegistry::builtin();
        assert!(matches!(
            registry.load("ModelClass", &path),
            Err(BridgeError::ModelLoad(_))
        ));
    }
}
