// src/predictor.rs
use crate::error::PredictionError;
use crate::models::{FeatureVector, FEATURE_COLUMNS};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "stock_price_predictor.pkl";

/// Single-row regression inference.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

/// Exported regression weights, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn from_json(raw: &str) -> Result<Self, PredictionError> {
        let model: LinearModel = serde_json::from_str(raw)
            .map_err(|e| PredictionError::InferenceFailure(format!("invalid model artifact: {}", e)))?;
        model.check_shape()?;
        Ok(model)
    }

    fn check_shape(&self) -> Result<(), PredictionError> {
        if self.coefficients.len() != FEATURE_COLUMNS.len() {
            return Err(PredictionError::InferenceFailure(format!(
                "X has {} features, but the model is expecting {} features as input",
                FEATURE_COLUMNS.len(),
                self.coefficients.len()
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
                return Err(PredictionError::InferenceFailure(format!(
                    "feature names {:?} do not match the columns {:?} the model was fitted with",
                    FEATURE_COLUMNS, names
                )));
            }
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        self.check_shape()?;
        let price = self
            .coefficients
            .iter()
            .zip(features.values())
            .fold(self.intercept, |acc, (w, x)| acc + w * x);
        if !price.is_finite() {
            return Err(PredictionError::InferenceFailure(format!(
                "model produced a non-finite prediction ({})",
                price
            )));
        }
        Ok(price)
    }
}

/// Reads the artifact from disk on every prediction.
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    path: PathBuf,
}

impl ArtifactPredictor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<LinearModel, PredictionError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PredictionError::ModelArtifactMissing(self.path.clone()),
            _ => PredictionError::InferenceFailure(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            )),
        })?;
        debug!("Loaded model artifact from {}", self.path.display());
        LinearModel::from_json(&raw)
    }
}

impl Predictor for ArtifactPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        self.load()?.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionRequest;
    use serde_json::json;
    use tempfile::TempDir;

    fn unit_model() -> LinearModel {
        LinearModel {
            feature_names: Some(FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()),
            // Only Prev_Open contributes.
            coefficients: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            intercept: 2.5,
        }
    }

    fn write_artifact(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_MODEL_PATH);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn linear_model_applies_weights_in_order() {
        let model = LinearModel {
            feature_names: None,
            coefficients: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            intercept: 0.5,
        };
        let features = FeatureVector([1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(model.predict(&features).unwrap(), 0.5 + 1.0 + 2.0 + 3.0 + 4.0 + 5.0 + 9.0);
    }

    #[test]
    fn artifact_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, &serde_json::to_string(&unit_model()).unwrap());
        let predictor = ArtifactPredictor::new(path);
        let features = PredictionRequest {
            open_price: 100.0,
            ..PredictionRequest::default()
        }
        .features();
        assert_eq!(predictor.predict(&features).unwrap(), 102.5);
    }

    #[test]
    fn missing_file_is_reported_as_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_MODEL_PATH);
        let predictor = ArtifactPredictor::new(&path);
        let err = predictor
            .predict(&PredictionRequest::default().features())
            .unwrap_err();
        assert_eq!(err, PredictionError::ModelArtifactMissing(path));
    }

    #[test]
    fn wrong_coefficient_count_is_inference_failure() {
        let body = json!({ "coefficients": [1.0, 2.0, 3.0], "intercept": 0.0 }).to_string();
        let err = LinearModel::from_json(&body).unwrap_err();
        assert!(matches!(err, PredictionError::InferenceFailure(ref msg) if msg.contains("expecting 3")));
    }

    #[test]
    fn reordered_columns_are_rejected() {
        let mut model = unit_model();
        model.feature_names.as_mut().unwrap().swap(3, 5);
        let body = serde_json::to_string(&model).unwrap();
        assert!(matches!(
            LinearModel::from_json(&body),
            Err(PredictionError::InferenceFailure(_))
        ));
    }

    #[test]
    fn corrupt_artifact_is_inference_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, "\u{80}\u{04}not json");
        let err = ArtifactPredictor::new(path)
            .predict(&PredictionRequest::default().features())
            .unwrap_err();
        assert!(matches!(err, PredictionError::InferenceFailure(ref msg) if msg.starts_with("invalid model artifact")));
    }

    #[test]
    fn overflowing_prediction_is_inference_failure() {
        let mut model = unit_model();
        model.coefficients[5] = f64::MAX;
        let features = PredictionRequest::default().features();
        assert!(matches!(
            model.predict(&features),
            Err(PredictionError::InferenceFailure(_))
        ));
    }
}
