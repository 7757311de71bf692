// src/error.rs
use std::path::PathBuf;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reject::Reject;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Model file '{}' not found. Please make sure the model file is in the same directory.", .0.display())]
    ModelArtifactMissing(PathBuf),
    #[error("{0}")]
    InferenceFailure(String),
}

impl PredictionError {
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::InvalidInput(_) => "invalid_input",
            PredictionError::ModelArtifactMissing(_) => "model_artifact_missing",
            PredictionError::InferenceFailure(_) => "inference_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PredictionError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PredictionError::ModelArtifactMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
            PredictionError::InferenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown in the page's error banner.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::ModelArtifactMissing(_) => self.to_string(),
            _ => format!("An error occurred: {}", self),
        }
    }
}

impl Reject for PredictionError {}
