use serde::Serialize;
use crate::match_state::{Team, ValidationError};
use crate::model::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinProbability {
    pub batting_team: Team,
    pub bowling_team: Team,
    /// Batting side win chance, percent to 2 d.p.
    pub win_probability: f64,
    /// Bowling side win chance, percent to 2 d.p.
    pub lose_probability: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Invalid match state: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Classifier not configured: {0}")]
    Configuration(String),
}

impl PredictionError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::InvalidInput(_) => "invalid_input",
            PredictionError::ModelInvocation(_) => "model_invocation",
            PredictionError::Configuration(_) => "configuration",
        }
    }

    /// Text safe to show an end user. Model failures stay opaque.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::InvalidInput(e) => format!("Please correct the match state: {}", e),
            PredictionError::ModelInvocation(_) | PredictionError::Configuration(_) => {
                "Prediction unavailable".to_string()
            }
        }
    }
}

impl From<ModelError> for PredictionError {
    fn from(e: ModelError) -> Self {
        PredictionError::ModelInvocation(e.to_string())
    }
}

/// Percentage rounded half away from zero to two decimal places
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percentage() {
        assert_eq!(to_percentage(0.5), 50.0);
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(1.0), 100.0);
    }

    #[test]
    fn test_user_messages() {
        let invalid = PredictionError::from(ValidationError::WicketsOutOfRange(11));
        assert!(invalid.user_message().contains("Wickets lost must be 0-9"));
        assert_eq!(invalid.kind(), "invalid_input");

        let model =
            PredictionError::ModelInvocation("Unseen category \"X\" for column city".to_string());
        assert_eq!(model.user_message(), "Prediction unavailable");

        let config = PredictionError::Configuration("models/missing.json".to_string());
        assert_eq!(config.user_message(), "Prediction unavailable");
        assert_eq!(config.kind(), "configuration");
    }
}
