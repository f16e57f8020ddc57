use tracing::{debug, info, warn};
use crate::features::{derive_features, FeatureRecord};
use crate::match_state::{MatchInput, MatchSnapshot};
use crate::model::{ClassifierHandle, BATTING_WIN, BOWLING_WIN};
use crate::prediction::types::{to_percentage, PredictionError, WinProbability};

const SUM_TOLERANCE: f64 = 1e-6;

/// Turns match states into win percentages using an injected classifier.
///
/// Holds no per-request state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct WinPredictor {
    classifier: ClassifierHandle,
}

impl WinPredictor {
    pub fn new(classifier: ClassifierHandle) -> Self {
        if !classifier.is_ready() {
            warn!("Win predictor created without a classifier; predictions will fail");
        }
        Self { classifier }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    /// Validate raw input, then predict
    pub fn predict(&self, input: &MatchInput) -> Result<WinProbability, PredictionError> {
        self.predict_with_features(input).map(|(_, result)| result)
    }

    /// Like [`WinPredictor::predict`], also handing back the derived features
    pub fn predict_with_features(
        &self,
        input: &MatchInput,
    ) -> Result<(FeatureRecord, WinProbability), PredictionError> {
        let snapshot = MatchSnapshot::try_from(input)?;
        self.evaluate(&snapshot)
    }

    pub fn predict_snapshot(
        &self,
        snapshot: &MatchSnapshot,
    ) -> Result<WinProbability, PredictionError> {
        self.evaluate(snapshot).map(|(_, result)| result)
    }

    fn evaluate(
        &self,
        snapshot: &MatchSnapshot,
    ) -> Result<(FeatureRecord, WinProbability), PredictionError> {
        let features = derive_features(snapshot);
        debug!(
            "Features: runs_left={}, balls_left={}, wickets={}, crr={:.2}, rrr={:.2}",
            features.runs_left,
            features.balls_left,
            features.wickets_remaining,
            features.current_run_rate,
            features.required_run_rate
        );

        let probabilities = self.classify(&features)?;

        let result = WinProbability {
            batting_team: snapshot.batting_team(),
            bowling_team: snapshot.bowling_team(),
            win_probability: to_percentage(probabilities[BATTING_WIN]),
            lose_probability: to_percentage(probabilities[BOWLING_WIN]),
        };

        info!(
            "{} {:.2}% vs {} {:.2}%",
            result.batting_team,
            result.win_probability,
            result.bowling_team,
            result.lose_probability
        );

        Ok((features, result))
    }

    fn classify(&self, features: &FeatureRecord) -> Result<[f64; 2], PredictionError> {
        let classifier = match &self.classifier {
            ClassifierHandle::Ready(c) => c,
            ClassifierHandle::Unavailable(reason) => {
                return Err(PredictionError::Configuration(reason.clone()));
            }
        };

        let probabilities = classifier.predict_proba(features)?;

        if probabilities.iter().any(|p| !p.is_finite() || !(0.0..=1.0).contains(p)) {
            return Err(PredictionError::ModelInvocation(format!(
                "{} returned probabilities outside [0, 1]: {:?}",
                classifier.name(),
                probabilities
            )));
        }

        let total = probabilities[BOWLING_WIN] + probabilities[BATTING_WIN];
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(PredictionError::ModelInvocation(format!(
                "{} returned probabilities summing to {}",
                classifier.name(),
                total
            )));
        }

        Ok(probabilities)
    }
}
