use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use crate::features::FeatureRecord;
use crate::model::classifier::{Classifier, ModelError};

const CATEGORICAL_COLUMNS: [&str; 3] = ["batting_team", "bowling_team", "city"];
const NUMERIC_COLUMNS: [&str; 6] =
    ["runs_left", "balls_left", "wickets", "total_runs_x", "crr", "rrr"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Reject records carrying a category the model was not fitted on
    #[default]
    Error,
    /// Treat an unseen category as all-zero one-hot
    Ignore,
}

/// On-disk form of an exported one-hot + logistic regression pipeline
#[derive(Debug, Deserialize)]
struct ModelFile {
    name: String,
    version: String,
    intercept: f64,
    #[serde(default)]
    handle_unknown: HandleUnknown,
    categorical: HashMap<String, HashMap<String, f64>>,
    numeric: HashMap<String, f64>,
}

#[derive(Debug, Clone)]
struct NumericWeights {
    runs_left: f64,
    balls_left: f64,
    wickets: f64,
    total_runs_x: f64,
    crr: f64,
    rrr: f64,
}

/// Logistic regression over one-hot categoricals and raw numeric columns.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    name: String,
    version: String,
    intercept: f64,
    handle_unknown: HandleUnknown,
    batting_team: HashMap<String, f64>,
    bowling_team: HashMap<String, f64>,
    city: HashMap<String, f64>,
    numeric: NumericWeights,
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let mut file: ModelFile = serde_json::from_str(json)?;

        if !file.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".to_string()));
        }

        for column in CATEGORICAL_COLUMNS {
            let table = file.categorical.get(column).ok_or_else(|| {
                ModelError::Invalid(format!("missing categorical column {}", column))
            })?;
            if table.is_empty() {
                return Err(ModelError::Invalid(format!("no categories for column {}", column)));
            }
            if let Some((label, _)) = table.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ModelError::Invalid(format!(
                    "weight for {}={} is not finite",
                    column, label
                )));
            }
        }

        let numeric_weight = |column: &str| -> Result<f64, ModelError> {
            let w = *file
                .numeric
                .get(column)
                .ok_or_else(|| ModelError::Invalid(format!("missing numeric column {}", column)))?;
            if w.is_finite() {
                Ok(w)
            } else {
                Err(ModelError::Invalid(format!("weight for {} is not finite", column)))
            }
        };

        let numeric = NumericWeights {
            runs_left: numeric_weight(NUMERIC_COLUMNS[0])?,
            balls_left: numeric_weight(NUMERIC_COLUMNS[1])?,
            wickets: numeric_weight(NUMERIC_COLUMNS[2])?,
            total_runs_x: numeric_weight(NUMERIC_COLUMNS[3])?,
            crr: numeric_weight(NUMERIC_COLUMNS[4])?,
            rrr: numeric_weight(NUMERIC_COLUMNS[5])?,
        };

        Ok(Self {
            name: file.name,
            version: file.version,
            intercept: file.intercept,
            handle_unknown: file.handle_unknown,
            batting_team: file.categorical.remove("batting_team").unwrap_or_default(),
            bowling_team: file.categorical.remove("bowling_team").unwrap_or_default(),
            city: file.categorical.remove("city").unwrap_or_default(),
            numeric,
        })
    }

    fn category_weight(
        &self,
        table: &HashMap<String, f64>,
        column: &'static str,
        value: &str,
    ) -> Result<f64, ModelError> {
        match (table.get(value), self.handle_unknown) {
            (Some(w), _) => Ok(*w),
            (None, HandleUnknown::Ignore) => Ok(0.0),
            (None, HandleUnknown::Error) => Err(ModelError::UnknownCategory {
                column,
                value: value.to_string(),
            }),
        }
    }

    /// Raw decision value before the sigmoid
    fn decision_function(&self, features: &FeatureRecord) -> Result<f64, ModelError> {
        if !features.current_run_rate.is_finite() {
            return Err(ModelError::NonFiniteFeature("crr"));
        }
        if !features.required_run_rate.is_finite() {
            return Err(ModelError::NonFiniteFeature("rrr"));
        }

        let batting =
            self.category_weight(&self.batting_team, "batting_team", features.batting_team.name())?;
        let bowling =
            self.category_weight(&self.bowling_team, "bowling_team", features.bowling_team.name())?;
        let city = self.category_weight(&self.city, "city", features.venue.name())?;

        let w = &self.numeric;
        let z = self.intercept
            + batting
            + bowling
            + city
            + w.runs_left * features.runs_left as f64
            + w.balls_left * f64::from(features.balls_left)
            + w.wickets * f64::from(features.wickets_remaining)
            + w.total_runs_x * f64::from(features.target)
            + w.crr * features.current_run_rate
            + w.rrr * features.required_run_rate;

        Ok(z)
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, features: &FeatureRecord) -> Result<[f64; 2], ModelError> {
        let z = self.decision_function(features)?;
        let p_win = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - p_win, p_win])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::derive_features;
    use crate::match_state::{MatchSnapshot, Team, Venue};

    const SMALL_MODEL: &str = r#"{
        "name": "test-logreg",
        "version": "1",
        "intercept": 0.0,
        "categorical": {
            "batting_team": {"Mumbai Indians": 0.0, "Delhi Capitals": 0.1},
            "bowling_team": {"Mumbai Indians": 0.0, "Delhi Capitals": -0.1},
            "city": {"Mumbai": 0.0, "Delhi": 0.05}
        },
        "numeric": {
            "runs_left": -0.05, "balls_left": 0.02, "wickets": 0.3,
            "total_runs_x": 0.0, "crr": 0.1, "rrr": -0.2
        }
    }"#;

    fn bundled() -> LogisticModel {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/ipl_logreg.json");
        LogisticModel::load(Path::new(path)).unwrap()
    }

    fn features(
        batting: Team,
        bowling: Team,
        venue: Venue,
        runs: i64,
        target: i64,
    ) -> FeatureRecord {
        let snapshot = MatchSnapshot::new(batting, bowling, venue, 10, 0, runs, 2, target).unwrap();
        derive_features(&snapshot)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = LogisticModel::from_json_str(SMALL_MODEL).unwrap();
        let f = features(Team::MumbaiIndians, Team::DelhiCapitals, Venue::Mumbai, 50, 180);
        let [p0, p1] = model.predict_proba(&f).unwrap();
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&p1));
    }

    #[test]
    fn test_decision_value_matches_weights() {
        let model = LogisticModel::from_json_str(SMALL_MODEL).unwrap();
        let f = features(Team::DelhiCapitals, Team::MumbaiIndians, Venue::Delhi, 50, 180);
        // 0.1 + 0.0 + 0.05 - 0.05*130 + 0.02*60 + 0.3*8 + 0.1*5 - 0.2*13
        let expected = 0.15 - 6.5 + 1.2 + 2.4 + 0.5 - 2.6;
        assert!((model.decision_function(&f).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unseen_category_rejected() {
        let model = LogisticModel::from_json_str(SMALL_MODEL).unwrap();
        let f = features(Team::PunjabKings, Team::MumbaiIndians, Venue::Mumbai, 50, 180);
        match model.predict_proba(&f) {
            Err(ModelError::UnknownCategory { column, value }) => {
                assert_eq!(column, "batting_team");
                assert_eq!(value, "Punjab Kings");
            }
            other => panic!("expected unknown category, got {:?}", other),
        }
    }

    #[test]
    fn test_unseen_category_ignored_when_configured() {
        let json = SMALL_MODEL.replacen(
            "\"intercept\"",
            "\"handle_unknown\": \"ignore\", \"intercept\"",
            1,
        );
        let model = LogisticModel::from_json_str(&json).unwrap();
        let f = features(Team::PunjabKings, Team::MumbaiIndians, Venue::Pune, 50, 180);
        assert!(model.predict_proba(&f).is_ok());
    }

    #[test]
    fn test_missing_columns_rejected() {
        let json = SMALL_MODEL.replace("\"rrr\": -0.2", "\"rrrr\": -0.2");
        assert!(matches!(
            LogisticModel::from_json_str(&json),
            Err(ModelError::Invalid(msg)) if msg.contains("rrr")
        ));

        let json = SMALL_MODEL.replace("\"city\"", "\"venue\"");
        assert!(matches!(
            LogisticModel::from_json_str(&json),
            Err(ModelError::Invalid(msg)) if msg.contains("city")
        ));

        assert!(matches!(
            LogisticModel::from_json_str("{not json"),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn test_bundled_model_covers_all_labels() {
        let model = bundled();
        for batting in Team::all() {
            for bowling in batting.opponents() {
                for venue in Venue::all() {
                    let f = features(*batting, bowling, *venue, 50, 180);
                    assert!(model.predict_proba(&f).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_bundled_model_favours_easier_chases() {
        let model = bundled();
        let easy = features(Team::MumbaiIndians, Team::ChennaiSuperKings, Venue::Mumbai, 100, 140);
        let hard = features(Team::MumbaiIndians, Team::ChennaiSuperKings, Venue::Mumbai, 50, 200);
        let p_easy = model.predict_proba(&easy).unwrap()[1];
        let p_hard = model.predict_proba(&hard).unwrap()[1];
        assert!(p_easy > p_hard);
    }
}
