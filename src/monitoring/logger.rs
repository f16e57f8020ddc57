use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use crate::features::FeatureRecord;
use crate::match_state::MatchInput;
use crate::prediction::{PredictionError, WinProbability};

const HEADER: &str = "timestamp,batting_team,bowling_team,venue,runs_left,balls_left,\
wickets_remaining,target,crr,rrr,win_probability,lose_probability,status";

/// Append-only CSV record of every prediction served
pub struct PredictionLogger {
    log_path: String,
}

impl PredictionLogger {
    pub fn new(log_path: String) -> Result<Self> {
        // Create CSV file with headers if it doesn't exist
        if !std::path::Path::new(&log_path).exists() {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_path)?;

            writeln!(file, "{}", HEADER)?;
        }

        Ok(Self { log_path })
    }

    pub fn log_prediction(&self, features: &FeatureRecord, result: &WinProbability) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)?;

        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{:.4},{:.4},{:.2},{:.2},ok",
            Utc::now().to_rfc3339(),
            features.batting_team,
            features.bowling_team,
            features.venue,
            features.runs_left,
            features.balls_left,
            features.wickets_remaining,
            features.target,
            features.current_run_rate,
            features.required_run_rate,
            result.win_probability,
            result.lose_probability
        )?;

        Ok(())
    }

    /// Failed requests keep whatever raw labels were readable and leave every
    /// derived column blank
    pub fn log_failure(&self, input: Option<&MatchInput>, error: &PredictionError) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)?;

        writeln!(
            file,
            "{},{},{},{},,,,,,,,,{}",
            Utc::now().to_rfc3339(),
            input.map(|i| csv_field(&i.batting_team)).unwrap_or_default(),
            input.map(|i| csv_field(&i.bowling_team)).unwrap_or_default(),
            input.map(|i| csv_field(&i.venue)).unwrap_or_default(),
            error.kind()
        )?;

        Ok(())
    }
}

/// Raw input may carry anything, so strip the delimiter
fn csv_field(raw: &str) -> String {
    raw.replace([',', '\n', '\r'], " ")
}
