use serde_json::json;
use crate::config::OutputFormat;
use crate::prediction::{PredictionError, WinProbability};

const BAR_WIDTH: usize = 50;

pub fn render_prediction(result: &WinProbability, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!(result).to_string(),
        OutputFormat::Text => format!(
            "🏏 {:<28} {:>6.2}%\n🛡️ {:<28} {:>6.2}%\n[{}]",
            result.batting_team.name(),
            result.win_probability,
            result.bowling_team.name(),
            result.lose_probability,
            progress_bar(result.win_probability)
        ),
    }
}

pub fn render_error(error: &PredictionError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "error": error.kind(),
            "message": error.user_message(),
        })
        .to_string(),
        OutputFormat::Text => format!("⚠️ {}", error.user_message()),
    }
}

/// Fixed-width bar for the batting side's share, truncated like an integer percent
fn progress_bar(win_percentage: f64) -> String {
    let filled = ((win_percentage.clamp(0.0, 100.0) as usize) * BAR_WIDTH) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_state::{Team, ValidationError};

    fn result() -> WinProbability {
        WinProbability {
            batting_team: Team::KolkataKnightRiders,
            bowling_team: Team::RajasthanRoyals,
            win_probability: 64.5,
            lose_probability: 35.5,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "-".repeat(50));
        assert_eq!(progress_bar(100.0), "#".repeat(50));
        assert_eq!(progress_bar(64.5), format!("{}{}", "#".repeat(32), "-".repeat(18)));
    }

    #[test]
    fn test_text_report() {
        let text = render_prediction(&result(), OutputFormat::Text);
        assert!(text.contains("Kolkata Knight Riders"));
        assert!(text.contains("64.50%"));
        assert!(text.contains("35.50%"));
    }

    #[test]
    fn test_json_report() {
        let value: serde_json::Value =
            serde_json::from_str(&render_prediction(&result(), OutputFormat::Json)).unwrap();
        assert_eq!(value["batting_team"], "Kolkata Knight Riders");
        assert_eq!(value["win_probability"], 64.5);
        assert_eq!(value["lose_probability"], 35.5);
    }

    #[test]
    fn test_errors_hide_model_details() {
        let error = PredictionError::ModelInvocation("weights table corrupt".to_string());
        let text = render_error(&error, OutputFormat::Json);
        assert!(!text.contains("weights"));
        assert!(text.contains("model_invocation"));

        let error = PredictionError::from(ValidationError::BallsOutOfRange(7));
        assert!(render_error(&error, OutputFormat::Text).contains("0-5"));
    }
}
