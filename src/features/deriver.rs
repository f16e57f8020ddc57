use serde::{Deserialize, Serialize};
use crate::match_state::snapshot::{MatchSnapshot, BALLS_PER_OVER};
use crate::match_state::types::{Team, Venue};

pub const INNINGS_BALLS: u32 = 120;
pub const TOTAL_WICKETS: u32 = 10;

/// Model-ready view of a match state.
///
/// Serialized names are the column names the classifier was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub batting_team: Team,
    pub bowling_team: Team,
    #[serde(rename = "city")]
    pub venue: Venue,
    pub runs_left: i64,
    pub balls_left: u32,
    #[serde(rename = "wickets")]
    pub wickets_remaining: u32,
    #[serde(rename = "total_runs_x")]
    pub target: u32,
    #[serde(rename = "crr")]
    pub current_run_rate: f64,
    #[serde(rename = "rrr")]
    pub required_run_rate: f64,
}

/// Runs per over so far, 0 before the first legal ball
pub fn current_run_rate(runs_scored: u32, overs_elapsed: f64) -> f64 {
    if overs_elapsed > 0.0 {
        f64::from(runs_scored) / overs_elapsed
    } else {
        0.0
    }
}

/// Runs per over needed from the remaining balls, 0 once none remain
pub fn required_run_rate(runs_left: i64, balls_left: u32) -> f64 {
    if balls_left > 0 {
        (runs_left as f64 * f64::from(BALLS_PER_OVER)) / f64::from(balls_left)
    } else {
        0.0
    }
}

/// Derive the classifier feature record from a validated snapshot.
pub fn derive_features(snapshot: &MatchSnapshot) -> FeatureRecord {
    let balls_bowled =
        snapshot.overs_completed() * BALLS_PER_OVER + snapshot.balls_in_current_over();
    let balls_left = INNINGS_BALLS.saturating_sub(balls_bowled);
    let runs_left = i64::from(snapshot.target()) - i64::from(snapshot.runs_scored());
    let wickets_remaining = TOTAL_WICKETS - snapshot.wickets_lost();

    let overs_elapsed = f64::from(snapshot.overs_completed())
        + f64::from(snapshot.balls_in_current_over()) / f64::from(BALLS_PER_OVER);

    FeatureRecord {
        batting_team: snapshot.batting_team(),
        bowling_team: snapshot.bowling_team(),
        venue: snapshot.venue(),
        runs_left,
        balls_left,
        wickets_remaining,
        target: snapshot.target(),
        current_run_rate: current_run_rate(snapshot.runs_scored(), overs_elapsed),
        required_run_rate: required_run_rate(runs_left, balls_left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn snapshot(overs: i64, balls: i64, runs: i64, wickets: i64, target: i64) -> MatchSnapshot {
        MatchSnapshot::new(
            Team::RajasthanRoyals,
            Team::KolkataKnightRiders,
            Venue::Jaipur,
            overs,
            balls,
            runs,
            wickets,
            target,
        )
        .unwrap()
    }

    #[test]
    fn test_mid_innings_chase() {
        let features = derive_features(&snapshot(10, 0, 50, 2, 180));
        assert_eq!(features.balls_left, 60);
        assert_eq!(features.runs_left, 130);
        assert_eq!(features.wickets_remaining, 8);
        assert_eq!(features.target, 180);
        assert!((features.current_run_rate - 5.0).abs() < 1e-9);
        assert!((features.required_run_rate - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_ball_of_innings() {
        let features = derive_features(&snapshot(0, 0, 0, 0, 150));
        assert_eq!(features.balls_left, 120);
        assert_eq!(features.current_run_rate, 0.0);
        // 150 * 6 / 120
        assert!((features.required_run_rate - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_rrr_guard_when_no_balls_remain() {
        assert_eq!(required_run_rate(5, 0), 0.0);
        assert_eq!(required_run_rate(0, 0), 0.0);
        assert!((required_run_rate(5, 1) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_crr_guard_when_no_overs_elapsed() {
        assert_eq!(current_run_rate(0, 0.0), 0.0);
        assert_eq!(current_run_rate(12, 0.0), 0.0);
        assert!((current_run_rate(45, 4.5) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_ball_of_innings() {
        let features = derive_features(&snapshot(19, 5, 175, 6, 180));
        assert_eq!(features.balls_left, 1);
        assert_eq!(features.runs_left, 5);
        assert!((features.required_run_rate - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_crr_guard_ignores_runs_before_first_ball() {
        // Extras can put runs on the board before a legal ball is bowled
        let features = derive_features(&snapshot(0, 0, 7, 0, 150));
        assert_eq!(features.current_run_rate, 0.0);
    }

    #[test]
    fn test_partial_over_rates() {
        let features = derive_features(&snapshot(4, 3, 45, 1, 170));
        assert_eq!(features.balls_left, 93);
        assert!((features.current_run_rate - 10.0).abs() < 1e-9);
        assert!((features.required_run_rate - 125.0 * 6.0 / 93.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_column_names() {
        let features = derive_features(&snapshot(10, 0, 50, 2, 180));
        let value = serde_json::to_value(&features).unwrap();
        for column in [
            "batting_team",
            "bowling_team",
            "city",
            "runs_left",
            "balls_left",
            "wickets",
            "total_runs_x",
            "crr",
            "rrr",
        ] {
            assert!(value.get(column).is_some(), "missing column {}", column);
        }
    }

    #[test]
    fn test_ranges_hold_for_random_valid_snapshots() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let runs = rng.gen_range(0..300);
            let snap = snapshot(
                rng.gen_range(0..=19),
                rng.gen_range(0..=5),
                runs,
                rng.gen_range(0..=9),
                runs + rng.gen_range(1..200),
            );
            let features = derive_features(&snap);

            assert!(features.balls_left <= 120);
            assert!(features.balls_left >= 1);
            assert!((1..=10).contains(&features.wickets_remaining));
            assert!(features.runs_left >= 1);
            assert!(features.current_run_rate.is_finite());
            assert!(features.required_run_rate.is_finite());
            assert!(features.required_run_rate > 0.0);
        }
    }
}
