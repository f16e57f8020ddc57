use crate::match_state::types::{MatchInput, Team, Venue};
use tracing::debug;

/// Completed overs in a 20-over innings never exceed this
pub const MAX_OVERS_COMPLETED: u32 = 19;
pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS_LOST: u32 = 9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown venue: {0}")]
    UnknownVenue(String),

    #[error("Batting and bowling team are both {0}")]
    SameTeams(Team),

    #[error("Overs completed must be 0-19, got {0}")]
    OversOutOfRange(i64),

    #[error("Balls in current over must be 0-5, got {0}")]
    BallsOutOfRange(i64),

    #[error("Wickets lost must be 0-9, got {0}")]
    WicketsOutOfRange(i64),

    #[error("Runs scored cannot be negative, got {0}")]
    NegativeRuns(i64),

    #[error("Target {target} must be greater than runs scored {runs}")]
    TargetNotAhead { target: i64, runs: i64 },

    #[error("{field} {value} is too large")]
    TooLarge { field: &'static str, value: i64 },

    #[error("Could not read match state: {0}")]
    Unreadable(String),
}

/// A validated second-innings match state.
///
/// Only constructible through [`MatchSnapshot::new`] or `TryFrom<MatchInput>`,
/// so holding one means every range invariant has already been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    batting_team: Team,
    bowling_team: Team,
    venue: Venue,
    overs_completed: u32,
    balls_in_current_over: u32,
    runs_scored: u32,
    wickets_lost: u32,
    target: u32,
}

impl MatchSnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batting_team: Team,
        bowling_team: Team,
        venue: Venue,
        overs_completed: i64,
        balls_in_current_over: i64,
        runs_scored: i64,
        wickets_lost: i64,
        target: i64,
    ) -> Result<Self, ValidationError> {
        if batting_team == bowling_team {
            return Err(ValidationError::SameTeams(batting_team));
        }

        let overs_completed = u32::try_from(overs_completed)
            .ok()
            .filter(|o| *o <= MAX_OVERS_COMPLETED)
            .ok_or(ValidationError::OversOutOfRange(overs_completed))?;

        let balls_in_current_over = u32::try_from(balls_in_current_over)
            .ok()
            .filter(|b| *b < BALLS_PER_OVER)
            .ok_or(ValidationError::BallsOutOfRange(balls_in_current_over))?;

        let wickets_lost = u32::try_from(wickets_lost)
            .ok()
            .filter(|w| *w <= MAX_WICKETS_LOST)
            .ok_or(ValidationError::WicketsOutOfRange(wickets_lost))?;

        if runs_scored < 0 {
            return Err(ValidationError::NegativeRuns(runs_scored));
        }
        let runs = u32::try_from(runs_scored).map_err(|_| ValidationError::TooLarge {
            field: "Runs scored",
            value: runs_scored,
        })?;

        if target <= runs_scored {
            return Err(ValidationError::TargetNotAhead {
                target,
                runs: runs_scored,
            });
        }
        let target = u32::try_from(target).map_err(|_| ValidationError::TooLarge {
            field: "Target",
            value: target,
        })?;

        Ok(Self {
            batting_team,
            bowling_team,
            venue,
            overs_completed,
            balls_in_current_over,
            runs_scored: runs,
            wickets_lost,
            target,
        })
    }

    pub fn batting_team(&self) -> Team {
        self.batting_team
    }

    pub fn bowling_team(&self) -> Team {
        self.bowling_team
    }

    pub fn venue(&self) -> Venue {
        self.venue
    }

    pub fn overs_completed(&self) -> u32 {
        self.overs_completed
    }

    pub fn balls_in_current_over(&self) -> u32 {
        self.balls_in_current_over
    }

    pub fn runs_scored(&self) -> u32 {
        self.runs_scored
    }

    pub fn wickets_lost(&self) -> u32 {
        self.wickets_lost
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

impl TryFrom<&MatchInput> for MatchSnapshot {
    type Error = ValidationError;

    fn try_from(input: &MatchInput) -> Result<Self, Self::Error> {
        let batting_team = input
            .batting_team
            .parse::<Team>()
            .map_err(|_| ValidationError::UnknownTeam(input.batting_team.clone()))?;
        let bowling_team = input
            .bowling_team
            .parse::<Team>()
            .map_err(|_| ValidationError::UnknownTeam(input.bowling_team.clone()))?;
        let venue = input
            .venue
            .parse::<Venue>()
            .map_err(|_| ValidationError::UnknownVenue(input.venue.clone()))?;

        let snapshot = Self::new(
            batting_team,
            bowling_team,
            venue,
            input.overs_completed,
            input.balls_in_current_over,
            input.runs_scored,
            input.wickets_lost,
            input.target,
        )?;

        debug!(
            "Validated snapshot: {} vs {} at {}, {}/{} after {}.{} chasing {}",
            snapshot.batting_team,
            snapshot.bowling_team,
            snapshot.venue,
            snapshot.runs_scored,
            snapshot.wickets_lost,
            snapshot.overs_completed,
            snapshot.balls_in_current_over,
            snapshot.target
        );

        Ok(snapshot)
    }
}

impl TryFrom<MatchInput> for MatchSnapshot {
    type Error = ValidationError;

    fn try_from(input: MatchInput) -> Result<Self, Self::Error> {
        Self::try_from(&input)
    }
}
