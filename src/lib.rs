//! Live win probability for the chasing side of a 20-over match.
//!
//! Raw match state is validated into a [`match_state::MatchSnapshot`],
//! turned into a [`features::FeatureRecord`], and scored by an injected
//! [`model::Classifier`].

pub mod config;
pub mod features;
pub mod match_state;
pub mod model;
pub mod monitoring;
pub mod prediction;
pub mod report;
pub mod serving;
