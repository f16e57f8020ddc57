pub mod snapshot;
pub mod types;

pub use snapshot::{MatchSnapshot, ValidationError};
pub use types::{MatchInput, Team, Venue};
