pub mod types;
pub mod win_predictor;

pub use types::{PredictionError, WinProbability};
pub use win_predictor::WinPredictor;
