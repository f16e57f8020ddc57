pub mod logger;
#[cfg(feature = "metrics")]
pub mod metrics;

pub use logger::PredictionLogger;
#[cfg(feature = "metrics")]
pub use metrics::PredictionMetrics;
