use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use crate::features::FeatureRecord;
use crate::model::logistic::LogisticModel;

/// Index of the "batting side wins" class in a probability pair
pub const BATTING_WIN: usize = 1;
/// Index of the "bowling side wins" class in a probability pair
pub const BOWLING_WIN: usize = 0;

/// A fitted two-class model over [`FeatureRecord`]s.
///
/// Implementations are shared read-only across requests, so `predict_proba`
/// must not mutate anything.
pub trait Classifier: Send + Sync {
    /// Class probabilities `[bowling side wins, batting side wins]`
    fn predict_proba(&self, features: &FeatureRecord) -> Result<[f64; 2], ModelError>;

    fn name(&self) -> &str;

    fn version(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Unseen category {value:?} for column {column}")]
    UnknownCategory { column: &'static str, value: String },

    #[error("Feature {0} is not finite")]
    NonFiniteFeature(&'static str),

    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model definition: {0}")]
    Invalid(String),
}

/// The classifier a predictor runs against, decided once at startup.
#[derive(Clone)]
pub enum ClassifierHandle {
    Ready(Arc<dyn Classifier>),
    Unavailable(String),
}

impl ClassifierHandle {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        ClassifierHandle::Ready(classifier)
    }

    /// Load a logistic model from disk. A failure leaves the handle
    /// unavailable rather than aborting, so callers get a clean error per
    /// request.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match LogisticModel::load(path) {
            Ok(model) => {
                info!(
                    "Loaded classifier {} v{} from {}",
                    model.name(),
                    model.version(),
                    path.display()
                );
                ClassifierHandle::Ready(Arc::new(model))
            }
            Err(e) => {
                error!("Classifier unavailable ({}): {}", path.display(), e);
                ClassifierHandle::Unavailable(format!("{}: {}", path.display(), e))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ClassifierHandle::Ready(_))
    }
}

impl fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierHandle::Ready(c) => write!(f, "Ready({} v{})", c.name(), c.version()),
            ClassifierHandle::Unavailable(reason) => write!(f, "Unavailable({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unavailable() {
        let handle = ClassifierHandle::load("/nonexistent/ipl_model.json");
        assert!(!handle.is_ready());
        match handle {
            ClassifierHandle::Unavailable(reason) => assert!(reason.contains("ipl_model.json")),
            ClassifierHandle::Ready(_) => panic!("expected unavailable"),
        }
    }

    #[test]
    fn test_bundled_model_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/ipl_logreg.json");
        let handle = ClassifierHandle::load(path);
        assert!(handle.is_ready());
        assert!(format!("{:?}", handle).starts_with("Ready("));
    }
}
