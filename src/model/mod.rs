pub mod classifier;
pub mod logistic;

pub use classifier::{Classifier, ClassifierHandle, ModelError, BATTING_WIN, BOWLING_WIN};
pub use logistic::LogisticModel;
