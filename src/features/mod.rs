pub mod deriver;

pub use deriver::{derive_features, FeatureRecord};
