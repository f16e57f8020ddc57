use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use crate::prediction::PredictionError;

pub struct PredictionMetrics {
    registry: Registry,
    served: IntCounter,
    failed: IntCounterVec,
}

impl PredictionMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let served = IntCounter::new("ipl_predictions_total", "Predictions served")?;
        let failed = IntCounterVec::new(
            Opts::new("ipl_prediction_failures_total", "Failed predictions by kind"),
            &["kind"],
        )?;

        registry.register(Box::new(served.clone()))?;
        registry.register(Box::new(failed.clone()))?;

        Ok(Self {
            registry,
            served,
            failed,
        })
    }

    pub fn record_success(&self) {
        self.served.inc();
    }

    pub fn record_failure(&self, error: &PredictionError) {
        self.failed.with_label_values(&[error.kind()]).inc();
    }

    /// Prometheus text exposition of every counter
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
