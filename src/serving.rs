use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};
use crate::config::OutputFormat;
use crate::match_state::{MatchInput, ValidationError};
use crate::monitoring::PredictionLogger;
use crate::prediction::{PredictionError, WinPredictor};
use crate::report;

/// Everything needed to answer one line of input
pub struct Session {
    predictor: WinPredictor,
    format: OutputFormat,
    logger: Option<PredictionLogger>,
    #[cfg(feature = "metrics")]
    metrics: Option<crate::monitoring::PredictionMetrics>,
}

impl Session {
    pub fn new(
        predictor: WinPredictor,
        format: OutputFormat,
        logger: Option<PredictionLogger>,
    ) -> Self {
        Self {
            predictor,
            format,
            logger,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, metrics: crate::monitoring::PredictionMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> Option<&crate::monitoring::PredictionMetrics> {
        self.metrics.as_ref()
    }

    /// Response for one raw input line, or `None` for blank and `#` lines
    pub fn respond(&self, raw: &[u8]) -> Option<String> {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                let error = ValidationError::Unreadable(format!("not valid UTF-8 ({})", e));
                return Some(self.fail(None, error.into()));
            }
        };

        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let input: MatchInput = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(e) => {
                let error = ValidationError::Unreadable(e.to_string());
                return Some(self.fail(None, error.into()));
            }
        };

        match self.predictor.predict_with_features(&input) {
            Ok((features, result)) => {
                if let Some(logger) = &self.logger {
                    if let Err(e) = logger.log_prediction(&features, &result) {
                        warn!("Failed to write prediction log: {}", e);
                    }
                }
                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_success();
                }
                Some(report::render_prediction(&result, self.format))
            }
            Err(e) => Some(self.fail(Some(&input), e)),
        }
    }

    fn fail(&self, input: Option<&MatchInput>, error: PredictionError) -> String {
        match &error {
            PredictionError::InvalidInput(e) => info!("Rejected match state: {}", e),
            _ => warn!("Prediction failed: {}", error),
        }

        if let Some(logger) = &self.logger {
            if let Err(log_err) = logger.log_failure(input, &error) {
                warn!("Failed to write prediction log: {}", log_err);
            }
        }
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_failure(&error);
        }

        report::render_error(&error, self.format)
    }
}

/// Answer newline-delimited match states until EOF.
///
/// Bad lines get an error response; only an I/O failure on either stream
/// stops the loop. Returns the number of responses written.
pub async fn serve<R, W>(session: &Session, mut reader: R, mut writer: W) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut responses = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        if let Some(response) = session.respond(&buf) {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            responses += 1;
        }
    }

    Ok(responses)
}
