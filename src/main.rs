use anyhow::Result;
use ipl_win_predictor::config::{Config, EnvConfig};
use ipl_win_predictor::model::ClassifierHandle;
use ipl_win_predictor::monitoring::PredictionLogger;
use ipl_win_predictor::prediction::WinPredictor;
use ipl_win_predictor::serving::{self, Session};
use tokio::io::BufReader;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only predictions
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("🏏 IPL win predictor starting...");

    let env_config = EnvConfig::load()?;
    info!("Loading configuration: {}", env_config.config_path);
    let mut config = Config::load(&env_config.config_path)?;
    config.apply_env(&env_config);

    let predictor = WinPredictor::new(ClassifierHandle::load(&config.model.path));

    let logger = if config.monitoring.csv_logging {
        info!("Logging predictions to {}", config.monitoring.csv_log_path);
        Some(PredictionLogger::new(config.monitoring.csv_log_path.clone())?)
    } else {
        None
    };

    let session = Session::new(predictor, config.output.format, logger);

    #[cfg(feature = "metrics")]
    let session = if config.monitoring.metrics_enabled {
        session.with_metrics(ipl_win_predictor::monitoring::PredictionMetrics::new()?)
    } else {
        session
    };

    #[cfg(not(feature = "metrics"))]
    if config.monitoring.metrics_enabled {
        warn!("metrics_enabled is set but the binary was built without the `metrics` feature");
    }

    info!("Ready: one JSON match state per line on stdin");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        served = serving::serve(&session, stdin, stdout) => {
            info!("Input closed after {} responses", served?);
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
        }
    }

    #[cfg(feature = "metrics")]
    if let Some(metrics) = session.metrics() {
        info!("Final metrics:\n{}", metrics.render()?);
    }

    info!("Shutting down...");

    Ok(())
}
