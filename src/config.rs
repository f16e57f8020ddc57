use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub csv_logging: bool,
    #[serde(default = "default_csv_log_path")]
    pub csv_log_path: String,
    #[serde(default)]
    pub metrics_enabled: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            csv_logging: false,
            csv_log_path: default_csv_log_path(),
            metrics_enabled: false,
        }
    }
}

fn default_csv_log_path() -> String { "predictions.csv".to_string() }

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub config_path: String,
    pub model_path: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Environment wins over the file
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(path) = &env.model_path {
            self.model.path = path.clone();
        }
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            config_path: std::env::var("IPL_CONFIG_PATH")
                .unwrap_or_else(|_| "config.toml".to_string()),
            model_path: std::env::var("IPL_MODEL_PATH").ok(),
        })
    }
}
