use std::env;

use crate::dashboard::DashboardOptions;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Data
    pub data_path: String,
    pub timestamp_format: Option<String>,

    // Dashboard
    pub sensor_names: Vec<String>,
    pub stats_to_show: Vec<String>,
    pub show_attacks: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let sensor_names = split_list(
            &env::var("SENSOR_NAMES").map_err(|_| ConfigError::Missing("SENSOR_NAMES"))?,
        );
        if sensor_names.is_empty() {
            return Err(ConfigError::Missing("SENSOR_NAMES"));
        }

        Ok(Self {
            // Data
            data_path: env::var("DATA_PATH").map_err(|_| ConfigError::Missing("DATA_PATH"))?,
            timestamp_format: env::var("TIMESTAMP_FORMAT").ok().filter(|f| !f.is_empty()),

            // Dashboard
            sensor_names,
            stats_to_show: split_list(&env::var("STATS_TO_SHOW").unwrap_or_default()),
            show_attacks: env::var("SHOW_ATTACKS")
                .map(|v| {
                    parse_flag(&v).unwrap_or_else(|| {
                        tracing::warn!(value = %v, "Unrecognized SHOW_ATTACKS value, using false");
                        false
                    })
                })
                .unwrap_or(false),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    #[must_use]
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            sensor_names: self.sensor_names.clone(),
            stats_to_show: self.stats_to_show.clone(),
            show_attacks: self.show_attacks,
        }
    }
}

/// Split a comma-separated list, dropping blanks
#[must_use]
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse a boolean flag, accepting the usual spellings (`1`, `yes`, `on`, ...)
#[must_use]
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
