use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::data;
use crate::error::AppResult;

/// Shared handler state: one dashboard per process.
/// Each request applies its event and re-renders under the lock.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Load the configured table and build the dashboard over it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Table` if the CSV cannot be loaded and
    /// `AppError::Dashboard` if the sensor list is empty.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        // Loaded once; stays read-only for the life of the process
        let table = data::load_csv(&config.data_path, config.timestamp_format.as_deref())?;
        let dashboard = Dashboard::new(Arc::new(table), config.dashboard_options())?;

        if dashboard.chart().is_failed() {
            tracing::warn!("Initial chart failed to render; check SENSOR_NAMES and STATS_TO_SHOW");
        }

        Ok(Self::new(dashboard))
    }
}
