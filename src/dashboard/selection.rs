use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use utoipa::ToSchema;

use super::DashboardError;

/// Current user selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectionState {
    pub selected_sensor: String,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
}

/// One input event from the dashboard controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Sensor dropdown changed
    Sensor(String),
    /// Range start picker changed
    RangeStart(NaiveDate),
    /// Range end picker changed
    RangeEnd(NaiveDate),
}

/// Owns the selection and publishes every change.
///
/// Subscribers get a `watch` receiver; each successful setter marks it
/// changed exactly once. Rejected updates publish nothing.
#[derive(Debug)]
pub struct SelectionHolder {
    catalog: Vec<String>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    state: SelectionState,
    tx: watch::Sender<SelectionState>,
}

impl SelectionHolder {
    /// Start with the first catalog sensor and the full date span.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::EmptyCatalog` if `catalog` is empty.
    pub fn new(
        catalog: Vec<String>,
        min_date: NaiveDate,
        max_date: NaiveDate,
    ) -> Result<Self, DashboardError> {
        let first = catalog.first().cloned().ok_or(DashboardError::EmptyCatalog)?;
        let state = SelectionState {
            selected_sensor: first,
            range_start: min_date,
            range_end: max_date,
        };
        let (tx, _) = watch::channel(state.clone());

        Ok(Self {
            catalog,
            min_date,
            max_date,
            state,
            tx,
        })
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Allowed date bounds, inclusive
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, self.max_date)
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.tx.subscribe()
    }

    /// # Errors
    ///
    /// Returns `DashboardError::InvalidSensor` if `id` is not in the catalog.
    pub fn set_sensor(&mut self, id: &str) -> Result<(), DashboardError> {
        if !self.catalog.iter().any(|s| s == id) {
            tracing::warn!(sensor = %id, "Rejected unknown sensor");
            return Err(DashboardError::InvalidSensor(id.to_string()));
        }
        self.state.selected_sensor = id.to_string();
        self.publish();
        Ok(())
    }

    pub fn set_range_start(&mut self, date: NaiveDate) {
        self.state.range_start = self.clamp(date);
        self.publish();
    }

    pub fn set_range_end(&mut self, date: NaiveDate) {
        self.state.range_end = self.clamp(date);
        self.publish();
    }

    /// # Errors
    ///
    /// Propagates `InvalidSensor` from [`Self::set_sensor`].
    pub fn apply(&mut self, event: SelectionEvent) -> Result<(), DashboardError> {
        match event {
            SelectionEvent::Sensor(id) => self.set_sensor(&id),
            SelectionEvent::RangeStart(date) => {
                self.set_range_start(date);
                Ok(())
            }
            SelectionEvent::RangeEnd(date) => {
                self.set_range_end(date);
                Ok(())
            }
        }
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min_date, self.max_date)
    }

    fn publish(&self) {
        tracing::debug!(
            sensor = %self.state.selected_sensor,
            start = %self.state.range_start,
            end = %self.state.range_end,
            "Selection changed"
        );
        self.tx.send_replace(self.state.clone());
    }
}
