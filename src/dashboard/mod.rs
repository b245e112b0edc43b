//! The dashboard: selection state, layout and the current chart.
//!
//! A `Dashboard` is a self-contained value. The chart is re-rendered whenever
//! the selection holder publishes a change; render failures replace the chart
//! with a visible error state so a stale chart is never paired with a new
//! selection.

pub mod layout;
pub mod selection;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::chart::{ChartView, render_chart};
use crate::data::TimeSeriesTable;

pub use layout::{Component, Layout};
pub use selection::{SelectionEvent, SelectionHolder, SelectionState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("Unknown sensor: {0}")]
    InvalidSensor(String),

    #[error("Missing column '{}'", column_label(.sensor, .stat))]
    MissingColumn { sensor: String, stat: Option<String> },

    #[error("Sensor list is empty")]
    EmptyCatalog,
}

fn column_label(sensor: &str, stat: &Option<String>) -> String {
    match stat {
        Some(stat) => format!("{sensor}_{stat}"),
        None => sensor.to_string(),
    }
}

/// Construction-time parameters, fixed for the dashboard's lifetime
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    /// Dropdown options; the first one is selected initially
    pub sensor_names: Vec<String>,
    /// Stat suffixes overlaid as `{sensor}_{stat}`
    pub stats_to_show: Vec<String>,
    /// Add the `ATT_FLAG` pane below the readings
    pub show_attacks: bool,
}

impl DashboardOptions {
    pub fn new(sensor_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            sensor_names: sensor_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stats_to_show = stats.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_attacks(mut self, show_attacks: bool) -> Self {
        self.show_attacks = show_attacks;
        self
    }
}

/// Selection and chart as one consistent pair
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub selection: SelectionState,
    pub chart: ChartView,
}

#[derive(Debug)]
pub struct Dashboard {
    table: Arc<TimeSeriesTable>,
    stats: Vec<String>,
    show_attacks: bool,
    selection: SelectionHolder,
    selection_rx: watch::Receiver<SelectionState>,
    chart: ChartView,
    snapshots: watch::Sender<DashboardSnapshot>,
}

impl Dashboard {
    /// Build a dashboard over `table` and render the initial chart.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::EmptyCatalog` if no sensor names are given.
    pub fn new(table: Arc<TimeSeriesTable>, options: DashboardOptions) -> Result<Self, DashboardError> {
        let selection = SelectionHolder::new(options.sensor_names, table.min_date(), table.max_date())?;
        let selection_rx = selection.subscribe();

        // Stats behave as a set but keep their given order
        let mut stats: Vec<String> = Vec::with_capacity(options.stats_to_show.len());
        for stat in options.stats_to_show {
            if !stats.contains(&stat) {
                stats.push(stat);
            }
        }

        let placeholder = ChartView::Failed {
            message: "Not rendered yet".to_string(),
        };
        let (snapshots, _) = watch::channel(DashboardSnapshot {
            selection: selection.state().clone(),
            chart: placeholder.clone(),
        });

        let mut dashboard = Self {
            table,
            stats,
            show_attacks: options.show_attacks,
            selection,
            selection_rx,
            chart: placeholder,
            snapshots,
        };

        tracing::info!(
            sensors = dashboard.selection.catalog().len(),
            stats = ?dashboard.stats,
            show_attacks = dashboard.show_attacks,
            "Dashboard created"
        );

        dashboard.render();
        Ok(dashboard)
    }

    pub fn table(&self) -> &TimeSeriesTable {
        &self.table
    }

    pub fn stats(&self) -> &[String] {
        &self.stats
    }

    pub fn show_attacks(&self) -> bool {
        self.show_attacks
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn chart(&self) -> &ChartView {
        &self.chart
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            selection: self.selection.state().clone(),
            chart: self.chart.clone(),
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::build(self.selection.catalog(), self.selection.bounds(), self.selection.state())
    }

    /// Receive a snapshot after every render
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.subscribe()
    }

    /// # Errors
    ///
    /// Returns `DashboardError::InvalidSensor` if `id` is not a catalog sensor;
    /// nothing is re-rendered in that case.
    pub fn set_sensor(&mut self, id: &str) -> Result<DashboardSnapshot, DashboardError> {
        self.apply(SelectionEvent::Sensor(id.to_string()))
    }

    pub fn set_range_start(&mut self, date: chrono::NaiveDate) -> DashboardSnapshot {
        self.selection.set_range_start(date);
        self.sync();
        self.snapshot()
    }

    pub fn set_range_end(&mut self, date: chrono::NaiveDate) -> DashboardSnapshot {
        self.selection.set_range_end(date);
        self.sync();
        self.snapshot()
    }

    /// Apply one input event and re-render.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::InvalidSensor` for an unknown sensor.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<DashboardSnapshot, DashboardError> {
        self.selection.apply(event)?;
        self.sync();
        Ok(self.snapshot())
    }

    /// Re-render the chart for the current selection
    pub fn render(&mut self) -> &ChartView {
        let state = self.selection.state().clone();
        self.render_state(&state);
        &self.chart
    }

    /// Re-render if the selection holder published since the last render
    fn sync(&mut self) {
        if !self.selection_rx.has_changed().unwrap_or(false) {
            return;
        }
        let state = self.selection_rx.borrow_and_update().clone();
        self.render_state(&state);
    }

    fn render_state(&mut self, state: &SelectionState) {
        self.chart = match render_chart(
            &self.table,
            &state.selected_sensor,
            &self.stats,
            self.show_attacks,
            state.range_start,
            state.range_end,
        ) {
            Ok(chart) => {
                tracing::debug!(
                    sensor = %state.selected_sensor,
                    panes = chart.panes.len(),
                    points = chart.panes[0].series[0].len(),
                    "Chart rendered"
                );
                ChartView::Ready { chart }
            }
            Err(e) => {
                tracing::warn!(sensor = %state.selected_sensor, error = %e, "Chart render failed");
                ChartView::Failed {
                    message: e.to_string(),
                }
            }
        };

        self.snapshots.send_replace(DashboardSnapshot {
            selection: state.clone(),
            chart: self.chart.clone(),
        });
    }
}
