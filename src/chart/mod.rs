//! Typed chart description produced by the renderer.
//!
//! A `ChartSpecification` says what to draw, not how: panes stacked top to
//! bottom, each with named line series. Any plotting front end can consume it.

pub mod render;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub use render::{ANOMALY_TRACE_NAME, BOTTOM_PANE_WEIGHT, TOP_PANE_WEIGHT, render_chart};

/// One named line series
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Series {
    pub name: String,
    /// Timestamps (x axis)
    pub x: Vec<DateTime<Utc>>,
    /// Values aligned with `x`, null for missing readings
    pub y: Vec<Option<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// A plotting region; panes stack vertically
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pane {
    /// Relative height weight
    pub height: f64,
    pub series: Vec<Series>,
}

/// Explicit x-axis framing, independent of which rows were sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct XRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartSpecification {
    pub panes: Vec<Pane>,
    /// Whether all panes share one x axis
    pub shared_x: bool,
    pub x_range: XRange,
}

impl ChartSpecification {
    /// All series across panes, top to bottom
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.panes.iter().flat_map(|p| p.series.iter())
    }

    /// True if no series has any point
    pub fn is_empty(&self) -> bool {
        self.series().all(Series::is_empty)
    }
}

/// What the chart area currently shows
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartView {
    Ready { chart: ChartSpecification },
    Failed { message: String },
}

impl ChartView {
    pub fn chart(&self) -> Option<&ChartSpecification> {
        match self {
            Self::Ready { chart } => Some(chart),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
