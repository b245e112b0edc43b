use chrono::NaiveDate;

use super::{ChartSpecification, Pane, Series, XRange};
use crate::dashboard::DashboardError;
use crate::data::{ANOMALY_COLUMN, TimeSeriesTable};

/// Height weight of the readings pane when the anomaly pane is shown
pub const TOP_PANE_WEIGHT: f64 = 0.7;
/// Height weight of the anomaly pane
pub const BOTTOM_PANE_WEIGHT: f64 = 0.3;
/// Series name used for the `ATT_FLAG` trace regardless of sensor
pub const ANOMALY_TRACE_NAME: &str = "attack trace";

/// Build the chart for one sensor over the days `range_start..=range_end`.
///
/// The top pane holds the base sensor series followed by one
/// `{sensor}_{stat}` series per entry in `stats`. With
/// `show_anomaly_overlay`, a second pane holds the `ATT_FLAG` trace.
/// A `range_start` after `range_end` yields empty series.
///
/// # Errors
///
/// Returns `DashboardError::MissingColumn` if the base column or any stat
/// column does not exist in `table`. Columns are checked before slicing, so
/// the outcome does not depend on the range.
pub fn render_chart(
    table: &TimeSeriesTable,
    sensor: &str,
    stats: &[String],
    show_anomaly_overlay: bool,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<ChartSpecification, DashboardError> {
    let mut columns = Vec::with_capacity(stats.len() + 1);

    let base = table
        .column(sensor)
        .ok_or_else(|| DashboardError::MissingColumn {
            sensor: sensor.to_string(),
            stat: None,
        })?;
    columns.push((sensor.to_string(), base));

    for stat in stats {
        let name = format!("{sensor}_{stat}");
        let values = table
            .column(&name)
            .ok_or_else(|| DashboardError::MissingColumn {
                sensor: sensor.to_string(),
                stat: Some(stat.clone()),
            })?;
        columns.push((name, values));
    }

    let rows = table.date_range(range_start, range_end);
    let x = table.index()[rows.clone()].to_vec();

    let slice_series = |name: String, values: &[Option<f64>]| Series {
        name,
        x: x.clone(),
        y: values[rows.clone()].to_vec(),
    };

    let top: Vec<Series> = columns
        .into_iter()
        .map(|(name, values)| slice_series(name, values))
        .collect();

    let x_range = XRange {
        start: range_start,
        end: range_end,
    };

    if !show_anomaly_overlay {
        return Ok(ChartSpecification {
            panes: vec![Pane {
                height: 1.0,
                series: top,
            }],
            shared_x: false,
            x_range,
        });
    }

    let flags = table
        .column(ANOMALY_COLUMN)
        .ok_or_else(|| DashboardError::MissingColumn {
            sensor: sensor.to_string(),
            stat: Some(ANOMALY_COLUMN.to_string()),
        })?;
    let anomaly = slice_series(ANOMALY_TRACE_NAME.to_string(), flags);

    Ok(ChartSpecification {
        panes: vec![
            Pane {
                height: TOP_PANE_WEIGHT,
                series: top,
            },
            Pane {
                height: BOTTOM_PANE_WEIGHT,
                series: vec![anomaly],
            },
        ],
        shared_x: true,
        x_range,
    })
}
