use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::SelectionState;

pub const HEADING: &str = "Sensor readings";
pub const GRAPH_ID: &str = "time-series-chart";
pub const SENSOR_DROPDOWN_ID: &str = "sensor";
pub const DATE_PICKER_ID: &str = "date-range";
pub const RANGE_TEXT_ID: &str = "selected-range";

/// One element of the dashboard page, top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Heading {
        text: String,
    },
    /// Chart area bound to the current chart view
    Graph {
        id: String,
    },
    Paragraph {
        text: String,
    },
    Dropdown {
        id: String,
        options: Vec<String>,
        value: String,
        clearable: bool,
    },
    DatePickerRange {
        id: String,
        min_date_allowed: NaiveDate,
        max_date_allowed: NaiveDate,
        initial_visible_month: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    Placeholder {
        id: String,
        text: String,
    },
}

/// Declarative description of the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Layout {
    pub components: Vec<Component>,
}

impl Layout {
    pub fn build(catalog: &[String], bounds: (NaiveDate, NaiveDate), state: &SelectionState) -> Self {
        let (min_date, max_date) = bounds;

        Self {
            components: vec![
                Component::Heading {
                    text: HEADING.to_string(),
                },
                Component::Graph {
                    id: GRAPH_ID.to_string(),
                },
                Component::Paragraph {
                    text: "Select sensor:".to_string(),
                },
                Component::Dropdown {
                    id: SENSOR_DROPDOWN_ID.to_string(),
                    options: catalog.to_vec(),
                    value: state.selected_sensor.clone(),
                    clearable: false,
                },
                Component::DatePickerRange {
                    id: DATE_PICKER_ID.to_string(),
                    min_date_allowed: min_date,
                    max_date_allowed: max_date,
                    initial_visible_month: min_date,
                    start_date: state.range_start,
                    end_date: state.range_end,
                },
                Component::Placeholder {
                    id: RANGE_TEXT_ID.to_string(),
                    text: range_text(state),
                },
            ],
        }
    }

    pub fn find(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| match c {
            Component::Graph { id: cid }
            | Component::Dropdown { id: cid, .. }
            | Component::DatePickerRange { id: cid, .. }
            | Component::Placeholder { id: cid, .. } => cid == id,
            Component::Heading { .. } | Component::Paragraph { .. } => false,
        })
    }
}

/// Human-readable summary of the selected range
pub fn range_text(state: &SelectionState) -> String {
    if state.range_start > state.range_end {
        return format!(
            "Start date {} is after end date {}: no readings selected",
            state.range_start, state.range_end
        );
    }
    format!("Selected range: {} to {}", state.range_start, state.range_end)
}
