//! Tests for the dashboard value: scenarios from selection to chart.
//!
//! Run with: cargo test --test dashboard_unit_test

mod common;

use common::{date, sensors, shared_table};
use sensor_dashboard::chart::{ANOMALY_TRACE_NAME, ChartView};
use sensor_dashboard::dashboard::{
    Component, Dashboard, DashboardError, DashboardOptions, SelectionEvent,
};

fn series_names(view: &ChartView, pane: usize) -> Vec<String> {
    view.chart().expect("chart should be rendered").panes[pane]
        .series
        .iter()
        .map(|s| s.name.clone())
        .collect()
}

#[test]
fn scenario_single_sensor_full_range() {
    let mut dashboard = Dashboard::new(shared_table(), DashboardOptions::new(sensors())).unwrap();
    let snapshot = dashboard.set_sensor("S1").unwrap();

    let chart = snapshot.chart.chart().unwrap();
    assert_eq!(chart.panes.len(), 1);
    assert_eq!(series_names(&snapshot.chart, 0), vec!["S1"]);
    assert_eq!(chart.panes[0].series[0].len(), 6);
}

#[test]
fn scenario_stat_overlay() {
    let options = DashboardOptions::new(sensors()).with_stats(["rollingMean"]);
    let mut dashboard = Dashboard::new(shared_table(), options).unwrap();
    let snapshot = dashboard.set_sensor("S2").unwrap();

    assert_eq!(snapshot.chart.chart().unwrap().panes.len(), 1);
    assert_eq!(series_names(&snapshot.chart, 0), vec!["S2", "S2_rollingMean"]);
}

#[test]
fn scenario_anomaly_overlay() {
    let options = DashboardOptions::new(sensors())
        .with_stats(["rollingMean"])
        .with_attacks(true);
    let mut dashboard = Dashboard::new(shared_table(), options).unwrap();
    let snapshot = dashboard.set_sensor("S1").unwrap();

    let chart = snapshot.chart.chart().unwrap();
    assert_eq!(chart.panes.len(), 2);
    assert_eq!(series_names(&snapshot.chart, 0), vec!["S1", "S1_rollingMean"]);
    assert_eq!(series_names(&snapshot.chart, 1), vec![ANOMALY_TRACE_NAME]);
    assert_eq!(chart.panes[1].series[0].x, chart.panes[0].series[0].x);
}

#[test]
fn scenario_start_after_end() {
    for show_attacks in [false, true] {
        let options = DashboardOptions::new(sensors()).with_attacks(show_attacks);
        let mut dashboard = Dashboard::new(shared_table(), options).unwrap();

        dashboard.set_range_end(date(6));
        let snapshot = dashboard.set_range_start(date(8));

        let chart = snapshot.chart.chart().expect("empty range is not an error");
        assert!(chart.is_empty());
        assert_eq!(chart.panes.len(), if show_attacks { 2 } else { 1 });
    }
}

#[test]
fn scenario_missing_stat() {
    let options = DashboardOptions::new(sensors()).with_stats(["missingStat"]);
    let dashboard = Dashboard::new(shared_table(), options).unwrap();

    match dashboard.chart() {
        ChartView::Failed { message } => {
            assert_eq!(
                message,
                &DashboardError::MissingColumn {
                    sensor: "S1".to_string(),
                    stat: Some("missingStat".to_string()),
                }
                .to_string()
            );
        }
        ChartView::Ready { .. } => panic!("expected a failed render"),
    }
}

#[test]
fn failed_render_replaces_previous_chart() {
    // Only S1 has the `extra` stat column
    let table = {
        use sensor_dashboard::data::{Column, TimeSeriesTable};
        let index = vec![common::ts(6, 0)];
        TimeSeriesTable::new(
            index,
            vec![
                Column::new("S1", vec![Some(1.0)]),
                Column::new("S1_extra", vec![Some(1.0)]),
                Column::new("S2", vec![Some(2.0)]),
                Column::new("ATT_FLAG", vec![Some(0.0)]),
            ],
        )
        .unwrap()
    };
    let options = DashboardOptions::new(sensors()).with_stats(["extra"]);
    let mut dashboard = Dashboard::new(std::sync::Arc::new(table), options).unwrap();
    assert!(!dashboard.chart().is_failed());

    let snapshot = dashboard.set_sensor("S2").unwrap();
    assert!(snapshot.chart.is_failed());
    assert_eq!(snapshot.selection.selected_sensor, "S2");

    let snapshot = dashboard.set_sensor("S1").unwrap();
    assert!(!snapshot.chart.is_failed());
}

#[test]
fn invalid_sensor_keeps_state_and_chart() {
    let mut dashboard = Dashboard::new(shared_table(), DashboardOptions::new(sensors())).unwrap();
    let before = dashboard.snapshot();
    let mut rx = dashboard.subscribe();

    let err = dashboard.apply(SelectionEvent::Sensor("S9".to_string())).unwrap_err();

    assert_eq!(err, DashboardError::InvalidSensor("S9".to_string()));
    assert_eq!(dashboard.snapshot(), before);
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn every_event_publishes_a_snapshot() {
    let mut dashboard = Dashboard::new(shared_table(), DashboardOptions::new(sensors())).unwrap();
    let mut rx = dashboard.subscribe();

    dashboard.apply(SelectionEvent::RangeStart(date(7))).unwrap();
    assert!(rx.has_changed().unwrap());
    let published = rx.borrow_and_update().clone();
    assert_eq!(published, dashboard.snapshot());
    assert_eq!(published.selection.range_start, date(7));
    assert_eq!(published.chart.chart().unwrap().panes[0].series[0].len(), 4);
}

#[test]
fn subscriber_wakes_on_next_render() {
    let mut dashboard = Dashboard::new(shared_table(), DashboardOptions::new(sensors())).unwrap();
    let mut rx = dashboard.subscribe();

    dashboard.apply(SelectionEvent::Sensor("S2".to_string())).unwrap();
    tokio_test::block_on(rx.changed()).unwrap();
    assert_eq!(rx.borrow_and_update().selection.selected_sensor, "S2");

    // Nothing new until the next event
    tokio_test::assert_pending!(tokio_test::task::spawn(rx.changed()).poll());
}

#[test]
fn empty_catalog_is_rejected() {
    let result = Dashboard::new(shared_table(), DashboardOptions::new(Vec::<String>::new()));
    assert!(matches!(result, Err(DashboardError::EmptyCatalog)));
}

#[test]
fn duplicate_stats_are_dropped() {
    let options = DashboardOptions::new(sensors()).with_stats(["rollingMean", "rollingMean"]);
    let dashboard = Dashboard::new(shared_table(), options).unwrap();

    assert_eq!(dashboard.stats(), &["rollingMean".to_string()]);
    assert_eq!(dashboard.chart().chart().unwrap().panes[0].series.len(), 2);
}

#[test]
fn layout_reflects_selection() {
    let mut dashboard = Dashboard::new(shared_table(), DashboardOptions::new(sensors())).unwrap();
    dashboard.set_sensor("S2").unwrap();
    dashboard.set_range_start(date(7));

    let layout = dashboard.layout();
    assert!(matches!(&layout.components[0], Component::Heading { text } if text == "Sensor readings"));
    assert!(matches!(&layout.components[1], Component::Graph { id } if id == "time-series-chart"));

    match layout.find("sensor") {
        Some(Component::Dropdown {
            options,
            value,
            clearable,
            ..
        }) => {
            assert_eq!(options, &sensors());
            assert_eq!(value, "S2");
            assert!(!clearable);
        }
        other => panic!("unexpected component: {other:?}"),
    }

    match layout.find("date-range") {
        Some(Component::DatePickerRange {
            min_date_allowed,
            max_date_allowed,
            initial_visible_month,
            start_date,
            end_date,
            ..
        }) => {
            assert_eq!(*min_date_allowed, date(6));
            assert_eq!(*max_date_allowed, date(8));
            assert_eq!(*initial_visible_month, date(6));
            assert_eq!(*start_date, date(7));
            assert_eq!(*end_date, date(8));
        }
        other => panic!("unexpected component: {other:?}"),
    }

    match layout.find("selected-range") {
        Some(Component::Placeholder { text, .. }) => {
            assert_eq!(text, "Selected range: 2014-01-07 to 2014-01-08");
        }
        other => panic!("unexpected component: {other:?}"),
    }

    assert!(layout.find("missing").is_none());
}

#[test]
fn dashboards_are_independent() {
    let table = shared_table();
    let mut a = Dashboard::new(table.clone(), DashboardOptions::new(sensors())).unwrap();
    let b = Dashboard::new(table, DashboardOptions::new(sensors())).unwrap();

    a.set_sensor("S2").unwrap();
    assert_eq!(a.selection().selected_sensor, "S2");
    assert_eq!(b.selection().selected_sensor, "S1");
}
