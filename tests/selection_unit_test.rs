//! Unit tests for the selection state holder.
//!
//! Run with: cargo test --test selection_unit_test

mod common;

use common::{date, sensors};
use sensor_dashboard::dashboard::{DashboardError, SelectionEvent, SelectionHolder};

fn holder() -> SelectionHolder {
    SelectionHolder::new(sensors(), date(6), date(8)).unwrap()
}

#[test]
fn defaults_to_first_sensor_and_full_span() {
    let holder = holder();
    let state = holder.state();
    assert_eq!(state.selected_sensor, "S1");
    assert_eq!(state.range_start, date(6));
    assert_eq!(state.range_end, date(8));
}

#[test]
fn empty_catalog_is_rejected() {
    let result = SelectionHolder::new(vec![], date(6), date(8));
    assert!(matches!(result, Err(DashboardError::EmptyCatalog)));
}

#[test]
fn set_sensor_accepts_every_catalog_sensor() {
    let mut holder = holder();
    for sensor in sensors() {
        holder.set_sensor(&sensor).unwrap();
        assert_eq!(holder.state().selected_sensor, sensor);
    }
}

#[test]
fn unknown_sensor_leaves_state_untouched() {
    let mut holder = holder();
    let mut rx = holder.subscribe();
    let before = holder.state().clone();

    let err = holder.set_sensor("S9").unwrap_err();

    assert_eq!(err, DashboardError::InvalidSensor("S9".to_string()));
    assert_eq!(holder.state(), &before);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), before);
}

#[test]
fn range_dates_are_clamped_to_table_bounds() {
    let mut holder = holder();

    holder.set_range_start(date(1));
    assert_eq!(holder.state().range_start, date(6));
    holder.set_range_start(date(30));
    assert_eq!(holder.state().range_start, date(8));

    holder.set_range_end(date(30));
    assert_eq!(holder.state().range_end, date(8));
    holder.set_range_end(date(2));
    assert_eq!(holder.state().range_end, date(6));

    holder.set_range_start(date(7));
    assert_eq!(holder.state().range_start, date(7));
}

#[test]
fn start_may_pass_end() {
    let mut holder = holder();
    holder.set_range_end(date(6));
    holder.set_range_start(date(8));
    assert!(holder.state().range_start > holder.state().range_end);
}

#[test]
fn each_setter_publishes_once() {
    let mut holder = holder();
    let mut rx = holder.subscribe();
    assert!(!rx.has_changed().unwrap());

    holder.set_sensor("S2").unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().selected_sensor, "S2");
    assert!(!rx.has_changed().unwrap());

    holder.set_range_start(date(7));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().range_start, date(7));

    holder.set_range_end(date(7));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().range_end, date(7));
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn apply_dispatches_events() {
    let mut holder = holder();

    holder.apply(SelectionEvent::Sensor("S2".to_string())).unwrap();
    holder.apply(SelectionEvent::RangeStart(date(7))).unwrap();
    holder.apply(SelectionEvent::RangeEnd(date(7))).unwrap();

    let state = holder.state();
    assert_eq!(state.selected_sensor, "S2");
    assert_eq!(state.range_start, date(7));
    assert_eq!(state.range_end, date(7));

    assert!(holder.apply(SelectionEvent::Sensor("nope".to_string())).is_err());
}

#[test]
fn events_deserialize_from_json() {
    let event: SelectionEvent = serde_json::from_str(r#"{"type":"sensor","value":"S2"}"#).unwrap();
    assert_eq!(event, SelectionEvent::Sensor("S2".to_string()));

    let event: SelectionEvent =
        serde_json::from_str(r#"{"type":"range_start","value":"2014-01-07"}"#).unwrap();
    assert_eq!(event, SelectionEvent::RangeStart(date(7)));

    let event: SelectionEvent =
        serde_json::from_str(r#"{"type":"range_end","value":"2014-01-08"}"#).unwrap();
    assert_eq!(event, SelectionEvent::RangeEnd(date(8)));
}
