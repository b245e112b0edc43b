//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use sensor_dashboard::data::{Column, TimeSeriesTable};

pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 1, day, hour, 0, 0).unwrap()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 1, day).unwrap()
}

/// Two readings per day on 2014-01-06..=2014-01-08 for sensors S1 and S2,
/// each with a `rollingMean` stat column, plus `ATT_FLAG`.
pub fn sample_table() -> TimeSeriesTable {
    let index = vec![ts(6, 0), ts(6, 12), ts(7, 0), ts(7, 12), ts(8, 0), ts(8, 12)];
    let columns = vec![
        Column::new("S1", vec![Some(1.0), Some(2.0), Some(3.0), None, Some(5.0), Some(6.0)]),
        Column::new("S1_rollingMean", vec![Some(1.0), Some(1.5), Some(2.0), Some(2.0), Some(3.0), Some(4.0)]),
        Column::new("S2", vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(50.0), Some(60.0)]),
        Column::new("S2_rollingMean", vec![Some(10.0), Some(15.0), Some(20.0), Some(25.0), Some(30.0), Some(35.0)]),
        Column::new("ATT_FLAG", vec![Some(0.0), Some(0.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0)]),
    ];
    TimeSeriesTable::new(index, columns).unwrap()
}

pub fn shared_table() -> Arc<TimeSeriesTable> {
    Arc::new(sample_table())
}

pub fn sensors() -> Vec<String> {
    vec!["S1".to_string(), "S2".to_string()]
}
