//! Sensor Dashboard - interactive time-series dashboard for multi-sensor telemetry
//!
//! This library exposes the core modules for testing and reuse.

pub mod chart;
pub mod common;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod routes;
