pub mod loader;
pub mod table;

pub use loader::{load_csv, read_csv};
pub use table::{ANOMALY_COLUMN, Column, TableError, TimeSeriesTable};
