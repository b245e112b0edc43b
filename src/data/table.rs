use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::HashMap;
use std::ops::Range;

/// Name of the per-timestamp anomaly indicator column
pub const ANOMALY_COLUMN: &str = "ATT_FLAG";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table has no rows")]
    Empty,

    #[error("Index is not sorted: row {row} is earlier than the row before it")]
    NonMonotonicIndex { row: usize },

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("Missing anomaly column 'ATT_FLAG'")]
    MissingAnomalyColumn,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: cannot parse timestamp '{value}'")]
    Timestamp { row: usize, value: String },

    #[error("Row {row}, column '{column}': cannot parse value '{value}'")]
    Value {
        row: usize,
        column: String,
        value: String,
    },
}

/// A single named column of optional readings
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Timestamp-indexed table of sensor readings.
///
/// Holds base sensor columns, derived `{sensor}_{stat}` columns and the
/// `ATT_FLAG` column. The index is sorted and every column is aligned to it.
/// Read-only once built.
#[derive(Debug, Clone)]
pub struct TimeSeriesTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
    lookup: HashMap<String, usize>,
}

impl TimeSeriesTable {
    /// Build a table, validating the index and column invariants.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` if the table is empty, the index goes backwards,
    /// a column is misaligned or duplicated, or `ATT_FLAG` is absent.
    pub fn new(index: Vec<DateTime<Utc>>, columns: Vec<Column>) -> Result<Self, TableError> {
        if index.is_empty() {
            return Err(TableError::Empty);
        }

        if let Some(row) = index.windows(2).position(|w| w[1] < w[0]) {
            return Err(TableError::NonMonotonicIndex { row: row + 1 });
        }

        let mut lookup = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column.values.len() != index.len() {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected: index.len(),
                    actual: column.values.len(),
                });
            }
            if lookup.insert(column.name.clone(), i).is_some() {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
        }

        if !lookup.contains_key(ANOMALY_COLUMN) {
            return Err(TableError::MissingAnomalyColumn);
        }

        Ok(Self {
            index,
            columns,
            lookup,
        })
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.lookup
            .get(name)
            .map(|&i| self.columns[i].values.as_slice())
    }

    /// Calendar date of the first row
    pub fn min_date(&self) -> NaiveDate {
        self.index[0].date_naive()
    }

    /// Calendar date of the last row
    pub fn max_date(&self) -> NaiveDate {
        self.index[self.index.len() - 1].date_naive()
    }

    /// Row range covering every timestamp on the days `start..=end`.
    ///
    /// Returns an empty range when `start > end`.
    pub fn date_range(&self, start: NaiveDate, end: NaiveDate) -> Range<usize> {
        if start > end {
            return 0..0;
        }

        let from = start.and_time(chrono::NaiveTime::MIN).and_utc();
        let lo = self.index.partition_point(|t| *t < from);
        let hi = match end.checked_add_days(Days::new(1)) {
            Some(next) => {
                let until = next.and_time(chrono::NaiveTime::MIN).and_utc();
                self.index.partition_point(|t| *t < until)
            }
            None => self.index.len(),
        };

        lo..hi.max(lo)
    }
}
