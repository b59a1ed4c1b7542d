use std::collections::BTreeMap;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// MeasurementRow – one row of a measurement file
// ---------------------------------------------------------------------------

/// A single timestamped observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub timestamp: NaiveDateTime,
    /// X value of every plot.
    pub source_pressure: f64,
    /// Response columns: column_name → value. Empty or non-numeric cells are `NaN`.
    pub values: BTreeMap<String, f64>,
}

impl MeasurementRow {
    /// Value of a response column, `None` if the row has no such column.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }
}

// ---------------------------------------------------------------------------
// Dataset – all rows from every matched file
// ---------------------------------------------------------------------------

/// Concatenation of every matched file, in match order then file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<MeasurementRow>,
    /// Response column names in file-declared order (excludes time and pressure).
    pub columns: Vec<String>,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append another dataset, keeping row order and adding unseen columns at the end.
    pub fn extend(&mut self, other: Dataset) {
        for col in other.columns {
            if !self.has_column(&col) {
                self.columns.push(col);
            }
        }
        self.rows.extend(other.rows);
    }
}
