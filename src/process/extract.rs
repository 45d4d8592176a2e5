// src/process/extract.rs
use crate::config::LayoutConfig;
use crate::process::RawTable;
use tracing::{debug, trace, warn};

/// One region block: a label column and the measurement column right after it.
///
/// Read-only once built; both value columns always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPair {
    label_column: String,
    measurement_column: String,
    /// Identifier cells, aligned with `measurement_values`.
    label_values: Vec<String>,
    measurement_values: Vec<String>,
}

impl ColumnPair {
    /// Build a pair. The shorter value column is padded with `""` so rows stay aligned.
    pub fn new(
        label_column: impl Into<String>,
        measurement_column: impl Into<String>,
        mut label_values: Vec<String>,
        mut measurement_values: Vec<String>,
    ) -> Self {
        let rows = label_values.len().max(measurement_values.len());
        label_values.resize(rows, String::new());
        measurement_values.resize(rows, String::new());
        Self {
            label_column: label_column.into(),
            measurement_column: measurement_column.into(),
            label_values,
            measurement_values,
        }
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn measurement_column(&self) -> &str {
        &self.measurement_column
    }

    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    pub fn measurement_values(&self) -> &[String] {
        &self.measurement_values
    }

    /// `(identifier, measurement)` cells, row by row.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.label_values
            .iter()
            .zip(&self.measurement_values)
            .map(|(l, m)| (l.as_str(), m.as_str()))
    }

    /// Region name of this block: the trimmed label column name.
    pub fn region(&self) -> &str {
        self.label_column.trim()
    }

    pub fn row_count(&self) -> usize {
        self.label_values.len()
    }
}

/// Partition the columns of `table` into (label, measurement) pairs.
///
/// Ignored columns are removed first. The scan is greedy, left to right: a pair is
/// accepted when the left column has a non-blank name and the right column carries
/// the measurement marker; on a miss the cursor moves one column so a stray column
/// cannot throw the rest of the sheet out of step. A trailing unpaired column is dropped.
pub fn extract_column_pairs(table: &RawTable, config: &LayoutConfig) -> Vec<ColumnPair> {
    if !config.has_marker() {
        warn!("blank measurement marker, no column can be a measurement column");
        return Vec::new();
    }

    let filtered = table.without_columns(config.ignored_columns());
    let dropped = table.column_count() - filtered.column_count();
    if dropped > 0 {
        debug!(dropped, "removed ignored columns");
    }

    let n = filtered.column_count();
    if n < 2 {
        warn!(columns = n, "table too narrow to hold any column pair");
        return Vec::new();
    }

    let mut pairs = Vec::new();
    let mut i = 0;
    while i + 1 < n {
        let label = &filtered.headers[i];
        let measurement = &filtered.headers[i + 1];

        if !label.trim().is_empty() && config.is_measurement_column(measurement) {
            trace!(label = %label, measurement = %measurement, "accepted pair");
            pairs.push(ColumnPair::new(
                label.clone(),
                measurement.clone(),
                filtered.column(i),
                filtered.column(i + 1),
            ));
            i += 2;
        } else {
            trace!(column = %label, "skipped column");
            i += 1;
        }
    }

    debug!(pairs = pairs.len(), columns = n, "column pairs extracted");
    pairs
}
