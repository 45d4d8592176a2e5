// src/process/mod.rs
//! Layout inference: raw side-by-side region blocks → flat records.
//!
//! Pure and synchronous. Nothing in here does I/O or returns an error; a sheet
//! that does not fit the pairing pattern just yields fewer records.

pub mod extract;
pub mod normalize;
pub mod raw_table;
pub mod utils;

pub use extract::{extract_column_pairs, ColumnPair};
pub use normalize::{normalize_pairs, NormalizedRecord};
pub use raw_table::RawTable;

use crate::config::LayoutConfig;
use crate::query::RecordSet;

/// Run the whole transform: pair extraction, then row normalization.
#[tracing::instrument(level = "debug", skip_all, fields(columns = table.column_count(), rows = table.row_count()))]
pub fn normalize_table(table: &RawTable, config: &LayoutConfig) -> RecordSet {
    let pairs = extract_column_pairs(table, config);
    RecordSet::new(normalize_pairs(&pairs))
}
