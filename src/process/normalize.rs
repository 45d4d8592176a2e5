// src/process/normalize.rs
use crate::process::extract::ColumnPair;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One (identifier, region, measurement) row of the flattened sheet.
///
/// Fields are always plain text; a missing cell is `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub identifier: String,
    pub region: String,
    pub measurement: String,
}

/// Walk each pair row by row and emit a record for every row that is not fully empty.
///
/// Output order is pair order, then row order. Nothing is merged or deduplicated.
pub fn normalize_pairs(pairs: &[ColumnPair]) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();

    for pair in pairs {
        let region = pair.region();
        let before = records.len();

        for (id_val, ton_val) in pair.rows() {
            if id_val.is_empty() && ton_val.is_empty() {
                continue;
            }
            records.push(NormalizedRecord {
                identifier: id_val.to_string(),
                region: region.to_string(),
                measurement: ton_val.to_string(),
            });
        }

        debug!(
            region = %region,
            rows = pair.row_count(),
            emitted = records.len() - before,
            "normalized pair"
        );
    }

    records
}
