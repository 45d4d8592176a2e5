// src/export/mod.rs
//! Writers for the normalized record set.

pub mod parquet;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::query::RecordSet;

pub use self::parquet::write_parquet;

/// Column titles used by the downstream lookup table.
pub const CSV_HEADERS: [&str; 3] = ["Registration Number", "Region", "Tonnage"];

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Registration Number")]
    identifier: &'a str,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Tonnage")]
    measurement: &'a str,
}

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(records: &RecordSet, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for r in records {
        wtr.serialize(CsvRow {
            identifier: &r.identifier,
            region: &r.region,
            measurement: &r.measurement,
        })
        .context("writing CSV row")?;
    }
    if records.is_empty() {
        wtr.write_record(CSV_HEADERS).context("writing CSV header")?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &RecordSet, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records).context("serializing records to JSON")?;
    out.write_all(b"\n")?;
    out.flush().context("flushing JSON output")?;
    Ok(())
}
