// src/load/sheet.rs
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info};

use crate::process::utils::{format_number, normalize_headers};
use crate::process::RawTable;

/// Read the first worksheet of an `.xlsx`/`.xlsm`/`.xls`/`.ods` workbook.
/// The first row is the header row.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {:?}", path))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("No worksheet found in {:?}", path))?
        .with_context(|| format!("Failed to read first worksheet of {:?}", path))?;

    let table = range_to_table(&range);
    info!(
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded worksheet"
    );
    Ok(table)
}

/// Turn a worksheet range into a [`RawTable`], first row as headers.
pub fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => {
            debug!("empty worksheet");
            return RawTable::default();
        }
    };

    let body: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    RawTable::new(normalize_headers(&headers), body)
}

/// Cell → plain text. Empty and error cells become `""`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn cells_collapse_to_text() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::NA)), "");
        assert_eq!(cell_to_string(&Data::String("  KBA 123A ".into())), "KBA 123A");
        assert_eq!(cell_to_string(&Data::Float(5.0)), "5");
        assert_eq!(cell_to_string(&Data::Float(7.25)), "7.25");
        assert_eq!(cell_to_string(&Data::Int(12)), "12");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn range_header_row_is_normalized() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 3));
        range.set_value((0, 0), Data::String("Region A".into()));
        range.set_value((0, 1), Data::String("TONNAGE".into()));
        range.set_value((0, 3), Data::String("TONNAGE".into()));
        range.set_value((1, 0), Data::String("X1".into()));
        range.set_value((1, 1), Data::Float(5.0));
        range.set_value((2, 2), Data::String("stray".into()));

        let table = range_to_table(&range);
        assert_eq!(table.headers, vec!["Region A", "TONNAGE", "Unnamed: 2", "TONNAGE.1"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["X1", "5", "", ""]);
        assert_eq!(table.rows[1], vec!["", "", "stray", ""]);
    }

    #[test]
    fn empty_range_is_empty_table() {
        let range: Range<Data> = Range::empty();
        assert_eq!(range_to_table(&range), RawTable::default());
    }
}
