// src/load/delimited.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::info;

use crate::process::utils::normalize_headers;
use crate::process::RawTable;

/// Read a CSV export of the sheet. First record is the header row.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let table =
        read_csv(file).with_context(|| format!("Failed to parse CSV file: {:?}", path))?;
    info!(
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded csv"
    );
    Ok(table)
}

/// Parse CSV from any reader. Rows may have differing field counts.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first
            .context("CSV parse error in header row")?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Ok(RawTable::default()),
    };

    let mut rows = Vec::new();
    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(normalize_headers(&headers), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::Builder;

    #[test]
    fn reads_ragged_rows_and_mangles_headers() -> Result<()> {
        let content = "NO.,Nairobi,TONNAGE,,Mombasa,TONNAGE\n1,KBA 123A,5,,KBB 456B,7\n2,KCC 789C\n";
        let table = read_csv(Cursor::new(content))?;
        assert_eq!(
            table.headers,
            vec!["NO.", "Nairobi", "TONNAGE", "Unnamed: 3", "Mombasa", "TONNAGE.1"]
        );
        assert_eq!(table.rows[0], vec!["1", "KBA 123A", "5", "", "KBB 456B", "7"]);
        assert_eq!(table.rows[1], vec!["2", "KCC 789C", "", "", "", ""]);
        Ok(())
    }

    #[test]
    fn quoted_cells_keep_their_quotes() -> Result<()> {
        let content = "Region A,TONNAGE\n\"\"\"X1\"\"\",\n\"\"\"\"\"\",\n";
        let table = read_csv(Cursor::new(content))?;
        assert_eq!(table.rows[0], vec!["\"X1\"", ""]);
        assert_eq!(table.rows[1], vec!["\"\"", ""]);

        let records = crate::normalize_table(&table, &crate::LayoutConfig::default());
        let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["\"X1\"", "\"\""]);
        Ok(())
    }

    #[test]
    fn empty_input_is_empty_table() -> Result<()> {
        assert_eq!(read_csv(Cursor::new(""))?, RawTable::default());
        Ok(())
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let mut tmp = Builder::new().suffix(".csv").tempfile()?;
        write!(tmp, "Region A,TONNAGE\n\"X1\", 5 \n")?;
        let table = load_csv(tmp.path())?;
        assert_eq!(table.rows, vec![vec!["X1".to_string(), "5".to_string()]]);
        Ok(())
    }
}
