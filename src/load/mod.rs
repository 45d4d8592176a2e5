// src/load/mod.rs
//! Spreadsheet ingestion: files on disk → [`RawTable`].

pub mod delimited;
pub mod sheet;

use anyhow::{bail, Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::process::RawTable;

pub use delimited::{load_csv, read_csv};
pub use sheet::load_workbook;

/// Load a table, picking the reader from the file extension.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|os_str| os_str.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        "" => bail!("Cannot tell the file type of {:?}: no extension", path),
        other => bail!("Unsupported file type {:?} for {:?}", other, path),
    }
}

/// Expand `pattern` into the files it names, sorted. A plain path that exists is
/// returned as-is, without glob interpretation.
pub fn resolve_inputs(pattern: &str) -> Result<Vec<PathBuf>> {
    let plain = Path::new(pattern);
    if plain.is_file() {
        return Ok(vec![plain.to_path_buf()]);
    }

    let mut paths: Vec<PathBuf> = glob(pattern)
        .with_context(|| format!("Invalid input pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        bail!("No input files match {}", pattern);
    }
    debug!(pattern, files = paths.len(), "resolved inputs");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dispatch_by_extension() -> Result<()> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("sheet.CSV");
        fs::write(&csv_path, "Region A,TONNAGE\nX1,5\n")?;
        let table = load_table(&csv_path)?;
        assert_eq!(table.headers, vec!["Region A", "TONNAGE"]);

        let txt_path = dir.path().join("sheet.txt");
        fs::write(&txt_path, "whatever")?;
        assert!(load_table(&txt_path).is_err());
        assert!(load_table(dir.path().join("noext")).is_err());
        Ok(())
    }

    #[test]
    fn missing_workbook_is_an_error() {
        let err = load_table("/definitely/not/here.xlsx").unwrap_err();
        assert!(format!("{:#}", err).contains("here.xlsx"));
    }

    #[test]
    fn glob_inputs_sorted() -> Result<()> {
        let dir = tempdir()?;
        for name in ["b.csv", "a.csv", "c.txt"] {
            fs::write(dir.path().join(name), "x,TONNAGE\n")?;
        }
        let pattern = format!("{}/*.csv", dir.path().display());
        let got = resolve_inputs(&pattern)?;
        let names: Vec<_> = got
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let single = dir.path().join("c.txt");
        assert_eq!(resolve_inputs(single.to_str().unwrap())?, vec![single.clone()]);
        assert!(resolve_inputs(&format!("{}/*.xlsx", dir.path().display())).is_err());
        Ok(())
    }
}
