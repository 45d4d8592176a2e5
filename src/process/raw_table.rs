use crate::process::utils::clean_str;
use std::collections::BTreeSet;

/// A single-sheet table as handed over by the loaders, before any layout inference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names as the sheet claims them. Not guaranteed unique or meaningful.
    pub headers: Vec<String>,
    /// Each data row, one cell per header. Absent or blank cells are already `""`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from loosely shaped rows.
    ///
    /// Every cell is trimmed with [`clean_str`], short rows are padded with `""` and
    /// cells past the last header are dropped, so all rows end up `headers.len()` wide.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> =
                    row.iter().take(width).map(|c| clean_str(c)).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect()
    }

    /// Copy of this table without the named columns. Names that are not present are ignored.
    pub fn without_columns(&self, ignored: &BTreeSet<String>) -> RawTable {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !ignored.contains(name.as_str()))
            .map(|(i, _)| i)
            .collect();

        RawTable {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    keep.iter()
                        .map(|&i| row.get(i).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }
}
