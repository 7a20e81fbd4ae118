//! Table normalisation: pad ragged columns into a rectangle.
//!
//! The API reports each table column independently, so a column whose
//! trailing cells were not recognised comes back shorter than its
//! neighbours. Rendering needs one value per (row, column); missing trailing
//! cells are filled with empty strings. Values are never reordered and
//! columns keep the order the API sent them in.

use crate::error::IcrError;
use crate::model::TableData;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// A table whose columns all have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTable {
    columns: IndexMap<String, Vec<String>>,
    row_count: usize,
    padded_cells: usize,
}

impl NormalizedTable {
    /// Column names in display order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Length shared by every column.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of empty cells added during padding.
    pub fn padded_cells(&self) -> usize {
        self.padded_cells
    }

    /// Cells of row `index`, one per column.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|c| c[index].as_str()).collect())
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count).map(move |i| self.columns.values().map(|c| c[i].as_str()).collect())
    }
}

/// Pad every column of `table` with `""` up to the longest column.
///
/// # Errors
/// [`IcrError::EmptyTable`] when `table` has no columns at all. A table with
/// columns that are all empty is valid and yields zero rows.
pub fn normalize(table: &TableData) -> Result<NormalizedTable, IcrError> {
    let row_count = table
        .columns()
        .map(|(_, cells)| cells.len())
        .max()
        .ok_or(IcrError::EmptyTable)?;

    let mut padded_cells = 0;
    let columns = table
        .columns()
        .map(|(name, cells)| {
            let missing = row_count - cells.len();
            padded_cells += missing;
            let mut column = Vec::with_capacity(row_count);
            column.extend_from_slice(cells);
            column.resize(row_count, String::new());
            (name.to_string(), column)
        })
        .collect();

    if table.is_ragged() {
        warn!(
            "Ragged table: padded {} empty cells to reach {} rows",
            padded_cells, row_count
        );
    }
    debug!(
        "Normalised table: {} columns × {} rows",
        table.column_count(),
        row_count
    );

    Ok(NormalizedTable {
        columns,
        row_count,
        padded_cells,
    })
}
