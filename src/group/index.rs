// src/group/index.rs
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use super::forest::Forest;
use crate::load::{is_blank, RowId, RowTable};

/// A non-blank dequoted value and the row holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub value: String,
    pub row: RowId,
}

/// What feeding the index into a forest did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnionStats {
    /// Entries whose value had already been seen in the same column.
    pub duplicates: usize,
    /// Of those, how many actually joined two different sets.
    pub merges: usize,
}

/// Per-column `(value, row)` lists, in row order.
#[derive(Debug, Default)]
pub struct ColumnIndex {
    columns: Vec<Vec<ColumnEntry>>,
}

impl ColumnIndex {
    /// One entry list per column position up to the table width. Columns are
    /// scanned in parallel; the table is only read.
    pub fn build(table: &RowTable) -> Self {
        let dialect = table.dialect();
        let columns: Vec<Vec<ColumnEntry>> = (0..table.width())
            .into_par_iter()
            .map(|col| {
                table
                    .iter()
                    .filter_map(|row| {
                        let value = row.values(dialect).nth(col)?;
                        if is_blank(value) {
                            return None;
                        }
                        Some(ColumnEntry {
                            value: value.to_string(),
                            row: row.id(),
                        })
                    })
                    .collect()
            })
            .collect();

        ColumnIndex { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Panics if `col` is past the last column.
    pub fn entries(&self, col: usize) -> &[ColumnEntry] {
        &self.columns[col]
    }

    pub fn entry_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Merge every pair of rows sharing a value in the same column.
    ///
    /// The first row seen with a value anchors it; each later holder is
    /// merged with the anchor's set as it stands at that moment.
    pub fn apply(&self, forest: &mut Forest) -> UnionStats {
        let mut stats = UnionStats::default();
        for (col, entries) in self.columns.iter().enumerate() {
            let mut anchors: HashMap<&str, RowId> = HashMap::with_capacity(entries.len());
            let before = stats.merges;
            for entry in entries {
                match anchors.get(entry.value.as_str()).copied() {
                    None => {
                        anchors.insert(&entry.value, entry.row);
                    }
                    Some(anchor) => {
                        stats.duplicates += 1;
                        let root = forest.find(anchor);
                        if forest.union(root, entry.row) {
                            stats.merges += 1;
                        }
                    }
                }
            }
            debug!(
                column = col,
                entries = entries.len(),
                distinct = anchors.len(),
                merges = stats.merges - before,
                "column applied"
            );
        }
        stats
    }
}
