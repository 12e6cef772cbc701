// src/load/mod.rs
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{collections::HashSet, fs, path::Path};
use tracing::{debug, info, instrument};

use crate::config::Dialect;

pub mod validate;

pub use validate::{dequote, is_blank, parse_line};

/// Dense row identifier, assigned from 0 in first-seen order.
pub type RowId = usize;

/// One accepted, deduplicated input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    /// Trimmed fields, still wrapped in their quotes.
    fields: Vec<String>,
    /// Fields rejoined with the delimiter; the dedup key and the display form.
    text: String,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Dequoted field values, by column position.
    pub fn values<'a>(&'a self, dialect: &'a Dialect) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().map(move |f| dequote(f, dialect))
    }
}

/// Counters describing what happened to the raw lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines_read: usize,
    pub rows_accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// Immutable, ordered collection of canonical rows.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    rows: Vec<Row>,
    dialect: Dialect,
    width: usize,
}

/// A freshly built table together with the filtering counters.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: RowTable,
    pub stats: LoadStats,
}

impl RowTable {
    /// Validate, canonicalize and deduplicate `lines`.
    ///
    /// Validation runs on the rayon pool; identifiers are then handed out
    /// sequentially so they follow input order regardless of scheduling.
    pub fn from_lines<S>(lines: &[S], dialect: Dialect) -> LoadOutcome
    where
        S: AsRef<str> + Sync,
    {
        let parsed: Vec<Option<Vec<String>>> = lines
            .par_iter()
            .map(|line| parse_line(line.as_ref(), &dialect))
            .collect();

        let mut stats = LoadStats {
            lines_read: lines.len(),
            ..LoadStats::default()
        };
        let mut seen: HashSet<String> = HashSet::with_capacity(parsed.len());
        let mut rows = Vec::with_capacity(parsed.len());
        let mut width = 0;
        let sep = dialect.delimiter.to_string();

        for fields in parsed {
            let Some(fields) = fields else {
                stats.rejected += 1;
                continue;
            };
            let text = fields.join(&sep);
            if !seen.insert(text.clone()) {
                stats.duplicates += 1;
                continue;
            }
            width = width.max(fields.len());
            rows.push(Row {
                id: rows.len(),
                fields,
                text,
            });
        }
        stats.rows_accepted = rows.len();

        LoadOutcome {
            table: RowTable {
                rows,
                dialect,
                width,
            },
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest field count over all rows.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Panics on an identifier that was never handed out.
    pub fn row(&self, id: RowId) -> &Row {
        &self.rows[id]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

/// Split on `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(i) => {
                lines.push(&rest[..i]);
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Read `path` and build its Row Table.
///
/// The file must be valid UTF-8: field values are compared as exact text, so
/// undecodable bytes fail the run instead of being replaced.
#[instrument(level = "info", skip(path, dialect), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<LoadOutcome> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read input file {:?}", path))?;
    debug!(bytes = bytes.len(), "read input");
    let text = String::from_utf8(bytes)
        .with_context(|| format!("Input file {:?} is not valid UTF-8", path))?;

    let lines = split_lines(&text);
    let outcome = RowTable::from_lines(&lines, dialect);

    let s = &outcome.stats;
    info!(
        lines = s.lines_read,
        rows = s.rows_accepted,
        duplicates = s.duplicates,
        rejected = s.rejected,
        columns = outcome.table.width(),
        "loaded row table"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_identical_lines_collapse() {
        let lines = [r#""a";"x""#, r#""a";"x""#, r#" "a" ;"x""#, r#""b";"y""#];
        let out = RowTable::from_lines(&lines, Dialect::default());

        assert_eq!(out.table.len(), 2);
        assert_eq!(out.stats.duplicates, 2);
        assert_eq!(out.stats.rejected, 0);
        assert_eq!(out.table.row(0).text(), r#""a";"x""#);
        assert_eq!(out.table.row(1).text(), r#""b";"y""#);
    }

    #[test]
    fn test_malformed_lines_are_counted_not_kept() {
        let lines = [r#""a";"x""#, r#""broken;"y""#, r#""c";"z""#];
        let out = RowTable::from_lines(&lines, Dialect::default());

        assert_eq!(out.table.len(), 2);
        assert_eq!(
            out.stats,
            LoadStats {
                lines_read: 3,
                rows_accepted: 2,
                duplicates: 0,
                rejected: 1,
            }
        );
        let ids: Vec<RowId> = out.table.iter().map(Row::id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_width_and_values() {
        let lines = [r#""a""#, r#""1";"";"3""#];
        let out = RowTable::from_lines(&lines, Dialect::default());
        let table = &out.table;

        assert_eq!(table.width(), 3);
        let values: Vec<&str> = table.row(1).values(table.dialect()).collect();
        assert_eq!(values, vec!["1", "", "3"]);
    }

    #[test]
    fn test_read_table_from_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "\"a\";\"x\"\r\n\"a\";\"y\"\n\n\"b\";\"z\"\n")?;

        let out = read_table(tmp.path(), Dialect::default())?;
        assert_eq!(out.table.len(), 3);
        assert_eq!(out.stats.lines_read, 4);
        assert_eq!(out.stats.rejected, 1);
        Ok(())
    }

    #[test]
    fn test_split_lines_endings() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\r\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_table_classic_mac_endings() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "\"a\";\"x\"\r\"a\";\"y\"\r\"b\";\"z\"\r")?;

        let out = read_table(tmp.path(), Dialect::default())?;
        assert_eq!(out.stats.lines_read, 3);
        assert_eq!(out.table.len(), 3);
        assert_eq!(out.stats.rejected, 0);
        Ok(())
    }

    #[test]
    fn test_read_table_rejects_invalid_utf8() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        // distinct bytes that would all decode to U+FFFD if replaced
        tmp.write_all(b"\"\xff\";\"a\"\n\"\xfe\";\"b\"\n\"x\xff\";\"c\"\n\"x\xfe\";\"d\"\n")?;

        let err = read_table(tmp.path(), Dialect::default()).unwrap_err();
        assert!(err.to_string().contains("is not valid UTF-8"));
        Ok(())
    }

    #[test]
    fn test_read_table_missing_file() {
        let err = read_table("no/such/input.txt", Dialect::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
