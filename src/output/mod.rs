// src/output/mod.rs
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::{debug, instrument};

use crate::{config::OutputFormat, group::Grouping, load::RowTable};

/// Render `grouping` as text:
///
/// ```text
/// <groups with more than one row>
/// <label> 1
/// <row>
/// <row>
///
/// <label> 2
/// <row>
///
/// ```
pub fn write_grouping<W: Write>(
    mut w: W,
    grouping: &Grouping,
    table: &RowTable,
    format: &OutputFormat,
) -> io::Result<()> {
    writeln!(w, "{}", grouping.multi_row_groups)?;
    for (n, group) in grouping.iter().enumerate() {
        writeln!(w, "{} {}", format.group_label, n + 1)?;
        for &id in &group.rows {
            writeln!(w, "{}", table.row(id).text())?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// Write the result file at `path`, replacing whatever was there.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_grouping_file<P: AsRef<Path>>(
    path: P,
    grouping: &Grouping,
    table: &RowTable,
    format: &OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove old output {:?}", path))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create output file {:?}", path))?;
    write_grouping(BufWriter::new(file), grouping, table, format)
        .with_context(|| format!("Failed to write output file {:?}", path))?;
    debug!(groups = grouping.len(), "wrote output");
    Ok(())
}
