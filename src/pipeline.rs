// src/pipeline.rs
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::{
    config::Config,
    group::group_rows,
    load::{read_table, LoadStats},
    output::write_grouping_file,
};

/// What one run did, for the caller to report.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: LoadStats,
    pub groups: usize,
    pub multi_row_groups: usize,
    /// Unions that joined two different sets.
    pub merges: usize,
    pub elapsed: Duration,
}

/// Load → group → write.
#[instrument(level = "info", skip(config), fields(input = %config.input.display()))]
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();
    config.validate()?;

    // 1) build the row table
    let t = Instant::now();
    let outcome = read_table(&config.input, config.dialect)?;
    info!(elapsed = ?t.elapsed(), "load stage done");

    // 2) group
    let t = Instant::now();
    let grouping = group_rows(&outcome.table);
    info!(
        elapsed = ?t.elapsed(),
        groups = grouping.len(),
        multi_row_groups = grouping.multi_row_groups,
        duplicate_values = grouping.unions.duplicates,
        merges = grouping.unions.merges,
        "group stage done"
    );

    // 3) write the single output artifact
    let t = Instant::now();
    write_grouping_file(&config.output, &grouping, &outcome.table, &config.format)?;
    info!(elapsed = ?t.elapsed(), output = %config.output.display(), "write stage done");

    Ok(RunSummary {
        stats: outcome.stats,
        groups: grouping.len(),
        multi_row_groups: grouping.multi_row_groups,
        merges: grouping.unions.merges,
        elapsed: start.elapsed(),
    })
}
