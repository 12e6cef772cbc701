// src/config.rs
use anyhow::{bail, Result};
use std::path::PathBuf;

/// How a raw line is cut into fields and how fields are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: ';',
            quote: '"',
        }
    }
}

/// Layout knobs for the result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    /// Printed before the 1-based group number on each group header line.
    pub group_label: String,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat {
            group_label: "Группа".to_string(),
        }
    }
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dialect: Dialect,
    pub format: OutputFormat,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Config {
            input: input.into(),
            output: output.into(),
            dialect: Dialect::default(),
            format: OutputFormat::default(),
        }
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            bail!("Input file not found: {}", self.input.display());
        }
        let Dialect { delimiter, quote } = self.dialect;
        if delimiter == quote {
            bail!("delimiter and quote must differ (both are {:?})", delimiter);
        }
        if delimiter.is_whitespace() || quote.is_whitespace() {
            bail!(
                "delimiter {:?} and quote {:?} must not be whitespace",
                delimiter,
                quote
            );
        }
        Ok(())
    }
}
