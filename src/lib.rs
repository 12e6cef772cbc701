pub mod config;
pub mod group;
pub mod load;
pub mod output;
pub mod pipeline;

pub use config::{Config, Dialect, OutputFormat};
pub use pipeline::{run, RunSummary};
