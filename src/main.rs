use anyhow::Result;
use clap::Parser;
use rowgroups::{run, Config, Dialect, OutputFormat};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Group rows of a quoted, delimited text file by shared column values"
)]
struct Args {
    /// Input file, one row per line
    input: PathBuf,
    #[arg(short, long, env = "ROWGROUPS_OUTPUT", default_value = "output.txt")]
    output: PathBuf,
    #[arg(long, default_value_t = ';')]
    delimiter: char,
    #[arg(long, default_value_t = '"')]
    quote: char,
    /// Text printed before each group number in the output file
    #[arg(long, default_value = "Группа")]
    group_label: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) build config ─────────────────────────────────────────────
    let args = Args::parse();
    let config = Config {
        input: args.input,
        output: args.output,
        dialect: Dialect {
            delimiter: args.delimiter,
            quote: args.quote,
        },
        format: OutputFormat {
            group_label: args.group_label,
        },
    };
    info!(input = %config.input.display(), output = %config.output.display(), "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = match run(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("run failed: {:#}", e);
            return Err(e);
        }
    };

    println!("Groups with more than one row: {}", summary.multi_row_groups);
    println!("Time in millis: {}", summary.elapsed.as_millis());
    Ok(())
}
