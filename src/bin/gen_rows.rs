use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Writes a synthetic input file for benchmarking the grouper.
#[derive(Parser)]
#[command(author, version, about = "Generate a random quoted, semicolon-delimited input file")]
struct Args {
    #[arg(long, default_value = "./input.txt")]
    output: PathBuf,
    #[arg(long, default_value_t = 1_000_000)]
    rows: usize,
    #[arg(long, default_value_t = 3)]
    columns: usize,
    /// Distinct values per column
    #[arg(long, default_value_t = 500_000)]
    vocab: u64,
    /// Chance of an empty `""` field
    #[arg(long, default_value_t = 0.2)]
    blank_ratio: f64,
    /// Chance of emitting a malformed line instead of a row
    #[arg(long, default_value_t = 0.01)]
    invalid_ratio: f64,
    #[arg(long, default_value_t = 0x_d00d_f00d)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    for (name, p) in [
        ("blank-ratio", args.blank_ratio),
        ("invalid-ratio", args.invalid_ratio),
    ] {
        if !(0.0..=1.0).contains(&p) {
            bail!("--{} must be within 0..=1, got {}", name, p);
        }
    }
    if args.columns == 0 || args.vocab == 0 {
        bail!("--columns and --vocab must be positive");
    }

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {:?}", args.output))?;
    let mut w = BufWriter::new(file);

    let mut invalid = 0usize;
    for _ in 0..args.rows {
        if rng.gen_bool(args.invalid_ratio) {
            // unbalanced quote in the last field
            writeln!(w, "\"{}\";\"{}", rng.gen_range(0..args.vocab), rng.gen_range(0..args.vocab))?;
            invalid += 1;
            continue;
        }
        for col in 0..args.columns {
            if col > 0 {
                w.write_all(b";")?;
            }
            if rng.gen_bool(args.blank_ratio) {
                w.write_all(b"\"\"")?;
            } else {
                write!(w, "\"{}\"", rng.gen_range(0..args.vocab))?;
            }
        }
        w.write_all(b"\n")?;
    }
    w.flush()?;

    info!(
        path = %args.output.display(),
        rows = args.rows,
        invalid,
        elapsed = ?start.elapsed(),
        "generated input"
    );
    Ok(())
}
