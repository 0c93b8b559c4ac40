//! Generate random floating-point rows to build a KD-tree from.
//!
//! Usage: kdtree-gen [filename] [number of rows] [number of columns]
use clap::Parser;
use kdbench::dataset::{DEFAULT_COLS, DEFAULT_FILENAME, DEFAULT_ROWS, DEFAULT_VALUE_BASE, GeneratorConfig, generate};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kdtree-gen", version, about = "Write a tab-separated table of uniform random coordinates", long_about = None)]
struct Cli {
    #[arg(help = "Output file name, placed in --out-dir")]
    filename: Option<String>,
    #[arg(help = "Number of rows", default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(help = "Number of columns", default_value_t = DEFAULT_COLS)]
    cols: usize,
    #[arg(long, default_value = "..", help = "Directory the file is written to (defaults to the parent of the working directory)")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = DEFAULT_VALUE_BASE, allow_negative_numbers = true, help = "Lower bound of sampled values; the range is [base, base + 5)")]
    base: f64,
    #[arg(long, help = "Seed the generator for reproducible output")]
    seed: Option<u64>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    kdbench::logger::configure_logging(None, Some(cli.log_level.as_deref().unwrap_or("warn")), None);
    let name = cli.filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    let cfg = GeneratorConfig::new(cli.out_dir.join(name), cli.rows, cli.cols)
        .with_value_base(cli.base)
        .with_seed(cli.seed);
    match generate(&cfg) {
        Ok(n) => log::info!("wrote {n} rows to {}", cfg.path.display()),
        Err(e) => {
            eprintln!("error: {}: {e}", cfg.path.display());
            std::process::exit(1);
        }
    }
}
