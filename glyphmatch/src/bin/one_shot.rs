use anyhow::Context;
use clap::Parser;
use glyphmatch::recog::{DEFAULT_LABEL_FILENAME, DEFAULT_RUN_COUNT, ExperimentConfig, run_experiment};

/// One-shot handwritten character classification over a directory of
/// evaluation runs.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the run subdirectories.
    #[clap(long, required = true)]
    data_root: String,

    /// Number of runs to evaluate (run01..runNN).
    #[clap(long, default_value_t = DEFAULT_RUN_COUNT)]
    runs: usize,

    /// Discover run directories instead of assuming runNN names.
    #[clap(long, conflicts_with = "runs")]
    discover: bool,

    /// Label filename inside each run directory.
    #[clap(long, default_value = DEFAULT_LABEL_FILENAME)]
    label_file: String,

    /// Evaluate runs in parallel.
    #[clap(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ExperimentConfig::new(&args.data_root)
        .with_run_count(args.runs)
        .with_label_filename(&args.label_file)
        .with_parallel(args.parallel);
    if args.discover {
        config = config.with_discovery();
    }

    println!("running one-shot handwritten character classifier");
    let result = run_experiment(&config).context("experiment failed")?;
    println!("{}", result);

    Ok(())
}
