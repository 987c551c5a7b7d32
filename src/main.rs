use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use shipping_discounts::concurrent_engine::{ParallelEngine, RunOutcome};
use shipping_discounts::config::{default_workers, EngineConfig};
use shipping_discounts::report::{render_summary, write_monthly_report};
use shipping_discounts::source::FileSource;

/// Lines shown when no output file is requested
const SAMPLE_LINES: usize = 10;

/// Shipping discount calculator
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Transaction log, one `DATE SIZE CARRIER` entry per line
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Where to write the annotated lines
    output: Option<PathBuf>,

    /// Do not write an output file, only show a sample
    #[arg(short, long)]
    quiet: bool,

    /// Number of parallel workers [default: min(4, cores)]
    #[arg(short, long = "processes")]
    processes: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Also write per-month discount state as CSV
    #[arg(long)]
    monthly_report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let output = if cli.quiet { None } else { cli.output };

    let source = FileSource::open(&cli.input)
        .with_context(|| format!("Failed to open input file '{}'", cli.input.display()))?;

    let workers = cli.processes.unwrap_or_else(default_workers);
    let config = EngineConfig::default()
        .with_workers(workers)
        .with_progress(!cli.no_progress)
        .with_outcome_limit(output.is_none().then_some(SAMPLE_LINES));

    info!("Analyzing {} with {} workers", cli.input.display(), workers);

    let engine = ParallelEngine::new(config);
    let cancel = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCtrl+C detected. Shutting down...");
            cancel.cancel();
        }
    });

    let report = match engine
        .run(Arc::new(source))
        .await
        .context("Failed to process transactions")?
    {
        RunOutcome::Completed(report) => report,
        RunOutcome::Terminated => {
            eprintln!("Processing terminated. Exiting...");
            return Ok(());
        }
    };

    if let Some(path) = &output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
        report
            .write_output(file)
            .context("Failed to write output file")?;
        println!("Output saved to: {}", path.display());
    }

    if let Some(path) = &cli.monthly_report {
        let file = File::create(path)
            .with_context(|| format!("Failed to create monthly report '{}'", path.display()))?;
        write_monthly_report(&report.statistics, file).context("Failed to write monthly report")?;
    }

    print!("{}", render_summary(&report.statistics));

    if output.is_none() {
        println!();
        println!("Sample of processed transactions:");
        for line in report.sample(SAMPLE_LINES) {
            println!("  {}", line);
        }
        println!();
        println!("To see all results, use:");
        println!("  shipping-discounts {} output.txt", cli.input.display());
    }

    Ok(())
}
