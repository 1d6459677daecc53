use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use ycsb_client::report::Report;
use ycsb_client::{Config, Harness, Workload, init_tracing, sink};

#[derive(Parser)]
#[command(version, about = "YCSB benchmark client: sends GET/SET over TCP to a key-value server", long_about = None)]
struct Cli {
    /// Server address, e.g. localhost:7000. Repeat for several servers
    #[arg(long = "addr", required = true)]
    addrs: Vec<String>,

    /// Number of concurrent workers, each with its own connection
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// ycsb-a (50% writes), ycsb-b (5% writes) or ycsb-c (read only)
    #[arg(long, default_value = "ycsb-a")]
    workload: Workload,

    /// Number of distinct keys
    #[arg(long, default_value_t = 6)]
    keys: u64,

    /// CSV file to append the result to, created with a header row if new
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log connection I/O errors
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config {
        addrs: cli.addrs,
        workers: cli.workers,
        keys: cli.keys,
        workload: cli.workload,
        csv_path: cli.csv,
        debug: cli.debug,
    }
    .validate()?;
    init_tracing(config.debug);

    let aggregate = Harness::new(config.clone()).run()?;

    let report = Report::new(&config, &aggregate);
    println!("{report}");
    println!("{}", report.result_line());

    if let Some(path) = &config.csv_path {
        if let Err(e) = sink::append_csv(path, &report) {
            warn!(path = %path.display(), error = %format!("{e:#}"), "failed to write CSV");
        }
    }
    Ok(())
}
