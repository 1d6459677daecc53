//! YCSB-style load generator for line-protocol key-value servers.
//!
//! A [`harness::Harness`] opens one [`connection::Connection`] per worker,
//! drives each with its own [`generator::OperationGen`] for a fixed window and
//! folds the per-worker counters into an [`harness::AggregateResult`].

pub mod config;
pub mod connection;
pub mod database;
pub mod generator;
pub mod harness;
pub mod protocol;
pub mod report;
pub mod server;
pub mod sink;
pub mod worker;
pub mod workload;

pub use config::Config;
pub use harness::{AggregateResult, Harness};
pub use workload::Workload;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber on stderr. `RUST_LOG` wins over
/// `debug`.
pub fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
