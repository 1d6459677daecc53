use crate::config::Config;
use crate::connection::Connection;
use crate::generator::OperationGen;
use crate::worker::{StopSignal, WorkerResult, run_worker};
use anyhow::{Context, Result, anyhow, ensure};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Length of every benchmark run.
pub const EXPERIMENT_DURATION: Duration = Duration::from_secs(10);

/// Totals over all workers of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateResult {
    pub ops: u64,
    pub failed: u64,
    pub latency: Duration,
    /// Nominal experiment duration that throughput is computed against.
    pub duration: Duration,
}

impl AggregateResult {
    pub fn from_results<I>(results: I, duration: Duration) -> Self
    where
        I: IntoIterator<Item = WorkerResult>,
    {
        results.into_iter().fold(
            AggregateResult {
                ops: 0,
                failed: 0,
                latency: Duration::ZERO,
                duration,
            },
            |mut acc, r| {
                acc.ops += r.ops;
                acc.failed += r.failed;
                acc.latency += r.latency;
                acc
            },
        )
    }

    /// Successful operations per second.
    pub fn throughput(&self) -> f64 {
        if self.duration.is_zero() {
            0.0
        } else {
            self.ops as f64 / self.duration.as_secs_f64()
        }
    }

    /// Mean latency of successful operations in milliseconds, 0 if there were none.
    pub fn avg_latency_ms(&self) -> f64 {
        if self.ops == 0 {
            0.0
        } else {
            self.latency.as_secs_f64() * 1_000.0 / self.ops as f64
        }
    }
}

/// Address of each worker: worker `i` talks to `addrs[i % addrs.len()]`.
pub fn assign_addresses(addrs: &[String], workers: usize) -> Vec<&str> {
    if addrs.is_empty() {
        return Vec::new();
    }
    (0..workers).map(|i| addrs[i % addrs.len()].as_str()).collect()
}

pub struct Harness {
    config: Config,
    duration: Duration,
}

impl Harness {
    pub fn new(config: Config) -> Self {
        Harness {
            config,
            duration: EXPERIMENT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Runs every worker for the experiment duration and folds their results.
    ///
    /// Each worker gets its own connection, opened before any worker starts;
    /// if a single server is unreachable the run is abandoned. The stop signal
    /// fires `duration` after this call begins, and each worker finishes its
    /// in-flight operation before it stops.
    pub fn run(&self) -> Result<AggregateResult> {
        let started = Instant::now();
        let cfg = &self.config;
        info!(
            addrs = ?cfg.addrs,
            workload = %cfg.workload,
            workers = cfg.workers,
            keys = cfg.keys,
            "starting benchmark"
        );

        if cfg.workers == 0 {
            return Ok(AggregateResult::from_results([], self.duration));
        }
        ensure!(!cfg.addrs.is_empty(), "no server addresses configured");

        let mut workers = Vec::with_capacity(cfg.workers);
        for (id, addr) in assign_addresses(&cfg.addrs, cfg.workers).into_iter().enumerate() {
            let conn = Connection::open(addr)
                .with_context(|| format!("worker {id} cannot reach its server"))?;
            let ops = OperationGen::new(cfg.workload, cfg.keys, rand::random())?;
            workers.push((conn, ops));
        }

        let stop = StopSignal::new();
        let results = thread::scope(|s| {
            let handles: Vec<_> = workers
                .into_iter()
                .enumerate()
                .map(|(id, (mut conn, ops))| {
                    let stop = stop.clone();
                    s.spawn(move || {
                        let result = run_worker(&mut conn, ops, &stop);
                        debug!(worker = id, addr = conn.addr(), ?result, "worker stopped");
                        conn.close();
                        result
                    })
                })
                .collect();
            debug!(workers = handles.len(), "workers launched");

            thread::sleep(self.duration.saturating_sub(started.elapsed()));
            stop.stop();

            // join everything before looking at the outcome so no thread is left running
            let joined: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
            joined
                .into_iter()
                .enumerate()
                .map(|(id, r)| r.map_err(|_| anyhow!("worker {id} panicked")))
                .collect::<Result<Vec<WorkerResult>>>()
        })?;

        let aggregate = AggregateResult::from_results(results, self.duration);
        info!(
            ops = aggregate.ops,
            failed = aggregate.failed,
            elapsed = ?started.elapsed(),
            "benchmark finished"
        );
        Ok(aggregate)
    }
}
