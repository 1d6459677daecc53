use crate::connection::KvClient;
use crate::generator::Operation;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Broadcast "time's up" flag. Written once by the harness timer, polled by
/// every worker between operations.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Counters owned by a single worker and handed to the harness when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerResult {
    /// Successful operations.
    pub ops: u64,
    /// Operations that failed and were left out of `ops` and `latency`.
    pub failed: u64,
    /// Summed latency of the successful operations.
    pub latency: Duration,
}

impl WorkerResult {
    fn record(&mut self, elapsed: Duration) {
        self.ops += 1;
        self.latency += elapsed;
    }
}

/// Runs operations against `client` until `stop` is raised or `operations`
/// runs dry. The signal is only checked between operations, so an in-flight
/// round trip always completes.
pub fn run_worker<C, I>(client: &mut C, operations: I, stop: &StopSignal) -> WorkerResult
where
    C: KvClient + ?Sized,
    I: IntoIterator<Item = Operation>,
{
    let mut result = WorkerResult::default();
    let mut operations = operations.into_iter();

    while !stop.is_stopped() {
        let Some(op) = operations.next() else {
            break;
        };

        let start = Instant::now();
        let ok = match &op {
            Operation::Write { key, value } => client.put(key, value),
            Operation::Read { key } => client.get(key).is_some(),
        };
        let elapsed = start.elapsed();

        if ok {
            result.record(elapsed);
        } else {
            result.failed += 1;
        }
    }

    result
}
