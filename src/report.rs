use crate::config::Config;
use crate::harness::AggregateResult;
use std::fmt::{Display, Formatter};
use thousands::Separable;

/// Formats the outcome of a run. `Display` gives the human readable summary.
pub struct Report<'a> {
    config: &'a Config,
    aggregate: &'a AggregateResult,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a Config, aggregate: &'a AggregateResult) -> Self {
        Report { config, aggregate }
    }

    /// `workload,workers,keys,throughput,avg_latency` with two decimals.
    pub fn record(&self) -> String {
        format!(
            "{},{},{},{:.2},{:.2}",
            self.config.workload,
            self.config.workers,
            self.config.keys,
            self.aggregate.throughput(),
            self.aggregate.avg_latency_ms()
        )
    }

    /// Single machine-parsable line for scripts scraping stdout.
    pub fn result_line(&self) -> String {
        format!("RESULT:{}", self.record())
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Benchmark completed")?;
        writeln!(
            f,
            "Total ops: {} (failed: {})",
            self.aggregate.ops.separate_with_underscores(),
            self.aggregate.failed.separate_with_underscores()
        )?;
        writeln!(f, "Throughput: {:.2} ops/sec", self.aggregate.throughput())?;
        write!(f, "Avg latency: {:.2} ms", self.aggregate.avg_latency_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::Workload;
    use std::time::Duration;

    fn config() -> Config {
        Config {
            addrs: vec!["localhost:7000".to_owned()],
            workers: 4,
            keys: 6,
            workload: Workload::B,
            csv_path: None,
            debug: false,
        }
    }

    #[test]
    fn result_line_rounds_to_two_decimals() {
        let agg = AggregateResult {
            ops: 12_345,
            failed: 2,
            latency: Duration::from_micros(12_345 * 333),
            duration: Duration::from_secs(10),
        };
        let config = config();
        let report = Report::new(&config, &agg);
        assert_eq!(report.result_line(), "RESULT:ycsb-b,4,6,1234.50,0.33");
    }

    #[test]
    fn summary_of_empty_run() {
        let agg = AggregateResult {
            ops: 0,
            failed: 0,
            latency: Duration::ZERO,
            duration: Duration::from_secs(10),
        };
        let config = config();
        let report = Report::new(&config, &agg);
        assert_eq!(
            report.to_string(),
            "Benchmark completed\nTotal ops: 0 (failed: 0)\nThroughput: 0.00 ops/sec\nAvg latency: 0.00 ms"
        );
        assert_eq!(report.result_line(), "RESULT:ycsb-b,4,6,0.00,0.00");
    }

    #[test]
    fn counts_use_separators() {
        let agg = AggregateResult {
            ops: 1_234_567,
            failed: 0,
            latency: Duration::from_secs(1),
            duration: Duration::from_secs(10),
        };
        let config = config();
        let summary = Report::new(&config, &agg).to_string();
        assert!(summary.contains("Total ops: 1_234_567"));
    }
}
