use crate::report::Report;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

pub const CSV_HEADER: &str = "workload,workers,keys,throughput_ops_sec,avg_latency_ms";

/// Appends the run's record to the CSV file at `path`. The header row is
/// written only when the file does not exist yet.
pub fn append_csv(path: &Path, report: &Report<'_>) -> Result<()> {
    let needs_header = matches!(fs::metadata(path), Err(e) if e.kind() == ErrorKind::NotFound);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let mut rows = String::new();
    if needs_header {
        rows.push_str(CSV_HEADER);
        rows.push('\n');
    }
    rows.push_str(&report.record());
    rows.push('\n');

    file.write_all(rows.as_bytes())
        .with_context(|| format!("cannot append to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::harness::AggregateResult;
    use crate::workload::Workload;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let config = Config {
            addrs: vec!["localhost:7000".to_owned()],
            workers: 2,
            keys: 6,
            workload: Workload::C,
            csv_path: Some(path.clone()),
            debug: false,
        };
        let agg = AggregateResult {
            ops: 100,
            failed: 0,
            latency: Duration::from_millis(50),
            duration: Duration::from_secs(10),
        };
        let report = Report::new(&config, &agg);

        append_csv(&path, &report).unwrap();
        append_csv(&path, &report).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            format!("{CSV_HEADER}\nycsb-c,2,6,10.00,0.50\nycsb-c,2,6,10.00,0.50\n")
        );
    }

    #[test]
    fn existing_file_gets_no_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "").unwrap();
        let config = Config {
            addrs: vec!["localhost:7000".to_owned()],
            workers: 1,
            keys: 1,
            workload: Workload::A,
            csv_path: None,
            debug: false,
        };
        let agg = AggregateResult::from_results([], Duration::from_secs(10));
        append_csv(&path, &Report::new(&config, &agg)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ycsb-a,1,1,0.00,0.00\n");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("results.csv");
        let config = Config {
            addrs: vec!["localhost:7000".to_owned()],
            workers: 1,
            keys: 1,
            workload: Workload::A,
            csv_path: None,
            debug: false,
        };
        let agg = AggregateResult::from_results([], Duration::from_secs(10));
        assert!(append_csv(&path, &Report::new(&config, &agg)).is_err());
    }
}
