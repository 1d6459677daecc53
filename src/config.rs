use crate::workload::Workload;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one server address is required")]
    NoAddresses,
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("key space must contain at least one key")]
    NoKeys,
}

/// Benchmark parameters, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server addresses; workers are spread over them round-robin.
    pub addrs: Vec<String>,
    pub workers: usize,
    pub keys: u64,
    pub workload: Workload,
    /// CSV file the result row is appended to. Results are only printed when unset.
    pub csv_path: Option<PathBuf>,
    /// Raises the log level to `debug`, which logs every failed connection I/O.
    pub debug: bool,
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.addrs.is_empty() {
            return Err(ConfigError::NoAddresses);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.keys == 0 {
            return Err(ConfigError::NoKeys);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            addrs: vec!["localhost:7000".to_owned()],
            workers: 1,
            keys: 6,
            workload: Workload::A,
            csv_path: None,
            debug: false,
        }
    }

    #[test]
    fn accepts_sane_values() {
        assert_eq!(config().validate(), Ok(config()));
    }

    #[test]
    fn rejects_degenerate_values() {
        let no_addrs = Config { addrs: vec![], ..config() };
        assert_eq!(no_addrs.validate(), Err(ConfigError::NoAddresses));

        let no_workers = Config { workers: 0, ..config() };
        assert_eq!(no_workers.validate(), Err(ConfigError::NoWorkers));

        let no_keys = Config { keys: 0, ..config() };
        assert_eq!(no_keys.validate(), Err(ConfigError::NoKeys));
    }
}
