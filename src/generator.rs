use crate::workload::Workload;
use anyhow::{Result, ensure};
use rand::distr::Alphanumeric;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Length of every generated value.
pub const VALUE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Read { key: String },
    Write { key: String, value: String },
}

impl Operation {
    pub fn key(&self) -> &str {
        match self {
            Operation::Read { key } | Operation::Write { key, .. } => key,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Operation::Write { .. })
    }
}

/// Label of the key at `index` in the key space.
pub fn key_label(index: u64) -> String {
    format!("k{index}")
}

/// Endless stream of uniformly drawn operations. Every draw is independent:
/// no hot keys and no correlation between consecutive operations.
pub struct OperationGen {
    write_percent: u32,
    keys: u64,
    rng: SmallRng,
}

impl OperationGen {
    pub fn new(workload: Workload, keys: u64, seed: u64) -> Result<Self> {
        ensure!(keys > 0, "key space must contain at least one key");
        Ok(OperationGen {
            write_percent: workload.write_percent(),
            keys,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn next_op(&mut self) -> Operation {
        let is_write = self.rng.random_range(0..100) < self.write_percent;
        let key = key_label(self.rng.random_range(0..self.keys));
        if is_write {
            let value = (&mut self.rng)
                .sample_iter(Alphanumeric)
                .take(VALUE_SIZE)
                .map(char::from)
                .collect();
            Operation::Write { key, value }
        } else {
            Operation::Read { key }
        }
    }
}

impl Iterator for OperationGen {
    type Item = Operation;

    fn next(&mut self) -> Option<Operation> {
        Some(self.next_op())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fraction(workload: Workload, draws: usize) -> f64 {
        let ops = OperationGen::new(workload, 6, 42).unwrap();
        let writes = ops.take(draws).filter(Operation::is_write).count();
        writes as f64 / draws as f64
    }

    #[test]
    fn write_fraction_tracks_workload() {
        let a = write_fraction(Workload::A, 100_000);
        assert!((0.45..=0.55).contains(&a), "ycsb-a write fraction {a}");

        let b = write_fraction(Workload::B, 100_000);
        assert!((0.03..=0.07).contains(&b), "ycsb-b write fraction {b}");

        assert_eq!(write_fraction(Workload::C, 10_000), 0.0);
    }

    #[test]
    fn keys_stay_in_key_space() {
        let ops = OperationGen::new(Workload::A, 3, 7).unwrap();
        let mut seen = [false; 3];
        for op in ops.take(1_000) {
            let index: usize = op.key().strip_prefix('k').unwrap().parse().unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn values_are_fixed_length_alphanumeric() {
        let ops = OperationGen::new(Workload::A, 10, 1).unwrap();
        for op in ops.take(200) {
            if let Operation::Write { value, .. } = op {
                assert_eq!(value.len(), VALUE_SIZE);
                assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
            }
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let a: Vec<_> = OperationGen::new(Workload::A, 100, 9).unwrap().take(50).collect();
        let b: Vec<_> = OperationGen::new(Workload::A, 100, 9).unwrap().take(50).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_key_space_is_rejected() {
        assert!(OperationGen::new(Workload::A, 0, 0).is_err());
    }
}
