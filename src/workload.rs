use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// YCSB core workload mixes. Each one is fully described by the share of
/// operations that are writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Workload {
    /// 50% writes, 50% reads.
    #[default]
    A,
    /// 5% writes, 95% reads.
    B,
    /// Read only.
    C,
}

impl Workload {
    pub const fn write_percent(self) -> u32 {
        match self {
            Workload::A => 50,
            Workload::B => 5,
            Workload::C => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Workload::A => "ycsb-a",
            Workload::B => "ycsb-b",
            Workload::C => "ycsb-c",
        }
    }

    /// Unrecognised names fall back to [`Workload::A`].
    pub fn parse(s: &str) -> Self {
        match s {
            "ycsb-b" => Workload::B,
            "ycsb-c" => Workload::C,
            _ => Workload::A,
        }
    }
}

impl FromStr for Workload {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Workload::parse(s))
    }
}

impl Display for Workload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!(Workload::parse("ycsb-a"), Workload::A);
        assert_eq!(Workload::parse("ycsb-b"), Workload::B);
        assert_eq!(Workload::parse("ycsb-c"), Workload::C);
    }

    #[test]
    fn unknown_names_fall_back_to_a() {
        for s in ["", "ycsb-d", "YCSB-B", "c"] {
            assert_eq!(s.parse::<Workload>(), Ok(Workload::A));
        }
    }

    #[test]
    fn write_percentages() {
        assert_eq!(Workload::A.write_percent(), 50);
        assert_eq!(Workload::B.write_percent(), 5);
        assert_eq!(Workload::C.write_percent(), 0);
        assert_eq!(Workload::B.to_string(), "ycsb-b");
    }
}
