//! Naming convention of recorded logs: `T<test>_<person>_<suffix>.csv`.

use std::{fmt, path::Path};

/// Test session and participant encoded in a log file name.
///
/// ```
/// use tolscore_analysis::log_file::LogFileName;
///
/// let name = LogFileName::parse("T1_4567_Tol.csv").unwrap();
/// assert_eq!(name.test, 1);
/// assert_eq!(name.person, "4567");
/// assert_eq!(name.to_string(), "T1_4567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogFileName {
    /// Test session number (`0` for the baseline session).
    pub test: u32,
    pub person: String,
}

impl LogFileName {
    /// Parses a bare file name; returns `None` when it does not follow the convention.
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
        let mut parts = stem.split('_');
        let test = parts.next()?.strip_prefix('T')?.parse().ok()?;
        let person = parts.next().filter(|person| !person.is_empty())?;
        Some(Self {
            test,
            person: person.to_owned(),
        })
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::parse(path.file_name()?.to_str()?)
    }
}

impl fmt::Display for LogFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}_{}", self.test, self.person)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_without_suffix() {
        assert_eq!(
            LogFileName::parse("T2_0012.csv"),
            Some(LogFileName {
                test: 2,
                person: "0012".to_owned()
            })
        );
    }

    #[test]
    fn test_from_path() {
        let path = PathBuf::from("logs").join("T0_4567_Tol.csv");
        let name = LogFileName::from_path(&path).unwrap();
        assert_eq!((name.test, name.person.as_str()), (0, "4567"));
    }

    #[test]
    fn test_rejects_other_names() {
        for name in ["summary.csv", "X0_4567_Tol.csv", "T_4567.csv", "Tx_4567.csv", "T0.csv", "T0_.csv"] {
            assert_eq!(LogFileName::parse(name), None, "{name}");
        }
    }

    #[test]
    fn test_orders_by_test_then_person() {
        let mut names = ["T1_b", "T0_b", "T0_a"]
            .map(|name| LogFileName::parse(name).unwrap())
            .to_vec();
        names.sort();
        let names = names.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(names, ["T0_a", "T0_b", "T1_b"]);
    }
}
