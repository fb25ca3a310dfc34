//! Trial log processing for Tower-of-London sessions.
//!
//! This crate sits between recorded task logs and the minimum-move engine. It
//! feeds each logged attempt to [`tolscore_engine`], writes the derived values
//! back next to the original columns, and aggregates the scored logs into
//! per-session and per-cohort metrics.
//!
//! # Workflow
//!
//! 1. **Score logs** ([`trial_log`]): for every completed attempt, compute the
//!    minimum moves and the trial score, plus a running cumulative score
//! 2. **Identify logs** ([`log_file`]): recover the test session and person id
//!    from names like `T0_4567_Tol.csv`
//! 3. **Session outcomes** ([`outcome`]): movement, time and efficiency metrics
//!    per scored log, grouped per person
//! 4. **Cohort summary** ([`cohort`]): descriptive statistics and outliers of
//!    every metric across persons, per test session
//!
//! # Log format
//!
//! Logs are CSV files with a header row. One row is written per move; the
//! columns this crate reads are:
//!
//! | column | meaning |
//! |---|---|
//! | `size` | peg capacity of the trial |
//! | `current` | configuration at this row (start of the attempt when `step` is 0) |
//! | `end` | goal configuration |
//! | `step` | moves made so far in the attempt |
//! | `done` | 1 on the row that completes the attempt |
//! | `trialtime` | time spent on the trial in milliseconds |
//! | `tries` | attempt number within the trial |
//!
//! Any other column is carried through unchanged.
//!
//! # Example
//!
//! ```
//! use tolscore_analysis::trial_log::score_log;
//! use tolscore_engine::Solver;
//!
//! let log = "\
//! trial,size,current,end,step,done
//! 1,3,|A|B||,|||BA|,0,0
//! 1,3,|A||B|,|||BA|,1,0
//! 1,3,|||BA|,|||BA|,2,1
//! ";
//! let mut scored = Vec::new();
//! let summary = score_log(&Solver::default(), log.as_bytes(), &mut scored).unwrap();
//! assert_eq!(summary.completed_trials, 1);
//! assert_eq!(summary.total_score, 10);
//! ```

pub mod cohort;
pub mod log_file;
pub mod outcome;
pub mod trial_log;

use std::io;

use tolscore_engine::ConfigurationError;

/// Failure reading or writing a whole log.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrialLogError {
    #[display("missing column `{column}`")]
    MissingColumn { column: &'static str },
    #[display("CSV error: {_0}")]
    Csv(csv::Error),
    #[display("I/O error: {_0}")]
    Io(io::Error),
}

impl From<csv::Error> for TrialLogError {
    fn from(err: csv::Error) -> Self {
        TrialLogError::Csv(err)
    }
}

impl From<io::Error> for TrialLogError {
    fn from(err: io::Error) -> Self {
        TrialLogError::Io(err)
    }
}

/// Failure evaluating a single log row.
///
/// Row errors do not stop a log from being processed: the row is flagged and
/// the next one is read.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RowError {
    #[display("invalid `{column}` value {value:?}")]
    InvalidNumber { column: &'static str, value: String },
    #[display("completed trial has no recorded start")]
    MissingStart,
    #[display("{_0}")]
    Configuration(ConfigurationError),
}

impl From<ConfigurationError> for RowError {
    fn from(err: ConfigurationError) -> Self {
        RowError::Configuration(err)
    }
}
