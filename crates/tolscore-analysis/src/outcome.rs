//! Per-session outcome metrics of a scored log.
//!
//! A session is one scored log: one person taking one test session. Metrics
//! count move rows, completed attempts, time, and how close the moves came to
//! the computed minimum.
//!
//! | metric | definition |
//! |---|---|
//! | `total_movements` | rows with `step > 0` |
//! | `total_time_ms` | sum of `trialtime` over rows with `done == 1` |
//! | `completed_trials` | rows with `done == 1` |
//! | `movements_per_trial` | `total_movements / completed_trials` |
//! | `avg_time_per_trial` | `total_time_ms / completed_trials` |
//! | `time_per_movement` | `total_time_ms / total_movements` |
//! | `attempts` | rows with `tries > 1` |
//! | `total_min_moves` | sum of non-negative `min_moves` |
//! | `movement_efficiency` | `total_min_moves / total_movements` |
//!
//! Ratios with a zero denominator are 0, and ratios are rounded to two decimals.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Writer};
use serde::{Deserialize, Serialize};

use crate::{
    RowError, TrialLogError,
    log_file::LogFileName,
    trial_log::{self, MIN_MOVES_COLUMN},
};

/// Outcome metrics of one test session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub test: u32,
    pub total_movements: u64,
    pub total_time_ms: f64,
    pub completed_trials: u64,
    pub movements_per_trial: f64,
    pub avg_time_per_trial: f64,
    pub time_per_movement: f64,
    pub attempts: u64,
    pub total_min_moves: u64,
    pub movement_efficiency: f64,
}

impl SessionOutcome {
    /// Names of the metrics returned by [`SessionOutcome::metrics`], in order.
    pub const METRIC_NAMES: [&'static str; 9] = [
        "total_movements",
        "total_time_ms",
        "completed_trials",
        "movements_per_trial",
        "avg_time_per_trial",
        "time_per_movement",
        "attempts",
        "total_min_moves",
        "movement_efficiency",
    ];

    /// All metrics as `f64`, in the order of [`SessionOutcome::METRIC_NAMES`].
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn metrics(&self) -> [f64; 9] {
        [
            self.total_movements as f64,
            self.total_time_ms,
            self.completed_trials as f64,
            self.movements_per_trial,
            self.avg_time_per_trial,
            self.time_per_movement,
            self.attempts as f64,
            self.total_min_moves as f64,
            self.movement_efficiency,
        ]
    }

    /// Computes the metrics of a scored log read from `input`.
    ///
    /// `step` and `done` columns are required. `trialtime`, `tries` and
    /// `min_moves` count as empty when the log lacks them. Rows with unreadable
    /// numbers are logged and skipped.
    pub fn from_reader<R>(test: u32, input: R) -> Result<Self, TrialLogError>
    where
        R: io::Read,
    {
        let mut reader = ReaderBuilder::new().from_reader(input);
        let headers = reader.headers()?.clone();
        let columns = OutcomeColumns::locate(&headers)?;

        let mut totals = SessionTotals::default();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if let Err(err) = totals.add_row(&columns, &record) {
                tracing::warn!(row = index + 1, %err, "skipping row");
            }
        }
        Ok(totals.finish(test))
    }

    pub fn from_file(test: u32, path: &Path) -> Result<Self, TrialLogError> {
        Self::from_reader(test, BufReader::new(File::open(path)?))
    }
}

#[derive(Debug, Clone, Copy)]
struct OutcomeColumns {
    step: usize,
    done: usize,
    trial_time: Option<usize>,
    tries: Option<usize>,
    min_moves: Option<usize>,
}

impl OutcomeColumns {
    fn locate(headers: &StringRecord) -> Result<Self, TrialLogError> {
        let optional = |column| trial_log::column_index(headers, column).ok();
        Ok(Self {
            step: trial_log::column_index(headers, "step")?,
            done: trial_log::column_index(headers, "done")?,
            trial_time: optional("trialtime"),
            tries: optional("tries"),
            min_moves: optional(MIN_MOVES_COLUMN),
        })
    }
}

#[derive(Debug, Default)]
struct SessionTotals {
    movements: u64,
    time_ms: f64,
    completed: u64,
    attempts: u64,
    min_moves: u64,
}

impl SessionTotals {
    fn add_row(&mut self, columns: &OutcomeColumns, record: &StringRecord) -> Result<(), RowError> {
        let step = trial_log::parse_count(record, columns.step, "step")?;
        let done = trial_log::parse_count(record, columns.done, "done")? == Some(1);
        let trial_time = columns
            .trial_time
            .map(|index| parse_time(record, index))
            .transpose()?
            .flatten();
        let tries = columns
            .tries
            .map(|index| trial_log::parse_count(record, index, "tries"))
            .transpose()?
            .flatten();
        let min_moves = columns
            .min_moves
            .map(|index| parse_min_moves(record, index))
            .transpose()?
            .flatten();

        if step.is_some_and(|step| step > 0) {
            self.movements += 1;
        }
        if done {
            self.completed += 1;
            self.time_ms += trial_time.unwrap_or(0.0);
        }
        if tries.is_some_and(|tries| tries > 1) {
            self.attempts += 1;
        }
        if let Some(min_moves) = min_moves {
            self.min_moves += min_moves;
        }
        Ok(())
    }

    #[expect(clippy::cast_precision_loss)]
    fn finish(self, test: u32) -> SessionOutcome {
        let ratio = |numerator: f64, denominator: u64| {
            if denominator == 0 {
                0.0
            } else {
                round_hundredths(numerator / denominator as f64)
            }
        };
        SessionOutcome {
            test,
            total_movements: self.movements,
            total_time_ms: self.time_ms,
            completed_trials: self.completed,
            movements_per_trial: ratio(self.movements as f64, self.completed),
            avg_time_per_trial: ratio(self.time_ms, self.completed),
            time_per_movement: ratio(self.time_ms, self.movements),
            attempts: self.attempts,
            total_min_moves: self.min_moves,
            movement_efficiency: ratio(self.min_moves as f64, self.movements),
        }
    }
}

fn parse_time(record: &StringRecord, index: usize) -> Result<Option<f64>, RowError> {
    let text = trial_log::field(record, index);
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(RowError::InvalidNumber {
            column: "trialtime",
            value: text.to_owned(),
        }),
    }
}

/// Reads `min_moves`; flagged (negative) values do not count.
fn parse_min_moves(record: &StringRecord, index: usize) -> Result<Option<u64>, RowError> {
    let text = trial_log::field(record, index);
    if text.is_empty() {
        return Ok(None);
    }
    let value = text.parse::<i64>().map_err(|_| RowError::InvalidNumber {
        column: MIN_MOVES_COLUMN,
        value: text.to_owned(),
    })?;
    Ok(u64::try_from(value).ok())
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Session outcomes of one person, ordered by test session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonOutcomes {
    pub person: String,
    pub sessions: Vec<SessionOutcome>,
}

/// Groups session outcomes by person, each person's sessions sorted by test.
pub fn group_by_person<I>(outcomes: I) -> Vec<PersonOutcomes>
where
    I: IntoIterator<Item = (LogFileName, SessionOutcome)>,
{
    let mut by_person = BTreeMap::<String, Vec<SessionOutcome>>::new();
    for (name, outcome) in outcomes {
        by_person.entry(name.person).or_default().push(outcome);
    }
    by_person
        .into_iter()
        .map(|(person, mut sessions)| {
            sessions.sort_by_key(|session| session.test);
            PersonOutcomes { person, sessions }
        })
        .collect()
}

/// Writes session outcomes as CSV with a header row.
pub fn write_outcomes<W>(sessions: &[SessionOutcome], output: W) -> Result<(), TrialLogError>
where
    W: io::Write,
{
    let mut writer = Writer::from_writer(output);
    for session in sessions {
        writer.serialize(session)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads session outcomes written by [`write_outcomes`].
pub fn read_outcomes<R>(input: R) -> Result<Vec<SessionOutcome>, TrialLogError>
where
    R: io::Read,
{
    ReaderBuilder::new()
        .from_reader(input)
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .map_err(TrialLogError::from)
}
