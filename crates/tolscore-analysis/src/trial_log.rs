//! Scoring pass over a trial log.
//!
//! Rows are read in order. A row with `step == 0` opens a new attempt: its
//! `current` configuration is the start and its `end` configuration the goal.
//! A row with `done == 1` closes the attempt; it is evaluated with the row's
//! `size` as peg capacity and `step` as the observed move count.
//!
//! Three columns are appended to every row:
//!
//! - `min_moves`: minimum moves of the completed attempt, `-1` when it is
//!   infeasible or the row could not be evaluated, empty on other rows
//! - `trial_score`: score of the completed attempt, 0 on other rows
//! - `cumulative_score`: running total of `trial_score` over the log

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Writer};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tolscore_engine::{CumulativeScore, MinimumMoves, SCORE_MIN, Solver, Trial};

use crate::{RowError, TrialLogError};

pub const MIN_MOVES_COLUMN: &str = "min_moves";
pub const TRIAL_SCORE_COLUMN: &str = "trial_score";
pub const CUMULATIVE_SCORE_COLUMN: &str = "cumulative_score";

/// `min_moves` value of rows that are infeasible or could not be evaluated.
pub const FLAGGED_MIN_MOVES: i64 = -1;

/// Totals over one scored log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSummary {
    pub rows: usize,
    pub completed_trials: usize,
    pub infeasible_trials: usize,
    pub failed_rows: usize,
    pub total_score: u64,
}

/// Positions of the columns the scoring pass reads.
#[derive(Debug, Clone, Copy)]
struct TrialColumns {
    size: usize,
    current: usize,
    end: usize,
    step: usize,
    done: usize,
}

impl TrialColumns {
    fn locate(headers: &StringRecord) -> Result<Self, TrialLogError> {
        Ok(Self {
            size: column_index(headers, "size")?,
            current: column_index(headers, "current")?,
            end: column_index(headers, "end")?,
            step: column_index(headers, "step")?,
            done: column_index(headers, "done")?,
        })
    }
}

/// Derived values of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowScore {
    Open,
    Completed(MinimumMoves, u32),
    Flagged,
}

#[derive(Debug)]
struct LogScorer<'a> {
    solver: &'a Solver,
    columns: TrialColumns,
    /// Attempt in progress; its capacity is read from the completing row.
    attempt: Option<Trial>,
}

impl LogScorer<'_> {
    fn score_row(&mut self, record: &StringRecord) -> Result<RowScore, RowError> {
        // A row whose step cannot be read may have been a start.
        let step = required_count(record, self.columns.step, "step")
            .inspect_err(|_| self.attempt = None)?;

        if step == 0 {
            // A broken start must not leave the previous attempt in place.
            self.attempt = None;
            let current = field(record, self.columns.current);
            let end = field(record, self.columns.end);
            let trial = Trial::from_text(self.solver, current, end, 0)?;
            tracing::info!(start = %trial.start, goal = %trial.goal, "attempt started");
            self.attempt = Some(trial);
        }

        // An empty `done` cell is an open row.
        if parse_count(record, self.columns.done, "done")? != Some(1) {
            return Ok(RowScore::Open);
        }

        let attempt = self.attempt.as_ref().ok_or(RowError::MissingStart)?;
        let capacity = required_count(record, self.columns.size, "size")?;
        let trial = Trial {
            capacity: capacity as usize,
            ..attempt.clone()
        }
        .with_result(step, true);
        let outcome = trial.evaluate(self.solver);
        tracing::info!(
            minimum_moves = %outcome.minimum_moves,
            observed_moves = step,
            score = outcome.score,
            "attempt completed"
        );
        Ok(RowScore::Completed(outcome.minimum_moves, outcome.score))
    }
}

/// Scores every row of the CSV log read from `input` and writes it to `output`.
///
/// Rows that cannot be evaluated are logged, flagged with a `min_moves` of
/// `-1` and a score of 0; processing continues with the next row.
pub fn score_log<R, W>(solver: &Solver, input: R, output: W) -> Result<LogSummary, TrialLogError>
where
    R: io::Read,
    W: io::Write,
{
    let mut reader = ReaderBuilder::new().from_reader(input);
    let mut writer = Writer::from_writer(output);

    let headers = reader.headers()?.clone();
    let mut scorer = LogScorer {
        solver,
        columns: TrialColumns::locate(&headers)?,
        attempt: None,
    };

    let mut out_headers = headers.clone();
    out_headers.push_field(MIN_MOVES_COLUMN);
    out_headers.push_field(TRIAL_SCORE_COLUMN);
    out_headers.push_field(CUMULATIVE_SCORE_COLUMN);
    writer.write_record(&out_headers)?;

    let mut summary = LogSummary::default();
    let mut cumulative = CumulativeScore::default();
    for (index, record) in reader.records().enumerate() {
        let mut record = record?;
        let row_score = scorer.score_row(&record).unwrap_or_else(|err| {
            tracing::error!(row = index + 1, %err, "failed to evaluate row");
            RowScore::Flagged
        });

        summary.rows += 1;
        let (min_moves, score) = match row_score {
            RowScore::Open => (String::new(), SCORE_MIN),
            RowScore::Completed(minimum, score) => {
                summary.completed_trials += 1;
                if minimum.is_infeasible() {
                    summary.infeasible_trials += 1;
                }
                (minimum.to_signed().to_string(), score)
            }
            RowScore::Flagged => {
                summary.failed_rows += 1;
                (FLAGGED_MIN_MOVES.to_string(), SCORE_MIN)
            }
        };
        let total = cumulative.add(score);

        record.push_field(&min_moves);
        record.push_field(&score.to_string());
        record.push_field(&total.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    summary.total_score = cumulative.total();
    Ok(summary)
}

/// Scores the log at `input` into a file at `output`.
///
/// The scored log is written to a temporary file next to `output` and moved
/// into place once complete, so `output` may be `input` itself. On failure
/// `output` is left untouched.
pub fn score_log_file(
    solver: &Solver,
    input: &Path,
    output: &Path,
) -> Result<LogSummary, TrialLogError> {
    let reader = BufReader::new(File::open(input)?);
    let dir = output
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut scored = NamedTempFile::new_in(dir)?;
    let summary = score_log(solver, reader, BufWriter::new(scored.as_file_mut()))?;
    scored.persist(output).map_err(|err| err.error)?;
    Ok(summary)
}

pub(crate) fn column_index(
    headers: &StringRecord,
    column: &'static str,
) -> Result<usize, TrialLogError> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or(TrialLogError::MissingColumn { column })
}

pub(crate) fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default().trim()
}

/// Parses a non-negative count, accepting integral floats such as `3.0`.
///
/// Empty cells are `None`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn parse_count(
    record: &StringRecord,
    index: usize,
    column: &'static str,
) -> Result<Option<u32>, RowError> {
    let text = field(record, index);
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(count) = text.parse::<u32>() {
        return Ok(Some(count));
    }
    match text.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) => {
            Ok(Some(value as u32))
        }
        _ => Err(RowError::InvalidNumber {
            column,
            value: text.to_owned(),
        }),
    }
}

fn required_count(
    record: &StringRecord,
    index: usize,
    column: &'static str,
) -> Result<u32, RowError> {
    parse_count(record, index, column)?.ok_or_else(|| RowError::InvalidNumber {
        column,
        value: String::new(),
    })
}
