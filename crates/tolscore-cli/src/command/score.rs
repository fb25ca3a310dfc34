use std::path::{Path, PathBuf};

use anyhow::Context;
use tolscore_analysis::trial_log::{self, LogSummary};
use tolscore_engine::Solver;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Trial log file, or a directory of `*.csv` logs
    input: PathBuf,
    /// Scored log file, or the directory scored logs are written to; may be the input
    #[arg(long)]
    output: PathBuf,
}

pub(crate) fn run(solver: &Solver, arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg { input, output } = arg;

    if !input.is_dir() {
        let summary = score_file(solver, input, output)?;
        report(input, &summary);
        return Ok(());
    }

    util::create_dir(output)?;
    let files = util::list_files(input, ".csv")?;
    tracing::info!(count = files.len(), dir = %input.display(), "scoring logs");

    let mut failed = 0;
    for file in &files {
        let Some(file_name) = file.file_name() else {
            continue;
        };
        match score_file(solver, file, &output.join(file_name)) {
            Ok(summary) => report(file, &summary),
            Err(err) => {
                failed += 1;
                tracing::error!(file = %file.display(), "{err:#}");
            }
        }
    }
    tracing::info!(scored = files.len() - failed, failed, "finished scoring");
    Ok(())
}

fn score_file(solver: &Solver, input: &Path, output: &Path) -> anyhow::Result<LogSummary> {
    trial_log::score_log_file(solver, input, output)
        .with_context(|| format!("Failed to score log: {}", input.display()))
}

fn report(file: &Path, summary: &LogSummary) {
    tracing::info!(
        file = %file.display(),
        rows = summary.rows,
        completed = summary.completed_trials,
        infeasible = summary.infeasible_trials,
        failed_rows = summary.failed_rows,
        total_score = summary.total_score,
        "scored log"
    );
}
