use std::{io::BufWriter, path::PathBuf};

use anyhow::Context;
use tolscore_analysis::{
    log_file::LogFileName,
    outcome::{self, SessionOutcome},
};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OutcomesArg {
    /// Directory of scored logs named `T<test>_<person>_<suffix>.csv`
    input: PathBuf,
    /// Directory `<person>_outcomes.csv` files are written to
    #[arg(long)]
    output: PathBuf,
    /// Number of test sessions each person is expected to have
    #[arg(long, default_value_t = 3)]
    expected_sessions: usize,
}

pub(crate) fn run(arg: &OutcomesArg) -> anyhow::Result<()> {
    let OutcomesArg {
        input,
        output,
        expected_sessions,
    } = arg;

    let mut sessions = vec![];
    for file in util::list_files(input, ".csv")? {
        let Some(name) = LogFileName::from_path(&file) else {
            tracing::warn!(file = %file.display(), "not a session log, skipping");
            continue;
        };
        match SessionOutcome::from_file(name.test, &file) {
            Ok(outcome) => sessions.push((name, outcome)),
            Err(err) => tracing::error!(file = %file.display(), %err, "failed to read log"),
        }
    }

    util::create_dir(output)?;
    let persons = outcome::group_by_person(sessions);
    for person in &persons {
        if person.sessions.len() != *expected_sessions {
            tracing::warn!(
                person = %person.person,
                sessions = person.sessions.len(),
                expected = expected_sessions,
                "unexpected number of sessions"
            );
        }

        let path = output.join(format!("{}_outcomes.csv", person.person));
        let file = util::create_file(&path)?;
        outcome::write_outcomes(&person.sessions, BufWriter::new(file))
            .with_context(|| format!("Failed to write outcomes: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote outcomes");
    }
    tracing::info!(persons = persons.len(), "computed outcomes");
    Ok(())
}
