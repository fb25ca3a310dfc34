use std::path::PathBuf;

use anyhow::Context;
use tolscore_analysis::{cohort::CohortSummary, outcome};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Directory of `<person>_outcomes.csv` files
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let SummarizeArg { input, output } = arg;

    let mut sessions = vec![];
    for path in util::list_files(input, "_outcomes.csv")? {
        let reader = util::open_file("outcomes", &path)?;
        let outcomes = outcome::read_outcomes(reader)
            .with_context(|| format!("Failed to parse outcomes file: {}", path.display()))?;
        sessions.extend(outcomes);
    }
    tracing::info!(sessions = sessions.len(), "summarizing sessions");

    let summary = CohortSummary::from_sessions(&sessions);
    util::write_json(&summary, output.as_deref())
}
