use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tolscore_engine::{Infeasibility, MinimumMoves, Move, SearchOutcome, Solver};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Start configuration, e.g. `|A|B||`
    start: String,
    /// Goal configuration
    goal: String,
    /// Maximum number of items a peg can hold
    #[arg(long)]
    capacity: usize,
    /// Moves the participant made; adds a score to the report
    #[arg(long)]
    observed: Option<u32>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SolveReport {
    start: String,
    goal: String,
    capacity: usize,
    minimum_moves: MinimumMoves,
    #[serde(skip_serializing_if = "Option::is_none")]
    infeasibility: Option<Infeasibility>,
    moves: Vec<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
}

pub(crate) fn run(solver: &Solver, arg: &SolveArg) -> anyhow::Result<()> {
    let SolveArg {
        start,
        goal,
        capacity,
        observed,
        output,
    } = arg;

    let start = solver
        .parse_configuration(start)
        .with_context(|| format!("Invalid start configuration: {start}"))?;
    let goal = solver
        .parse_configuration(goal)
        .with_context(|| format!("Invalid goal configuration: {goal}"))?;

    let outcome = solver.solve(&start, &goal, *capacity);
    let minimum_moves = outcome.minimum_moves();
    let (moves, infeasibility) = match outcome {
        SearchOutcome::Solved(solution) => (solution.moves, None),
        SearchOutcome::Infeasible(reason) => (vec![], Some(reason)),
    };
    let score = observed.map(|observed| tolscore_engine::score(observed, minimum_moves, true));

    let report = SolveReport {
        start: start.to_string(),
        goal: goal.to_string(),
        capacity: *capacity,
        minimum_moves,
        infeasibility,
        moves,
        score,
    };
    util::write_json(&report, output.as_deref())
}
