use clap::{Parser, Subcommand};
use tolscore_engine::{DEFAULT_MAX_DEPTH, DEFAULT_PEG_COUNT, Solver, SolverConfig};
use tracing_subscriber::EnvFilter;

use self::{
    outcomes::OutcomesArg, score::ScoreArg, solve::SolveArg, summarize::SummarizeArg,
};

mod outcomes;
mod score;
mod solve;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    solver: SolverArg,
    /// Log debug output (overridden by `RUST_LOG`)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

/// Search settings shared by every mode.
#[derive(Debug, Clone, clap::Args)]
struct SolverArg {
    /// Number of pegs every configuration is normalized to
    #[arg(long, global = true, default_value_t = DEFAULT_PEG_COUNT)]
    pegs: usize,
    /// Give up searching beyond this many moves
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
}

impl SolverArg {
    fn solver(&self) -> Solver {
        Solver::new(SolverConfig {
            peg_count: self.pegs,
            max_depth: self.max_depth,
        })
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute the minimum moves between two configurations
    Solve(#[clap(flatten)] SolveArg),
    /// Append minimum moves and scores to trial logs
    Score(#[clap(flatten)] ScoreArg),
    /// Compute per-session outcome metrics from scored logs
    Outcomes(#[clap(flatten)] OutcomesArg),
    /// Summarize session outcomes across persons
    Summarize(#[clap(flatten)] SummarizeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);

    let solver = args.solver.solver();
    match args.mode {
        Mode::Solve(arg) => solve::run(&solver, &arg)?,
        Mode::Score(arg) => score::run(&solver, &arg)?,
        Mode::Outcomes(arg) => outcomes::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
