//! Exact minimum-move search.
//!
//! The search space is the graph whose nodes are configurations and whose edges
//! are single legal moves. Every edge has weight 1 and every move can be undone,
//! so a breadth-first search from the start reaches the goal along a shortest
//! path the first time the goal is generated.
//!
//! # Early exits
//!
//! Before any search starts the solver rejects pairs that can never connect:
//!
//! 1. start and goal hold a different number of items
//! 2. a peg of start or goal holds more items than the capacity
//! 3. start and goal have a different number of pegs
//!
//! Identical start and goal are solved in 0 moves.

use std::{
    collections::{HashMap, VecDeque},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{CanonicalForm, Configuration, ConfigurationError, Move};

/// Peg count of the recorded task.
pub const DEFAULT_PEG_COUNT: usize = 3;

/// Depth at which a search gives up.
///
/// Reachable state spaces for the task are tiny compared to this bound, so it
/// only stops searches on degenerate inputs.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

/// Result of a minimum-move computation.
///
/// `Infeasible` is an expected outcome, not an error: it means no sequence of
/// moves connects the two configurations, or the depth ceiling was reached.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum MinimumMoves {
    Moves(u32),
    Infeasible,
}

impl MinimumMoves {
    /// Returns the move count, `None` when infeasible.
    #[must_use]
    pub fn moves(self) -> Option<u32> {
        match self {
            MinimumMoves::Moves(moves) => Some(moves),
            MinimumMoves::Infeasible => None,
        }
    }

    /// Signed encoding used in trial logs: the move count, or `-1` when infeasible.
    #[must_use]
    pub fn to_signed(self) -> i64 {
        self.moves().map_or(-1, i64::from)
    }
}

impl fmt::Display for MinimumMoves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimumMoves::Moves(moves) => write!(f, "{moves}"),
            MinimumMoves::Infeasible => write!(f, "infeasible"),
        }
    }
}

/// Why a pair of configurations has no solution.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Infeasibility {
    #[display("start holds {start} items but goal holds {goal}")]
    ItemCountMismatch { start: usize, goal: usize },
    #[display("a peg holds {height} items, above the capacity of {capacity}")]
    CapacityExceeded { height: usize, capacity: usize },
    #[display("start has {start} pegs but goal has {goal}")]
    PegCountMismatch { start: usize, goal: usize },
    #[display("goal is not reachable from start")]
    Unreachable,
    #[display("search passed the depth limit of {max_depth}")]
    DepthLimitExceeded { max_depth: u32 },
}

/// A shortest move sequence from start to goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: Vec<Move>,
}

impl Solution {
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn move_count(&self) -> u32 {
        // Bounded by the depth ceiling.
        self.moves.len() as u32
    }
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchOutcome {
    Solved(Solution),
    Infeasible(Infeasibility),
}

impl SearchOutcome {
    #[must_use]
    pub fn minimum_moves(&self) -> MinimumMoves {
        match self {
            SearchOutcome::Solved(solution) => MinimumMoves::Moves(solution.move_count()),
            SearchOutcome::Infeasible(_) => MinimumMoves::Infeasible,
        }
    }
}

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Number of pegs parsed configurations are padded to.
    pub peg_count: usize,
    /// Largest frontier distance expanded before the search is abandoned.
    pub max_depth: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            peg_count: DEFAULT_PEG_COUNT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Breadth-first minimum-move solver.
///
/// A solver holds only its settings. Every call builds its own frontier and
/// distance map and drops them on return, so a solver can be shared freely
/// between independent trials.
///
/// # Example
///
/// ```
/// use tolscore_engine::{Configuration, Move, SearchOutcome, Solver};
///
/// let start = Configuration::parse("|A|B||").unwrap();
/// let goal = Configuration::parse("||AB||").unwrap();
///
/// let SearchOutcome::Solved(solution) = Solver::default().solve(&start, &goal, 3) else {
///     panic!("goal should be reachable");
/// };
/// assert_eq!(solution.moves, [Move::new(1, 2), Move::new(0, 1), Move::new(2, 1)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    config: SolverConfig,
}

/// Distance-map entry: shortest distance found so far and the edge it came through.
#[derive(Debug)]
struct Visit {
    distance: u32,
    parent: Option<(CanonicalForm, Move)>,
}

impl Solver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Parses configuration text and pads it to the configured peg count.
    pub fn parse_configuration(&self, text: &str) -> Result<Configuration, ConfigurationError> {
        Ok(Configuration::parse(text)?.normalize(self.config.peg_count)?)
    }

    /// Minimum moves between two configuration texts.
    ///
    /// Malformed text is an error; an unsolvable pair is
    /// [`MinimumMoves::Infeasible`].
    pub fn minimum_moves_text(
        &self,
        start: &str,
        goal: &str,
        capacity: usize,
    ) -> Result<MinimumMoves, ConfigurationError> {
        let start = self.parse_configuration(start)?;
        let goal = self.parse_configuration(goal)?;
        Ok(self.minimum_moves(&start, &goal, capacity))
    }

    #[must_use]
    pub fn minimum_moves(
        &self,
        start: &Configuration,
        goal: &Configuration,
        capacity: usize,
    ) -> MinimumMoves {
        self.solve(start, goal, capacity).minimum_moves()
    }

    /// Searches for a shortest move sequence from `start` to `goal`.
    #[must_use]
    pub fn solve(
        &self,
        start: &Configuration,
        goal: &Configuration,
        capacity: usize,
    ) -> SearchOutcome {
        if let Err(reason) = check_solvable(start, goal, capacity) {
            tracing::debug!(%start, %goal, capacity, %reason, "skipping search");
            return SearchOutcome::Infeasible(reason);
        }

        let goal = goal.canonical();
        let start_key = start.canonical();
        if start_key == goal {
            return SearchOutcome::Solved(Solution { moves: vec![] });
        }

        let mut distances = HashMap::from([(
            start_key,
            Visit {
                distance: 0,
                parent: None,
            },
        )]);
        let mut frontier = VecDeque::from([(start.clone(), 0_u32)]);

        while let Some((current, distance)) = frontier.pop_front() {
            if distance > self.config.max_depth {
                tracing::warn!(
                    %start,
                    capacity,
                    max_depth = self.config.max_depth,
                    "search depth limit exceeded"
                );
                return SearchOutcome::Infeasible(Infeasibility::DepthLimitExceeded {
                    max_depth: self.config.max_depth,
                });
            }

            let current_key = current.canonical();
            let next_distance = distance + 1;
            for mv in current.legal_moves(capacity) {
                let next = current.moved(mv);
                let next_key = next.canonical();

                if next_key == goal {
                    let moves = trace_back(&distances, current_key, mv);
                    tracing::debug!(
                        %start,
                        moves = moves.len(),
                        visited = distances.len(),
                        "search solved"
                    );
                    return SearchOutcome::Solved(Solution { moves });
                }

                let improves = distances
                    .get(&next_key)
                    .is_none_or(|visit| visit.distance > next_distance);
                if improves {
                    distances.insert(
                        next_key,
                        Visit {
                            distance: next_distance,
                            parent: Some((current_key.clone(), mv)),
                        },
                    );
                    frontier.push_back((next, next_distance));
                }
            }
        }

        tracing::debug!(%start, visited = distances.len(), "search exhausted");
        SearchOutcome::Infeasible(Infeasibility::Unreachable)
    }
}

/// Minimum moves with the default solver settings.
#[must_use]
pub fn minimum_moves(start: &Configuration, goal: &Configuration, capacity: usize) -> MinimumMoves {
    Solver::default().minimum_moves(start, goal, capacity)
}

fn check_solvable(
    start: &Configuration,
    goal: &Configuration,
    capacity: usize,
) -> Result<(), Infeasibility> {
    let (start_items, goal_items) = (start.item_count(), goal.item_count());
    if start_items != goal_items {
        return Err(Infeasibility::ItemCountMismatch {
            start: start_items,
            goal: goal_items,
        });
    }

    let height = start.max_peg_height().max(goal.max_peg_height());
    if height > capacity {
        return Err(Infeasibility::CapacityExceeded { height, capacity });
    }

    if start.peg_count() != goal.peg_count() {
        return Err(Infeasibility::PegCountMismatch {
            start: start.peg_count(),
            goal: goal.peg_count(),
        });
    }

    Ok(())
}

/// Rebuilds the move sequence ending with `last` taken from `from`.
fn trace_back(distances: &HashMap<CanonicalForm, Visit>, from: CanonicalForm, last: Move) -> Vec<Move> {
    let mut moves = vec![last];
    let mut key = from;
    while let Some((parent, mv)) = distances.get(&key).and_then(|visit| visit.parent.as_ref()) {
        moves.push(*mv);
        key = parent.clone();
    }
    moves.reverse();
    moves
}
