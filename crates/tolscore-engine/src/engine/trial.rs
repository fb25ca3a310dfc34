use serde::{Deserialize, Serialize};

use crate::{Configuration, ConfigurationError};

use super::{
    score::score,
    solver::{MinimumMoves, Solver},
};

/// One recorded attempt at the puzzle, as handed over by a trial log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub start: Configuration,
    pub goal: Configuration,
    /// Maximum number of items a single peg can hold.
    pub capacity: usize,
    /// Moves made by the participant; only meaningful for completed trials.
    pub observed_moves: u32,
    pub completed: bool,
}

/// The two values derived for each trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub minimum_moves: MinimumMoves,
    pub score: u32,
}

impl Trial {
    /// Builds a trial from logged configuration text.
    ///
    /// Both configurations are padded to the solver's peg count.
    pub fn from_text(
        solver: &Solver,
        start: &str,
        goal: &str,
        capacity: usize,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            start: solver.parse_configuration(start)?,
            goal: solver.parse_configuration(goal)?,
            capacity,
            observed_moves: 0,
            completed: false,
        })
    }

    /// Records how the attempt ended.
    #[must_use]
    pub fn with_result(self, observed_moves: u32, completed: bool) -> Self {
        Self {
            observed_moves,
            completed,
            ..self
        }
    }

    #[must_use]
    pub fn evaluate(&self, solver: &Solver) -> TrialOutcome {
        let minimum_moves = solver.minimum_moves(&self.start, &self.goal, self.capacity);
        TrialOutcome {
            minimum_moves,
            score: score(self.observed_moves, minimum_moves, self.completed),
        }
    }
}
