//! Minimum-move solver and scorer for Tower-of-London style peg puzzles.
//!
//! A puzzle [`Configuration`] is an ordered set of pegs holding single-character
//! items. Moving the top item of one peg onto another peg with spare capacity is a
//! [`Move`]. The [`Solver`] runs an exact breadth-first search over the implicit
//! move graph to find the fewest moves between two configurations, and [`score`]
//! turns that minimum into a bounded per-trial score.
//!
//! # Example
//!
//! ```
//! use tolscore_engine::{Configuration, MinimumMoves, Solver, score};
//!
//! let start: Configuration = "|A|B||".parse().unwrap();
//! let goal: Configuration = "|||BA|".parse().unwrap();
//!
//! let minimum = Solver::default().minimum_moves(&start, &goal, 3);
//! assert_eq!(minimum, MinimumMoves::Moves(2));
//! assert_eq!(score(2, minimum, true), 10);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Configuration text that does not start with the peg delimiter.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("configuration text must begin with '|': {text:?}")]
pub struct MalformedConfigurationError {
    pub text: String,
}

/// A configuration holds more pegs than it is being normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("configuration has {actual} pegs, cannot normalize it to {expected}")]
pub struct InvalidPegCountError {
    pub actual: usize,
    pub expected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigurationError {
    #[display("{_0}")]
    Malformed(MalformedConfigurationError),
    #[display("{_0}")]
    InvalidPegCount(InvalidPegCountError),
}
