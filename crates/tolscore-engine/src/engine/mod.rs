//! Search and scoring on top of the configuration model.
//!
//! - [`solver`]: breadth-first minimum-move search
//! - [`score`]: per-trial score from observed and minimum moves
//! - [`trial`]: evaluation of one logged trial

pub use self::{score::*, solver::*, trial::*};

pub mod score;
pub mod solver;
pub mod trial;
