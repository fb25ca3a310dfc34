use super::solver::MinimumMoves;

/// Score of a trial solved in the minimum number of moves.
pub const SCORE_MAX: u32 = 10;
/// Score of an unfinished or unsolvable trial.
pub const SCORE_MIN: u32 = 0;

/// Scores a trial from its observed and minimum move counts.
///
/// Every move beyond the minimum costs one point, down to [`SCORE_MIN`].
/// Unfinished trials and trials without a feasible minimum score [`SCORE_MIN`].
/// Observing fewer moves than the minimum cannot happen in a consistent log and
/// scores [`SCORE_MAX`].
///
/// # Examples
///
/// ```
/// use tolscore_engine::{MinimumMoves, score};
///
/// assert_eq!(score(5, MinimumMoves::Moves(3), true), 8);
/// assert_eq!(score(20, MinimumMoves::Moves(3), true), 0);
/// assert_eq!(score(3, MinimumMoves::Moves(3), false), 0);
/// assert_eq!(score(3, MinimumMoves::Infeasible, true), 0);
/// ```
#[must_use]
pub fn score(observed_moves: u32, minimum_moves: MinimumMoves, completed: bool) -> u32 {
    let MinimumMoves::Moves(minimum) = minimum_moves else {
        return SCORE_MIN;
    };
    if !completed {
        return SCORE_MIN;
    }

    let excess = i64::from(observed_moves) - i64::from(minimum);
    let score = (i64::from(SCORE_MAX) - excess).clamp(i64::from(SCORE_MIN), i64::from(SCORE_MAX));
    u32::try_from(score).unwrap_or(SCORE_MIN)
}

/// Running total of scores over a sequence of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CumulativeScore {
    total: u64,
}

impl CumulativeScore {
    /// Adds `score` and returns the new total.
    pub fn add(&mut self, score: u32) -> u64 {
        self.total += u64::from(score);
        self.total
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_moves_cost_one_point_each() {
        assert_eq!(score(3, MinimumMoves::Moves(3), true), 10);
        assert_eq!(score(5, MinimumMoves::Moves(3), true), 8);
        assert_eq!(score(10, MinimumMoves::Moves(3), true), 3);
    }

    #[test]
    fn test_floor_at_minimum() {
        assert_eq!(score(13, MinimumMoves::Moves(3), true), 0);
        assert_eq!(score(u32::MAX, MinimumMoves::Moves(0), true), 0);
    }

    #[test]
    fn test_fewer_moves_than_minimum_caps_at_maximum() {
        assert_eq!(score(1, MinimumMoves::Moves(3), true), 10);
        assert_eq!(score(0, MinimumMoves::Moves(u32::MAX), true), 10);
    }

    #[test]
    fn test_incomplete_trial() {
        for observed in [0, 3, 50] {
            assert_eq!(score(observed, MinimumMoves::Moves(3), false), SCORE_MIN);
            assert_eq!(score(observed, MinimumMoves::Infeasible, false), SCORE_MIN);
        }
    }

    #[test]
    fn test_infeasible_trial() {
        for observed in [0, 3, 50] {
            assert_eq!(score(observed, MinimumMoves::Infeasible, true), SCORE_MIN);
        }
    }

    #[test]
    fn test_cumulative_score() {
        let mut total = CumulativeScore::default();
        assert_eq!(total.add(10), 10);
        assert_eq!(total.add(0), 10);
        assert_eq!(total.add(7), 17);
        assert_eq!(total.total(), 17);
    }
}
