use serde::{Deserialize, Serialize};

use super::configuration::Configuration;

/// Relocation of the top item of peg `from` onto peg `to`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{from}->{to}")]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl Configuration {
    /// Returns `true` if `mv` is legal under `capacity`.
    ///
    /// The source peg must hold an item, the destination must be a different
    /// peg with fewer than `capacity` items, and both must exist.
    #[must_use]
    pub fn can_apply(&self, mv: Move, capacity: usize) -> bool {
        let (Some(from), Some(to)) = (self.peg(mv.from), self.peg(mv.to)) else {
            return false;
        };
        mv.from != mv.to && !from.is_empty() && to.len() < capacity
    }

    /// Applies `mv`, returning `None` if it is not legal under `capacity`.
    #[must_use]
    pub fn apply(&self, mv: Move, capacity: usize) -> Option<Configuration> {
        self.can_apply(mv, capacity).then(|| self.moved(mv))
    }

    /// Enumerates the legal moves, ordered by source peg then destination peg.
    pub fn legal_moves(&self, capacity: usize) -> impl Iterator<Item = Move> + '_ {
        self.pegs()
            .enumerate()
            .filter(|(_, peg)| !peg.is_empty())
            .flat_map(move |(from, _)| {
                self.pegs()
                    .enumerate()
                    .filter(move |&(to, peg)| to != from && peg.len() < capacity)
                    .map(move |(to, _)| Move::new(from, to))
            })
    }

    /// Lazily yields every configuration reachable in exactly one move.
    ///
    /// Successors come in the same order as [`Configuration::legal_moves`].
    pub fn successors(&self, capacity: usize) -> impl Iterator<Item = Configuration> + '_ {
        self.legal_moves(capacity).map(move |mv| self.moved(mv))
    }

    /// Applies a move already known to be legal.
    pub(crate) fn moved(&self, mv: Move) -> Configuration {
        let mut next = self.clone();
        let pegs = next.pegs_mut();
        if let Some(item) = pegs[mv.from].pop() {
            pegs[mv.to].push(item);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> Configuration {
        Configuration::parse(text).unwrap()
    }

    #[test]
    fn test_moves_top_item() {
        let next = config("|AB|C||").apply(Move::new(0, 2), 3).unwrap();
        assert_eq!(next, config("|A|C|B|"));
    }

    #[test]
    fn test_rejects_empty_source() {
        assert_eq!(config("||A||").apply(Move::new(0, 1), 3), None);
    }

    #[test]
    fn test_rejects_full_destination() {
        assert_eq!(config("|A|BC||").apply(Move::new(0, 1), 2), None);
        assert!(config("|A|BC||").apply(Move::new(0, 1), 3).is_some());
    }

    #[test]
    fn test_rejects_same_peg_and_out_of_range() {
        let start = config("|A|||");
        assert!(!start.can_apply(Move::new(0, 0), 3));
        assert!(!start.can_apply(Move::new(0, 3), 3));
        assert!(!start.can_apply(Move::new(5, 1), 3));
    }

    #[test]
    fn test_legal_moves_order() {
        let moves = config("|A|B||").legal_moves(3).collect::<Vec<_>>();
        assert_eq!(
            moves,
            [
                Move::new(0, 1),
                Move::new(0, 2),
                Move::new(1, 0),
                Move::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_legal_moves_respect_capacity() {
        let moves = config("|AB|C||").legal_moves(2).collect::<Vec<_>>();
        assert_eq!(
            moves,
            [
                Move::new(0, 1),
                Move::new(0, 2),
                Move::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_successors_match_moves() {
        let start = config("|AB|C||");
        let successors = start.successors(3).collect::<Vec<_>>();
        let expected = start
            .legal_moves(3)
            .map(|mv| start.apply(mv, 3).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(successors, expected);
        assert!(successors.iter().all(|next| next.item_count() == 3));
    }

    #[test]
    fn test_no_successors_without_items() {
        assert_eq!(config("||||").successors(3).count(), 0);
    }

    #[test]
    fn test_reversed_move_restores_configuration() {
        let start = config("|AB|C||");
        for mv in start.legal_moves(3) {
            let next = start.apply(mv, 3).unwrap();
            assert_eq!(next.apply(Move::new(mv.to, mv.from), 3), Some(start.clone()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(0, 2).to_string(), "0->2");
    }
}
