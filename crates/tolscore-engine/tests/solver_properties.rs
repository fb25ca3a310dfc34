use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg32;
use tolscore_engine::{Configuration, MinimumMoves, SearchOutcome, Solver, minimum_moves, score};

const ITEMS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Places the first `item_count` items on random pegs without exceeding `capacity`.
fn random_configuration<R>(rng: &mut R, peg_count: usize, capacity: usize, item_count: usize) -> Configuration
where
    R: Rng,
{
    assert!(item_count <= peg_count * capacity);
    let mut items = ITEMS[..item_count].to_vec();
    items.shuffle(rng);

    let mut pegs = vec![Vec::new(); peg_count];
    for item in items {
        let open = (0..peg_count)
            .filter(|&peg| pegs[peg].len() < capacity)
            .collect::<Vec<_>>();
        let peg = open[rng.random_range(0..open.len())];
        pegs[peg].push(item);
    }
    Configuration::new(pegs)
}

fn random_pairs(seed: u64, count: usize) -> Vec<(Configuration, Configuration, usize)> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let capacity = rng.random_range(1..=3);
            let item_count = rng.random_range(0..=(3 * capacity).min(ITEMS.len()));
            let start = random_configuration(&mut rng, 3, capacity, item_count);
            let goal = random_configuration(&mut rng, 3, capacity, item_count);
            (start, goal, capacity)
        })
        .collect()
}

#[test]
fn test_reflexive() {
    for (start, _, capacity) in random_pairs(1, 50) {
        assert_eq!(minimum_moves(&start, &start, capacity), MinimumMoves::Moves(0));
    }
}

#[test]
fn test_symmetric() {
    for (start, goal, capacity) in random_pairs(2, 60) {
        assert_eq!(
            minimum_moves(&start, &goal, capacity),
            minimum_moves(&goal, &start, capacity),
            "{start} <-> {goal} with capacity {capacity}"
        );
    }
}

#[test]
fn test_solution_is_a_witness_of_its_length() {
    let solver = Solver::default();
    for (start, goal, capacity) in random_pairs(3, 60) {
        let SearchOutcome::Solved(solution) = solver.solve(&start, &goal, capacity) else {
            continue;
        };
        let mut current = start.clone();
        for &mv in &solution.moves {
            current = current
                .apply(mv, capacity)
                .unwrap_or_else(|| panic!("illegal move {mv} from {current}"));
            assert!(current.fits_capacity(capacity));
        }
        assert_eq!(current.canonical(), goal.canonical());
        assert_eq!(
            solver.minimum_moves(&start, &goal, capacity),
            MinimumMoves::Moves(solution.move_count())
        );
    }
}

#[test]
fn test_no_shorter_path_exists() {
    // One move can only change the minimum by at most one.
    for (start, goal, capacity) in random_pairs(4, 40) {
        let MinimumMoves::Moves(distance) = minimum_moves(&start, &goal, capacity) else {
            continue;
        };
        for next in start.successors(capacity) {
            let MinimumMoves::Moves(next_distance) = minimum_moves(&next, &goal, capacity) else {
                panic!("{next} is one move from {start} and must reach {goal}");
            };
            assert!(next_distance + 1 >= distance);
            assert!(next_distance <= distance + 1);
        }
    }
}

#[test]
fn test_item_count_mismatch_is_infeasible() {
    let mut rng = Pcg32::seed_from_u64(5);
    for capacity in 1..=4 {
        let start = random_configuration(&mut rng, 3, 3, 2);
        let goal = random_configuration(&mut rng, 3, 3, 3);
        assert_eq!(minimum_moves(&start, &goal, capacity), MinimumMoves::Infeasible);
    }
}

#[test]
fn test_capacity_violation_is_infeasible() {
    let start = Configuration::parse("|ABC|D||").unwrap();
    let goal = Configuration::parse("|A|B|CD|").unwrap();
    assert_eq!(minimum_moves(&start, &goal, 2), MinimumMoves::Infeasible);
    assert_eq!(minimum_moves(&goal, &start, 2), MinimumMoves::Infeasible);
    assert!(minimum_moves(&start, &goal, 3).is_moves());
}

#[test]
fn test_deterministic() {
    let solver = Solver::default();
    for (start, goal, capacity) in random_pairs(6, 30) {
        assert_eq!(
            solver.solve(&start, &goal, capacity),
            solver.solve(&start, &goal, capacity)
        );
    }
}

#[test]
fn test_logged_trial_end_to_end() {
    let solver = Solver::default();
    let minimum = solver.minimum_moves_text("|A|B||", "|||BA|", 3).unwrap();
    assert_eq!(minimum, MinimumMoves::Moves(2));
    assert_eq!(score(2, minimum, true), 10);

    let minimum = solver.minimum_moves_text("|A|B||", "||AB||", 3).unwrap();
    assert_eq!(minimum, MinimumMoves::Moves(3));
    assert_eq!(score(3, minimum, true), 10);
}
