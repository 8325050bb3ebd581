use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use sliding_puzzle_search::{
    a_star, ida_star, ida_star_with_stats, iddfs, iddfs_with_stats, solution_moves, solution_path,
    Algorithm, Puzzle, SearchConfig,
};

fn board(input: &str) -> Rc<Puzzle> {
    Rc::new(input.parse().expect("test board should parse"))
}

fn goal_for(start: &Puzzle) -> Puzzle {
    Puzzle::new(start.size())
}

/// Checks that `end` is the goal and that its parent chain is a legal move
/// sequence starting at `start`.
fn assert_valid_solution(start: &Puzzle, goal: &Puzzle, end: &Rc<Puzzle>) {
    assert_eq!(**end, *goal);
    let path = solution_path(end);
    assert_eq!(*path[0], *start);
    assert_eq!(path.len(), end.depth() as usize + 1);
    assert_eq!(solution_moves(&path).len(), end.depth() as usize);
}

#[test]
fn test_one_move_from_solved() {
    let start = board("3\n1\t2\t3\n4\t5\t6\n7\tX\t8\n");
    let goal = goal_for(&start);

    let found = [
        iddfs(&start, &goal, 15),
        a_star(&start, &goal),
        ida_star(&start, &goal),
    ];
    for end in found {
        let end = end.expect("solvable board");
        assert_eq!(end.depth(), 1);
        assert_valid_solution(&start, &goal, &end);
    }
}

#[test]
fn test_two_moves_from_solved() {
    let start = board("3 1 2 3 4 5 6 X 7 8");
    let goal = goal_for(&start);

    for algorithm in Algorithm::ALL {
        let (end, _) = algorithm.run(&start, &goal, &SearchConfig::default());
        let end = end.unwrap_or_else(|| panic!("{} found nothing", algorithm.name()));
        assert_eq!(end.depth(), 2, "{}", algorithm.name());
        assert_valid_solution(&start, &goal, &end);
    }
}

#[test]
fn test_already_solved() {
    let start = Rc::new(Puzzle::new(4));
    let goal = Puzzle::new(4);

    for algorithm in Algorithm::ALL {
        let (end, _) = algorithm.run(&start, &goal, &SearchConfig { max_depth: 0 });
        let end = end.unwrap();
        assert_eq!(end.depth(), 0);
        assert!(Rc::ptr_eq(&end, &start));
    }
}

#[test]
fn test_iddfs_zero_budget_on_unsolved_board() {
    let start = board("3 1 2 3 4 5 6 7 X 8");
    let goal = goal_for(&start);
    let (found, stats) = iddfs_with_stats(&start, &goal, 0);
    assert!(found.is_none());
    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.expanded, 0);
}

#[test]
fn test_iddfs_tries_each_limit_once() {
    let start = board("3 1 2 3 4 5 6 X 7 8");
    let goal = goal_for(&start);
    let (found, stats) = iddfs_with_stats(&start, &goal, 10);
    assert_eq!(found.unwrap().depth(), 2);
    assert_eq!(stats.iterations, 3);
}

#[test]
fn test_unsolvable_two_by_two() {
    // 1 and 2 swapped: a different permutation parity from the solved board.
    let start = board("2 2 1 3 X");
    let goal = goal_for(&start);

    assert!(iddfs(&start, &goal, 20).is_none());
    assert!(a_star(&start, &goal).is_none());

    let (found, stats) = ida_star_with_stats(&start, &goal);
    assert!(found.is_none());
    assert!(stats.cutoffs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_two_by_two_scrambles_solved_by_all() {
    let config = SearchConfig { max_depth: 12 };
    for seed in 0..10 {
        let start = Rc::new(Puzzle::scrambled(2, 9, &mut StdRng::seed_from_u64(seed)));
        let goal = goal_for(&start);
        for algorithm in Algorithm::ALL {
            let (end, _) = algorithm.run(&start, &goal, &config);
            let end = end.unwrap_or_else(|| panic!("{} failed on seed {}", algorithm.name(), seed));
            assert_valid_solution(&start, &goal, &end);
        }
    }
}

#[test]
fn test_ida_star_cutoffs_increase_until_solved() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        let start = Rc::new(Puzzle::scrambled(3, 12, &mut rng));
        let goal = goal_for(&start);
        let (end, stats) = ida_star_with_stats(&start, &goal);
        let end = end.expect("scrambled boards are solvable");

        assert_valid_solution(&start, &goal, &end);
        assert_eq!(stats.cutoffs[0], start.score());
        assert_eq!(stats.cutoffs.len(), stats.iterations);
        assert!(stats.cutoffs.windows(2).all(|w| w[0] < w[1]));
        assert!(end.score() <= *stats.cutoffs.last().unwrap());
    }
}

#[test]
fn test_a_star_solves_scrambled_boards() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let start = Rc::new(Puzzle::scrambled(3, 15, &mut rng));
        let goal = goal_for(&start);
        let end = a_star(&start, &goal).expect("scrambled boards are solvable");
        assert_valid_solution(&start, &goal, &end);
    }
}

#[test]
fn test_searches_are_deterministic() {
    let start = Rc::new(Puzzle::scrambled(3, 14, &mut StdRng::seed_from_u64(3)));
    let goal = goal_for(&start);
    for algorithm in [Algorithm::AStar, Algorithm::IdaStar] {
        let (a, stats_a) = algorithm.run(&start, &goal, &SearchConfig::default());
        let (b, stats_b) = algorithm.run(&start, &goal, &SearchConfig::default());
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(solution_path(&a), solution_path(&b));
        assert_eq!(stats_a, stats_b);
    }
}
