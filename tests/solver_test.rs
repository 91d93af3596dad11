// vim: set ai et ts=4 sts=4 sw=4:
//! End-to-end solver behavior: propagation-only puzzles, puzzles that need
//! search, unsatisfiable and invalid inputs, budgets, and determinism.

use picross::{solve, Puzzle, SolveResult};

fn filled_count(grid: &[Vec<bool>]) -> usize {
    grid.iter().flat_map(|row| row.iter()).filter(|&&b| b).count()
}

#[test]
fn propagation_alone_solves_a_forced_row() {
    // 3x1, row clue [3]: every column clue [1] and the row fill the line
    let result = solve(&[vec![1], vec![1], vec![1]], &[vec![3]]);
    assert_eq!(result, SolveResult::Solved(vec![vec![true, true, true]]));
}

#[test]
fn overlong_clue_is_invalid_before_any_search() {
    // 2x1 with a row clue of [3] can never fit
    let result = solve(&[vec![1], vec![1]], &[vec![3]]);
    match result {
        SolveResult::Invalid(reason) => assert!(reason.contains("Horizontal line 0")),
        other => panic!("expected Invalid, got {}", other),
    }
}

#[test]
fn zero_length_run_is_invalid() {
    let result = solve(&[vec![1], vec![0]], &[vec![1], vec![1]]);
    match result {
        SolveResult::Invalid(reason) => assert!(reason.contains("run of length 0")),
        other => panic!("expected Invalid, got {}", other),
    }
}

#[test]
fn search_resolves_a_permutation_puzzle_to_the_diagonal() {
    // 3x3, every clue [1]: propagation deduces nothing, so the witness is fixed
    // by the branch order (first unknown square in row-major order, filled
    // before empty), which lands on the main diagonal
    let clues = vec![vec![1], vec![1], vec![1]];
    let result = solve(&clues, &clues);
    assert_eq!(result, SolveResult::Solved(vec![
        vec![true,  false, false],
        vec![false, true,  false],
        vec![false, false, true ],
    ]));
}

#[test]
fn witness_is_deterministic_across_runs() {
    let clues = vec![vec![1], vec![1], vec![1]];
    let first = solve(&clues, &clues);
    let second = solve(&clues, &clues);
    assert_eq!(first, second);
}

#[test]
fn conflicting_clues_are_unsatisfiable() {
    // 2x2: both rows full, but the columns claim [1] and [2]
    let result = solve(&[vec![1], vec![2]], &[vec![2], vec![2]]);
    assert_eq!(result, SolveResult::Unsatisfiable);
}

#[test]
fn empty_clue_lines_resolve_to_all_empty() {
    // row 1 has no runs at all; row 0 is full
    let result = solve(&[vec![1], vec![1]], &[vec![2], vec![]]);
    assert_eq!(result, SolveResult::Solved(vec![
        vec![true,  true ],
        vec![false, false],
    ]));
}

#[test]
fn zero_guess_budget_times_out_when_search_is_needed() {
    let clues = vec![vec![1], vec![1], vec![1]];
    let mut puzzle = Puzzle::from_clues(&clues, &clues);
    assert_eq!(puzzle.solve(Some(0)), SolveResult::Timeout);
}

#[test]
fn budget_is_not_consumed_by_propagation_only_puzzles() {
    let mut puzzle = Puzzle::from_clues(&[vec![1], vec![1], vec![1]], &[vec![3]]);
    assert_eq!(puzzle.solve(Some(0)),
               SolveResult::Solved(vec![vec![true, true, true]]));
}

#[test]
fn propagation_is_idempotent_at_the_fixpoint() {
    let mut puzzle = Puzzle::from_clues(&[vec![1], vec![2]], &[vec![1], vec![2]]);
    let first = puzzle.propagate().unwrap();
    assert!(!first.is_empty());
    let second = puzzle.propagate().unwrap();
    assert!(second.is_empty());
}

#[test]
fn solved_grids_reproduce_their_clues() {
    let col_clues = vec![vec![1, 1], vec![1], vec![1], vec![1]];
    let row_clues = vec![vec![2, 1], vec![1], vec![1]];
    match solve(&col_clues, &row_clues) {
        SolveResult::Solved(grid) => {
            assert_eq!(filled_count(&grid), 5);
            for (y, row) in grid.iter().enumerate() {
                let runs = run_lengths(row);
                assert_eq!(runs, row_clues[y], "row {} does not match", y);
            }
            for x in 0..col_clues.len() {
                let column: Vec<bool> = grid.iter().map(|row| row[x]).collect();
                assert_eq!(run_lengths(&column), col_clues[x], "col {} does not match", x);
            }
        }
        other => panic!("expected Solved, got {}", other),
    }
}

#[test]
fn the_duck_puzzle_solves_end_to_end() {
    let source = include_str!("../demos/duck.yaml");
    let docs = yaml_rust::YamlLoader::load_from_str(source).unwrap();
    let mut puzzle = Puzzle::from_yaml(&docs[0]).unwrap();
    match puzzle.solve(None) {
        SolveResult::Solved(grid) => {
            assert_eq!(grid.len(), 10);
            assert!(grid.iter().all(|row| row.len() == 10));
            assert_eq!(filled_count(&grid), 47); // total of the row clues
        }
        other => panic!("expected Solved, got {}", other),
    }
}

fn run_lengths(line: &[bool]) -> Vec<usize> {
    let mut result = Vec::new();
    let mut current = 0usize;
    for &filled in line {
        if filled {
            current += 1;
        } else if current > 0 {
            result.push(current);
            current = 0;
        }
    }
    if current > 0 {
        result.push(current);
    }
    result
}
