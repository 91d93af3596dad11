// vim: set ai et ts=4 sts=4 sw=4:
//! Loader boundary: YAML documents in and clue lists out. No solving here.

use yaml_rust::YamlLoader;
use picross::puzzle::{Puzzle, LoadError};

fn load(source: &str) -> Result<Puzzle, LoadError> {
    let docs = YamlLoader::load_from_str(source).unwrap();
    Puzzle::from_yaml(&docs[0])
}

fn clue_lengths(rows: &[picross::row::Row]) -> Vec<Vec<usize>> {
    rows.iter().map(|row| row.clue_lengths()).collect()
}

#[test]
fn clues_parse_from_strings_integers_and_nulls() {
    let puzzle = load("
rows:
    - 2
    - \"1 1\"
    - ~
cols:
    - 1
    - \"2\"
    - 1
").unwrap();
    assert_eq!(puzzle.width(), 3);
    assert_eq!(puzzle.height(), 3);
    assert_eq!(clue_lengths(&puzzle.rows), vec![vec![2], vec![1, 1], vec![]]);
    assert_eq!(clue_lengths(&puzzle.cols), vec![vec![1], vec![2], vec![1]]);
}

#[test]
fn a_zero_clue_means_an_empty_line() {
    let puzzle = load("
rows:
    - 0
    - 1
cols:
    - 0
    - 1
").unwrap();
    assert_eq!(clue_lengths(&puzzle.rows), vec![vec![], vec![1]]);
    assert_eq!(clue_lengths(&puzzle.cols), vec![vec![], vec![1]]);
}

#[test]
fn hint_style_keys_are_accepted() {
    let puzzle = load("
horizontal_hints:
    - 1
    - 1
vertical_hints:
    - \"1 1\"
").unwrap();
    assert_eq!(puzzle.width(), 1);
    assert_eq!(puzzle.height(), 2);
    assert_eq!(clue_lengths(&puzzle.cols), vec![vec![1, 1]]);
}

#[test]
fn missing_clue_lists_are_reported() {
    assert!(matches!(load("rows:\n    - 1\n"), Err(LoadError::MissingClues("cols"))));
    assert!(matches!(load("cols:\n    - 1\n"), Err(LoadError::MissingClues("rows"))));
}

#[test]
fn garbage_run_lengths_are_reported() {
    let result = load("
rows:
    - \"1 x\"
cols:
    - 1
");
    match result {
        Err(LoadError::BadValue(msg)) => assert!(msg.contains("x")),
        other => panic!("expected BadValue, got {:?}", other),
    }
}

#[test]
fn negative_run_lengths_are_reported() {
    let result = load("
rows:
    - -3
cols:
    - 1
");
    assert!(matches!(result, Err(LoadError::BadValue(_))));
}

#[test]
fn the_demo_file_loads() {
    let puzzle = load(include_str!("../demos/duck.yaml")).unwrap();
    assert_eq!(puzzle.width(), 10);
    assert_eq!(puzzle.height(), 10);
    assert!(puzzle.validate().is_ok());
}
