// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use log::{debug, info};

use super::Puzzle;
use super::super::grid::{Changes, Error, GridSnapshot, SquareStatus, SquareStatus::*};

#[derive(PartialEq, Debug)]
pub enum SolveResult {
    Solved(Vec<Vec<bool>>),
    Unsatisfiable,
    Invalid(String),
    Timeout,
}
impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveResult::Solved(_)     => write!(f, "Solved"),
            SolveResult::Unsatisfiable => write!(f, "Unsatisfiable"),
            SolveResult::Invalid(why)  => write!(f, "Invalid: {}", why),
            SolveResult::Timeout       => write!(f, "Timeout"),
        }
    }
}

// one active branch of the search: the grid as it was before the guess,
// the guessed square, and which value the guess currently holds
struct Frame {
    saved: GridSnapshot,
    x: usize,
    y: usize,
    guess: SquareStatus,
}

impl Puzzle {
    // sweeps every row and column in a fixed order, merging each line's forced
    // squares into the grid, until a full round changes nothing. returns all
    // changes made; Err(Infeasible) as soon as any line rules out every placement.
    pub fn propagate(&mut self) -> Result<Changes, Error> {
        let mut all_changes = Changes::new();
        let mut round: usize = 1;
        loop {
            let mut round_changes = Changes::new();
            for row in self.rows.iter().chain(self.cols.iter()) {
                round_changes.extend(row.deduce()?);
            }
            if round_changes.is_empty() {
                break;
            }
            debug!("propagation round {}: {} square(s) settled", round, round_changes.len());
            all_changes.extend(round_changes);
            round += 1;
        }
        Ok(all_changes)
    }

    pub fn solve(&mut self, max_decisions: Option<usize>) -> SolveResult {
        if let Err(err) = self.validate() {
            return SolveResult::Invalid(err.to_string());
        }

        match self.propagate() {
            Ok(changes) => debug!("initial propagation settled {} square(s)", changes.len()),
            Err(Error::Infeasible(direction, index)) => {
                debug!("contradiction in {} line {} before any guess", direction, index);
                return SolveResult::Unsatisfiable;
            }
            Err(other) => panic!("internal solver error: {}", other),
        }

        let unknown = { self.grid.borrow().unknown_count() };
        if unknown > 0 {
            debug!("{} square(s) still unknown at the propagation fixpoint; searching", unknown);
        }

        let mut stack = Vec::<Frame>::new();
        let mut decisions: usize = 0;

        'search: loop {
            // invariant here: the grid is at a contradiction-free fixpoint
            let next_unknown = { self.grid.borrow().first_unknown() };
            let (x, y) = match next_unknown {
                Some(position) => position,
                None           => break 'search,
            };
            let saved = { self.grid.borrow().snapshot() };
            stack.push(Frame { saved, x, y, guess: FilledIn });

            'apply: loop {
                decisions += 1;
                if let Some(budget) = max_decisions {
                    if decisions > budget {
                        debug!("guess budget of {} exhausted", budget);
                        return SolveResult::Timeout;
                    }
                }

                let (x, y, guess) = match stack.last() {
                    Some(frame) => (frame.x, frame.y, frame.guess),
                    None        => panic!("guess applied with an empty search stack"),
                };
                debug!("guess #{} at depth {}: {} at (col={}, row={})",
                       decisions, stack.len(), guess, x, y);
                {
                    let mut grid = self.grid.borrow_mut();
                    if let Err(err) = grid.get_square_mut(x, y).set_status(guess) {
                        panic!("internal solver error: {}", err);
                    }
                }

                match self.propagate() {
                    Ok(_) => continue 'search,
                    Err(Error::Infeasible(direction, index)) => {
                        debug!("contradiction in {} line {}; backtracking", direction, index);
                        loop {
                            match stack.last_mut() {
                                None => return SolveResult::Unsatisfiable,
                                Some(frame) => {
                                    self.grid.borrow_mut().restore(&frame.saved);
                                    if frame.guess == FilledIn {
                                        // other half of this branch is still open
                                        frame.guess = CrossedOut;
                                        continue 'apply;
                                    }
                                }
                            }
                            stack.pop();
                        }
                    }
                    Err(other) => panic!("internal solver error: {}", other),
                }
            }
        }

        info!("solved after {} guess(es)", decisions);
        SolveResult::Solved(self.extract_solution())
    }

    // final validity gate: the fully known grid must reproduce every clue exactly.
    // a mismatch here is an engine defect, not a property of the puzzle.
    fn extract_solution(&self) -> Vec<Vec<bool>> {
        for line in self.rows.iter().chain(self.cols.iter()) {
            let found = line.filled_run_lengths();
            let expected = line.clue_lengths();
            if found != expected {
                panic!("grid accepted as solved does not match the {} line {} clue: expected {:?}, found {:?}",
                       line.direction, line.index, expected, found);
            }
        }

        let grid = self.grid.borrow();
        (0..grid.height()).map(|y| {
            (0..grid.width()).map(|x| {
                match grid.get_square(x, y).get_status() {
                    FilledIn   => true,
                    CrossedOut => false,
                    Unknown    => panic!("square (col={}, row={}) still unknown at extraction", x, y),
                }
            }).collect()
        }).collect()
    }
}

pub fn solve(col_clues: &[Vec<usize>], row_clues: &[Vec<usize>]) -> SolveResult {
    let mut puzzle = Puzzle::from_clues(col_clues, row_clues);
    puzzle.solve(None)
}
