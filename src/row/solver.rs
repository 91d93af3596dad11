// vim: set ai et ts=4 sts=4 sw=4:
use log::trace;
use super::{Row, DirectionalSequence, filled_runs};
use super::super::grid::{Changes, Error, SquareStatus, SquareStatus::*};

impl Row {
    // runs the line solver over this row's current view and writes every forced
    // square back into the grid. Err(Infeasible) means no assignment of this
    // row's runs is consistent with what is already known.
    pub fn deduce(&self) -> Result<Changes, Error> {
        let view = self.view();

        // a fully known line short-circuits to a validity check
        if !view.iter().any(|&s| s == Unknown) {
            return match filled_runs(&view) == self.clue_lengths() {
                true  => Ok(Changes::new()),
                false => Err(Error::Infeasible(self.direction, self.index)),
            };
        }

        let deductions = self.line_deductions(&view)?;
        let mut changes = Changes::new();
        for (i, &status) in deductions.iter().enumerate() {
            if status == Unknown || view[i] != Unknown {
                continue;
            }
            if let Some(change) = self.get_square_mut(i).set_status(status)? {
                trace!("{} line {}: {}", self.direction, self.index, change);
                changes.push(change);
            }
        }
        Ok(changes)
    }

    // tightest per-square deduction: FilledIn if every feasible assignment of the
    // runs covers the square, CrossedOut if none does, Unknown otherwise.
    fn line_deductions(&self, view: &[SquareStatus]) -> Result<Vec<SquareStatus>, Error> {
        let n = self.length;
        let k = self.runs.len();

        let fwd = self.reachable_forward(view);
        if !fwd[n][k] {
            return Err(Error::Infeasible(self.direction, self.index));
        }
        let bwd = self.reachable_backward(view);

        // a square is coverable if some feasible placement of some run contains it
        let mut covered = vec![false; n];
        for run in &self.runs {
            let r = run.length;
            for s in run.min_start..=run.max_start {
                if view[s..s+r].iter().any(|&st| st == CrossedOut) {
                    continue;
                }
                let left_ok = match s {
                    0 => fwd[0][run.index],
                    _ => view[s-1] != FilledIn && fwd[s-1][run.index],
                };
                if !left_ok { continue; }
                let e = s + r;
                let right_ok = match e == n {
                    true  => bwd[n][run.index+1],
                    false => view[e] != FilledIn && bwd[e+1][run.index+1],
                };
                if !right_ok { continue; }
                for p in s..e {
                    covered[p] = true;
                }
            }
        }

        let mut result = vec![Unknown; n];
        for p in 0..n {
            // the square can stay empty iff some split leaves the first j runs
            // entirely before it and the rest entirely after it
            let can_be_empty = view[p] != FilledIn
                               && (0..=k).any(|j| fwd[p][j] && bwd[p+1][j]);
            if !can_be_empty {
                result[p] = FilledIn;
            } else if !covered[p] {
                result[p] = CrossedOut;
            }
        }
        Ok(result)
    }

    // reachable_forward[i][j]: the first i squares can hold exactly the first j
    // runs, consistent with every known square among them
    fn reachable_forward(&self, view: &[SquareStatus]) -> Vec<Vec<bool>> {
        let n = self.length;
        let k = self.runs.len();
        let mut fwd = vec![vec![false; k+1]; n+1];
        fwd[0][0] = true;

        for i in 1..=n {
            for j in 0..=k {
                // leave square i-1 empty
                if view[i-1] != FilledIn && fwd[i-1][j] {
                    fwd[i][j] = true;
                    continue;
                }
                // or end run j exactly at square i-1, with a gap before it
                if j >= 1 {
                    let r = self.runs[j-1].length;
                    if i >= r && view[i-r..i].iter().all(|&st| st != CrossedOut) {
                        fwd[i][j] = match i - r {
                            0 => fwd[0][j-1],
                            s => view[s-1] != FilledIn && fwd[s-1][j-1],
                        };
                    }
                }
            }
        }
        fwd
    }

    // reachable_backward[i][j]: the squares from i onward can hold exactly the
    // runs from j onward; mirror of reachable_forward
    fn reachable_backward(&self, view: &[SquareStatus]) -> Vec<Vec<bool>> {
        let n = self.length;
        let k = self.runs.len();
        let mut bwd = vec![vec![false; k+1]; n+1];
        bwd[n][k] = true;

        for i in (0..n).rev() {
            for j in 0..=k {
                if view[i] != FilledIn && bwd[i+1][j] {
                    bwd[i][j] = true;
                    continue;
                }
                if j < k {
                    let r = self.runs[j].length;
                    let e = i + r;
                    if e <= n && view[i..e].iter().all(|&st| st != CrossedOut) {
                        bwd[i][j] = match e == n {
                            true  => bwd[n][j+1],
                            false => view[e] != FilledIn && bwd[e+1][j+1],
                        };
                    }
                }
            }
        }
        bwd
    }
}
