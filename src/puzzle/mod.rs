// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::{solve, SolveResult};

use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;
use std::convert::TryFrom;
use yaml_rust::Yaml;
use ansi_term::{Colour, ANSIString};

use super::grid::{Grid, SquareStatus};
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction::*};
use super::row::{Row, ClueError};

#[derive(Debug)]
pub struct Puzzle {
    pub rows: Vec<Row>,
    pub cols: Vec<Row>,
    pub grid: Rc<RefCell<Grid>>,
}

#[derive(PartialEq, Debug)]
pub enum LoadError {
    MissingClues(&'static str),
    BadValue(String),
}
impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::MissingClues(key) => write!(f, "no \"{}\" list in the document", key),
            LoadError::BadValue(msg)     => write!(f, "{}", msg),
        }
    }
}

impl Puzzle {
    pub fn new(grid: &Rc<RefCell<Grid>>,
               row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Self
    {
        let rows = (0..grid.borrow().height()).map(|y| Row::new(grid, Horizontal, y, &row_run_lengths[y]))
                                              .collect::<Vec<_>>();
        let cols = (0..grid.borrow().width()).map(|x| Row::new(grid, Vertical, x, &col_run_lengths[x]))
                                             .collect::<Vec<_>>();
        Puzzle {
            rows: rows,
            cols: cols,
            grid: Rc::clone(grid),
        }
    }
    pub fn from_clues(col_clues: &[Vec<usize>], row_clues: &[Vec<usize>]) -> Self {
        let grid = Rc::new(RefCell::new(
            Grid::new(col_clues.len(), row_clues.len())
        ));
        Puzzle::new(&grid, row_clues, col_clues)
    }
    pub fn width(&self) -> usize { self.grid.borrow().width() }
    pub fn height(&self) -> usize { self.grid.borrow().height() }

    pub fn validate(&self) -> Result<(), ClueError> {
        for row in self.rows.iter().chain(self.cols.iter()) {
            row.validate()?;
        }
        Ok(())
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, LoadError>
    {
        let row_run_lengths = Self::_clue_list(doc, "rows", "horizontal_hints")?;
        let col_run_lengths = Self::_clue_list(doc, "cols", "vertical_hints")?;
        Ok(Self::from_clues(&col_run_lengths, &row_run_lengths))
    }

    fn _clue_list(doc: &Yaml, key: &'static str, alias: &str) -> Result<Vec<Vec<usize>>, LoadError> {
        let node = match &doc[key] {
            Yaml::BadValue => &doc[alias],
            found          => found,
        };
        let list = match node.as_vec() {
            Some(list) => list,
            None       => return Err(LoadError::MissingClues(key)),
        };
        list.iter()
            .map(|yaml_val| Self::_parse_clue_runs(yaml_val))
            .collect()
    }

    fn _parse_clue_runs(input: &Yaml) -> Result<Vec<usize>, LoadError> {
        let runs: Vec<usize> = match input {
            Yaml::String(s)  => s.split_whitespace()
                                 .map(|int| int.trim().parse().map_err(|_| {
                                     LoadError::BadValue(format!("not a run length: {:?}", int))
                                 }))
                                 .collect::<Result<_,_>>()?,
            Yaml::Integer(i) => vec![ usize::try_from(*i).map_err(|_| {
                                     LoadError::BadValue(format!("not a run length: {}", i))
                                 })? ],
            Yaml::Null       => vec![],
            other            => return Err(LoadError::BadValue(format!("unexpected clue entry: {:?}", other))),
        };
        // a clue of a single 0 is the conventional spelling of an empty line
        match runs.as_slice() {
            [0] => Ok(vec![]),
            _   => Ok(runs),
        }
    }
}

impl Puzzle {
    // helper functions for the text renderer
    pub fn render(&self, margin: usize, emit_color: bool) -> String {
        self._fmt(margin, Some(5), emit_color)
    }

    fn _fmt(&self, margin: usize, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        // if subdivision is given, insert visual subdivisor lines across the grid every Nth row/col
        let pad = " ".repeat(margin);
        let cell_width = 2*margin + 1;

        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| row.runs.iter()
                                        .map(|run| run.to_colored_string())
                                        .collect::<Vec<_>>())
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .map(|ansi_str| ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                       .sum::<usize>()
                                                       .saturating_sub(1)) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.runs.len())
                                    .max().unwrap_or(0);

        let mut result = String::new();
        let grid = self.grid.borrow();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, margin, subdivision, emit_color));
        }

        let border = |piece: &str| (0..self.width()).map(|_| piece.repeat(cell_width))
                                                    .collect::<Vec<_>>();

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &border("\u{2550}")
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &grid.squares[y].iter()
                                .map(|sq| {
                                    let glyph = match sq.get_status() {
                                        SquareStatus::FilledIn if emit_color
                                            => Colour::Cyan.paint(sq.fmt_visual()).to_string(),
                                        _   => sq.fmt_visual().to_string(),
                                    };
                                    format!("{}{}{}", pad, glyph, pad)
                                })
                                .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &border("\u{2500}")
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &border("\u{2550}")
        ));

        return result;
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        return result;
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          margin: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        // column clues are stacked above their column, aligned to the bottom
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let part: String;
            if line_idx < col.runs.len() {
                let colored = col.runs[col.runs.len()-1-line_idx].to_colored_string();
                part = format!("{}{}", " ".repeat(margin), lalign_colored(&colored, margin+1, emit_color));
            } else {
                part = " ".repeat(2*margin + 1);
            }
            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(1, false))
    }
}
