// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::fs;
use std::path::Path;
use ansi_term::ANSIString;
use log::{debug, info};
use yaml_rust::{Yaml, YamlLoader};

use super::clue::{clue_style, Clues};
use super::grid::{Cell, CellChange, Error, Mode};
use super::state::GridState;
use super::util::{lalign_colored, ralign, ralign_colored, Direction, Direction::*};

const BUILTIN: &str = "
title: I'm back for more nonograms!
solution:
    - '####.'
    - '.#.##'
    - '.#...'
    - '.....'
    - '#####'
";

const DEFAULT_TITLE: &str = "Nonogram";

// how a play session ended
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SessionOutcome {
    Solved,
    Quit,
}

#[derive(Debug)]
pub struct Puzzle {
    pub title: String,
    pub clues: Clues,
    state: GridState,
}

impl Puzzle {
    /// Fails with a dimension error if `solution` is empty or ragged.
    pub fn new(title: &str, solution: Vec<Vec<bool>>) -> Result<Self, Error> {
        let state = GridState::initialize(solution)?;
        let clues = Clues::from_solution(state.solution());
        for (direction, lines) in &[(Horizontal, &clues.rows), (Vertical, &clues.cols)] {
            for (i, clue) in lines.iter().enumerate().filter(|(_, c)| c.is_empty()) {
                debug!("{} {} of '{}' has no filled squares", direction, i+1, title);
            }
        }
        Ok(Puzzle {
            title: title.to_string(),
            clues,
            state,
        })
    }

    pub fn builtin() -> Result<Puzzle, Error> {
        Self::from_yaml_str(BUILTIN)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Puzzle, Error> {
        let path = path.as_ref();
        info!("loading puzzle from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Puzzle, Error> {
        let docs: Vec<Yaml> = YamlLoader::load_from_str(s)
                                  .map_err(|e| Error::Parse(e.to_string()))?;
        match docs.first() {
            Some(doc) => Self::from_yaml(doc),
            None      => Err(Error::Parse("no YAML document found".to_string())),
        }
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, Error> {
        let title = doc["title"].as_str().unwrap_or(DEFAULT_TITLE);
        let list: &Vec<Yaml> = doc["solution"].as_vec().ok_or_else(
            || Error::Parse("expected a 'solution' key holding a list of rows".to_string()))?;
        let rows = list.iter()
                       .enumerate()
                       .map(|(i, yaml_val)| Self::_parse_row(i, yaml_val))
                       .collect::<Result<Vec<_>, _>>()?;
        let puzzle = Puzzle::new(title, rows)?;
        debug!("loaded '{}' ({}x{}, {} filled squares)",
               puzzle.title, puzzle.height(), puzzle.width(), puzzle.state.filled_count());
        Ok(puzzle)
    }

    fn _parse_row(index: usize, input: &Yaml) -> Result<Vec<bool>, Error> {
        match input {
            Yaml::String(s) => s.chars()
                                .filter(|c| !c.is_whitespace())
                                .map(|c| match c {
                                    '#' | '1' | '*'       => Ok(true),
                                    '.' | '0' | '-' | '_' => Ok(false),
                                    _ => Err(Error::Parse(format!("row {}: unexpected character {:?}", index, c))),
                                })
                                .collect(),
            // a bare 00110 would lose its leading zeros, so rows must be strings
            Yaml::Integer(_) => Err(Error::Parse(format!("row {}: quote the row so it is read as a string", index))),
            _ => Err(Error::Parse(format!("row {}: unexpected data type: {:?}", index, input))),
        }
    }

    pub fn width(&self) -> usize { self.state.width() }
    pub fn height(&self) -> usize { self.state.height() }
    pub fn state(&self) -> &GridState { &self.state }

    pub fn get_cell(&self, row: isize, col: isize) -> Result<Cell, Error> {
        self.state.get_cell(row, col)
    }
    pub fn toggle_mark(&mut self, row: isize, col: isize, mode: Mode) -> Result<CellChange, Error> {
        self.state.toggle_mark(row, col, mode)
    }
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
    pub fn reset(&mut self) {
        self.state.reset()
    }

    pub fn is_satisfied(&self, direction: Direction, index: usize) -> bool {
        let clue = self.clues.get(direction, index);
        match direction {
            Horizontal => clue.is_satisfied_by(self.state.player_row(index)),
            Vertical   => clue.is_satisfied_by(self.state.player_col(index)),
        }
    }
}

impl Puzzle {
    /// Draws the board for a terminal: column clues stacked above the grid, row clues to its
    /// left, subdivision lines every `subdivision` squares. Satisfied clues are greyed out when
    /// `emit_color` is set.
    pub fn render(&self, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        let subdivision = subdivision.filter(|&n| n > 0);
        let row_prefixes: Vec<ANSIString> =
            (0..self.height()).map(|y| self.clues.rows[y].to_colored_string(self.is_satisfied(Horizontal, y)))
                              .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|s| s.chars().count()) // counted WITHOUT ansi color escape sequences
                                     .max().unwrap_or(0);
        let max_col_runs = self.clues.max_col_len();

        let mut result = String::new();
        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        result.push_str(&self._fmt_rule(prefix_len, subdivision, ["\u{2554}", "\u{2557}", "\u{2564}", "\u{2550}"]));
        for y in 0..self.height() {
            let cells = self.state.player().row(y)
                                  .map(|c| format!(" {} ", c.glyph()))
                                  .collect::<Vec<_>>();
            result.push_str(&Self::_fmt_line(
                &ralign_colored(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &cells
            ));

            let group_ends = subdivision.map_or(false, |n| (y+1) % n == 0);
            if group_ends && y+1 < self.height() {
                result.push_str(&self._fmt_rule(prefix_len, subdivision, ["\u{255F}", "\u{2562}", "\u{253C}", "\u{2500}"]));
            }
        }
        result.push_str(&self._fmt_rule(prefix_len, subdivision, ["\u{255A}", "\u{255D}", "\u{2567}", "\u{2550}"]));

        result
    }

    // a horizontal frame line: [left corner, right corner, group junction, fill]
    fn _fmt_rule(&self, prefix_len: usize, subdivision: Option<usize>, glyphs: [&str; 4]) -> String {
        let [left, right, junction, fill] = glyphs;
        let segments = vec![fill.repeat(3); self.width()];
        Self::_fmt_line(&ralign("", prefix_len), left, right, junction, subdivision, &segments)
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
        result.push_str(right_delim);
        // trailing blanks of header lines aren't worth printing
        let trimmed_len = result.trim_end().len();
        result.truncate(trimmed_len);
        result.push('\n');
        result
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for (x, clue) in self.clues.cols.iter().enumerate() {
            let part: String;
            let runs = clue.runs();
            if line_idx < runs.len() {
                let colored = clue_style(self.is_satisfied(Vertical, x)).paint(runs[runs.len()-1-line_idx].to_string());
                part = format!(" {}", lalign_colored(&colored, 2, emit_color));
            } else {
                part = String::from("   ");
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
        let subdivision = Some(5);
        write!(f, "{}", self.render(subdivision, false))
    }
}
