// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use ansi_term::{ANSIString, Colour, Style};

use super::grid::{Cell, Grid};
use super::util::{Direction, Direction::*};

/// Run-length encodes a line of filled/not-filled flags into the lengths of its
/// consecutive filled runs, in order. A line without filled squares yields no runs.
pub fn derive_clue<I>(line: I) -> Vec<usize>
    where I: IntoIterator<Item = bool>
{
    let mut runs = Vec::<usize>::new();
    let mut count: usize = 0;
    for filled in line {
        if filled {
            count += 1;
        } else if count > 0 {
            runs.push(count);
            count = 0;
        }
    }
    // a run touching the end of the line has no closing gap
    if count > 0 {
        runs.push(count);
    }
    runs
}

// satisfied clues are greyed out
pub fn clue_style(satisfied: bool) -> Style {
    match satisfied {
        true  => Style::new().fg(Colour::Fixed(241)),
        false => Style::default(),
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Clue {
    runs: Vec<usize>,
}

impl Clue {
    pub fn new(runs: Vec<usize>) -> Self {
        Clue { runs }
    }
    pub fn from_line<I>(line: I) -> Self
        where I: IntoIterator<Item = bool>
    {
        Clue::new(derive_clue(line))
    }

    pub fn runs(&self) -> &[usize] { &self.runs }
    pub fn len(&self) -> usize { self.runs.len() }
    pub fn is_empty(&self) -> bool { self.runs.is_empty() }

    /// Whether the player's marks in a line spell out exactly this clue.
    /// Only used for display; a satisfied clue says nothing about the solution itself.
    pub fn is_satisfied_by<'a, I>(&self, line: I) -> bool
        where I: IntoIterator<Item = &'a Cell>
    {
        derive_clue(line.into_iter().map(|c| c.is_marked())) == self.runs
    }

    pub fn to_colored_string(&self, satisfied: bool) -> ANSIString<'static> {
        clue_style(satisfied).paint(self.to_string())
    }
}
impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // an empty clue prints nothing, not a placeholder zero
        write!(f, "{}", self.runs.iter()
                                 .map(|len| len.to_string())
                                 .collect::<Vec<_>>()
                                 .join(" "))
    }
}

// -------------------------------------------------------------

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Clues {
    pub rows: Vec<Clue>,
    pub cols: Vec<Clue>,
}

impl Clues {
    /// Derives one clue per row and per column. Always computed from the solution,
    /// never from the player's grid.
    pub fn from_solution(solution: &Grid<bool>) -> Self {
        Clues {
            rows: (0..solution.height()).map(|y| Clue::from_line(solution.row(y).cloned()))
                                        .collect(),
            cols: (0..solution.width()).map(|x| Clue::from_line(solution.col(x).cloned()))
                                       .collect(),
        }
    }

    pub fn get(&self, direction: Direction, index: usize) -> &Clue {
        match direction {
            Horizontal => &self.rows[index],
            Vertical   => &self.cols[index],
        }
    }

    // number of runs in the longest row/column clue, for layout
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(|c| c.len()).max().unwrap_or(0)
    }
    pub fn max_col_len(&self) -> usize {
        self.cols.iter().map(|c| c.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // lay the runs out left to right with one gap between them, then pad
    fn reconstruct(runs: &[usize], padding: usize) -> Vec<bool> {
        let mut line = Vec::<bool>::new();
        for (i, &len) in runs.iter().enumerate() {
            if i > 0 {
                line.push(false);
            }
            line.extend(std::iter::repeat(true).take(len));
        }
        line.extend(std::iter::repeat(false).take(padding));
        line
    }

    #[test]
    fn derive_clue_known_lines() {
        assert_eq!(derive_clue(vec![false, false, false]), Vec::<usize>::new());
        assert_eq!(derive_clue(vec![true, true, false, true]), vec![2, 1]);
        assert_eq!(derive_clue(Vec::<bool>::new()), Vec::<usize>::new());
        assert_eq!(derive_clue(vec![true; 7]), vec![7]);
        assert_eq!(derive_clue(vec![false, true, false, false, true, true, false]), vec![1, 2]);
    }

    #[test]
    fn clue_display_has_no_placeholder() {
        assert_eq!(Clue::from_line(vec![false, false]).to_string(), "");
        assert_eq!(Clue::new(vec![3, 1, 12]).to_string(), "3 1 12");
        assert!(Clue::default().is_empty());
    }

    #[test]
    fn clues_for_scenario_grid() {
        let solution = Grid::from_rows(vec![vec![true, true, false],
                                            vec![false, true, false]]).unwrap();
        let clues = Clues::from_solution(&solution);
        assert_eq!(clues.rows, vec![Clue::new(vec![2]), Clue::new(vec![1])]);
        assert_eq!(clues.cols, vec![Clue::new(vec![1]), Clue::new(vec![2]), Clue::new(vec![])]);
        assert_eq!(clues.get(Horizontal, 0), &Clue::new(vec![2]));
        assert_eq!(clues.get(Vertical, 2), &Clue::default());
        assert_eq!(clues.max_row_len(), 1);
        assert_eq!(clues.max_col_len(), 1);
    }

    #[test]
    fn satisfied_only_counts_marked_squares() {
        let clue = Clue::new(vec![1, 1]);
        assert!(clue.is_satisfied_by(&[Cell::Marked, Cell::Excluded, Cell::Marked]));
        assert!(clue.is_satisfied_by(&[Cell::Marked, Cell::Empty, Cell::Marked]));
        assert!(!clue.is_satisfied_by(&[Cell::Marked, Cell::Marked, Cell::Empty]));
        assert!(Clue::default().is_satisfied_by(&[Cell::Excluded, Cell::Empty]));
    }

    proptest! {
        #[test]
        fn reconstructed_line_reproduces_clue(runs in proptest::collection::vec(1usize..6, 0..6),
                                              padding in 0usize..4) {
            let line = reconstruct(&runs, padding);
            prop_assert_eq!(derive_clue(line.iter().cloned()), runs);
        }

        #[test]
        fn derivation_is_consistent_for_any_line(line in proptest::collection::vec(any::<bool>(), 0..40)) {
            let runs = derive_clue(line.iter().cloned());
            prop_assert_eq!(runs.iter().sum::<usize>(), line.iter().filter(|&&b| b).count());
            prop_assert!(runs.iter().all(|&len| len > 0));

            let rebuilt = reconstruct(&runs, 0);
            prop_assert!(rebuilt.len() <= line.len());
            prop_assert_eq!(derive_clue(rebuilt), runs);
        }
    }
}
