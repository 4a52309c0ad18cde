// vim: set ai et ts=4 sw=4 sts=4:
use std::convert::TryFrom;
use log::debug;

use super::grid::{Cell, CellChange, Error, Grid, Mode};

/// Puzzle progress: the fixed solution and the player's grid of the same size.
/// The player grid is only ever changed through [`GridState::toggle_mark`] and [`GridState::reset`].
#[derive(Clone, Debug)]
pub struct GridState {
    solution: Grid<bool>,
    player: Grid<Cell>,
}

impl GridState {
    /// Takes ownership of a solution grid and starts a blank player grid of the same size.
    ///
    /// Fails with a dimension error if `rows` is empty, has zero-length rows, or is ragged.
    pub fn initialize(rows: Vec<Vec<bool>>) -> Result<Self, Error> {
        let solution = Grid::from_rows(rows)?;
        let player = solution.map(|_| Cell::Empty);
        Ok(GridState { solution, player })
    }

    pub fn width(&self) -> usize { self.solution.width() }
    pub fn height(&self) -> usize { self.solution.height() }
    pub fn solution(&self) -> &Grid<bool> { &self.solution }
    pub fn player(&self) -> &Grid<Cell> { &self.player }

    pub fn player_row(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.player.row(index)
    }
    pub fn player_col(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.player.col(index)
    }

    // signed coordinates so that a bad pointer mapping (e.g. col = -1) is caught here rather than wrapped
    fn locate(&self, row: isize, col: isize) -> Result<(usize, usize), Error> {
        let out_of_range = || Error::OutOfRange { row, col, height: self.height(), width: self.width() };
        let y = usize::try_from(row).map_err(|_| out_of_range())?;
        let x = usize::try_from(col).map_err(|_| out_of_range())?;
        if y >= self.height() || x >= self.width() {
            return Err(out_of_range());
        }
        Ok((y, x))
    }

    pub fn get_cell(&self, row: isize, col: isize) -> Result<Cell, Error> {
        let (y, x) = self.locate(row, col)?;
        Ok(self.player.get(y, x).cloned().unwrap_or_default())
    }

    /// Toggles one square: if it already holds the value `mode` sets, it goes back to
    /// `Empty`; otherwise it is overwritten with that value, whatever it held before.
    pub fn toggle_mark(&mut self, row: isize, col: isize, mode: Mode) -> Result<CellChange, Error> {
        let (y, x) = self.locate(row, col)?;
        let target = mode.target();
        let old = self.player.get(y, x).cloned().unwrap_or_default();
        let new = match old {
            o if o == target => Cell::Empty,
            _                => target,
        };
        if let Some(square) = self.player.get_mut(y, x) {
            *square = new;
        }

        let change = CellChange::new(y, x, old, new);
        debug!("{} ({})", change, mode);
        Ok(change)
    }

    /// True when every square the solution fills is marked and no other square is.
    /// Recomputed from scratch on each call.
    pub fn is_solved(&self) -> bool {
        self.solution.iter()
                     .zip(self.player.iter())
                     .all(|(&filled, cell)| cell.is_marked() == filled)
    }

    pub fn marked_count(&self) -> usize {
        self.player.iter().filter(|c| c.is_marked()).count()
    }
    pub fn filled_count(&self) -> usize {
        self.solution.iter().filter(|&&b| b).count()
    }

    pub fn reset(&mut self) {
        self.player.fill(Cell::Empty);
        debug!("player grid reset to Empty");
    }
}
