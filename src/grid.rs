// vim: set ai et ts=4 sts=4:
use std::error;
use std::fmt;
use std::io;

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(row={:-2}, col={:-2})", self.get_row(), self.get_col())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Cell {
    Empty,
    Marked,
    Excluded,
}
impl Cell {
    // only Marked counts as part of the picture; Empty and Excluded differ only visually
    pub fn is_marked(self) -> bool {
        self == Cell::Marked
    }
    pub fn glyph(self) -> &'static str {
        match self {
            Cell::Empty    => ".",
            Cell::Marked   => "\u{25CF}", // black circle
            Cell::Excluded => "x",
        }
    }
}
impl Default for Cell {
    fn default() -> Self { Cell::Empty }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            Cell::Empty    => "Empty",
            Cell::Marked   => "Marked",
            Cell::Excluded => "Excluded",
        })
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Mode {
    Mark,
    Exclude,
}
impl Mode {
    pub fn target(self) -> Cell {
        match self {
            Mode::Mark    => Cell::Marked,
            Mode::Exclude => Cell::Excluded,
        }
    }
}
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            Mode::Mark    => "Mark",
            Mode::Exclude => "Exclude",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub old: Cell,
    pub new: Cell,
}
impl CellChange {
    pub fn new(row: usize, col: usize, old: Cell, new: Cell) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for CellChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for CellChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: in square {}, status was changed from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DimensionError {
    Empty,                                                // no rows at all
    NoColumns,                                            // rows exist but are zero-length
    Ragged { row: usize, expected: usize, found: usize }, // a row differs in length from the first one
}
impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DimensionError::Empty     => write!(f, "grid has no rows"),
            DimensionError::NoColumns => write!(f, "grid has no columns"),
            DimensionError::Ragged { row, expected, found } =>
                write!(f, "row {} has {} squares, expected {}", row, found, expected),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Dimension(DimensionError),
    OutOfRange { row: isize, col: isize, height: usize, width: usize },
    Parse(String),
    Io(io::Error),
}
impl From<DimensionError> for Error {
    fn from(other: DimensionError) -> Self {
        Error::Dimension(other)
    }
}
impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Dimension(x) => write!(f, "DimensionError: {}", x),
            Error::OutOfRange { row, col, height, width } =>
                write!(f, "OutOfRangeError: square (row={}, col={}) lies outside the {}x{} grid",
                       row, col, height, width),
            Error::Parse(msg)   => write!(f, "ParseError: {}", msg),
            Error::Io(x)        => write!(f, "IoError: {}", x),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(x) => Some(x),
            _            => None,
        }
    }
}

// ------------------------------------------------

#[derive(Clone, PartialEq)]
pub struct Grid<T> {
    squares: Vec<Vec<T>>,
}
impl<T> Grid<T> {
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, Error> {
        let width = match rows.first() {
            Some(first) => first.len(),
            None        => return Err(Error::from(DimensionError::Empty)),
        };
        if width == 0 {
            return Err(Error::from(DimensionError::NoColumns));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::from(DimensionError::Ragged { row, expected: width, found: r.len() }));
        }
        Ok(Grid { squares: rows })
    }

    pub fn width(&self) -> usize { self.squares[0].len() }
    pub fn height(&self) -> usize { self.squares.len() }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.squares.get(row)?.get(col)
    }
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.squares.get_mut(row)?.get_mut(col)
    }

    pub fn row(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
        self.squares[index].iter()
    }
    pub fn col(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
        self.squares.iter().map(move |r| &r[index])
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.squares.iter().flat_map(|r| r.iter())
    }

    // same dimensions, new contents; can't fail since the source is already rectangular
    pub fn map<U, F>(&self, f: F) -> Grid<U>
        where F: Fn(&T) -> U
    {
        Grid {
            squares: self.squares.iter()
                                 .map(|r| r.iter().map(|x| f(x)).collect::<Vec<_>>())
                                 .collect(),
        }
    }
}
impl<T: Clone> Grid<T> {
    pub fn fill(&mut self, value: T) {
        for square in self.squares.iter_mut().flat_map(|r| r.iter_mut()) {
            *square = value.clone();
        }
    }
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_accepts_rectangular_input() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(1, 2), Some(&6));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let empty: Vec<Vec<bool>> = vec![];
        assert!(matches!(Grid::from_rows(empty),
                         Err(Error::Dimension(DimensionError::Empty))));
        assert!(matches!(Grid::<bool>::from_rows(vec![vec![], vec![]]),
                         Err(Error::Dimension(DimensionError::NoColumns))));
        assert!(matches!(Grid::from_rows(vec![vec![true, false], vec![true], vec![false, false]]),
                         Err(Error::Dimension(DimensionError::Ragged { row: 1, expected: 2, found: 1 }))));
    }

    #[test]
    fn rows_and_cols_iterate_unmirrored() {
        let grid = Grid::from_rows(vec![vec!['a', 'b'], vec!['c', 'd'], vec!['e', 'f']]).unwrap();
        assert_eq!(grid.row(0).collect::<String>(), "ab");
        assert_eq!(grid.row(2).collect::<String>(), "ef");
        assert_eq!(grid.col(0).collect::<String>(), "ace");
        assert_eq!(grid.col(1).collect::<String>(), "bdf");
        assert_eq!(grid.iter().collect::<String>(), "abcdef");
    }

    #[test]
    fn map_and_fill_keep_dimensions() {
        let grid = Grid::from_rows(vec![vec![true, false, true]]).unwrap();
        let mut cells = grid.map(|&b| if b { Cell::Marked } else { Cell::Excluded });
        assert_eq!(cells.row(0).cloned().collect::<Vec<_>>(),
                   vec![Cell::Marked, Cell::Excluded, Cell::Marked]);
        cells.fill(Cell::Empty);
        assert!(cells.iter().all(|&c| c == Cell::Empty));
        assert_eq!((cells.height(), cells.width()), (1, 3));
    }

    #[test]
    fn mode_targets_and_marked_predicate() {
        assert_eq!(Mode::Mark.target(), Cell::Marked);
        assert_eq!(Mode::Exclude.target(), Cell::Excluded);
        assert!(Cell::Marked.is_marked());
        assert!(!Cell::Excluded.is_marked());
        assert!(!Cell::Empty.is_marked());
        assert_eq!(Cell::default(), Cell::Empty);
    }

    #[test]
    fn change_and_error_messages() {
        let change = CellChange::new(0, 3, Cell::Empty, Cell::Marked);
        assert_eq!(change.to_string(),
                   "Change: in square (row= 0, col= 3), status was changed from Empty to Marked");

        let err = Error::OutOfRange { row: 2, col: -1, height: 2, width: 3 };
        assert_eq!(err.to_string(),
                   "OutOfRangeError: square (row=2, col=-1) lies outside the 2x3 grid");
        let err = Error::from(DimensionError::Ragged { row: 1, expected: 3, found: 2 });
        assert_eq!(err.to_string(), "DimensionError: row 1 has 2 squares, expected 3");
    }
}
