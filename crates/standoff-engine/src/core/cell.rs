use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// A single square on the board.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left corner
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Cells order by `x` first, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    x: u8,
    y: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(self) -> usize {
        usize::from(self.x)
    }

    #[must_use]
    pub fn y(self) -> usize {
        usize::from(self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Dimensions of a rectangular board.
///
/// Both sides are at least 1 and at most [`BoardSize::MAX_SIDE`]. A board size
/// is fixed for the duration of one enumeration.
///
/// # Example
///
/// ```
/// use standoff_engine::{BoardSize, Cell};
///
/// let board = BoardSize::new(3, 2).unwrap();
/// assert_eq!(board.area(), 6);
/// assert!(board.contains(Cell::new(2, 1)));
/// assert!(!board.contains(Cell::new(1, 2)));
///
/// assert!(BoardSize::new(0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    width: u8,
    height: u8,
}

impl BoardSize {
    pub const MAX_SIDE: usize = u8::MAX as usize;

    pub fn new(width: usize, height: usize) -> Result<Self, InputError> {
        let side = |n: usize| u8::try_from(n).ok().filter(|&n| n > 0);
        match (side(width), side(height)) {
            (Some(w), Some(h)) => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(InputError::InvalidDimensions { width, height }),
        }
    }

    #[must_use]
    pub fn width(self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(self) -> usize {
        usize::from(self.height)
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn area(self) -> usize {
        self.width() * self.height()
    }

    /// Checks whether `cell` lies on this board.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Returns every cell of the board exactly once.
    ///
    /// The order is deterministic: the outer loop runs over `x`, the inner loop
    /// over `y`, i.e. `(0,0), (0,1), …, (0,h-1), (1,0), …`. This is the same order
    /// as [`Self::index_of`].
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Cell::new(x, y)))
    }

    /// Position of `cell` in the [`Self::cells`] order.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the board.
    #[must_use]
    pub fn index_of(self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {cell} is outside {self} board");
        cell.x() * self.height() + cell.y()
    }

    /// Inverse of [`Self::index_of`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn cell_at(self, index: usize) -> Cell {
        assert!(index < self.area(), "cell index {index} is outside {self} board");
        let height = self.height();
        Cell::new((index / height) as u8, (index % height) as u8)
    }

    /// Moves `cell` by `(dx, dy)`, returning `None` if the result is off the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn offset(self, cell: Cell, dx: isize, dy: isize) -> Option<Cell> {
        let x = cell.x().checked_add_signed(dx)?;
        let y = cell.y().checked_add_signed(dy)?;
        (x < self.width() && y < self.height()).then(|| Cell::new(x as u8, y as u8))
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
