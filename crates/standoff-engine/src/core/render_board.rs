use std::fmt;

use super::{
    cell::{BoardSize, Cell},
    piece::PieceKind,
    placement::Placement,
};

/// Content of a single cell for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum RenderCell {
    #[default]
    Empty,
    Piece(PieceKind),
}

/// Which glyphs to draw a board with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolStyle {
    /// Chess glyphs `♔♕♗♘♖`, empty cells as `□`.
    #[default]
    Unicode,
    /// Letters `KQBNR`, empty cells as `.`.
    Ascii,
}

impl SymbolStyle {
    #[must_use]
    pub const fn symbol(self, cell: RenderCell) -> char {
        match (self, cell) {
            (SymbolStyle::Unicode, RenderCell::Empty) => '□',
            (SymbolStyle::Ascii, RenderCell::Empty) => '.',
            (SymbolStyle::Unicode, RenderCell::Piece(kind)) => kind.symbol(),
            (SymbolStyle::Ascii, RenderCell::Piece(kind)) => kind.as_char(),
        }
    }
}

/// A placement laid out as a grid of cells, one row per line.
///
/// # Example
///
/// ```
/// use standoff_engine::{BoardSize, Placement, RenderBoard, SymbolStyle};
///
/// let board = BoardSize::new(3, 2).unwrap();
/// let placement: Placement = "K@0,0 R@2,1".parse().unwrap();
/// let render = RenderBoard::from_placement(&placement, board);
///
/// assert_eq!(render.display(SymbolStyle::Ascii).to_string(), "K..\n..R\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBoard {
    board: BoardSize,
    // row-major: index = y * width + x
    cells: Vec<RenderCell>,
}

impl RenderBoard {
    #[must_use]
    pub fn new(board: BoardSize) -> Self {
        Self {
            board,
            cells: vec![RenderCell::Empty; board.area()],
        }
    }

    /// # Panics
    ///
    /// Panics if a piece of `placement` lies outside `board`.
    #[must_use]
    pub fn from_placement(placement: &Placement, board: BoardSize) -> Self {
        let mut render = Self::new(board);
        for (cell, kind) in placement.iter() {
            render.fill_piece(cell, kind);
        }
        render
    }

    #[must_use]
    pub fn board(&self) -> BoardSize {
        self.board
    }

    pub fn fill_piece(&mut self, cell: Cell, kind: PieceKind) {
        assert!(
            self.board.contains(cell),
            "cell {cell} is outside {} board",
            self.board
        );
        self.cells[cell.y() * self.board.width() + cell.x()] = RenderCell::Piece(kind);
    }

    /// Rows from top to bottom, each `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.cells.chunks(self.board.width())
    }

    #[must_use]
    pub fn display(&self, style: SymbolStyle) -> RenderBoardDisplay<'_> {
        RenderBoardDisplay {
            render: self,
            style,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`RenderBoard::display`].
///
/// Writes `height` lines of `width` symbols, each terminated by a newline.
#[derive(Debug, Clone, Copy)]
pub struct RenderBoardDisplay<'a> {
    render: &'a RenderBoard,
    style: SymbolStyle,
}

impl fmt::Display for RenderBoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render.rows() {
            for cell in row {
                write!(f, "{}", self.style.symbol(*cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
