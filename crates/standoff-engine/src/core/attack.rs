//! Attack sets of pieces on an otherwise empty board.
//!
//! Attack sets never include the attacking piece's own cell and are clipped to
//! the board. Sliding pieces are not blocked by other pieces: two pieces are
//! compared pairwise, so line of sight through a third piece does not matter.

use std::{borrow::Cow, iter, sync::OnceLock};

use arrayvec::ArrayVec;

use super::{
    cell::{BoardSize, Cell},
    cell_set::CellSet,
    piece::PieceKind,
    placement::Placement,
};

type Offset = (isize, isize);

const KING_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_OFFSETS: [Offset; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ORTHOGONAL: [Offset; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Computes the cells attacked by a `kind` piece standing on `cell`.
///
/// This is the uncached computation; during enumeration use [`AttackOracle`].
///
/// # Example
///
/// ```
/// use standoff_engine::{BoardSize, Cell, PieceKind, attacked_cells};
///
/// let board = BoardSize::new(3, 3).unwrap();
/// let attacked = attacked_cells(PieceKind::Bishop, Cell::new(0, 0), board);
/// assert_eq!(attacked.iter().collect::<Vec<_>>(), [Cell::new(1, 1), Cell::new(2, 2)]);
/// ```
#[must_use]
pub fn attacked_cells(kind: PieceKind, cell: Cell, board: BoardSize) -> CellSet {
    let mut attacked = CellSet::new(board);
    match kind {
        PieceKind::King => attacked.extend(leaps(cell, board, &KING_OFFSETS)),
        PieceKind::Knight => attacked.extend(leaps(cell, board, &KNIGHT_OFFSETS)),
        PieceKind::Rook => attacked.extend(rays(cell, board, &ORTHOGONAL)),
        PieceKind::Bishop => attacked.extend(rays(cell, board, &DIAGONAL)),
        PieceKind::Queen => {
            attacked.extend(rays(cell, board, &ORTHOGONAL));
            attacked.extend(rays(cell, board, &DIAGONAL));
        }
    }
    attacked
}

fn leaps(cell: Cell, board: BoardSize, offsets: &[Offset; 8]) -> ArrayVec<Cell, 8> {
    offsets
        .iter()
        .filter_map(|&(dx, dy)| board.offset(cell, dx, dy))
        .collect()
}

fn rays(cell: Cell, board: BoardSize, directions: &[Offset]) -> impl Iterator<Item = Cell> + '_ {
    directions.iter().flat_map(move |&(dx, dy)| {
        iter::successors(board.offset(cell, dx, dy), move |&c| board.offset(c, dx, dy))
    })
}

/// A piece kind fixed at a cell on a specific board.
///
/// This is what [`AttackOracle::attacks`] looks up; it is built on the fly and
/// not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub cell: Cell,
    pub board: BoardSize,
}

impl PlacedPiece {
    #[must_use]
    pub fn attacked_cells(&self) -> CellSet {
        attacked_cells(self.kind, self.cell, self.board)
    }
}

/// Memoized attack sets for one board size.
///
/// An oracle belongs to a single enumeration run. Its cache holds one lazily
/// computed slot per (piece kind, cell) pair of its board; since the board is
/// fixed at construction, the effective cache key is (kind, cell, board size).
/// Slots are filled at most once and never change afterwards, so an oracle can be
/// shared by reference between worker threads.
#[derive(Debug)]
pub struct AttackOracle {
    board: BoardSize,
    cache: Box<[OnceLock<CellSet>]>,
}

impl AttackOracle {
    #[must_use]
    pub fn new(board: BoardSize) -> Self {
        let cache = iter::repeat_with(OnceLock::new)
            .take(PieceKind::LEN * board.area())
            .collect();
        Self { board, cache }
    }

    #[must_use]
    pub fn board(&self) -> BoardSize {
        self.board
    }

    /// Cached attack set of a `kind` piece on `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the oracle's board.
    #[must_use]
    pub fn attacked_cells(&self, kind: PieceKind, cell: Cell) -> &CellSet {
        let slot = kind.index() * self.board.area() + self.board.index_of(cell);
        self.cache[slot].get_or_init(|| attacked_cells(kind, cell, self.board))
    }

    /// Attack set of `piece`, served from the cache when it stands on this
    /// oracle's board and computed afresh otherwise.
    #[must_use]
    pub fn attacks(&self, piece: PlacedPiece) -> Cow<'_, CellSet> {
        if piece.board == self.board {
            Cow::Borrowed(self.attacked_cells(piece.kind, piece.cell))
        } else {
            Cow::Owned(piece.attacked_cells())
        }
    }

    fn place(&self, kind: PieceKind, cell: Cell) -> PlacedPiece {
        PlacedPiece {
            kind,
            cell,
            board: self.board,
        }
    }

    /// Union of the attack sets of every piece in `placement`.
    #[must_use]
    pub fn attacked_by_placement(&self, placement: &Placement) -> CellSet {
        let mut attacked = CellSet::new(self.board);
        for (cell, kind) in placement.iter() {
            attacked.union_with(&self.attacks(self.place(kind, cell)));
        }
        attacked
    }

    /// Checks that no piece of `placement` attacks another one.
    ///
    /// Every pair is checked in both directions. A placement with a cell outside
    /// the oracle's board is not valid.
    #[must_use]
    pub fn is_valid(&self, placement: &Placement) -> bool {
        if !placement.cells().all(|cell| self.board.contains(cell)) {
            return false;
        }
        let occupied = placement.occupied(self.board);
        placement
            .iter()
            .all(|(cell, kind)| self.attacks(self.place(kind, cell)).is_disjoint(&occupied))
    }

    /// Number of attack sets computed so far.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.iter().filter(|slot| slot.get().is_some()).count()
    }
}
