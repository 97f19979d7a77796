use serde::{Deserialize, Serialize};

use crate::{BoardSize, InputError, PieceKind};

/// Number of pieces to place, per kind.
///
/// Missing fields deserialize as zero; unknown fields are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PieceCounts {
    pub kings: usize,
    pub queens: usize,
    pub bishops: usize,
    pub knights: usize,
    pub rooks: usize,
}

impl PieceCounts {
    #[must_use]
    pub fn get(&self, kind: PieceKind) -> usize {
        match kind {
            PieceKind::King => self.kings,
            PieceKind::Queen => self.queens,
            PieceKind::Bishop => self.bishops,
            PieceKind::Knight => self.knights,
            PieceKind::Rook => self.rooks,
        }
    }

    pub fn get_mut(&mut self, kind: PieceKind) -> &mut usize {
        match kind {
            PieceKind::King => &mut self.kings,
            PieceKind::Queen => &mut self.queens,
            PieceKind::Bishop => &mut self.bishops,
            PieceKind::Knight => &mut self.knights,
            PieceKind::Rook => &mut self.rooks,
        }
    }

    /// Total number of pieces, saturating at `usize::MAX`.
    #[must_use]
    pub fn total(&self) -> usize {
        PieceKind::ALL
            .into_iter()
            .map(|kind| self.get(kind))
            .fold(0, usize::saturating_add)
    }

    /// Expands the counts into a sequence: kings first, then queens, bishops,
    /// knights and rooks.
    #[must_use]
    pub fn to_sequence(&self) -> Vec<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .flat_map(|kind| std::iter::repeat_n(kind, self.get(kind)))
            .collect()
    }

    pub fn from_sequence<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let mut counts = Self::default();
        for kind in pieces {
            *counts.get_mut(kind) += 1;
        }
        counts
    }
}

/// A validated enumeration input: a board and the ordered pieces to place on it.
///
/// The piece order only decides in which order the enumerator places pieces;
/// the set of solutions depends on the counts alone.
///
/// # Example
///
/// ```
/// use standoff_engine::{BoardSize, InputError, PieceKind, Problem};
///
/// let board = BoardSize::new(2, 2).unwrap();
/// assert!(Problem::new(board, [PieceKind::Rook; 4]).is_ok());
/// assert_eq!(
///     Problem::new(board, [PieceKind::Rook; 5]),
///     Err(InputError::TooManyPieces { pieces: 5, cells: 4 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    board: BoardSize,
    pieces: Vec<PieceKind>,
}

impl Problem {
    /// Fails with [`InputError::TooManyPieces`] if the pieces cannot fit on the board.
    pub fn new<I>(board: BoardSize, pieces: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let pieces: Vec<_> = pieces.into_iter().collect();
        if pieces.len() > board.area() {
            return Err(InputError::TooManyPieces {
                pieces: pieces.len(),
                cells: board.area(),
            });
        }
        Ok(Self { board, pieces })
    }

    /// Checks the total against the board before expanding the counts.
    pub fn from_counts(board: BoardSize, counts: &PieceCounts) -> Result<Self, InputError> {
        let total = counts.total();
        if total > board.area() {
            return Err(InputError::TooManyPieces {
                pieces: total,
                cells: board.area(),
            });
        }
        Self::new(board, counts.to_sequence())
    }

    #[must_use]
    pub fn board(&self) -> BoardSize {
        self.board
    }

    #[must_use]
    pub fn pieces(&self) -> &[PieceKind] {
        &self.pieces
    }

    #[must_use]
    pub fn counts(&self) -> PieceCounts {
        PieceCounts::from_sequence(self.pieces.iter().copied())
    }
}
