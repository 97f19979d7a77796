use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    cell::{BoardSize, Cell},
    cell_set::CellSet,
    piece::PieceKind,
};

/// An immutable assignment of piece kinds to distinct cells.
///
/// Entries are kept sorted by cell, so two placements with the same content are
/// equal, hash equally and order consistently regardless of how they were built.
/// Placements are never modified in place: [`Self::with_piece`] returns a new one.
///
/// # Text Format
///
/// A placement is written as space-separated `"<piece>@<x>,<y>"` entries using
/// ASCII piece letters, e.g. `"K@0,0 R@2,1"`. [`FromStr`] and [`Display`](fmt::Display)
/// use this format; serde uses it for each element of a sequence.
///
/// # Example
///
/// ```
/// use standoff_engine::{Cell, PieceKind, Placement};
///
/// let placement = Placement::singleton(Cell::new(2, 1), PieceKind::Rook);
/// let extended = placement.with_piece(Cell::new(0, 0), PieceKind::King).unwrap();
///
/// assert_eq!(placement.len(), 1);
/// assert_eq!(extended.to_string(), "K@0,0 R@2,1");
/// assert_eq!(extended, "R@2,1 K@0,0".parse().unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    pieces: Vec<(Cell, PieceKind)>,
}

impl Placement {
    #[must_use]
    pub const fn empty() -> Self {
        Self { pieces: Vec::new() }
    }

    #[must_use]
    pub fn singleton(cell: Cell, kind: PieceKind) -> Self {
        Self {
            pieces: vec![(cell, kind)],
        }
    }

    /// Builds a placement from `(cell, kind)` pairs in any order.
    ///
    /// Returns `None` if two pieces share a cell.
    pub fn from_pieces<I>(pieces: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Cell, PieceKind)>,
    {
        let mut pieces: Vec<_> = pieces.into_iter().collect();
        pieces.sort_unstable_by_key(|&(cell, _)| cell);
        if pieces.windows(2).any(|w| w[0].0 == w[1].0) {
            return None;
        }
        Some(Self { pieces })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<PieceKind> {
        self.pieces
            .binary_search_by_key(&cell, |&(c, _)| c)
            .ok()
            .map(|i| self.pieces[i].1)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Iterates over `(cell, kind)` pairs in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, PieceKind)> + '_ {
        self.pieces.iter().copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.pieces.iter().map(|&(cell, _)| cell)
    }

    /// Returns a new placement with an additional `kind` piece on `cell`.
    ///
    /// Returns `None` if `cell` is already occupied.
    #[must_use]
    pub fn with_piece(&self, cell: Cell, kind: PieceKind) -> Option<Self> {
        let pos = self
            .pieces
            .binary_search_by_key(&cell, |&(c, _)| c)
            .err()?;
        let mut pieces = Vec::with_capacity(self.pieces.len() + 1);
        pieces.extend_from_slice(&self.pieces[..pos]);
        pieces.push((cell, kind));
        pieces.extend_from_slice(&self.pieces[pos..]);
        Some(Self { pieces })
    }

    /// The set of occupied cells.
    ///
    /// # Panics
    ///
    /// Panics if a piece lies outside `board`.
    #[must_use]
    pub fn occupied(&self, board: BoardSize) -> CellSet {
        CellSet::from_cells(board, self.cells())
    }

    /// Number of pieces of each kind, indexed in [`PieceKind::ALL`] order.
    #[must_use]
    pub fn kind_counts(&self) -> [usize; PieceKind::LEN] {
        let mut counts = [0; PieceKind::LEN];
        for (_, kind) in &self.pieces {
            counts[kind.index()] += 1;
        }
        counts
    }
}

fn fmt_entry(f: &mut fmt::Formatter<'_>, cell: Cell, kind: PieceKind) -> fmt::Result {
    write!(f, "{}@{cell}", kind.as_char())
}

fn parse_entry(s: &str) -> Result<(Cell, PieceKind), String> {
    let (kind_str, cell_str) = s
        .split_once('@')
        .ok_or_else(|| format!("expected format 'piece@x,y', got '{s}'"))?;
    let kind = kind_str
        .parse::<PieceKind>()
        .map_err(|e| format!("{e} in '{s}'"))?;
    let (x_str, y_str) = cell_str
        .split_once(',')
        .ok_or_else(|| format!("missing ',' in format 'piece@x,y', got '{s}'"))?;
    let x = x_str
        .parse::<u8>()
        .map_err(|e| format!("invalid x coordinate: {x_str} ({e})"))?;
    let y = y_str
        .parse::<u8>()
        .map_err(|e| format!("invalid y coordinate: {y_str} ({e})"))?;
    Ok((Cell::new(x, y), kind))
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(cell, kind)) in self.pieces.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt_entry(f, cell, kind)?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`Placement`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid placement: {message}")]
pub struct ParsePlacementError {
    message: String,
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces = s
            .split_whitespace()
            .map(parse_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| ParsePlacementError { message })?;
        Placement::from_pieces(pieces).ok_or_else(|| ParsePlacementError {
            message: format!("two pieces share a cell in '{s}'"),
        })
    }
}

impl Serialize for Placement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["K@0,0", "R@2,1"]
        serializer.collect_seq(
            self.pieces
                .iter()
                .map(|&(cell, kind)| format!("{}@{cell}", kind.as_char())),
        )
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<String>::deserialize(deserializer)?;
        let pieces = entries
            .iter()
            .map(|s| parse_entry(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde::de::Error::custom)?;
        Placement::from_pieces(pieces)
            .ok_or_else(|| serde::de::Error::custom("two pieces share a cell"))
    }
}
