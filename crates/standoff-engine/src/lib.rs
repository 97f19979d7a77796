//! Enumeration of mutually non-attacking chess piece placements.
//!
//! Given a rectangular board and a multiset of pieces (kings, queens, bishops,
//! knights and rooks), this crate finds every way to put all of the pieces on the
//! board so that no piece attacks another.
//!
//! - [`core`] - Board geometry, piece kinds, attack sets and the [`Placement`] value type
//! - [`engine`] - Problem validation and the two enumerators
//!
//! # Example
//!
//! ```
//! use standoff_engine::{BoardSize, Enumerator, PieceCounts, Problem};
//!
//! let board = BoardSize::new(3, 3).unwrap();
//! let counts = PieceCounts {
//!     kings: 2,
//!     rooks: 1,
//!     ..PieceCounts::default()
//! };
//! let problem = Problem::from_counts(board, &counts).unwrap();
//!
//! assert_eq!(Enumerator::new().count(&problem), 4);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Invalid input rejected before enumeration starts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("invalid board dimensions {width}x{height}: each side must be between 1 and 255")]
    InvalidDimensions { width: usize, height: usize },
    #[display("invalid piece kind: {symbol:?}")]
    InvalidPieceKind { symbol: String },
    #[display("too many pieces: {pieces} pieces do not fit on {cells} cells")]
    TooManyPieces { pieces: usize, cells: usize },
}
