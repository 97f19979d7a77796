//! Placement enumeration.
//!
//! - [`Problem`] - A validated board size and piece sequence
//! - [`PieceCounts`] - Number of pieces requested per kind
//! - [`Enumerator`] - Incremental frontier expansion with attack-set pruning
//! - [`enumerate_all_permutations`] - Brute-force reference enumerator for small boards
//!
//! # How Enumeration Works
//!
//! The [`Enumerator`] never materializes the permutation space. It starts from
//! every single-piece placement of the first piece and then, for each following
//! piece, extends every surviving partial placement (the *frontier*) by one piece:
//!
//! 1. Compute the union of cells attacked by the pieces already placed
//! 2. Try every cell that is neither occupied nor attacked
//! 3. Discard the candidate if its own attack set hits an occupied cell
//! 4. Insert the extended placement into the next frontier (a set, so
//!    placements reached in different orders collapse into one)
//!
//! Invalid branches are cut as soon as they appear, so the frontier stays far
//! smaller than the number of permutations. An empty frontier ends the run early.
//!
//! The naive enumerator generates every permutation and filters afterwards. It
//! exists to cross-check the incremental one on tiny boards.

pub use self::{enumerator::*, naive::*, problem::*};

mod enumerator;
mod naive;
mod problem;
