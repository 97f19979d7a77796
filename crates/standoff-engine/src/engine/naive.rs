use std::{collections::HashSet, vec};

use itertools::{Itertools as _, structs::Permutations};

use crate::{AttackOracle, BoardSize, Cell, PieceKind, Placement, Problem};

/// Yields every placement of the problem's pieces, valid or not.
///
/// Each `k`-permutation of the board's cells (`k` = number of pieces) is zipped
/// with the piece sequence. Permutations that only swap identical pieces produce
/// the same placement; those duplicates are skipped, so each placement is yielded
/// once.
///
/// The number of permutations grows factorially; keep this to boards of around
/// 16 cells.
///
/// # Example
///
/// ```
/// use standoff_engine::{BoardSize, PieceKind, Problem, enumerate_all_permutations};
///
/// let board = BoardSize::new(2, 2).unwrap();
/// let problem = Problem::new(board, [PieceKind::King, PieceKind::King]).unwrap();
///
/// // C(4, 2) distinct boards
/// assert_eq!(enumerate_all_permutations(&problem).count(), 6);
/// ```
#[must_use]
pub fn enumerate_all_permutations(problem: &Problem) -> AllPlacements<'_> {
    let cells: Vec<_> = problem.board().cells().collect();
    let permutations = cells.into_iter().permutations(problem.pieces().len());
    AllPlacements {
        pieces: problem.pieces(),
        permutations,
        seen: HashSet::new(),
    }
}

/// Checks that no piece of `placement` attacks another on `board`.
#[must_use]
pub fn is_valid(placement: &Placement, board: BoardSize) -> bool {
    AttackOracle::new(board).is_valid(placement)
}

/// Enumerates by generating every placement and filtering out invalid ones.
///
/// Produces the same set as [`Enumerator::enumerate`](crate::Enumerator::enumerate),
/// only much slower.
#[must_use]
pub fn enumerate_valid_naive(problem: &Problem) -> HashSet<Placement> {
    let oracle = AttackOracle::new(problem.board());
    enumerate_all_permutations(problem)
        .filter(|placement| oracle.is_valid(placement))
        .collect()
}

/// Iterator returned by [`enumerate_all_permutations`].
#[derive(Debug)]
pub struct AllPlacements<'a> {
    pieces: &'a [PieceKind],
    permutations: Permutations<vec::IntoIter<Cell>>,
    seen: HashSet<Placement>,
}

impl Iterator for AllPlacements<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cells = self.permutations.next()?;
            let pieces = cells.into_iter().zip(self.pieces.iter().copied());
            let Some(placement) = Placement::from_pieces(pieces) else {
                continue;
            };
            if self.seen.insert(placement.clone()) {
                return Some(placement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_placements_are_distinct_and_complete() {
        let board = BoardSize::new(3, 2).unwrap();
        let problem = Problem::new(
            board,
            [PieceKind::King, PieceKind::Rook, PieceKind::King],
        )
        .unwrap();
        let all: Vec<_> = enumerate_all_permutations(&problem).collect();
        let distinct: HashSet<_> = all.iter().cloned().collect();
        // 6 * 5 * 4 / 2! arrangements
        assert_eq!(all.len(), 60);
        assert_eq!(distinct.len(), all.len());
        assert!(all.iter().all(|p| p.kind_counts() == [2, 0, 0, 0, 1]));
    }

    #[test]
    fn test_full_board_yields_one_placement() {
        let board = BoardSize::new(2, 2).unwrap();
        let problem = Problem::new(board, [PieceKind::Rook; 4]).unwrap();
        let all: Vec<_> = enumerate_all_permutations(&problem).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].to_string(), "R@0,0 R@0,1 R@1,0 R@1,1");
    }

    #[test]
    fn test_naive_two_kings_one_rook_3x3() {
        let board = BoardSize::new(3, 3).unwrap();
        let problem = Problem::new(
            board,
            [PieceKind::King, PieceKind::King, PieceKind::Rook],
        )
        .unwrap();
        let expected: HashSet<Placement> = [
            "R@0,1 K@2,0 K@2,2",
            "R@1,0 K@0,2 K@2,2",
            "R@1,2 K@0,0 K@2,0",
            "R@2,1 K@0,0 K@0,2",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
        assert_eq!(enumerate_valid_naive(&problem), expected);
    }

    #[test]
    fn test_is_valid() {
        let board = BoardSize::new(3, 3).unwrap();
        assert!(is_valid(&"K@0,0 K@0,2".parse().unwrap(), board));
        assert!(!is_valid(&"K@0,0 K@1,1".parse().unwrap(), board));
        assert!(!is_valid(&"B@0,0 N@2,2".parse().unwrap(), board));
    }

    #[test]
    fn test_empty_sequence_yields_empty_placement() {
        let board = BoardSize::new(2, 2).unwrap();
        let problem = Problem::new(board, []).unwrap();
        let all: Vec<_> = enumerate_all_permutations(&problem).collect();
        assert_eq!(all, [Placement::empty()]);
    }
}
