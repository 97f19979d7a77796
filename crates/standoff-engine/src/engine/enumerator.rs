use std::{collections::HashSet, num::NonZeroUsize, panic, thread};

use tracing::{debug, info, trace};

use crate::{AttackOracle, BoardSize, InputError, PieceKind, PlacedPiece, Placement, Problem};

/// Frontiers smaller than this are extended on the calling thread even when
/// more threads are configured.
const MIN_PARALLEL_FRONTIER: usize = 256;

/// Frontier sizes observed during one enumeration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    steps: Vec<(PieceKind, usize)>,
}

impl EnumerationStats {
    fn record(&mut self, kind: PieceKind, frontier: usize) {
        self.steps.push((kind, frontier));
    }

    /// `(piece placed, frontier size afterwards)` for each completed step.
    ///
    /// Shorter than the piece sequence if the run stopped early on an empty frontier.
    #[must_use]
    pub fn steps(&self) -> &[(PieceKind, usize)] {
        &self.steps
    }

    /// Largest frontier held at any point of the run.
    #[must_use]
    pub fn peak_frontier(&self) -> usize {
        self.steps.iter().map(|&(_, n)| n).max().unwrap_or(0)
    }
}

/// Enumerates mutually non-attacking placements by incremental frontier expansion.
///
/// See the [module documentation](crate::engine) for the algorithm.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use standoff_engine::{BoardSize, Enumerator, PieceKind, Problem};
///
/// let board = BoardSize::new(6, 6).unwrap();
/// let problem = Problem::new(board, [PieceKind::Queen; 6]).unwrap();
///
/// let enumerator = Enumerator::with_threads(NonZeroUsize::new(4).unwrap());
/// assert_eq!(enumerator.count(&problem), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Enumerator {
    threads: NonZeroUsize,
}

impl Default for Enumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Enumerator {
    /// Creates a single-threaded enumerator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            threads: NonZeroUsize::MIN,
        }
    }

    /// Like [`Self::new`], but shards each frontier extension across `threads`
    /// scoped worker threads.
    #[must_use]
    pub const fn with_threads(threads: NonZeroUsize) -> Self {
        Self { threads }
    }

    #[must_use]
    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Returns every valid placement of all pieces of `problem`.
    #[must_use]
    pub fn enumerate(&self, problem: &Problem) -> HashSet<Placement> {
        self.enumerate_with_stats(problem).0
    }

    /// Returns the number of valid placements.
    #[must_use]
    pub fn count(&self, problem: &Problem) -> usize {
        self.enumerate(problem).len()
    }

    /// Like [`Self::enumerate`], also reporting frontier sizes per step.
    #[must_use]
    pub fn enumerate_with_stats(&self, problem: &Problem) -> (HashSet<Placement>, EnumerationStats) {
        let board = problem.board();
        let oracle = AttackOracle::new(board);
        let mut stats = EnumerationStats::default();

        let Some((&first, rest)) = problem.pieces().split_first() else {
            return (HashSet::from([Placement::empty()]), stats);
        };

        let mut frontier: HashSet<_> = board
            .cells()
            .map(|cell| Placement::singleton(cell, first))
            .collect();
        stats.record(first, frontier.len());
        debug!(step = 0, piece = %first, frontier = frontier.len(), "seeded frontier");

        for (i, &kind) in rest.iter().enumerate() {
            if frontier.is_empty() {
                debug!(
                    remaining = rest.len() - i,
                    "frontier empty, skipping remaining pieces"
                );
                break;
            }
            frontier = self.extend_frontier(&oracle, &frontier, kind);
            stats.record(kind, frontier.len());
            debug!(step = i + 1, piece = %kind, frontier = frontier.len(), "extended frontier");
        }

        info!(
            board = %board,
            pieces = problem.pieces().len(),
            placements = frontier.len(),
            peak_frontier = stats.peak_frontier(),
            attack_sets = oracle.cached_len(),
            "enumeration finished"
        );
        (frontier, stats)
    }

    fn extend_frontier(
        &self,
        oracle: &AttackOracle,
        frontier: &HashSet<Placement>,
        kind: PieceKind,
    ) -> HashSet<Placement> {
        let threads = self.threads.get();
        if threads == 1 || frontier.len() < MIN_PARALLEL_FRONTIER {
            let mut next = HashSet::new();
            for placement in frontier {
                extend_placement(oracle, placement, kind, &mut next);
            }
            return next;
        }

        let placements: Vec<&Placement> = frontier.iter().collect();
        let chunk_size = placements.len().div_ceil(threads);
        let mut shards: Vec<HashSet<Placement>> = thread::scope(|s| {
            let handles: Vec<_> = placements
                .chunks(chunk_size)
                .enumerate()
                .map(|(shard, chunk)| {
                    s.spawn(move || {
                        let mut next = HashSet::new();
                        for placement in chunk {
                            extend_placement(oracle, placement, kind, &mut next);
                        }
                        trace!(shard, inputs = chunk.len(), outputs = next.len(), "shard done");
                        next
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect()
        });

        // Shards may reach the same placement from different parents; merging
        // into one set deduplicates them.
        shards.sort_by_key(|shard| std::cmp::Reverse(shard.len()));
        let mut shards = shards.into_iter();
        let mut next = shards.next().unwrap_or_default();
        for shard in shards {
            next.extend(shard);
        }
        next
    }
}

fn extend_placement(
    oracle: &AttackOracle,
    placement: &Placement,
    kind: PieceKind,
    next: &mut HashSet<Placement>,
) {
    let board = oracle.board();
    let occupied = placement.occupied(board);
    let attacked = oracle.attacked_by_placement(placement);
    for cell in board.cells() {
        if occupied.contains(cell) || attacked.contains(cell) {
            continue;
        }
        // The new piece must not attack anything already placed either.
        let piece = PlacedPiece { kind, cell, board };
        if !oracle.attacks(piece).is_disjoint(&occupied) {
            continue;
        }
        if let Some(extended) = placement.with_piece(cell, kind) {
            next.insert(extended);
        }
    }
}

/// Validates the input and returns every mutually non-attacking placement of
/// `pieces` on `board`, using a single thread.
pub fn enumerate_valid(
    board: BoardSize,
    pieces: &[PieceKind],
) -> Result<HashSet<Placement>, InputError> {
    let problem = Problem::new(board, pieces.iter().copied())?;
    Ok(Enumerator::new().enumerate(&problem))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{PieceCounts, enumerate_valid_naive};

    fn board(width: usize, height: usize) -> BoardSize {
        BoardSize::new(width, height).unwrap()
    }

    fn problem(width: usize, height: usize, pieces: &str) -> Problem {
        Problem::new(board(width, height), crate::parse_pieces(pieces).unwrap()).unwrap()
    }

    fn placements(list: &[&str]) -> HashSet<Placement> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_two_kings_one_rook_3x3() {
        let result = enumerate_valid(board(3, 3), &crate::parse_pieces("KKR").unwrap()).unwrap();
        let expected = placements(&[
            "R@0,1 K@2,0 K@2,2",
            "R@1,0 K@0,2 K@2,2",
            "R@1,2 K@0,0 K@2,0",
            "R@2,1 K@0,0 K@0,2",
        ]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_known_counts() {
        let cases = [
            (3, 3, "K", 9),
            (2, 3, "KK", 4),
            (3, 2, "KK", 4),
            (4, 4, "RRRR", 24),
            (4, 3, "BBBB", 61),
            (4, 4, "RRNNNN", 8),
            (5, 5, "QQQQQ", 10),
            (6, 6, "QQQQQQ", 4),
            (2, 2, "KKKK", 0),
        ];
        for (width, height, pieces, expected) in cases {
            let problem = problem(width, height, pieces);
            assert_eq!(
                Enumerator::new().count(&problem),
                expected,
                "{pieces} on {width}x{height}"
            );
        }
    }

    #[test]
    fn test_eight_queens() {
        let problem = problem(8, 8, "QQQQQQQQ");
        assert_eq!(Enumerator::new().count(&problem), 92);
    }

    #[test]
    fn test_empty_piece_sequence() {
        let result = Enumerator::new().enumerate(&problem(3, 3, ""));
        assert_eq!(result, HashSet::from([Placement::empty()]));
    }

    #[test]
    fn test_single_cell_board() {
        let result = Enumerator::new().enumerate(&problem(1, 1, "Q"));
        assert_eq!(result, placements(&["Q@0,0"]));
    }

    #[test]
    fn test_too_many_pieces_is_an_error() {
        let pieces = [PieceKind::Knight; 5];
        assert_eq!(
            enumerate_valid(board(2, 2), &pieces),
            Err(InputError::TooManyPieces {
                pieces: 5,
                cells: 4
            })
        );
    }

    #[test]
    fn test_unsatisfiable_stops_early() {
        // no second queen fits on a 2x2 board
        let problem = problem(2, 2, "QQQ");
        let (result, stats) = Enumerator::new().enumerate_with_stats(&problem);
        assert!(result.is_empty());
        assert_eq!(
            stats.steps(),
            [(PieceKind::Queen, 4), (PieceKind::Queen, 0)]
        );
    }

    #[test]
    fn test_every_placement_is_valid_and_complete() {
        let problem = problem(5, 4, "KQBNR");
        let oracle = AttackOracle::new(problem.board());
        let result = Enumerator::new().enumerate(&problem);
        assert!(!result.is_empty());
        for placement in &result {
            assert_eq!(placement.len(), 5, "{placement}");
            assert_eq!(placement.kind_counts(), [1; 5], "{placement}");
            assert!(oracle.is_valid(placement), "{placement} is not valid");
        }
    }

    #[test]
    fn test_deterministic() {
        let problem = problem(5, 5, "KKBN");
        let first = Enumerator::new().enumerate(&problem);
        let second = Enumerator::new().enumerate(&problem);
        assert_eq!(first, second);
    }

    #[test]
    fn test_piece_order_does_not_matter() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        let counts = PieceCounts {
            kings: 2,
            bishops: 1,
            knights: 2,
            ..PieceCounts::default()
        };
        let board = board(4, 5);
        let expected = Enumerator::new().enumerate(&Problem::from_counts(board, &counts).unwrap());
        for _ in 0..5 {
            let mut pieces = counts.to_sequence();
            pieces.shuffle(&mut rng);
            let problem = Problem::new(board, pieces.iter().copied()).unwrap();
            assert_eq!(
                Enumerator::new().enumerate(&problem),
                expected,
                "order {pieces:?}"
            );
        }
    }

    #[test]
    fn test_threads_match_single_thread() {
        // large enough frontier to actually shard
        let problem = problem(6, 6, "KKQB");
        let single = Enumerator::new().enumerate(&problem);
        for threads in [2, 3, 8] {
            let enumerator = Enumerator::with_threads(NonZeroUsize::new(threads).unwrap());
            assert_eq!(enumerator.enumerate(&problem), single, "{threads} threads");
        }
    }

    #[test]
    fn test_matches_naive_on_small_boards() {
        for width in 1..=4 {
            for height in 1..=4 {
                let board = board(width, height);
                for len in 0..=3 {
                    for pieces in multisets(len) {
                        check_against_naive(board, &pieces);
                    }
                }
            }
        }
    }

    #[test]
    fn test_matches_naive_with_four_pieces() {
        for width in 1..=4 {
            for height in 1..=4 {
                let board = board(width, height);
                for pieces in multisets(4) {
                    check_against_naive(board, &pieces);
                }
            }
        }
    }

    fn check_against_naive(board: BoardSize, pieces: &[PieceKind]) {
        let Ok(problem) = Problem::new(board, pieces.iter().copied()) else {
            assert!(pieces.len() > board.area());
            return;
        };
        assert_eq!(
            Enumerator::new().enumerate(&problem),
            enumerate_valid_naive(&problem),
            "{pieces:?} on {board}"
        );
    }

    /// All multisets of `len` piece kinds, each as a non-decreasing sequence.
    fn multisets(len: usize) -> Vec<Vec<PieceKind>> {
        let mut result = vec![vec![]];
        for _ in 0..len {
            result = result
                .into_iter()
                .flat_map(|prefix: Vec<PieceKind>| {
                    let start = prefix.last().copied().unwrap_or(PieceKind::King);
                    PieceKind::ALL
                        .into_iter()
                        .filter(move |&kind| kind >= start)
                        .map(move |kind| {
                            let mut next = prefix.clone();
                            next.push(kind);
                            next
                        })
                })
                .collect();
        }
        result
    }

    #[test]
    fn test_multisets() {
        assert_eq!(multisets(0).len(), 1);
        assert_eq!(multisets(1).len(), 5);
        assert_eq!(multisets(2).len(), 15);
        assert_eq!(multisets(4).len(), 70);
    }
}
