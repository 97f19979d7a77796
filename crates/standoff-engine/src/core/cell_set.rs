use super::cell::{BoardSize, Cell};

/// A set of cells on one board, stored as a bitset.
///
/// Bit `i` corresponds to the `i`-th cell in [`BoardSize::cells`] order, so
/// iteration yields cells in that same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellSet {
    board: BoardSize,
    words: Vec<u64>,
}

impl CellSet {
    /// Creates an empty set for `board`.
    #[must_use]
    pub fn new(board: BoardSize) -> Self {
        Self {
            board,
            words: vec![0; board.area().div_ceil(64)],
        }
    }

    pub fn from_cells<I>(board: BoardSize, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut set = Self::new(board);
        set.extend(cells);
        set
    }

    #[must_use]
    pub fn board(&self) -> BoardSize {
        self.board
    }

    /// Adds `cell`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the board.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let i = self.board.index_of(cell);
        let bit = 1u64 << (i & 63);
        let word = &mut self.words[i >> 6];
        let added = *word & bit == 0;
        *word |= bit;
        added
    }

    /// Checks membership. Cells off the board are never members.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        if !self.board.contains(cell) {
            return false;
        }
        let i = self.board.index_of(cell);
        (self.words[i >> 6] >> (i & 63)) & 1 == 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Adds every cell of `other` to this set.
    pub fn union_with(&mut self, other: &CellSet) {
        debug_assert_eq!(self.board, other.board);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    /// Returns `true` if the two sets have no cell in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &CellSet) -> bool {
        debug_assert_eq!(self.board, other.board);
        self.words.iter().zip(&other.words).all(|(a, b)| a & b == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.words.iter().enumerate().flat_map(move |(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(self.board.cell_at(w * 64 + bit))
            })
        })
    }
}

impl Extend<Cell> for CellSet {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize) -> BoardSize {
        BoardSize::new(width, height).unwrap()
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = CellSet::new(board(3, 3));
        assert!(set.is_empty());
        assert!(set.insert(Cell::new(1, 2)));
        assert!(!set.insert(Cell::new(1, 2)));
        assert!(set.contains(Cell::new(1, 2)));
        assert!(!set.contains(Cell::new(2, 1)));
        assert!(!set.contains(Cell::new(5, 5)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_follows_board_order() {
        // 10x10 spans two words
        let board = board(10, 10);
        let cells = [Cell::new(9, 9), Cell::new(0, 3), Cell::new(6, 5), Cell::new(6, 4)];
        let set = CellSet::from_cells(board, cells);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(
            collected,
            [Cell::new(0, 3), Cell::new(6, 4), Cell::new(6, 5), Cell::new(9, 9)]
        );
    }

    #[test]
    fn test_union_and_disjoint() {
        let board = board(4, 4);
        let mut a = CellSet::from_cells(board, [Cell::new(0, 0), Cell::new(1, 1)]);
        let b = CellSet::from_cells(board, [Cell::new(2, 2)]);
        let c = CellSet::from_cells(board, [Cell::new(1, 1), Cell::new(3, 3)]);

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));

        a.union_with(&b);
        assert_eq!(a.len(), 3);
        assert!(a.contains(Cell::new(2, 2)));
    }
}
