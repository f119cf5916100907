use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

mod parsing;

pub use parsing::BoardCreationError as BoardError;

/// 4 bits per cell, so a `u64` comfortably packs up to 16 cells (the
/// largest board this crate supports, the 15-puzzle's 4x4 grid).
const BITS_PER_CELL: u32 = 4;
const CELL_MASK: u64 = 0xF;

/// The direction the blank tile travels.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardMove {
    Up,
    Down,
    Left,
    Right,
}

impl BoardMove {
    /// Fixed enumeration order used everywhere a deterministic move order
    /// matters: neighbor enumeration, the A* expansion loop, IDA*'s DFS.
    pub const ORDER: [BoardMove; 4] = [
        BoardMove::Up,
        BoardMove::Down,
        BoardMove::Left,
        BoardMove::Right,
    ];

    #[must_use]
    pub fn inverse(self) -> BoardMove {
        match self {
            BoardMove::Up => BoardMove::Down,
            BoardMove::Down => BoardMove::Up,
            BoardMove::Left => BoardMove::Right,
            BoardMove::Right => BoardMove::Left,
        }
    }
}

impl Display for BoardMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BoardMove::Up => write!(f, "Up"),
            BoardMove::Down => write!(f, "Down"),
            BoardMove::Left => write!(f, "Left"),
            BoardMove::Right => write!(f, "Right"),
        }
    }
}

/// A caller asked to apply a move that [`Board::can_move`] would have
/// rejected. A programmer error, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveError(pub BoardMove);

impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move: blank cannot move {}", self.0)
    }
}

impl std::error::Error for MoveError {}

/// A bit-packed N^2-puzzle board, N in {3,4}.
///
/// Each cell occupies a fixed 4-bit field of `packed`, row-major, so the
/// whole board is a single machine word: copies, equality and hashing are
/// single-word operations. The blank's linear index is cached separately
/// (invariant: `get(blank) == 0`) so move application never has to search
/// for it.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    packed: u64,
    blank: u8,
    width: u8,
}

impl Board {
    /// The canonical goal: tiles `1..N^2-1` in reading order, blank last.
    #[must_use]
    pub fn goal(width: u8) -> Self {
        let num_cells = width as usize * width as usize;
        let mut packed = 0u64;
        for i in 0..num_cells - 1 {
            packed |= ((i as u64) + 1) << (i as u32 * BITS_PER_CELL);
        }
        Board {
            packed,
            blank: (num_cells - 1) as u8,
            width,
        }
    }

    /// Builds a board from an explicit row-major permutation of
    /// `{0, ..., width*width - 1}`. Fails if `tiles` is not such a
    /// permutation (construction input is a programmer/loader error, not a
    /// search-time condition).
    pub fn from_tiles(width: u8, tiles: &[u8]) -> Result<Self, BoardError> {
        parsing::board_from_tiles(width, tiles)
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.width as usize * self.width as usize
    }

    #[must_use]
    pub fn packed(&self) -> u64 {
        self.packed
    }

    #[must_use]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    #[must_use]
    pub fn get(&self, i: usize) -> u8 {
        ((self.packed >> (i as u32 * BITS_PER_CELL)) & CELL_MASK) as u8
    }

    fn set(&mut self, i: usize, v: u8) {
        let shift = i as u32 * BITS_PER_CELL;
        let mask = CELL_MASK << shift;
        self.packed = (self.packed & !mask) | ((u64::from(v) & CELL_MASK) << shift);
    }

    fn row_col(&self, i: usize) -> (u8, u8) {
        ((i / self.width as usize) as u8, (i % self.width as usize) as u8)
    }

    /// Pure function of the blank's row/column and the move direction.
    #[must_use]
    pub fn can_move(&self, board_move: BoardMove) -> bool {
        let (row, col) = self.row_col(self.blank as usize);
        match board_move {
            BoardMove::Up => row > 0,
            BoardMove::Down => row < self.width - 1,
            BoardMove::Left => col > 0,
            BoardMove::Right => col < self.width - 1,
        }
    }

    fn target_index(&self, board_move: BoardMove) -> usize {
        let (row, col) = self.row_col(self.blank as usize);
        let (row, col) = match board_move {
            BoardMove::Up => (row - 1, col),
            BoardMove::Down => (row + 1, col),
            BoardMove::Left => (row, col - 1),
            BoardMove::Right => (row, col + 1),
        };
        row as usize * self.width as usize + col as usize
    }

    /// Applies `board_move` in place, returning the tile that moved into
    /// the blank's old cell and the blank's index before the move,
    /// exactly the two values [`Board::undo_move_inplace`] needs, and
    /// exactly enough to update a Manhattan heuristic incrementally via
    /// [`crate::heuristic::manhattan_delta`].
    pub fn apply_move_inplace(&mut self, board_move: BoardMove) -> Result<(u8, u8), MoveError> {
        if !self.can_move(board_move) {
            return Err(MoveError(board_move));
        }
        let old_blank = self.blank;
        let target = self.target_index(board_move);
        let moved_tile = self.get(target);
        self.set(old_blank as usize, moved_tile);
        self.set(target, 0);
        self.blank = target as u8;
        Ok((moved_tile, old_blank))
    }

    /// Exact inverse of the `apply_move_inplace` call that produced
    /// `(moved_tile, old_blank)`, restoring the packed value and blank
    /// index bit-for-bit.
    pub fn undo_move_inplace(&mut self, moved_tile: u8, old_blank: u8) {
        let target = self.blank;
        self.set(target as usize, moved_tile);
        self.set(old_blank as usize, 0);
        self.blank = old_blank;
    }

    /// Returns a fresh board after applying `board_move`, or `None` if the
    /// move is illegal. Convenience wrapper around apply/undo for callers
    /// that want a value, not a mutation (the generator, tests).
    #[must_use]
    pub fn moved(&self, board_move: BoardMove) -> Option<Board> {
        let mut next = *self;
        next.apply_move_inplace(board_move).ok()?;
        Some(next)
    }

    /// Enumerates legal successors in the fixed order Up, Down, Left,
    /// Right.
    #[must_use]
    pub fn neighbors(&self) -> Vec<(Board, BoardMove)> {
        let mut buf = [None; 4];
        let n = self.neighbors_into(&mut buf);
        buf.into_iter().take(n).map(|slot| slot.unwrap()).collect()
    }

    /// Same as [`Board::neighbors`] but writes into a caller-provided
    /// stack buffer, for the hot search loops that would otherwise
    /// allocate a `Vec` per expanded node.
    pub fn neighbors_into(&self, buf: &mut [Option<(Board, BoardMove)>; 4]) -> usize {
        let mut n = 0;
        for &m in &BoardMove::ORDER {
            if self.can_move(m) {
                buf[n] = Some((self.moved(m).expect("can_move just confirmed legality"), m));
                n += 1;
            }
        }
        n
    }

    /// `(f_min, f_max, h_min, h_max)` bounds for a [`crate::queue::BucketPriorityQueue`].
    /// The 15-puzzle's optimal-solution-length envelope gives the spec's
    /// exact `[0,82]x[0,80]`. The 8-puzzle's optimal solutions are at most
    /// 31 moves, but that bound only holds for `f`-values that get popped
    /// on a *solvable* start: an unsolvable start makes A* expand every
    /// reachable state, and `g` climbs to the component's eccentricity
    /// while `h` stays in the teens, so `f` routinely passes 31 well before
    /// the frontier empties. The original sizes the 8-puzzle queue at
    /// `(0, 200, 0, 200)` for exactly this reason, and this crate follows
    /// suit rather than the tighter solvable-only envelope.
    #[must_use]
    pub fn bucket_bounds(&self) -> (u32, u32, u32, u32) {
        match self.width {
            4 => (0, 82, 0, 80),
            3 => (0, 200, 0, 200),
            _ => {
                let n = self.num_cells() as u32;
                let generous = n * n;
                (0, generous + 4, 0, generous)
            }
        }
    }
}

impl PartialEq for Board {
    /// Equality is defined on the packed value alone, per spec: two boards
    /// with the same tile layout are the same state regardless of how
    /// they were reached.
    fn eq(&self, other: &Self) -> bool {
        self.packed == other.packed
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed.hash(state);
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.width {
            for col in 0..self.width {
                let tile = self.get(row as usize * self.width as usize + col as usize);
                if tile == 0 {
                    write!(f, " _")?;
                } else {
                    write!(f, " {tile}")?;
                }
            }
            if row + 1 < self.width {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_is_solved_in_reading_order() {
        let goal = Board::goal(4);
        for i in 0..15 {
            assert_eq!(goal.get(i), (i + 1) as u8);
        }
        assert_eq!(goal.get(15), 0);
        assert_eq!(goal.blank_index(), 15);
    }

    #[test]
    fn blank_index_matches_decoded_zero_cell() {
        let board = Board::from_tiles(3, &[1, 2, 3, 4, 0, 5, 7, 8, 6]).unwrap();
        assert_eq!(board.get(board.blank_index()), 0);
    }

    #[test]
    fn apply_then_undo_restores_exact_state() {
        let start = Board::goal(4);
        for &m in &BoardMove::ORDER {
            let mut board = start;
            if !board.can_move(m) {
                continue;
            }
            let (moved_tile, old_blank) = board.apply_move_inplace(m).unwrap();
            assert_ne!(board.packed(), start.packed());
            board.undo_move_inplace(moved_tile, old_blank);
            assert_eq!(board.packed(), start.packed());
            assert_eq!(board.blank_index(), start.blank_index());
        }
    }

    #[test]
    fn illegal_move_is_rejected() {
        let goal = Board::goal(3);
        // blank is in the last cell (bottom-right): Down and Right are illegal.
        let mut a = goal;
        let mut b = goal;
        assert!(a.apply_move_inplace(BoardMove::Down).is_err());
        assert!(b.apply_move_inplace(BoardMove::Right).is_err());
    }

    #[test]
    fn neighbors_are_enumerated_in_fixed_order() {
        // blank in the middle cell of a 3x3 board: all four moves legal.
        let board = Board::from_tiles(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
        let neighbors = board.neighbors();
        let order: Vec<BoardMove> = neighbors.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            order,
            vec![
                BoardMove::Up,
                BoardMove::Down,
                BoardMove::Left,
                BoardMove::Right
            ]
        );
    }

    #[test]
    fn equality_and_hash_depend_only_on_packed_value() {
        use std::collections::hash_map::DefaultHasher;

        let a = Board::goal(3);
        let b = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(a, b);

        let hash = |board: &Board| {
            let mut hasher = DefaultHasher::new();
            board.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }
}
