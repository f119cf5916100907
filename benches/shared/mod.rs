use slide_solver::Board;

/// A fixed, increasingly scrambled set of 3x3 boards shared by every
/// benchmark, cycling so `Criterion`'s repeated `iter_batched` setup
/// closure never runs out of samples.
pub fn sample_boards() -> impl Iterator<Item = Board> {
    let board_strings = [
        // solved
        "3 3\n1 2 3\n4 5 6\n7 8 0\n",
        // 1 move away
        "3 3\n1 2 3\n4 5 6\n7 0 8\n",
        // 2 moves away
        "3 3\n1 2 3\n4 0 5\n7 8 6\n",
        // a handful of moves away
        "3 3\n4 1 3\n0 2 5\n7 8 6\n",
        "3 3\n4 1 3\n7 2 5\n8 0 6\n",
        // deep scramble
        "3 3\n2 4 0\n1 6 3\n7 5 8\n",
    ];

    let boards: Vec<Board> = board_strings
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    assert!(!boards.is_empty(), "at least one sample board must parse");

    CyclingBoards { boards, index: 0 }
}

struct CyclingBoards {
    boards: Vec<Board>,
    index: usize,
}

impl Iterator for CyclingBoards {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        let board = self.boards[self.index];
        self.index = (self.index + 1) % self.boards.len();
        Some(board)
    }
}
