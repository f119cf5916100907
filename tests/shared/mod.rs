use slide_solver::board::{Board, BoardMove};
use slide_solver::SearchResult;

/// Replays `result`'s path against `start` and confirms it actually lands
/// on `goal` — the cheapest way to catch a searcher that returns a
/// plausible-looking but wrong move sequence.
pub fn assert_path_solves(start: &Board, goal: &Board, result: &SearchResult) {
    let path = result.path.as_ref().expect("expected a solution to be found");
    let mut board = *start;
    for &mv in path {
        board = board.moved(mv).expect("searcher only emits legal moves");
    }
    assert_eq!(board, *goal, "path did not reach the goal board");
}

pub fn solved_board_3x3() -> Board {
    "3 3\n1 2 3\n4 5 6\n7 8 0\n".parse().unwrap()
}

pub fn unsolvable_board_3x3() -> Board {
    // single transposition of the two final tiles: always unsolvable.
    "3 3\n1 2 3\n4 5 6\n8 7 0\n".parse().unwrap()
}

#[allow(dead_code)]
pub fn all_moves() -> [BoardMove; 4] {
    BoardMove::ORDER
}
