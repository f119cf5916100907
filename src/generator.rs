//! Random-walk scrambler: starts from [`Board::goal`] and takes `n` random
//! legal moves, which always yields a solvable board (every move is its own
//! parity-preserving inverse).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, BoardMove};

/// Scrambles `width`'s goal board with `n` random legal moves using `rng`.
///
/// When `avoid_backtrack` is set, the move that would immediately undo the
/// previous one is excluded from the candidates, except when doing so
/// would leave no candidate at all (a corner with only two legal moves,
/// one of which is the backtrack), in which case the restriction is
/// dropped for that step rather than getting stuck.
pub fn generate<R: Rng + ?Sized>(width: u8, n: u32, rng: &mut R, avoid_backtrack: bool) -> Board {
    let mut cur = Board::goal(width);
    let mut last: Option<BoardMove> = None;

    let mut candidates = [None; 4];
    for _ in 0..n {
        let count = cur.neighbors_into(&mut candidates);
        let ban = last.map(BoardMove::inverse);

        let mut filtered: Vec<(Board, BoardMove)> = candidates[..count]
            .iter()
            .filter_map(|slot| *slot)
            .filter(|&(_, mv)| !avoid_backtrack || Some(mv) != ban)
            .collect();
        if filtered.is_empty() {
            filtered = candidates[..count].iter().filter_map(|slot| *slot).collect();
        }

        let pick = rng.gen_range(0..filtered.len());
        let (next, mv) = filtered[pick];
        cur = next;
        last = Some(mv);
    }
    cur
}

/// Convenience wrapper choosing the RNG for the caller: a fixed `seed`
/// gives a reproducible scramble (useful for tests and benchmarks), `None`
/// draws from the process's entropy source.
#[must_use]
pub fn generate_random_board(width: u8, n: u32, seed: Option<u64>, avoid_backtrack: bool) -> Board {
    match seed {
        Some(seed) => generate(width, n, &mut StdRng::seed_from_u64(seed), avoid_backtrack),
        None => generate(width, n, &mut rand::thread_rng(), avoid_backtrack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_returns_the_goal() {
        let board = generate_random_board(3, 0, Some(1), true);
        assert_eq!(board, Board::goal(3));
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = generate_random_board(4, 50, Some(42), true);
        let b = generate_random_board(4, 50, Some(42), true);
        assert_eq!(a, b);
    }

    #[test]
    fn scrambled_board_is_always_solvable() {
        // every random-walk board is reachable from goal by construction,
        // so A* must always find a path back.
        let board = generate_random_board(3, 30, Some(7), true);
        let result = crate::search::a_star(&board, &Board::goal(3));
        assert!(result.path.is_some());
    }

    #[test]
    fn corner_case_with_no_non_backtrack_move_still_makes_progress() {
        // n=1 from goal always has exactly two legal moves and no prior
        // move to avoid, so this just exercises the general path, but at
        // larger n the backtrack-avoidance fallback is regularly hit in a
        // corner; confirm it never panics across many seeds.
        for seed in 0..50 {
            let _ = generate_random_board(4, 5, Some(seed), true);
        }
    }
}
