use std::time::Instant;

use crate::board::{Board, BoardMove};
use crate::heuristic::{self, Heuristic, ManhattanDistance};

use super::{SearchResult, MOVE_ORDER};

/// Longest solution this crate ever needs to represent: the 15-puzzle's
/// worst-case optimal length is 80 moves, so 81 stack slots leave one to
/// spare. Sized generously enough that a pathological bound never runs the
/// working stacks out of capacity during normal use.
const MAX_DEPTH: usize = 81;

/// IDA* trades the A* closed map for O(depth) memory: no persistent
/// closed set across iterations, just a path stack and an on-path set for
/// cycle detection within the current iteration. An unreachable start is
/// rejected by [`crate::solvability::is_solvable`] before the first
/// iteration, since IDA* has no way to discover unsolvability on its own
/// within a bounded number of iterations.
///
/// Defaults to the fast incremental Manhattan distance; see
/// [`ida_star_with_heuristic`] for a different admissible heuristic.
#[must_use]
pub fn ida_star(start: &Board, goal: &Board) -> SearchResult {
    ida_star_with_heuristic(start, goal, &ManhattanDistance)
}

#[must_use]
pub fn ida_star_with_heuristic(start: &Board, goal: &Board, heuristic: &dyn Heuristic) -> SearchResult {
    heuristic::init_tables(start.width());
    let t0 = Instant::now();

    if start == goal {
        return SearchResult {
            path: Some(vec![]),
            generated: 0,
            elapsed_ms: t0.elapsed().as_millis(),
        };
    }

    if !crate::solvability::is_solvable(start, goal) {
        return SearchResult {
            path: None,
            generated: 0,
            elapsed_ms: t0.elapsed().as_millis(),
        };
    }

    let mut ctx = DfsContext {
        goal: *goal,
        generated: 0,
        move_path: [None; MAX_DEPTH],
        board_path: [0; MAX_DEPTH],
    };

    let h0 = heuristic.evaluate(start);
    let mut bound = h0;

    loop {
        ctx.board_path[0] = start.packed();
        match ctx.dfs(*start, 0, 0, bound, h0, None, heuristic) {
            DfsOutcome::Found(depth) => {
                let path = ctx.move_path[..depth]
                    .iter()
                    .map(|m| m.expect("every slot below the returned depth was filled in order"))
                    .collect();
                return SearchResult {
                    path: Some(path),
                    generated: ctx.generated,
                    elapsed_ms: t0.elapsed().as_millis(),
                };
            }
            DfsOutcome::Exhausted => {
                return SearchResult {
                    path: None,
                    generated: ctx.generated,
                    elapsed_ms: t0.elapsed().as_millis(),
                };
            }
            DfsOutcome::NextBound(next) => {
                debug_assert!(next > bound, "IDA* bound must strictly increase each iteration");
                bound = next;
                log::trace!("IDA* increasing bound to {bound}");
            }
        }
    }
}

enum DfsOutcome {
    /// The goal was reached; payload is the path length (depth).
    Found(usize),
    /// Every branch exceeded the bound and none can ever do better: no
    /// solution exists.
    Exhausted,
    /// No branch reached goal within `bound`; payload is the smallest
    /// f-value that exceeded it, the next iteration's bound.
    NextBound(u32),
}

struct DfsContext {
    goal: Board,
    generated: usize,
    move_path: [Option<BoardMove>; MAX_DEPTH],
    board_path: [u64; MAX_DEPTH],
}

impl DfsContext {
    /// Recursive depth-first search bounded by `bound`. `depth` indexes the
    /// next free slot in `move_path`/`board_path`; `board_path[..depth]` is
    /// the on-path set used for O(1)-per-check cycle detection within this
    /// iteration (IDA* keeps no closed set across iterations, so this is
    /// the only duplicate guard it has).
    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &mut self,
        state: Board,
        depth: usize,
        g: u32,
        bound: u32,
        h: u32,
        prev_move: Option<BoardMove>,
        heuristic: &dyn Heuristic,
    ) -> DfsOutcome {
        let f = g + h;
        if f > bound {
            return DfsOutcome::NextBound(f);
        }
        if state == self.goal {
            return DfsOutcome::Found(depth);
        }

        let mut min_next = u32::MAX;
        let mut working = state;

        for &mv in &MOVE_ORDER {
            if Some(mv) == prev_move.map(BoardMove::inverse) || !working.can_move(mv) {
                continue;
            }

            let (moved_tile, old_blank) = working
                .apply_move_inplace(mv)
                .expect("can_move just confirmed this move is legal");
            let new_blank = working.blank_index();
            self.generated += 1;

            let child_packed = working.packed();
            let on_path = self.board_path[..depth].contains(&child_packed);

            if !on_path {
                let h_child = heuristic.delta(h, moved_tile, old_blank as usize, new_blank, &working);
                let f_child = g + 1 + h_child;

                if f_child > bound {
                    min_next = min_next.min(f_child);
                } else {
                    assert!(
                        depth + 1 < MAX_DEPTH,
                        "IDA* path stack exceeded its preallocated capacity of {MAX_DEPTH}; \
                         this means the bound grew past any admissible puzzle's true diameter, \
                         a configuration bug rather than a recoverable search-time condition"
                    );
                    self.move_path[depth] = Some(mv);
                    self.board_path[depth] = child_packed;

                    match self.dfs(working, depth + 1, g + 1, bound, h_child, Some(mv), heuristic) {
                        DfsOutcome::Found(d) => {
                            working.undo_move_inplace(moved_tile, old_blank);
                            return DfsOutcome::Found(d);
                        }
                        DfsOutcome::NextBound(next) => min_next = min_next.min(next),
                        DfsOutcome::Exhausted => {}
                    }
                }
            }

            working.undo_move_inplace(moved_tile, old_blank);
        }

        if min_next == u32::MAX {
            DfsOutcome::Exhausted
        } else {
            DfsOutcome::NextBound(min_next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_equals_goal_returns_empty_path() {
        let goal = Board::goal(3);
        let result = ida_star(&goal, &goal);
        assert_eq!(result.path, Some(vec![]));
    }

    #[test]
    fn one_move_away_finds_the_single_move() {
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        let result = ida_star(&start, &Board::goal(3));
        assert_eq!(result.path, Some(vec![BoardMove::Right]));
    }

    #[test]
    fn two_moves_away_finds_a_shortest_path() {
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let result = ida_star(&start, &Board::goal(3));
        assert_eq!(result.path, Some(vec![BoardMove::Right, BoardMove::Right]));
    }

    #[test]
    fn fifteen_puzzle_one_move_away() {
        let start = Board::from_tiles(
            4,
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15],
        )
        .unwrap();
        let result = ida_star(&start, &Board::goal(4));
        assert_eq!(result.path, Some(vec![BoardMove::Right]));
    }

    #[test]
    fn unsolvable_board_is_rejected_without_a_search() {
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
        let result = ida_star(&start, &Board::goal(3));
        assert_eq!(result.path, None);
        assert_eq!(result.generated, 0);
    }

    #[test]
    fn agrees_with_a_star_on_path_length() {
        let start = Board::from_tiles(3, &[2, 4, 0, 1, 6, 3, 7, 5, 8]).unwrap();
        let goal = Board::goal(3);
        let astar_result = super::super::astar::a_star(&start, &goal);
        let ida_result = ida_star(&start, &goal);
        assert_eq!(
            astar_result.path.map(|p| p.len()),
            ida_result.path.map(|p| p.len())
        );
    }
}
