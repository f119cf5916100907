use std::collections::HashMap;
use std::time::Instant;

use crate::board::{Board, BoardMove};
use crate::heuristic::{self, Heuristic, ManhattanDistance};
use crate::queue::BucketPriorityQueue;

use super::{SearchResult, MOVE_ORDER};

/// Generous initial capacity for the meta/parent maps, per spec: deep
/// problems can expand millions of states, and rehashing a map that size
/// mid-search is exactly the kind of latency spike a bucket queue is
/// supposed to avoid elsewhere.
const INITIAL_MAP_CAPACITY: usize = 1 << 16;

struct Node {
    f: u32,
    g: u32,
    h: u32,
    board: Board,
}

/// `meta[board] = (g, h, closed)`. Once `closed`, a strictly better g can
/// never later be observed, because Manhattan is consistent: the first pop
/// of a node is already optimal.
#[derive(Clone, Copy)]
struct Meta {
    g: u32,
    h: u32,
    closed: bool,
}

/// `parent[board] = (prev packed board, move that produced it, prev blank
/// index)`. Only ever used for path reconstruction, so it stores packed
/// primitives rather than a full `Board`; `prev_blank` is kept alongside
/// `prev` so a caller could rebuild the full `Board` at any point on the
/// path in O(1) rather than re-scanning `prev` for its blank cell, even
/// though plain path reconstruction below only needs `mv`.
#[derive(Clone, Copy)]
struct Parent {
    prev: u64,
    mv: BoardMove,
    #[allow(dead_code)]
    prev_blank: u8,
}

/// Best-first search with lazy duplicate detection: `meta` plus a closed
/// flag stands in for a separate closed set, since a packed board is
/// already the hash-map key either way. An unreachable start is rejected
/// up front by [`crate::solvability::is_solvable`], rather than left to
/// exhaust the frontier.
///
/// Defaults to the fast incremental Manhattan distance; see
/// [`a_star_with_heuristic`] to plug in a different admissible heuristic
/// (the incremental `delta` is then whatever that heuristic's
/// [`Heuristic::delta`] override provides, or a full recompute if it
/// doesn't have one).
#[must_use]
pub fn a_star(start: &Board, goal: &Board) -> SearchResult {
    a_star_with_heuristic(start, goal, &ManhattanDistance)
}

#[must_use]
pub fn a_star_with_heuristic(start: &Board, goal: &Board, heuristic: &dyn Heuristic) -> SearchResult {
    heuristic::init_tables(start.width());
    let t0 = Instant::now();
    let mut generated = 0usize;

    if start == goal {
        return SearchResult {
            path: Some(vec![]),
            generated,
            elapsed_ms: t0.elapsed().as_millis(),
        };
    }

    if !crate::solvability::is_solvable(start, goal) {
        return SearchResult {
            path: None,
            generated,
            elapsed_ms: t0.elapsed().as_millis(),
        };
    }

    let h0 = heuristic.evaluate(start);
    let (f_min, f_max, h_min, h_max) = start.bucket_bounds();
    let mut open: BucketPriorityQueue<Node> = BucketPriorityQueue::new(f_min, f_max, h_min, h_max);
    let mut meta: HashMap<u64, Meta> = HashMap::with_capacity(INITIAL_MAP_CAPACITY);
    let mut parent: HashMap<u64, Parent> = HashMap::with_capacity(INITIAL_MAP_CAPACITY);

    open.push(
        Node {
            f: h0,
            g: 0,
            h: h0,
            board: *start,
        },
        h0,
        h0,
    )
    .expect("start node's priority must fall within bounds sized by Board::bucket_bounds");
    meta.insert(start.packed(), Meta { g: 0, h: h0, closed: false });

    while let Some(cur) = open.pop() {
        let cur_packed = cur.board.packed();

        // Lazy duplicate removal: this frontier entry may have been
        // superseded by a better one already popped and closed.
        if meta.get(&cur_packed).is_some_and(|m| m.closed) {
            continue;
        }

        if cur.board == *goal {
            return SearchResult {
                path: Some(reconstruct_path(&parent, start.packed(), cur_packed)),
                generated,
                elapsed_ms: t0.elapsed().as_millis(),
            };
        }

        meta.get_mut(&cur_packed)
            .expect("a popped node always has a meta entry, inserted when it was first discovered")
            .closed = true;

        // Never immediately reverse the move that produced this node: any
        // optimal path using m then inverse(m) can be shortened, and the
        // inverse always leads back to a state already in meta with a g no
        // worse than cur.g + 1.
        let skip_move = parent.get(&cur_packed).map(|p| p.mv.inverse());

        let mut working = cur.board;
        for &mv in &MOVE_ORDER {
            if Some(mv) == skip_move || !working.can_move(mv) {
                continue;
            }
            let (moved_tile, old_blank) = working
                .apply_move_inplace(mv)
                .expect("can_move just confirmed this move is legal");
            let new_blank = working.blank_index();
            let g_child = cur.g + 1;
            let child_packed = working.packed();

            let better_than_known = meta.get(&child_packed).map_or(true, |m| g_child < m.g);
            if better_than_known {
                let h_child = heuristic.delta(cur.h, moved_tile, old_blank as usize, new_blank, &working);
                let f_child = g_child + h_child;

                parent.insert(
                    child_packed,
                    Parent {
                        prev: cur_packed,
                        mv,
                        prev_blank: cur.board.blank_index() as u8,
                    },
                );
                meta.insert(child_packed, Meta { g: g_child, h: h_child, closed: false });
                generated += 1;
                open.push(
                    Node {
                        f: f_child,
                        g: g_child,
                        h: h_child,
                        board: working,
                    },
                    f_child,
                    h_child,
                )
                .expect("child priority must fall within bounds sized by Board::bucket_bounds");
            }

            working.undo_move_inplace(moved_tile, old_blank);
        }
    }

    SearchResult {
        path: None,
        generated,
        elapsed_ms: t0.elapsed().as_millis(),
    }
}

fn reconstruct_path(parent: &HashMap<u64, Parent>, start_packed: u64, goal_packed: u64) -> Vec<BoardMove> {
    let mut path = vec![];
    let mut node = goal_packed;
    while node != start_packed {
        let p = parent
            .get(&node)
            .expect("every node reached with g > 0 has a parent entry");
        path.push(p.mv);
        node = p.prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_equals_goal_returns_empty_path() {
        let goal = Board::goal(3);
        let result = a_star(&goal, &goal);
        assert_eq!(result.path, Some(vec![]));
        assert!(result.generated <= 1);
    }

    #[test]
    fn one_move_away_finds_the_single_move() {
        // blank at index 7, needs one Right to solve.
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        let result = a_star(&start, &Board::goal(3));
        assert_eq!(result.path, Some(vec![BoardMove::Right]));
    }

    #[test]
    fn two_moves_away_finds_a_shortest_path() {
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let result = a_star(&start, &Board::goal(3));
        assert_eq!(result.path.map(|p| p.len()), Some(2));
    }

    #[test]
    fn fifteen_puzzle_one_move_away() {
        let start = Board::from_tiles(
            4,
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15],
        )
        .unwrap();
        let result = a_star(&start, &Board::goal(4));
        assert_eq!(result.path, Some(vec![BoardMove::Right]));
    }

    #[test]
    fn unsolvable_board_is_rejected_without_a_search() {
        // single transposition of the goal: always unsolvable.
        let start = Board::from_tiles(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
        let result = a_star(&start, &Board::goal(3));
        assert_eq!(result.path, None);
        assert_eq!(result.generated, 0);
    }

    #[test]
    fn found_path_actually_solves_the_board() {
        let mut board = Board::from_tiles(3, &[2, 4, 0, 1, 6, 3, 7, 5, 8]).unwrap();
        let result = a_star(&board, &Board::goal(3));
        let path = result.path.expect("this board is solvable");
        for mv in path {
            board = board.moved(mv).expect("a* only emits legal moves");
        }
        assert_eq!(board, Board::goal(3));
    }
}
