//! A* and IDA* over [`crate::board::Board`].
//!
//! Both searchers are synchronous and single-threaded: a call owns its own
//! maps/queues/stacks outright, nothing is shared across calls, and there
//! is no cancellation contract; a caller wanting a deadline wraps the call
//! and discards the result (`generated` is meaningless without a `path`).

use crate::board::BoardMove;

pub mod astar;
pub mod ida_star;

pub use astar::a_star;
pub use ida_star::ida_star;

/// Move enumeration order used by both searchers' expansion loops.
pub const MOVE_ORDER: [BoardMove; 4] = BoardMove::ORDER;

/// The outcome of a search call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The move sequence from start to goal, or `None` if the frontier
    /// (A*) or search tree (IDA*) was exhausted without finding the goal.
    /// `NoSolution` is ordinary output, not an error.
    pub path: Option<Vec<BoardMove>>,
    /// Number of child states generated, per searcher-specific convention
    /// (see each searcher's doc comment, both are documented at their
    /// increment site rather than here, since the two conventions differ).
    pub generated: usize,
    pub elapsed_ms: u128,
}

impl SearchResult {
    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}
