//! Heuristic search core for sliding-tile puzzles (8-puzzle, 15-puzzle).
//!
//! [`board`] holds the bit-packed board representation, [`heuristic`] the
//! admissible lower bounds used to guide search, [`queue`] the bucket
//! priority queue that backs A*, and [`search`] the two searchers
//! themselves. [`solvability`] lets both searchers reject an unreachable
//! start before spending any search effort on it. [`generator`] and
//! [`korf`] are collaborators that produce or load a starting board; they
//! talk to the core only through [`board::Board`].

pub mod board;
pub mod generator;
pub mod heuristic;
pub mod korf;
pub mod queue;
pub mod search;
pub mod solvability;

pub use board::{Board, BoardError, BoardMove, MoveError};
pub use search::SearchResult;
