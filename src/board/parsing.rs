use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use super::Board;

/// Construction input was not a permutation of `{0, ..., width*width - 1}`.
#[derive(Debug, Clone)]
pub enum BoardCreationError {
    ParsingError(ParseIntError),
    InvalidHeader,
    WrongCellCount { expected: usize, actual: usize },
    NotAPermutation,
    UnsupportedWidth(u8),
    NonSquareBoard { rows: u8, cols: u8 },
}

impl From<ParseIntError> for BoardCreationError {
    fn from(value: ParseIntError) -> Self {
        BoardCreationError::ParsingError(value)
    }
}

impl Display for BoardCreationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BoardCreationError::ParsingError(err) => write!(f, "error parsing board: {err}"),
            BoardCreationError::InvalidHeader => write!(f, "the size header is invalid or missing"),
            BoardCreationError::WrongCellCount { expected, actual } => write!(
                f,
                "board has {actual} cells, expected {expected} for this width"
            ),
            BoardCreationError::NotAPermutation => write!(
                f,
                "board tiles are not a permutation of 0..width*width"
            ),
            BoardCreationError::UnsupportedWidth(width) => {
                write!(f, "unsupported puzzle width {width}; only 3 and 4 are supported")
            }
            BoardCreationError::NonSquareBoard { rows, cols } => {
                write!(f, "board must be square, got {rows} rows and {cols} columns")
            }
        }
    }
}

impl Error for BoardCreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BoardCreationError::ParsingError(err) => Some(err),
            _ => None,
        }
    }
}

pub(super) fn board_from_tiles(width: u8, tiles: &[u8]) -> Result<Board, BoardCreationError> {
    if !matches!(width, 3 | 4) {
        return Err(BoardCreationError::UnsupportedWidth(width));
    }

    let num_cells = width as usize * width as usize;
    if tiles.len() != num_cells {
        return Err(BoardCreationError::WrongCellCount {
            expected: num_cells,
            actual: tiles.len(),
        });
    }

    let mut seen = [false; 16];
    for &t in tiles {
        let t = t as usize;
        if t >= num_cells || seen[t] {
            return Err(BoardCreationError::NotAPermutation);
        }
        seen[t] = true;
    }

    let mut board = Board {
        packed: 0,
        blank: 0,
        width,
    };
    for (i, &t) in tiles.iter().enumerate() {
        board.set(i, t);
        if t == 0 {
            board.blank = i as u8;
        }
    }
    Ok(board)
}

/// Parses the same `"rows cols"` header followed by `rows` lines of
/// whitespace-separated tile values that the loader and the CLI's
/// `--board` flag both accept.
impl FromStr for Board {
    type Err = BoardCreationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let header = lines.next().ok_or(BoardCreationError::InvalidHeader)?;
        let mut header_parts = header.split_whitespace();
        let rows: u8 = header_parts
            .next()
            .ok_or(BoardCreationError::InvalidHeader)?
            .parse()?;
        let cols: u8 = header_parts
            .next()
            .ok_or(BoardCreationError::InvalidHeader)?
            .parse()?;
        if rows != cols {
            return Err(BoardCreationError::NonSquareBoard { rows, cols });
        }

        let tiles: Vec<u8> = lines
            .flat_map(str::split_whitespace)
            .map(str::parse)
            .collect::<Result<_, _>>()?;

        board_from_tiles(rows, &tiles)
    }
}
