//! Loader for Korf-format 15-puzzle problem sets: one problem per line, an
//! index column followed by 16 whitespace-separated tile values in
//! row-major order.

use std::fmt::{self, Display, Formatter};
use std::io::BufRead;
use std::num::ParseIntError;

use crate::board::{Board, BoardError};

#[derive(Debug)]
pub enum KorfParseError {
    Io(std::io::Error),
    Number(ParseIntError),
    /// Line had fewer than 17 whitespace-separated fields (index + 16 tiles).
    TooFewFields { line: usize, found: usize },
    Board { line: usize, source: BoardError },
}

impl Display for KorfParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KorfParseError::Io(err) => write!(f, "error reading korf problem set: {err}"),
            KorfParseError::Number(err) => write!(f, "error parsing korf problem field: {err}"),
            KorfParseError::TooFewFields { line, found } => write!(
                f,
                "line {line}: expected an index and 16 tiles (17 fields), found {found}"
            ),
            KorfParseError::Board { line, source } => {
                write!(f, "line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for KorfParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KorfParseError::Io(err) => Some(err),
            KorfParseError::Number(err) => Some(err),
            KorfParseError::Board { source, .. } => Some(source),
            KorfParseError::TooFewFields { .. } => None,
        }
    }
}

impl From<std::io::Error> for KorfParseError {
    fn from(value: std::io::Error) -> Self {
        KorfParseError::Io(value)
    }
}

/// One problem from a Korf problem set: its 1-based index in the file (not
/// necessarily contiguous, since blank lines are skipped) and the board it
/// describes.
#[derive(Debug, Clone, Copy)]
pub struct KorfProblem {
    pub index: u32,
    pub board: Board,
}

/// Parses Korf-format problems from any reader. Blank lines are skipped;
/// every non-blank line must have exactly 17 whitespace-separated fields.
pub fn load_korf_problems<R: BufRead>(reader: R) -> Result<Vec<KorfProblem>, KorfParseError> {
    let mut problems = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 17 {
            return Err(KorfParseError::TooFewFields {
                line: line_no + 1,
                found: fields.len(),
            });
        }

        let index: u32 = fields[0].parse().map_err(KorfParseError::Number)?;
        let tiles: Vec<u8> = fields[1..]
            .iter()
            .map(|f| f.parse())
            .collect::<Result<_, _>>()
            .map_err(KorfParseError::Number)?;

        let board = Board::from_tiles(4, &tiles).map_err(|source| KorfParseError::Board {
            line: line_no + 1,
            source,
        })?;

        problems.push(KorfProblem { index, board });
    }

    Ok(problems)
}

/// Reads and parses a Korf problem set from a file path.
pub fn load_korf_problems_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<KorfProblem>, KorfParseError> {
    let file = std::fs::File::open(path)?;
    load_korf_problems(std::io::BufReader::new(file))
}
