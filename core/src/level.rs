use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A puzzle as stored on disk: the board and the number of lives the player starts with.
///
/// Text format:
///
/// ```text
/// ; comment
/// 3 5
/// unlimited
/// WWWWW
/// P.G.X
/// ..M..
/// ```
///
/// The first line holds `<rows> <cols>`, the second the lives (`unlimited` or a number),
/// then one line per row with `.` empty, `W` wall, `G` gem, `M` mine, `X` goal, `P` player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub board: Board,
    pub lives: Lives,
}

impl Level {
    pub fn new(board: Board, lives: Lives) -> Self {
        Self { board, lives }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with(';'));

        let (line_no, header) = lines.next().ok_or(GameError::InvalidLevel {
            line: 1,
            reason: "missing board size",
        })?;
        let mut dims = header.split_whitespace().map(str::parse::<Coord>);
        let (Some(Ok(rows)), Some(Ok(cols)), None) = (dims.next(), dims.next(), dims.next()) else {
            return Err(GameError::InvalidLevel {
                line: line_no,
                reason: "expected `<rows> <cols>`",
            });
        };

        let (line_no, lives) = lines.next().ok_or(GameError::InvalidLevel {
            line: line_no + 1,
            reason: "missing lives",
        })?;
        let lives = lives.parse::<Lives>().map_err(|_| GameError::InvalidLevel {
            line: line_no,
            reason: "expected a number of lives or `unlimited`",
        })?;

        let mut cells = Vec::with_capacity(mult(rows, cols).into());
        let mut last_line = line_no;
        for _ in 0..rows {
            let (line_no, row) = lines.next().ok_or(GameError::InvalidLevel {
                line: last_line + 1,
                reason: "fewer rows than declared",
            })?;
            last_line = line_no;

            let before = cells.len();
            for ch in row.chars() {
                let cell = Cell::from_char(ch).ok_or(GameError::InvalidLevel {
                    line: line_no,
                    reason: "unknown cell character",
                })?;
                cells.push(cell);
            }
            if cells.len() - before != usize::from(cols) {
                return Err(GameError::InvalidLevel {
                    line: line_no,
                    reason: "row length does not match declared columns",
                });
            }
        }

        if let Some((line_no, _)) = lines.next() {
            return Err(GameError::InvalidLevel {
                line: line_no,
                reason: "more rows than declared",
            });
        }

        let cells = Array2::from_shape_vec((rows.into(), cols.into()), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::new(Board::from_cells(cells)?, lives))
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.board.size();
        writeln!(f, "{rows} {cols}")?;
        writeln!(f, "{}", self.lives)?;
        for row in self.board.rows() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
