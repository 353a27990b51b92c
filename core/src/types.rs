use core::fmt;

use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for gem counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Row/column displacement of a single step.
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'U' | 'u' => Some(Self::Up),
            'D' | 'd' => Some(Self::Down),
            'L' | 'l' => Some(Self::Left),
            'R' | 'r' => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        use Direction::*;
        match self {
            Up => 'U',
            Down => 'D',
            Left => 'L',
            Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.pad(name)
    }
}

/// Moves `coords` one cell towards `direction`, returning a value only when it remains in bounds.
pub fn step(coords: Coord2, direction: Direction, bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = direction.delta();
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_in_bounds() {
        assert_eq!(step((0, 0), Direction::Up, (3, 3)), None);
        assert_eq!(step((0, 0), Direction::Left, (3, 3)), None);
        assert_eq!(step((2, 2), Direction::Down, (3, 3)), None);
        assert_eq!(step((2, 2), Direction::Right, (3, 3)), None);
        assert_eq!(step((1, 1), Direction::Up, (3, 3)), Some((0, 1)));
        assert_eq!(step((1, 1), Direction::Right, (3, 3)), Some((1, 2)));
    }

    #[test]
    fn opposite_directions_cancel_out() {
        for direction in Direction::ALL {
            let there = step((1, 1), direction, (3, 3)).unwrap();
            assert_eq!(step(there, direction.opposite(), (3, 3)), Some((1, 1)));
        }
    }

    #[test]
    fn direction_chars() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_char(direction.to_char()), Some(direction));
        }
        assert_eq!(Direction::from_char('r'), Some(Direction::Right));
        assert_eq!(Direction::from_char('z'), None);
    }
}
