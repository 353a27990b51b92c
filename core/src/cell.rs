use serde::{Deserialize, Serialize};

/// Content of a single board cell. Exactly one per cell at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
    Gem,
    Mine,
    Goal,
    Player,
}

impl Cell {
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            'W' => Some(Self::Wall),
            'G' => Some(Self::Gem),
            'M' => Some(Self::Mine),
            'X' => Some(Self::Goal),
            'P' => Some(Self::Player),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        use Cell::*;
        match self {
            Empty => '.',
            Wall => 'W',
            Gem => 'G',
            Mine => 'M',
            Goal => 'X',
            Player => 'P',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
