use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells. Dimensions never change for the lifetime of a game.
///
/// The board remembers where the player started (the respawn cell) and where the goal
/// is, so that a player standing on the goal can leave it without erasing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    start: Coord2,
    goal: Coord2,
    initial_gems: CellCount,
    remaining_gems: CellCount,
}

impl Board {
    /// Builds a board from freshly placed cells: exactly one player and one goal.
    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 || rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut start = None;
        let mut goal = None;
        let mut initial_gems: CellCount = 0;
        for ((row, col), &cell) in cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            match cell {
                Cell::Player if start.is_some() => return Err(GameError::MultiplePlayers),
                Cell::Player => start = Some(coords),
                Cell::Goal if goal.is_some() => return Err(GameError::MultipleGoals),
                Cell::Goal => goal = Some(coords),
                Cell::Gem => initial_gems += 1,
                Cell::Empty | Cell::Wall | Cell::Mine => {}
            }
        }

        Ok(Self {
            cells,
            start: start.ok_or(GameError::MissingPlayer)?,
            goal: goal.ok_or(GameError::MissingGoal)?,
            initial_gems,
            remaining_gems: initial_gems,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn num_rows(&self) -> Coord {
        self.size().0
    }

    pub fn num_cols(&self) -> Coord {
        self.size().1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Respawn cell: where the player stood when the board was created.
    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    /// Number of gems placed on the board when the game started.
    pub fn initial_gem_count(&self) -> CellCount {
        self.initial_gems
    }

    /// Gems still on the board. Kept up to date by every write, so reading it is free.
    pub fn remaining_gems(&self) -> CellCount {
        self.remaining_gems
    }

    fn count_gems(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Gem)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn player_position(&self) -> Option<Coord2> {
        self.cells
            .indexed_iter()
            .find(|&(_, &cell)| cell == Cell::Player)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    /// Content a cell falls back to once the player leaves it.
    pub(crate) fn vacated_content(&self, coords: Coord2) -> Cell {
        if coords == self.goal {
            Cell::Goal
        } else {
            Cell::Empty
        }
    }

    pub(crate) fn set(&mut self, coords: Coord2, cell: Cell) {
        let slot = &mut self.cells[coords.to_nd_index()];
        match (*slot == Cell::Gem, cell == Cell::Gem) {
            (true, false) => self.remaining_gems = self.remaining_gems.saturating_sub(1),
            (false, true) => self.remaining_gems = self.remaining_gems.saturating_add(1),
            _ => {}
        }
        *slot = cell;
    }

    /// Checks a board that did not come from [`Board::from_cells`], e.g. a deserialized one.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.cells.dim();
        if rows == 0 || cols == 0 || rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }
        self.validate_coords(self.start)?;
        self.validate_coords(self.goal)?;
        if self.start == self.goal {
            return Err(GameError::InconsistentState("start and goal share a cell"));
        }

        let mut players = 0;
        for ((row, col), &cell) in self.cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            match cell {
                Cell::Player => players += 1,
                Cell::Goal if coords != self.goal => return Err(GameError::MultipleGoals),
                _ => {}
            }
        }
        match players {
            0 => return Err(GameError::MissingPlayer),
            1 => {}
            _ => return Err(GameError::MultiplePlayers),
        }

        if !matches!(self.cell_at(self.goal), Cell::Goal | Cell::Player) {
            return Err(GameError::MissingGoal);
        }
        if self.count_gems() != self.remaining_gems {
            return Err(GameError::InconsistentState(
                "gem count does not match the board",
            ));
        }
        if self.remaining_gems > self.initial_gems {
            return Err(GameError::InconsistentState(
                "more gems on the board than were placed",
            ));
        }
        Ok(())
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
