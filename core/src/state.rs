use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::*;

/// Lives left in a session, or no limit at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lives {
    Unlimited,
    Limited(u32),
}

impl Lives {
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Limited(0))
    }

    /// Finite number of lives left, `None` when unlimited.
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Limited(count) => Some(count),
        }
    }

    const fn consume(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Limited(count) => Self::Limited(count.saturating_sub(1)),
        }
    }
}

impl Default for Lives {
    fn default() -> Self {
        Self::Unlimited
    }
}

impl fmt::Display for Lives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Limited(count) => write!(f, "{count}"),
        }
    }
}

impl FromStr for Lives {
    type Err = ParseIntError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("unlimited") {
            Ok(Self::Unlimited)
        } else {
            s.trim().parse().map(Self::Limited)
        }
    }
}

// Stored as either a plain number or the string "unlimited", which keeps config files readable.
impl Serialize for Lives {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_str("unlimited"),
            Self::Limited(count) => serializer.serialize_u32(*count),
        }
    }
}

impl<'de> Deserialize<'de> for Lives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct LivesVisitor;

        impl Visitor<'_> for LivesVisitor {
            type Value = Lives;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number of lives or \"unlimited\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> core::result::Result<Lives, E> {
                u32::try_from(value)
                    .map(Lives::Limited)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> core::result::Result<Lives, E> {
                u32::try_from(value)
                    .map(Lives::Limited)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<Lives, E> {
                value
                    .parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(LivesVisitor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Point-in-time copy of the counters shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub num_gems: u32,
    pub num_moves: u32,
    pub num_undoes: u32,
    pub num_deaths: u32,
    pub lives: Lives,
    pub score: u32,
}

/// Board, player, counters and history of one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    player: Coord2,
    num_gems: u32,
    num_moves: u32,
    num_deaths: u32,
    lives: Lives,
    score: u32,
    status: GameStatus,
    move_stack: MoveStack,
}

impl GameState {
    pub fn new(board: Board, lives: Lives) -> Self {
        let player = board.start();
        let status = if lives.is_exhausted() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };
        Self {
            board,
            player,
            num_gems: 0,
            num_moves: 0,
            num_deaths: 0,
            lives,
            score: 0,
            status,
            move_stack: MoveStack::new(),
        }
    }

    pub fn from_level(level: Level, config: &GameConfig) -> Self {
        let lives = config.lives.unwrap_or(level.lives);
        Self::new(level.board, lives)
    }

    pub fn game_board(&self) -> &Board {
        &self.board
    }

    pub fn player_position(&self) -> Coord2 {
        self.player
    }

    pub fn num_gems(&self) -> u32 {
        self.num_gems
    }

    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    pub fn num_deaths(&self) -> u32 {
        self.num_deaths
    }

    /// Lives left, `None` when the session has unlimited lives.
    pub fn num_lives(&self) -> Option<u32> {
        self.lives.count()
    }

    pub fn has_unlimited_lives(&self) -> bool {
        self.lives.is_unlimited()
    }

    pub fn lives(&self) -> Lives {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn move_stack(&self) -> &MoveStack {
        &self.move_stack
    }

    pub fn remaining_gems(&self) -> CellCount {
        self.board.remaining_gems()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            num_gems: self.num_gems,
            num_moves: self.num_moves,
            num_undoes: self.move_stack.pop_count(),
            num_deaths: self.num_deaths,
            lives: self.lives,
            score: self.score,
        }
    }

    pub(crate) fn move_stack_mut(&mut self) -> &mut MoveStack {
        &mut self.move_stack
    }

    /// Applies a resolved move to the board and counters. Invalid moves change nothing.
    pub(crate) fn apply(&mut self, result: &MoveResult) {
        if result.is_invalid() {
            return;
        }

        result.apply_to(&mut self.board);
        self.player = result.new_position();
        self.num_moves += 1;

        let gems = u32::from(result.gem_count());
        self.num_gems += gems;
        self.score += gems;

        match result.outcome() {
            MoveOutcome::Alive | MoveOutcome::Invalid => {}
            MoveOutcome::Dead => {
                self.num_deaths += 1;
                self.lives = self.lives.consume();
                if self.lives.is_exhausted() {
                    self.status = GameStatus::Lost;
                }
            }
            MoveOutcome::Won => self.status = GameStatus::Won,
        }
    }

    /// Takes back a previously applied move. Deaths and lives stay as they are.
    pub(crate) fn revert(&mut self, result: &MoveResult) {
        if result.is_invalid() {
            return;
        }

        result.revert_on(&mut self.board);
        self.player = result.origin();
        self.num_moves = self.num_moves.saturating_sub(1);

        let gems = u32::from(result.gem_count());
        self.num_gems = self.num_gems.saturating_sub(gems);
        self.score = self.score.saturating_sub(gems);

        if matches!(self.status, GameStatus::Won) {
            self.status = GameStatus::Playing;
        }
    }

    /// Checks a state that did not come from [`GameState::new`], e.g. a deserialized one.
    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;

        if self.board.player_position() != Some(self.player) {
            return Err(GameError::InconsistentState(
                "player position does not match the board",
            ));
        }

        let initial = u32::from(self.board.initial_gem_count());
        let remaining = u32::from(self.board.remaining_gems());
        if self.num_gems > initial || self.num_gems + remaining != initial {
            return Err(GameError::InconsistentState(
                "collected gems do not match the board",
            ));
        }

        if self.move_stack.iter().any(MoveResult::is_invalid) {
            return Err(GameError::InconsistentState("history holds an invalid move"));
        }
        if usize::try_from(self.num_moves).ok() != Some(self.move_stack.len()) {
            return Err(GameError::InconsistentState(
                "move count does not match the history",
            ));
        }

        let on_open_goal = self.player == self.board.goal() && remaining == 0;
        let consistent = match self.status {
            GameStatus::Playing => !self.lives.is_exhausted() && !on_open_goal,
            GameStatus::Won => on_open_goal,
            GameStatus::Lost => self.lives.is_exhausted(),
        };
        if !consistent {
            return Err(GameError::InconsistentState(
                "status does not match lives or board",
            ));
        }

        self.validate_history()
    }

    /// Undoes the whole history on a copy of the board. Every recorded change must find the
    /// cell it wrote, and the walk must end on the untouched level.
    fn validate_history(&self) -> Result<()> {
        let mut board = self.board.clone();
        let mut player = self.player;

        for result in self.move_stack.iter().rev() {
            if result.new_position() != player {
                return Err(GameError::InconsistentState(
                    "history does not end where the player stands",
                ));
            }

            let taken = result
                .changes()
                .iter()
                .filter(|change| change.before == Cell::Gem)
                .count();
            if taken != usize::from(result.gem_count()) {
                return Err(GameError::InconsistentState(
                    "history gems do not match its cell changes",
                ));
            }

            for change in result.changes().iter().rev() {
                board.validate_coords(change.coords)?;
                if board[change.coords] != change.after {
                    return Err(GameError::InconsistentState(
                        "history does not match the board",
                    ));
                }
                board.set(change.coords, change.before);
            }

            if board.validate().is_err() || board.player_position() != Some(result.origin()) {
                return Err(GameError::InconsistentState(
                    "undoing the history breaks the board",
                ));
            }
            player = result.origin();
        }

        if player != board.start() || board.remaining_gems() != board.initial_gem_count() {
            return Err(GameError::InconsistentState(
                "history does not start from the level",
            ));
        }
        Ok(())
    }
}
