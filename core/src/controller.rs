use serde::{Deserialize, Serialize};

use crate::*;

/// What an undo request did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOutcome {
    /// History was empty; the game is untouched.
    NothingToUndo,
    /// `undone` was taken back and the game is now in `status`.
    Undone {
        undone: MoveResult,
        status: GameStatus,
    },
}

impl UndoOutcome {
    pub const fn has_update(&self) -> bool {
        match self {
            Self::NothingToUndo => false,
            Self::Undone { .. } => true,
        }
    }
}

/// Single entry point for moves and undos of one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameController {
    state: GameState,
}

impl GameController {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn from_level(level: Level, config: &GameConfig) -> Self {
        Self::new(GameState::from_level(level, config))
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn into_game_state(self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_finished(&self) -> bool {
        self.state.status().is_finished()
    }

    /// Most recent recorded move, the one the next undo would take back.
    pub fn last_move(&self) -> Option<&MoveResult> {
        self.state.move_stack().peek().ok()
    }

    pub fn process_move(&mut self, direction: Direction) -> Result<MoveResult> {
        self.check_not_finished()?;

        let result = resolve(self.state.game_board(), self.state.player_position(), direction);
        log::debug!(
            "move {direction} from {:?}: {:?}, now at {:?}",
            result.origin(),
            result.outcome(),
            result.new_position()
        );

        if result.outcome().has_update() {
            self.state.apply(&result);
            self.state.move_stack_mut().push(result.clone());
        }

        Ok(result)
    }

    pub fn process_undo(&mut self) -> Result<UndoOutcome> {
        if matches!(self.state.status(), GameStatus::Lost) {
            log::warn!("undo rejected, game is lost");
            return Err(GameError::AlreadyEnded);
        }

        let undone = match self.state.move_stack_mut().pop() {
            Ok(undone) => undone,
            Err(GameError::EmptyHistory) => {
                log::debug!("nothing to undo");
                return Ok(UndoOutcome::NothingToUndo);
            }
            Err(err) => return Err(err),
        };

        self.state.revert(&undone);
        log::debug!(
            "undo {} back to {:?}, {} undos so far",
            undone.direction(),
            undone.origin(),
            self.state.move_stack().pop_count()
        );

        Ok(UndoOutcome::Undone {
            undone,
            status: self.state.status(),
        })
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.status().is_finished() {
            log::warn!("move rejected, game already {:?}", self.state.status());
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
