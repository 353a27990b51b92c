use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board has no player")]
    MissingPlayer,
    #[error("Board has more than one player")]
    MultiplePlayers,
    #[error("Board has no goal")]
    MissingGoal,
    #[error("Board has more than one goal")]
    MultipleGoals,
    #[error("Invalid level at line {line}: {reason}")]
    InvalidLevel { line: usize, reason: &'static str },
    #[error("Inconsistent game state: {0}")]
    InconsistentState(&'static str),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No moves to undo")]
    EmptyHistory,
}

pub type Result<T> = core::result::Result<T, GameError>;
