use inertia_core::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Could not access game file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed game file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported save version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Game file holds an invalid game: {0}")]
    InvalidState(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, SerializationError>;
