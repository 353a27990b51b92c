use std::fs;
use std::path::Path;

use inertia_core::{GameState, Level};
use serde::{Deserialize, Serialize};

use crate::*;

/// Current version of the save file envelope.
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct SaveFileRef<'a> {
    version: u32,
    state: &'a GameState,
}

#[derive(Deserialize)]
struct SaveFile {
    version: u32,
    state: serde_json::Value,
}

pub fn to_json(state: &GameState) -> Result<String> {
    let file = SaveFileRef {
        version: SAVE_VERSION,
        state,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parses a save file and checks that the game it holds is consistent.
pub fn from_json(text: &str) -> Result<GameState> {
    let file: SaveFile = serde_json::from_str(text)?;
    if file.version != SAVE_VERSION {
        return Err(SerializationError::UnsupportedVersion {
            found: file.version,
            expected: SAVE_VERSION,
        });
    }

    let state: GameState = serde_json::from_value(file.state)?;
    if let Err(err) = state.validate() {
        log::warn!("Rejecting saved game: {err}");
        return Err(err.into());
    }
    Ok(state)
}

pub fn save(state: &GameState, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(state)?)?;
    log::info!("Saved game to {}", path.display());
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<GameState> {
    let path = path.as_ref();
    let state = from_json(&fs::read_to_string(path)?)?;
    log::info!(
        "Loaded game from {} ({} moves, {:?})",
        path.display(),
        state.num_moves(),
        state.status()
    );
    Ok(state)
}

pub fn load_level(path: impl AsRef<Path>) -> Result<Level> {
    let path = path.as_ref();
    let level = Level::parse(&fs::read_to_string(path)?)?;
    log::info!(
        "Loaded level {} ({}x{}, {} gems)",
        path.display(),
        level.board.num_rows(),
        level.board.num_cols(),
        level.board.initial_gem_count()
    );
    Ok(level)
}
