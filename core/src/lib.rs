#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use error::*;
pub use history::*;
pub use level::*;
pub use resolver::*;
pub use state::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod error;
mod history;
mod level;
mod resolver;
mod state;
mod types;

/// Session settings that override what a level file declares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub lives: Option<Lives>,
}

impl GameConfig {
    pub const fn with_lives(lives: Lives) -> Self {
        Self { lives: Some(lives) }
    }
}
