//! Messages and file formats shared between the game engine and whatever presents it.

pub use error::*;
pub use event::*;
pub use save::*;

mod error;
mod event;
mod save;
