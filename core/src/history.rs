use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Moves applied so far, most recent last, plus a running count of undos.
///
/// Only moves that changed something are recorded. The undo count only ever grows: pushing
/// new moves after an undo does not reset it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStack {
    moves: Vec<MoveResult>,
    pop_count: u32,
}

impl MoveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `result`, returning whether it was kept. Invalid moves are dropped.
    pub fn push(&mut self, result: MoveResult) -> bool {
        if result.is_invalid() {
            log::debug!("not recording invalid move {}", result.direction());
            return false;
        }
        self.moves.push(result);
        true
    }

    pub fn pop(&mut self) -> Result<MoveResult> {
        let result = self.moves.pop().ok_or(GameError::EmptyHistory)?;
        self.pop_count += 1;
        Ok(result)
    }

    pub fn peek(&self) -> Result<&MoveResult> {
        self.moves.last().ok_or(GameError::EmptyHistory)
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Total number of successful undos.
    pub fn pop_count(&self) -> u32 {
        self.pop_count
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MoveResult> {
        self.moves.iter()
    }
}
