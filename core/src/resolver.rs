use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Terminal classification of a single resolved move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player slid until blocked and survived.
    Alive,
    /// The player ran into a mine and respawns at the start cell.
    Dead,
    /// The player reached the goal with every gem collected.
    Won,
    /// The player could not move at all; nothing changed.
    Invalid,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Alive => true,
            Dead => true,
            Won => true,
            Invalid => false,
        }
    }
}

/// Content of one cell before and after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub before: Cell,
    pub after: Cell,
}

/// Everything a move did, with enough detail to take it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    direction: Direction,
    outcome: MoveOutcome,
    origin: Coord2,
    path: Vec<Coord2>,
    stopped_at: Coord2,
    new_position: Coord2,
    collected: Vec<Coord2>,
    changes: Vec<CellChange>,
}

impl MoveResult {
    fn invalid(direction: Direction, origin: Coord2) -> Self {
        Self {
            direction,
            outcome: MoveOutcome::Invalid,
            origin,
            path: Vec::new(),
            stopped_at: origin,
            new_position: origin,
            collected: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn outcome(&self) -> MoveOutcome {
        self.outcome
    }

    pub fn is_invalid(&self) -> bool {
        !self.outcome.has_update()
    }

    /// Player position before the move.
    pub fn origin(&self) -> Coord2 {
        self.origin
    }

    /// Cells entered during the slide, in order. Empty for invalid moves.
    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    /// Cell where the slide ended; the mine cell for a fatal move.
    pub fn stopped_at(&self) -> Coord2 {
        self.stopped_at
    }

    /// Player position after the move, which is the start cell after a death.
    pub fn new_position(&self) -> Coord2 {
        self.new_position
    }

    pub fn collected_gems(&self) -> &[Coord2] {
        &self.collected
    }

    pub fn gem_count(&self) -> CellCount {
        self.collected.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    pub(crate) fn apply_to(&self, board: &mut Board) {
        for change in &self.changes {
            board.set(change.coords, change.after);
        }
    }

    pub(crate) fn revert_on(&self, board: &mut Board) {
        for change in self.changes.iter().rev() {
            board.set(change.coords, change.before);
        }
    }
}

/// Slides the player from `position` towards `direction` without touching `board`.
///
/// The slide collects gems on the way, stops on a mine, stops on the goal once no gem is
/// left, and otherwise runs until the next cell is a wall or off the board.
pub fn resolve(board: &Board, position: Coord2, direction: Direction) -> MoveResult {
    let size = board.size();
    let mut remaining_gems = board.remaining_gems();
    let mut current = position;
    let mut path = Vec::new();
    let mut collected = Vec::new();
    let mut outcome = MoveOutcome::Alive;

    while let Some(next) = step(current, direction, size) {
        let cell = board[next];
        if cell.is_wall() {
            break;
        }
        current = next;
        path.push(next);
        log::trace!("slide {direction} through {next:?} ({cell:?})");

        match cell {
            Cell::Gem => {
                collected.push(next);
                remaining_gems = remaining_gems.saturating_sub(1);
            }
            Cell::Mine => {
                outcome = MoveOutcome::Dead;
                break;
            }
            Cell::Goal if remaining_gems == 0 => {
                outcome = MoveOutcome::Won;
                break;
            }
            Cell::Goal | Cell::Empty | Cell::Player | Cell::Wall => {}
        }
    }

    if path.is_empty() {
        return MoveResult::invalid(direction, position);
    }

    let new_position = match outcome {
        MoveOutcome::Dead => board.start(),
        _ => current,
    };

    let mut after = BTreeMap::new();
    after.insert(position, board.vacated_content(position));
    for &gem in &collected {
        after.insert(gem, Cell::Empty);
    }
    after.insert(new_position, Cell::Player);

    let changes = after
        .into_iter()
        .map(|(coords, after)| CellChange {
            coords,
            before: board[coords],
            after,
        })
        .filter(|change| change.before != change.after)
        .collect();

    MoveResult {
        direction,
        outcome,
        origin: position,
        path,
        stopped_at: current,
        new_position,
        collected,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Level::parse(text).unwrap().board
    }

    #[test]
    fn slides_until_wall() {
        let board = board("1 5\n1\nP..WX\n");

        let result = resolve(&board, (0, 0), Direction::Right);

        assert_eq!(result.outcome(), MoveOutcome::Alive);
        assert_eq!(result.path(), &[(0, 1), (0, 2)]);
        assert_eq!(result.new_position(), (0, 2));
        assert_eq!(
            result.changes(),
            &[
                CellChange {
                    coords: (0, 0),
                    before: Cell::Player,
                    after: Cell::Empty
                },
                CellChange {
                    coords: (0, 2),
                    before: Cell::Empty,
                    after: Cell::Player
                },
            ]
        );
    }

    #[test]
    fn slides_until_board_edge() {
        let board = board("4 2\n1\nPG\n..\n..\n.X\n");

        let result = resolve(&board, (0, 0), Direction::Down);

        assert_eq!(result.outcome(), MoveOutcome::Alive);
        assert_eq!(result.new_position(), (3, 0));
        assert_eq!(result.path(), &[(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn blocked_first_step_is_invalid() {
        let board = board("2 2\n1\nPW\nX.\n");

        for direction in [Direction::Up, Direction::Left, Direction::Right] {
            let result = resolve(&board, (0, 0), direction);
            assert_eq!(result.outcome(), MoveOutcome::Invalid);
            assert!(result.is_invalid());
            assert!(result.path().is_empty());
            assert!(result.changes().is_empty());
            assert_eq!(result.new_position(), (0, 0));
        }
    }

    #[test]
    fn resolving_again_from_stop_is_invalid() {
        let mut board = board("3 5\n1\nP..WG\n...W.\n..X..\n");

        for direction in Direction::ALL {
            let start = board.player_position().unwrap();
            let first = resolve(&board, start, direction);
            first.apply_to(&mut board);

            let again = resolve(&board, first.new_position(), direction);
            assert_eq!(again.outcome(), MoveOutcome::Invalid, "{direction}");
        }
    }

    #[test]
    fn collects_gems_and_keeps_sliding() {
        let board = board("1 6\n1\nPG.G.X\n");

        let result = resolve(&board, (0, 0), Direction::Right);

        assert_eq!(result.outcome(), MoveOutcome::Won);
        assert_eq!(result.collected_gems(), &[(0, 1), (0, 3)]);
        assert_eq!(result.gem_count(), 2);
        assert_eq!(result.new_position(), (0, 5));
    }

    #[test]
    fn goal_is_passable_while_gems_remain() {
        let board = board("2 4\n1\nP.X.\nG...\n");

        let result = resolve(&board, (0, 0), Direction::Right);

        assert_eq!(result.outcome(), MoveOutcome::Alive);
        assert_eq!(result.new_position(), (0, 3));
        assert!(result.changes().iter().all(|change| change.coords != (0, 2)));
    }

    #[test]
    fn stopping_on_goal_with_gems_left_keeps_goal_underneath() {
        let mut board = board("2 3\n1\nP.X\nG..\n");

        let onto = resolve(&board, (0, 0), Direction::Right);
        assert_eq!(onto.outcome(), MoveOutcome::Alive);
        assert_eq!(onto.new_position(), (0, 2));
        onto.apply_to(&mut board);
        assert_eq!(board[(0, 2)], Cell::Player);

        let off = resolve(&board, (0, 2), Direction::Down);
        off.apply_to(&mut board);
        assert_eq!(board[(0, 2)], Cell::Goal);
        assert_eq!(board[(1, 2)], Cell::Player);
    }

    #[test]
    fn mine_kills_and_respawns_at_start() {
        let mut board = board("2 4\n1\n.PGM\n...X\n");

        let result = resolve(&board, (0, 1), Direction::Right);

        assert_eq!(result.outcome(), MoveOutcome::Dead);
        assert_eq!(result.stopped_at(), (0, 3));
        assert_eq!(result.new_position(), (0, 1));
        assert_eq!(result.collected_gems(), &[(0, 2)]);

        result.apply_to(&mut board);
        assert_eq!(board[(0, 1)], Cell::Player);
        assert_eq!(board[(0, 2)], Cell::Empty);
        assert_eq!(board[(0, 3)], Cell::Mine);
    }

    #[test]
    fn revert_restores_board() {
        let mut board = board("2 5\n1\nPG.GX\nM....\n");
        let original = board.clone();

        let result = resolve(&board, (0, 0), Direction::Right);
        result.apply_to(&mut board);
        assert_ne!(board, original);

        result.revert_on(&mut board);
        assert_eq!(board, original);
    }

    #[test]
    fn remaining_gems_follow_apply_and_revert() {
        let mut board = board("2 6\n1\nPG.GMX\nG.....\n");
        assert_eq!(board.remaining_gems(), 3);

        let result = resolve(&board, (0, 0), Direction::Right);
        assert_eq!(result.outcome(), MoveOutcome::Dead);
        result.apply_to(&mut board);
        assert_eq!(board.remaining_gems(), 1);

        result.revert_on(&mut board);
        assert_eq!(board.remaining_gems(), 3);
        assert!(board.validate().is_ok());
    }
}
