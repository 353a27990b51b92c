use std::fmt;

use inertia_core::{GameController, GameStatus, Lives, MoveResult, Statistics, UndoOutcome};
use serde::{Deserialize, Serialize};

/// Notification sent to the presentation layer after every handled request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Moved {
        result: MoveResult,
        statistics: Statistics,
        status: GameStatus,
    },
    Undone {
        undone: MoveResult,
        statistics: Statistics,
        status: GameStatus,
    },
    NothingToUndo,
}

impl GameEvent {
    /// Event for a move the controller has just processed.
    pub fn moved(game: &GameController, result: MoveResult) -> Self {
        let state = game.game_state();
        Self::Moved {
            result,
            statistics: state.statistics(),
            status: state.status(),
        }
    }

    /// Event for an undo the controller has just processed.
    pub fn undone(game: &GameController, outcome: UndoOutcome) -> Self {
        match outcome {
            UndoOutcome::NothingToUndo => Self::NothingToUndo,
            UndoOutcome::Undone { undone, status } => Self::Undone {
                undone,
                statistics: game.game_state().statistics(),
                status,
            },
        }
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        match self {
            Self::Moved { statistics, .. } | Self::Undone { statistics, .. } => Some(statistics),
            Self::NothingToUndo => None,
        }
    }

    pub fn status(&self) -> Option<GameStatus> {
        match self {
            Self::Moved { status, .. } | Self::Undone { status, .. } => Some(*status),
            Self::NothingToUndo => None,
        }
    }
}

/// Display texts of the statistics panel, in panel order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatisticsLabels(pub Statistics);

impl StatisticsLabels {
    pub fn gems(&self) -> String {
        format!("Gems: {}", self.0.num_gems)
    }

    pub fn moves(&self) -> String {
        format!("Move: {}", self.0.num_moves)
    }

    pub fn undoes(&self) -> String {
        format!("Undoes: {}", self.0.num_undoes)
    }

    pub fn deaths(&self) -> String {
        format!("Deaths: {}", self.0.num_deaths)
    }

    pub fn lives(&self) -> String {
        match self.0.lives {
            Lives::Unlimited => "Lives: Unlimited".to_owned(),
            Lives::Limited(count) => format!("Lives: {count}"),
        }
    }

    pub fn score(&self) -> String {
        format!("Score: {}", self.0.score)
    }

    pub fn all(&self) -> [String; 6] {
        [
            self.gems(),
            self.moves(),
            self.undoes(),
            self.deaths(),
            self.lives(),
            self.score(),
        ]
    }
}

impl fmt::Display for StatisticsLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.all().join("  "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inertia_core::{Direction, GameConfig, Level};

    fn game(text: &str) -> GameController {
        GameController::from_level(Level::parse(text).unwrap(), &GameConfig::default())
    }

    #[test]
    fn labels_match_panel_texts() {
        let stats = Statistics {
            num_gems: 1,
            num_moves: 2,
            num_undoes: 3,
            num_deaths: 4,
            lives: Lives::Limited(5),
            score: 6,
        };

        assert_eq!(
            StatisticsLabels(stats).all(),
            [
                "Gems: 1", "Move: 2", "Undoes: 3", "Deaths: 4", "Lives: 5", "Score: 6"
            ]
        );

        let unlimited = Statistics {
            lives: Lives::Unlimited,
            ..stats
        };
        assert_eq!(StatisticsLabels(unlimited).lives(), "Lives: Unlimited");
    }

    #[test]
    fn events_carry_post_request_statistics() {
        let mut game = game("1 5\nunlimited\nPG..X\n");

        let result = game.process_move(Direction::Right).unwrap();
        let moved = GameEvent::moved(&game, result);
        assert_eq!(moved.status(), Some(GameStatus::Won));
        assert_eq!(moved.statistics().map(|s| s.num_gems), Some(1));

        let outcome = game.process_undo().unwrap();
        let undone = GameEvent::undone(&game, outcome);
        assert_eq!(undone.status(), Some(GameStatus::Playing));
        assert_eq!(undone.statistics().map(|s| (s.num_gems, s.num_undoes)), Some((0, 1)));

        let outcome = game.process_undo().unwrap();
        assert_eq!(GameEvent::undone(&game, outcome), GameEvent::NothingToUndo);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(GameEvent::NothingToUndo).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "nothing_to_undo" }));
    }
}
