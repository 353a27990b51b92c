use anyhow::{Result, bail};
use inertia_core::Direction;

/// One scripted request: a move or an undo.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Move(Direction),
    Undo,
}

/// Parses a move script: `U`/`D`/`L`/`R` for moves, `Z` for undo, whitespace ignored.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(index, ch)| match ch {
            'Z' | 'z' => Ok(Step::Undo),
            _ => match Direction::from_char(ch) {
                Some(direction) => Ok(Step::Move(direction)),
                None => bail!("unknown step {ch:?} at position {}", index + 1),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_undos() {
        let steps = parse_script("R d\tz L u").unwrap();

        assert_eq!(
            steps,
            vec![
                Step::Move(Direction::Right),
                Step::Move(Direction::Down),
                Step::Undo,
                Step::Move(Direction::Left),
                Step::Move(Direction::Up),
            ]
        );
    }

    #[test]
    fn empty_script_is_fine() {
        assert!(parse_script("  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_steps() {
        let err = parse_script("RRX").unwrap_err();

        assert!(err.to_string().contains("position 3"));
    }
}
