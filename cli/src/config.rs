use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use inertia_core::{GameConfig, Lives};

/// Reads a TOML rules file such as `lives = 3` or `lives = "unlimited"`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<GameConfig> {
    Ok(toml::from_str(text)?)
}

/// Command line flags win over the config file.
pub fn apply_overrides(mut config: GameConfig, lives: Option<u32>, unlimited: bool) -> GameConfig {
    if unlimited {
        config.lives = Some(Lives::Unlimited);
    } else if let Some(count) = lives {
        config.lives = Some(Lives::Limited(count));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_unlimited_lives() {
        assert_eq!(
            parse_config("lives = 3").unwrap(),
            GameConfig::with_lives(Lives::Limited(3))
        );
        assert_eq!(
            parse_config("lives = \"unlimited\"").unwrap(),
            GameConfig::with_lives(Lives::Unlimited)
        );
        assert_eq!(parse_config("").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_bad_lives() {
        assert!(parse_config("lives = \"lots\"").is_err());
        assert!(parse_config("lives = -2").is_err());
    }

    #[test]
    fn flags_override_file() {
        let file = GameConfig::with_lives(Lives::Limited(3));

        assert_eq!(
            apply_overrides(file, None, true).lives,
            Some(Lives::Unlimited)
        );
        assert_eq!(
            apply_overrides(file, Some(9), false).lives,
            Some(Lives::Limited(9))
        );
        assert_eq!(apply_overrides(file, None, false), file);
    }
}
