//! Game configuration assembled from an optional TOML file and flag overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use pursuit_core::{EvasionKind, GameConfig};

/// Evasion strategies selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum EvasionArg {
    /// Uniform choice among legal destinations.
    Random,
    /// Maximise the distance to the nearest pursuer.
    Greedy,
}

impl From<EvasionArg> for EvasionKind {
    fn from(value: EvasionArg) -> Self {
        match value {
            EvasionArg::Random => EvasionKind::Random,
            EvasionArg::Greedy => EvasionKind::Greedy,
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) side: Option<u32>,
    pub(crate) move_range: Option<u32>,
    pub(crate) max_rounds: Option<u32>,
    pub(crate) evasion: Option<EvasionArg>,
    pub(crate) seed: Option<u64>,
}

/// Reads the configuration file, if any, and applies the overrides.
pub(crate) fn load(path: Option<&Path>, overrides: Overrides) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(side) = overrides.side {
        config.side = side;
    }
    if let Some(move_range) = overrides.move_range {
        config.move_range = move_range;
    }
    if let Some(max_rounds) = overrides.max_rounds {
        config.max_rounds = max_rounds;
    }
    if let Some(evasion) = overrides.evasion {
        config.evasion = evasion.into();
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }

    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("config is not valid TOML")
}

#[cfg(test)]
mod tests {
    use pursuit_core::TileIndex;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = parse("max_rounds = 4\nevasion = \"greedy\"\n").expect("parses");
        assert_eq!(
            config,
            GameConfig {
                max_rounds: 4,
                evasion: EvasionKind::Greedy,
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn parses_piece_starts() {
        let config = parse(
            "side = 5\npursuer_starts = [0, 4]\nevader_start = 22\nmove_range = 1\n",
        )
        .expect("parses");
        assert_eq!(config.side, 5);
        assert_eq!(config.pursuer_starts, [TileIndex::new(0), TileIndex::new(4)]);
        assert_eq!(config.evader_start, TileIndex::new(22));
        assert_eq!(config.move_range, 1);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = load(
            None,
            Overrides {
                max_rounds: Some(7),
                evasion: Some(EvasionArg::Greedy),
                seed: Some(9),
                ..Overrides::default()
            },
        )
        .expect("valid");
        assert_eq!(config.max_rounds, 7);
        assert_eq!(config.evasion, EvasionKind::Greedy);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let result = load(
            None,
            Overrides {
                side: Some(2),
                ..Overrides::default()
            },
        );
        assert!(result.is_err(), "default starts do not fit a 2x2 grid");
    }
}
