//! Fixed configuration consumed when a game is constructed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TileIndex;

const DEFAULT_SIDE: u32 = 8;
const DEFAULT_MOVE_RANGE: u32 = 2;
const DEFAULT_MAX_ROUNDS: u32 = 10;
const DEFAULT_EVASION_SEED: u64 = 0x5eed;

/// Strategy the evader uses to pick its destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvasionKind {
    /// Uniform choice among the evader's legal destinations.
    #[default]
    Random,
    /// Maximises the distance to the nearest pursuer.
    Greedy,
}

/// Constants describing the board, the pieces, and the evader's behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of tiles along each edge of the square grid.
    pub side: u32,
    /// Maximum breadth-first distance a piece may travel in one move.
    pub move_range: u32,
    /// Number of rounds the evader must survive.
    pub max_rounds: u32,
    /// Starting tiles of the two pursuers.
    pub pursuer_starts: [TileIndex; 2],
    /// Starting tile of the evader.
    pub evader_start: TileIndex,
    /// Strategy driving the evader.
    pub evasion: EvasionKind,
    /// Seed for strategies that draw random numbers.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            move_range: DEFAULT_MOVE_RANGE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            pursuer_starts: [TileIndex::new(0), TileIndex::new(DEFAULT_SIDE - 1)],
            evader_start: TileIndex::new(DEFAULT_SIDE * (DEFAULT_SIDE - 1) + DEFAULT_SIDE / 2),
            evasion: EvasionKind::Random,
            seed: DEFAULT_EVASION_SEED,
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side == 0 {
            return Err(ConfigError::ZeroSide);
        }
        let tile_count = self
            .side
            .checked_mul(self.side)
            .ok_or(ConfigError::SideTooLarge { side: self.side })?;
        if self.move_range == 0 {
            return Err(ConfigError::ZeroMoveRange);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroMaxRounds);
        }

        let starts = [
            self.pursuer_starts[0],
            self.pursuer_starts[1],
            self.evader_start,
        ];
        for (position, tile) in starts.iter().enumerate() {
            if tile.get() >= tile_count {
                return Err(ConfigError::StartOutOfBounds {
                    tile: *tile,
                    tile_count,
                });
            }
            if starts[..position].contains(tile) {
                return Err(ConfigError::SharedStart { tile: *tile });
            }
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid must contain at least one tile.
    #[error("grid side length must be positive")]
    ZeroSide,
    /// The grid does not fit the tile index range.
    #[error("grid side length {side} overflows the tile index range")]
    SideTooLarge {
        /// Requested side length.
        side: u32,
    },
    /// Pieces would never be able to move.
    #[error("move range must be positive")]
    ZeroMoveRange,
    /// The game would end before the first round.
    #[error("max rounds must be positive")]
    ZeroMaxRounds,
    /// A starting tile lies outside the grid.
    #[error("starting tile {} is outside a grid of {tile_count} tiles", .tile.get())]
    StartOutOfBounds {
        /// Offending starting tile.
        tile: TileIndex,
        /// Number of tiles on the grid.
        tile_count: u32,
    },
    /// Two pieces were configured to start on the same tile.
    #[error("more than one piece starts on tile {}", .tile.get())]
    SharedStart {
        /// Tile claimed by more than one piece.
        tile: TileIndex,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.evader_start, TileIndex::new(60));
    }

    #[test]
    fn rejects_out_of_bounds_start() {
        let config = GameConfig {
            side: 3,
            pursuer_starts: [TileIndex::new(0), TileIndex::new(2)],
            evader_start: TileIndex::new(9),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds {
                tile: TileIndex::new(9),
                tile_count: 9,
            })
        );
    }

    #[test]
    fn rejects_shared_start() {
        let config = GameConfig {
            pursuer_starts: [TileIndex::new(4), TileIndex::new(4)],
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedStart {
                tile: TileIndex::new(4)
            })
        );
    }

    #[test]
    fn rejects_degenerate_limits() {
        let zero_side = GameConfig {
            side: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero_side.validate(), Err(ConfigError::ZeroSide));

        let zero_range = GameConfig {
            move_range: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero_range.validate(), Err(ConfigError::ZeroMoveRange));

        let zero_rounds = GameConfig {
            max_rounds: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero_rounds.validate(), Err(ConfigError::ZeroMaxRounds));
    }

    #[test]
    fn evasion_kind_uses_snake_case_names() {
        use serde::de::{
            value::{Error as ValueError, StrDeserializer},
            IntoDeserializer,
        };

        let deserializer: StrDeserializer<'_, ValueError> = "greedy".into_deserializer();
        let parsed = EvasionKind::deserialize(deserializer).expect("known strategy name");
        assert_eq!(parsed, EvasionKind::Greedy);
    }
}
