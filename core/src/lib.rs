#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the pursuit engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing every
//! transition it performed. Systems read the immutable [`GridGraph`] and the
//! piece positions and answer with tile indices; they never mutate the world.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod config;
mod grid;

pub use config::{ConfigError, EvasionKind, GameConfig};
pub use grid::GridGraph;

/// Index of a single tile within the square grid, laid out in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex(u32);

impl TileIndex {
    /// Creates a new tile index wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying row-major index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based row of the tile on a grid with the provided side length.
    #[must_use]
    pub const fn row(&self, side: u32) -> u32 {
        self.0 / side
    }

    /// Zero-based column of the tile on a grid with the provided side length.
    #[must_use]
    pub const fn column(&self, side: u32) -> u32 {
        self.0 % side
    }

    /// Converts the tile into a slot usable for indexing dense per-tile arrays.
    #[must_use]
    pub fn slot(&self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

/// Identifies one of the two pursuing pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PursuerId {
    /// The pursuer listed first in the configuration.
    First,
    /// The pursuer listed second in the configuration.
    Second,
}

impl PursuerId {
    /// Both pursuers in configuration order.
    pub const ALL: [PursuerId; 2] = [PursuerId::First, PursuerId::Second];

    /// Resolves the numeric identifier (`0` or `1`) used by presentation layers.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// Numeric identifier of the pursuer.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The pursuer that is not `self`.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Identifies any of the three pieces on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceId {
    /// One of the pursuing pieces.
    Pursuer(PursuerId),
    /// The evading piece.
    Evader,
}

/// Externally visible state of the turn sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to pick a pursuer.
    Init,
    /// A pursuer is selected and its legal destinations are marked.
    PursuerSelected,
    /// The selected pursuer committed a move; waiting for the turn to end.
    TileSelected,
    /// The evader has responded; waiting for the round to close.
    EvaderTurn,
    /// Transient state entered while the board resets for a new game.
    Restarting,
    /// The game is over; only a restart is accepted.
    End,
}

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A pursuer moved onto the evader's tile.
    PursuersWin,
    /// The evader survived every round.
    EvaderWins,
}

/// Commands that express every action a presentation layer may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Selects a pursuer and marks its legal destinations.
    SelectPursuer {
        /// Pursuer chosen by the player.
        pursuer: PursuerId,
    },
    /// Selects a tile: commits a move while a pursuer is selected, otherwise
    /// acknowledges the previous move.
    SelectTile {
        /// Tile chosen by the player.
        tile: TileIndex,
    },
    /// Acknowledges a committed move without selecting a tile.
    Acknowledge,
    /// Ends the current turn.
    EndTurn,
    /// Restarts a finished game from the initial positions.
    PlayAgain,
}

/// Reasons the evader could not produce a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum EvasionError {
    /// Every tile within range is excluded.
    #[error("no reachable destination from tile {origin:?}")]
    NoReachableTile {
        /// Tile the evader occupied.
        origin: TileIndex,
    },
    /// A distance query found no path between two tiles.
    #[error("tile {target:?} is unreachable from {origin:?}")]
    Unreachable {
        /// Tile the search started from.
        origin: TileIndex,
        /// Tile the search was looking for.
        target: TileIndex,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A pursuer was selected and its legal destinations computed.
    PursuerSelected {
        /// Pursuer that became selected.
        pursuer: PursuerId,
        /// Tile the pursuer occupies.
        origin: TileIndex,
        /// Legal destinations in ascending tile order.
        destinations: Vec<TileIndex>,
    },
    /// A piece moved between two tiles.
    PieceMoved {
        /// Piece that moved.
        piece: PieceId,
        /// Tile occupied before the move.
        from: TileIndex,
        /// Tile occupied after the move.
        to: TileIndex,
    },
    /// The turn sequence entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// A full round completed without capture.
    RoundCompleted {
        /// Number of rounds completed so far.
        round: u32,
    },
    /// The game reached a terminal outcome.
    GameEnded {
        /// Result of the game.
        outcome: Outcome,
    },
    /// A command was not applicable in the active phase and changed nothing.
    CommandIgnored {
        /// Command that was ignored.
        command: Command,
        /// Phase that was active when the command arrived.
        phase: Phase,
    },
    /// The evader could not choose a destination and stayed in place.
    EvaderStranded {
        /// Tile the evader remains on.
        tile: TileIndex,
        /// Why no destination was produced.
        reason: EvasionError,
    },
}
