//! Positions of the three pieces.

use pursuit_core::{PieceId, PursuerId, TileIndex};

/// Current and starting tiles of both pursuers and the evader.
///
/// Only the world mutates a piece set; everything else reads it through
/// the query module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceSet {
    starts: Positions,
    current: Positions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Positions {
    pursuers: [TileIndex; 2],
    evader: TileIndex,
}

impl Positions {
    fn tile(&self, piece: PieceId) -> TileIndex {
        match piece {
            PieceId::Pursuer(pursuer) => self.pursuers[pursuer.index()],
            PieceId::Evader => self.evader,
        }
    }
}

impl PieceSet {
    pub(crate) fn new(pursuers: [TileIndex; 2], evader: TileIndex) -> Self {
        let starts = Positions { pursuers, evader };
        Self {
            starts,
            current: starts,
        }
    }

    /// Tile the piece currently occupies.
    #[must_use]
    pub fn tile(&self, piece: PieceId) -> TileIndex {
        self.current.tile(piece)
    }

    /// Tile the piece occupies at the start of every game.
    #[must_use]
    pub fn start(&self, piece: PieceId) -> TileIndex {
        self.starts.tile(piece)
    }

    /// Tile occupied by the given pursuer.
    #[must_use]
    pub fn pursuer(&self, pursuer: PursuerId) -> TileIndex {
        self.current.pursuers[pursuer.index()]
    }

    /// Tiles occupied by both pursuers, in identifier order.
    #[must_use]
    pub fn pursuers(&self) -> [TileIndex; 2] {
        self.current.pursuers
    }

    /// Tile occupied by the evader.
    #[must_use]
    pub fn evader(&self) -> TileIndex {
        self.current.evader
    }

    /// Reports whether a pursuer shares the evader's tile.
    #[must_use]
    pub fn evader_captured(&self) -> bool {
        self.current.pursuers.contains(&self.current.evader)
    }

    /// Moves the piece and returns the tile it left.
    pub(crate) fn relocate(&mut self, piece: PieceId, to: TileIndex) -> TileIndex {
        let slot = match piece {
            PieceId::Pursuer(pursuer) => &mut self.current.pursuers[pursuer.index()],
            PieceId::Evader => &mut self.current.evader,
        };
        std::mem::replace(slot, to)
    }

    pub(crate) fn reset(&mut self) {
        self.current = self.starts;
    }
}
