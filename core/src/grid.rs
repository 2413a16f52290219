//! Immutable adjacency of the square tile grid.

use crate::{ConfigError, TileIndex};

/// Fixed 4-connected adjacency of a `side × side` grid.
///
/// Neighbor lists are built once and never change. Each list is stored in
/// ascending tile order (up, left, right, down), which is the discovery order
/// every breadth-first search over the grid inherits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    side: u32,
    adjacency: Vec<Vec<TileIndex>>,
}

impl GridGraph {
    /// Builds the adjacency for every tile of a grid with the provided side length.
    pub fn new(side: u32) -> Result<Self, ConfigError> {
        if side == 0 {
            return Err(ConfigError::ZeroSide);
        }

        let tile_count = side
            .checked_mul(side)
            .ok_or(ConfigError::SideTooLarge { side })?;
        let adjacency = (0..tile_count)
            .map(|index| neighbors(TileIndex::new(index), side).collect())
            .collect();

        Ok(Self { side, adjacency })
    }

    /// Number of tiles along one edge of the grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Total number of tiles contained in the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Reports whether the tile lies within the grid.
    #[must_use]
    pub fn contains(&self, tile: TileIndex) -> bool {
        tile.slot() < self.adjacency.len()
    }

    /// Orthogonal in-bounds neighbors of the tile; empty for tiles outside the grid.
    #[must_use]
    pub fn neighbors_of(&self, tile: TileIndex) -> &[TileIndex] {
        self.adjacency
            .get(tile.slot())
            .map_or(&[], |neighbors| neighbors.as_slice())
    }

    /// Iterator over every tile in ascending order.
    pub fn tiles(&self) -> impl Iterator<Item = TileIndex> {
        (0..self.side * self.side).map(TileIndex::new)
    }
}

fn neighbors(tile: TileIndex, side: u32) -> impl Iterator<Item = TileIndex> {
    let mut candidates = [None; 4];
    let mut count = 0;
    let row = tile.row(side);
    let column = tile.column(side);

    if row > 0 {
        candidates[count] = Some(TileIndex::new(tile.get() - side));
        count += 1;
    }

    if column > 0 {
        candidates[count] = Some(TileIndex::new(tile.get() - 1));
        count += 1;
    }

    if column + 1 < side {
        candidates[count] = Some(TileIndex::new(tile.get() + 1));
        count += 1;
    }

    if row + 1 < side {
        candidates[count] = Some(TileIndex::new(tile.get() + side));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}
