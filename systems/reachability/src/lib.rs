#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first reachability queries over the tile grid.
//!
//! Every query allocates its own scratch annotations, so visited flags and
//! distances from one search can never leak into the next.

use std::collections::VecDeque;

use pursuit_core::{GridGraph, TileIndex};

/// Tiles a piece standing on `origin` may move to in one turn.
///
/// The search expands through tiles at distance `1..=max_distance` and never
/// visits a tile listed in `excluded`, so excluded tiles are absent from the
/// result and cannot be walked through. The origin itself is never returned.
/// Tiles are listed in discovery order.
#[must_use]
pub fn reachable_from(
    grid: &GridGraph,
    origin: TileIndex,
    max_distance: u32,
    excluded: &[TileIndex],
) -> Vec<TileIndex> {
    let mut reachable = Vec::new();
    if !grid.contains(origin) {
        return reachable;
    }

    let mut scratch = SearchScratch::new(grid.tile_count());
    let mut queue = VecDeque::new();
    scratch.visit(origin, 0);
    queue.push_back(origin);

    while let Some(tile) = queue.pop_front() {
        let Some(distance) = scratch.distance(tile) else {
            continue;
        };
        if distance >= max_distance {
            continue;
        }

        for &neighbor in grid.neighbors_of(tile) {
            if scratch.is_visited(neighbor) || excluded.contains(&neighbor) {
                continue;
            }

            scratch.visit(neighbor, distance + 1);
            reachable.push(neighbor);
            queue.push_back(neighbor);
        }
    }

    reachable
}

/// Number of orthogonal steps between two tiles, ignoring occupancy.
///
/// The search stops as soon as `target` is dequeued. Returns `None` when
/// either tile lies outside the grid or no path exists.
#[must_use]
pub fn shortest_distance(grid: &GridGraph, origin: TileIndex, target: TileIndex) -> Option<u32> {
    if !grid.contains(origin) || !grid.contains(target) {
        return None;
    }

    let mut scratch = SearchScratch::new(grid.tile_count());
    let mut queue = VecDeque::new();
    scratch.visit(origin, 0);
    queue.push_back(origin);

    while let Some(tile) = queue.pop_front() {
        let distance = scratch.distance(tile)?;
        if tile == target {
            return Some(distance);
        }

        for &neighbor in grid.neighbors_of(tile) {
            if scratch.is_visited(neighbor) {
                continue;
            }

            scratch.visit(neighbor, distance + 1);
            queue.push_back(neighbor);
        }
    }

    None
}

/// Per-search annotations indexed by tile.
///
/// An unvisited tile has no distance.
#[derive(Debug)]
struct SearchScratch {
    distances: Vec<Option<u32>>,
}

impl SearchScratch {
    fn new(tile_count: usize) -> Self {
        Self {
            distances: vec![None; tile_count],
        }
    }

    fn visit(&mut self, tile: TileIndex, distance: u32) {
        if let Some(slot) = self.distances.get_mut(tile.slot()) {
            *slot = Some(distance);
        }
    }

    fn is_visited(&self, tile: TileIndex) -> bool {
        self.distance(tile).is_some()
    }

    fn distance(&self, tile: TileIndex) -> Option<u32> {
        self.distances.get(tile.slot()).copied().flatten()
    }
}
