#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Strategies that pick the evader's destination.
//!
//! Both strategies implement [`EvasionPolicy`] and only read the grid and the
//! piece positions handed to them. The world commits whatever tile they return.

use std::fmt;

use pursuit_core::{EvasionError, EvasionKind, GridGraph, TileIndex};
use pursuit_system_reachability::{reachable_from, shortest_distance};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Piece positions and limits visible to an evasion strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvasionInputs {
    /// Tile the evader currently occupies.
    pub evader: TileIndex,
    /// Tiles the two pursuers currently occupy.
    pub pursuers: [TileIndex; 2],
    /// Maximum distance the evader may travel this turn.
    pub move_range: u32,
}

/// Chooses the evader's next tile.
pub trait EvasionPolicy: fmt::Debug {
    /// Strategy identifier, used when reporting which policy is active.
    fn kind(&self) -> EvasionKind;

    /// Picks a destination for the evader.
    fn choose(&mut self, grid: &GridGraph, inputs: &EvasionInputs)
        -> Result<TileIndex, EvasionError>;
}

/// Builds the strategy named by `kind`.
///
/// `seed` only affects strategies that draw random numbers.
#[must_use]
pub fn policy_for(kind: EvasionKind, seed: u64) -> Box<dyn EvasionPolicy> {
    match kind {
        EvasionKind::Random => Box::new(RandomEvasion::from_seed(seed)),
        EvasionKind::Greedy => Box::new(GreedyEvasion),
    }
}

/// Tiles the evader may legally move to: within range, with both pursuer
/// tiles excluded from the search.
#[must_use]
pub fn evader_destinations(grid: &GridGraph, inputs: &EvasionInputs) -> Vec<TileIndex> {
    reachable_from(grid, inputs.evader, inputs.move_range, &inputs.pursuers)
}

/// Uniform choice among the evader's legal destinations.
#[derive(Debug, Clone)]
pub struct RandomEvasion {
    rng: ChaCha8Rng,
}

impl RandomEvasion {
    /// Creates a strategy whose choices are fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl EvasionPolicy for RandomEvasion {
    fn kind(&self) -> EvasionKind {
        EvasionKind::Random
    }

    fn choose(
        &mut self,
        grid: &GridGraph,
        inputs: &EvasionInputs,
    ) -> Result<TileIndex, EvasionError> {
        evader_destinations(grid, inputs)
            .choose(&mut self.rng)
            .copied()
            .ok_or(EvasionError::NoReachableTile {
                origin: inputs.evader,
            })
    }
}

/// Moves to the tile whose nearest pursuer is farthest away.
///
/// Candidates are the evader's own tile followed by every tile within range
/// in discovery order, with occupancy ignored. Ties keep the earliest
/// candidate, so staying put wins any tie it takes part in.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyEvasion;

impl EvasionPolicy for GreedyEvasion {
    fn kind(&self) -> EvasionKind {
        EvasionKind::Greedy
    }

    fn choose(
        &mut self,
        grid: &GridGraph,
        inputs: &EvasionInputs,
    ) -> Result<TileIndex, EvasionError> {
        let candidates = std::iter::once(inputs.evader).chain(reachable_from(
            grid,
            inputs.evader,
            inputs.move_range,
            &[],
        ));

        let mut best: Option<(TileIndex, u32)> = None;
        for candidate in candidates {
            let clearance = nearest_pursuer_distance(grid, candidate, &inputs.pursuers)?;
            if best.map_or(true, |(_, current)| clearance > current) {
                best = Some((candidate, clearance));
            }
        }

        best.map(|(tile, _)| tile)
            .ok_or(EvasionError::NoReachableTile {
                origin: inputs.evader,
            })
    }
}

fn nearest_pursuer_distance(
    grid: &GridGraph,
    tile: TileIndex,
    pursuers: &[TileIndex; 2],
) -> Result<u32, EvasionError> {
    let mut nearest = u32::MAX;
    for &pursuer in pursuers {
        let distance = shortest_distance(grid, tile, pursuer).ok_or(EvasionError::Unreachable {
            origin: tile,
            target: pursuer,
        })?;
        nearest = nearest.min(distance);
    }
    Ok(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(index: u32) -> TileIndex {
        TileIndex::new(index)
    }

    fn inputs(evader: u32, pursuers: [u32; 2], move_range: u32) -> EvasionInputs {
        EvasionInputs {
            evader: tile(evader),
            pursuers: [tile(pursuers[0]), tile(pursuers[1])],
            move_range,
        }
    }

    #[test]
    fn greedy_escapes_to_the_far_corner() {
        let grid = GridGraph::new(3).expect("grid");
        let choice = GreedyEvasion
            .choose(&grid, &inputs(4, [1, 3], 2))
            .expect("destination");
        assert_eq!(choice, tile(8));
    }

    #[test]
    fn greedy_stays_put_when_no_candidate_improves() {
        let grid = GridGraph::new(5).expect("grid");
        let choice = GreedyEvasion
            .choose(&grid, &inputs(0, [24, 23], 1))
            .expect("destination");
        assert_eq!(choice, tile(0));
    }

    #[test]
    fn greedy_breaks_ties_in_discovery_order() {
        let grid = GridGraph::new(5).expect("grid");
        // 14, 18 and 22 are all three steps from the nearest pursuer; 14 is found first.
        let choice = GreedyEvasion
            .choose(&grid, &inputs(12, [7, 11], 2))
            .expect("destination");
        assert_eq!(choice, tile(14));
    }

    #[test]
    fn random_choice_is_a_legal_destination() {
        let grid = GridGraph::new(6).expect("grid");
        let inputs = inputs(14, [13, 20], 2);
        let legal = evader_destinations(&grid, &inputs);
        let mut policy = RandomEvasion::from_seed(7);
        for _ in 0..64 {
            let choice = policy.choose(&grid, &inputs).expect("destination");
            assert!(legal.contains(&choice), "{choice:?} is not legal");
        }
    }

    #[test]
    fn random_choices_repeat_for_the_same_seed() {
        let grid = GridGraph::new(8).expect("grid");
        let inputs = inputs(27, [0, 63], 2);
        let mut first = RandomEvasion::from_seed(99);
        let mut second = RandomEvasion::from_seed(99);
        for _ in 0..32 {
            assert_eq!(first.choose(&grid, &inputs), second.choose(&grid, &inputs));
        }
    }

    #[test]
    fn random_reports_a_boxed_in_evader() {
        let grid = GridGraph::new(2).expect("grid");
        let mut policy = RandomEvasion::from_seed(1);
        assert_eq!(
            policy.choose(&grid, &inputs(0, [1, 2], 2)),
            Err(EvasionError::NoReachableTile { origin: tile(0) })
        );
    }

    #[test]
    fn greedy_reports_pursuers_off_the_grid() {
        let grid = GridGraph::new(3).expect("grid");
        assert_eq!(
            GreedyEvasion.choose(&grid, &inputs(4, [1, 30], 1)),
            Err(EvasionError::Unreachable {
                origin: tile(4),
                target: tile(30),
            })
        );
    }

    #[test]
    fn evader_destinations_exclude_both_pursuers() {
        let grid = GridGraph::new(5).expect("grid");
        let destinations = evader_destinations(&grid, &inputs(12, [7, 13], 1));
        assert_eq!(destinations, vec![tile(11), tile(17)]);
    }

    #[test]
    fn factory_honours_the_requested_kind() {
        assert_eq!(policy_for(EvasionKind::Random, 3).kind(), EvasionKind::Random);
        assert_eq!(policy_for(EvasionKind::Greedy, 3).kind(), EvasionKind::Greedy);
    }
}
