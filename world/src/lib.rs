#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for the pursuit engine.
//!
//! The world owns the grid, the pieces, and the turn sequence. Commands enter
//! through [`apply`]; every transition is reported as an [`Event`] and the
//! resulting state is read back through the [`query`] module.

mod pieces;

use pursuit_core::{
    Command, ConfigError, Event, GameConfig, GridGraph, Outcome, Phase, PieceId, PursuerId,
    TileIndex,
};
use pursuit_system_evasion::{evader_destinations, policy_for, EvasionInputs, EvasionPolicy};
use pursuit_system_reachability::reachable_from;
use tracing::{debug, error, info, trace};

pub use pieces::PieceSet;

/// Turn sequence state together with the selection it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnState {
    Init,
    PursuerSelected {
        pursuer: PursuerId,
    },
    TileSelected {
        pursuer: PursuerId,
        destination: TileIndex,
    },
    EvaderTurn,
    Restarting,
    End {
        outcome: Outcome,
    },
}

impl TurnState {
    fn phase(self) -> Phase {
        match self {
            Self::Init => Phase::Init,
            Self::PursuerSelected { .. } => Phase::PursuerSelected,
            Self::TileSelected { .. } => Phase::TileSelected,
            Self::EvaderTurn => Phase::EvaderTurn,
            Self::Restarting => Phase::Restarting,
            Self::End { .. } => Phase::End,
        }
    }
}

/// Per-tile flags marking the result of the most recent reachability query.
#[derive(Clone, Debug)]
struct DestinationMarks {
    marked: Vec<bool>,
}

impl DestinationMarks {
    fn new(tile_count: usize) -> Self {
        Self {
            marked: vec![false; tile_count],
        }
    }

    fn replace(&mut self, destinations: &[TileIndex]) {
        self.clear();
        for tile in destinations {
            if let Some(slot) = self.marked.get_mut(tile.slot()) {
                *slot = true;
            }
        }
    }

    fn clear(&mut self) {
        self.marked.fill(false);
    }

    fn contains(&self, tile: TileIndex) -> bool {
        self.marked.get(tile.slot()).copied().unwrap_or(false)
    }

    fn tiles(&self) -> Vec<TileIndex> {
        self.marked
            .iter()
            .enumerate()
            .filter(|(_, marked)| **marked)
            .filter_map(|(slot, _)| u32::try_from(slot).ok().map(TileIndex::new))
            .collect()
    }
}

/// Represents the authoritative pursuit game state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    grid: GridGraph,
    pieces: PieceSet,
    turn: TurnState,
    round_count: u32,
    marks: DestinationMarks,
    evasion: Box<dyn EvasionPolicy>,
}

impl World {
    /// Creates a world driven by the evasion strategy named in the configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let evasion = policy_for(config.evasion, config.seed);
        Self::with_policy(config, evasion)
    }

    /// Creates a world driven by the provided evasion strategy.
    pub fn with_policy(
        config: GameConfig,
        evasion: Box<dyn EvasionPolicy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridGraph::new(config.side)?;
        let pieces = PieceSet::new(config.pursuer_starts, config.evader_start);
        let marks = DestinationMarks::new(grid.tile_count());

        debug!(
            side = config.side,
            move_range = config.move_range,
            max_rounds = config.max_rounds,
            evasion = ?evasion.kind(),
            "world created"
        );

        Ok(Self {
            config,
            grid,
            pieces,
            turn: TurnState::Init,
            round_count: 0,
            marks,
            evasion,
        })
    }

    fn enter(&mut self, turn: TurnState, out_events: &mut Vec<Event>) {
        self.turn = turn;
        debug!(phase = ?turn.phase(), round = self.round_count, "phase changed");
        out_events.push(Event::PhaseChanged {
            phase: turn.phase(),
        });
    }

    fn finish(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        info!(?outcome, rounds = self.round_count, "game ended");
        self.marks.clear();
        self.enter(TurnState::End { outcome }, out_events);
        out_events.push(Event::GameEnded { outcome });
    }

    fn move_piece(&mut self, piece: PieceId, to: TileIndex, out_events: &mut Vec<Event>) {
        let from = self.pieces.relocate(piece, to);
        debug!(?piece, from = from.get(), to = to.get(), "piece moved");
        out_events.push(Event::PieceMoved { piece, from, to });
    }

    fn select_pursuer(&mut self, pursuer: PursuerId, out_events: &mut Vec<Event>) {
        let origin = self.pieces.pursuer(pursuer);
        let blocked = [self.pieces.pursuer(pursuer.other())];
        let destinations = reachable_from(&self.grid, origin, self.config.move_range, &blocked);
        self.marks.replace(&destinations);

        out_events.push(Event::PursuerSelected {
            pursuer,
            origin,
            destinations: self.marks.tiles(),
        });
        self.enter(TurnState::PursuerSelected { pursuer }, out_events);
    }

    fn commit_pursuer_move(
        &mut self,
        pursuer: PursuerId,
        destination: TileIndex,
        out_events: &mut Vec<Event>,
    ) {
        self.move_piece(PieceId::Pursuer(pursuer), destination, out_events);

        if self.pieces.evader_captured() {
            self.finish(Outcome::PursuersWin, out_events);
        } else {
            self.enter(
                TurnState::TileSelected {
                    pursuer,
                    destination,
                },
                out_events,
            );
        }
    }

    fn evader_turn(&mut self, out_events: &mut Vec<Event>) {
        self.marks.clear();
        self.enter(TurnState::EvaderTurn, out_events);

        let inputs = EvasionInputs {
            evader: self.pieces.evader(),
            pursuers: self.pieces.pursuers(),
            move_range: self.config.move_range,
        };
        self.marks.replace(&evader_destinations(&self.grid, &inputs));

        match self.evasion.choose(&self.grid, &inputs) {
            Ok(destination) => {
                self.move_piece(PieceId::Evader, destination, out_events);
                if self.pieces.evader_captured() {
                    self.finish(Outcome::PursuersWin, out_events);
                }
            }
            Err(reason) => {
                error!(tile = inputs.evader.get(), %reason, "evader could not move");
                out_events.push(Event::EvaderStranded {
                    tile: inputs.evader,
                    reason,
                });
            }
        }
    }

    fn close_round(&mut self, out_events: &mut Vec<Event>) {
        self.marks.clear();
        self.round_count = self.round_count.saturating_add(1);
        info!(round = self.round_count, "round completed");
        out_events.push(Event::RoundCompleted {
            round: self.round_count,
        });

        // The round that reaches max_rounds is the last one played.
        if self.round_count < self.config.max_rounds {
            self.enter(TurnState::Init, out_events);
        } else {
            self.finish(Outcome::EvaderWins, out_events);
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.pieces.reset();
        self.marks.clear();
        self.round_count = 0;
        info!("game restarted");
        self.enter(TurnState::Restarting, out_events);
        self.enter(TurnState::Init, out_events);
    }

    fn acknowledge(&mut self, out_events: &mut Vec<Event>) {
        self.marks.clear();
        self.enter(TurnState::Init, out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that the active phase does not accept leave the world untouched
/// and are reported as [`Event::CommandIgnored`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match (world.turn, command) {
        (_, Command::PlayAgain) => world.restart(out_events),
        (
            TurnState::Init | TurnState::PursuerSelected { .. },
            Command::SelectPursuer { pursuer },
        ) => world.select_pursuer(pursuer, out_events),
        (TurnState::PursuerSelected { pursuer }, Command::SelectTile { tile })
            if world.marks.contains(tile) =>
        {
            world.commit_pursuer_move(pursuer, tile, out_events);
        }
        (
            TurnState::TileSelected { .. } | TurnState::EvaderTurn,
            Command::SelectTile { .. } | Command::Acknowledge,
        ) => world.acknowledge(out_events),
        (TurnState::TileSelected { .. }, Command::EndTurn) => world.evader_turn(out_events),
        (TurnState::EvaderTurn, Command::EndTurn) => world.close_round(out_events),
        (turn, command) => {
            trace!(?command, phase = ?turn.phase(), "command ignored");
            out_events.push(Event::CommandIgnored {
                command,
                phase: turn.phase(),
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pursuit_core::{
        EvasionKind, GameConfig, GridGraph, Outcome, Phase, PieceId, PursuerId, TileIndex,
    };

    use super::{PieceSet, TurnState, World};

    /// Phase of the turn sequence currently active.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.turn.phase()
    }

    /// Tiles marked by the most recent reachability query, in ascending order.
    #[must_use]
    pub fn legal_destinations(world: &World) -> Vec<TileIndex> {
        world.marks.tiles()
    }

    /// Reports whether the tile is currently marked as a legal destination.
    #[must_use]
    pub fn is_legal_destination(world: &World, tile: TileIndex) -> bool {
        world.marks.contains(tile)
    }

    /// Tile currently occupied by the piece.
    #[must_use]
    pub fn piece_tile(world: &World, piece: PieceId) -> TileIndex {
        world.pieces.tile(piece)
    }

    /// Read-only access to every piece position.
    #[must_use]
    pub fn pieces(world: &World) -> &PieceSet {
        &world.pieces
    }

    /// Number of rounds completed in the current game.
    #[must_use]
    pub fn round_count(world: &World) -> u32 {
        world.round_count
    }

    /// Result of the game, once it has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        match world.turn {
            TurnState::End { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Pursuer selected for the current move, if the phase has one.
    #[must_use]
    pub fn selected_pursuer(world: &World) -> Option<PursuerId> {
        match world.turn {
            TurnState::PursuerSelected { pursuer } | TurnState::TileSelected { pursuer, .. } => {
                Some(pursuer)
            }
            _ => None,
        }
    }

    /// Destination committed by the selected pursuer, if the phase has one.
    #[must_use]
    pub fn selected_destination(world: &World) -> Option<TileIndex> {
        match world.turn {
            TurnState::TileSelected { destination, .. } => Some(destination),
            _ => None,
        }
    }

    /// Provides read-only access to the grid topology.
    #[must_use]
    pub fn grid(world: &World) -> &GridGraph {
        &world.grid
    }

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Strategy driving the evader.
    #[must_use]
    pub fn evasion_kind(world: &World) -> EvasionKind {
        world.evasion.kind()
    }
}

#[cfg(test)]
mod tests {
    use pursuit_core::EvasionKind;

    use super::*;

    fn tile(index: u32) -> TileIndex {
        TileIndex::new(index)
    }

    fn five_by_five(evasion: EvasionKind) -> World {
        World::new(GameConfig {
            side: 5,
            move_range: 1,
            max_rounds: 3,
            pursuer_starts: [tile(0), tile(4)],
            evader_start: tile(22),
            evasion,
            seed: 3,
        })
        .expect("valid configuration")
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn pursuer_selection_excludes_the_other_pursuer() {
        let mut world = World::new(GameConfig {
            side: 5,
            move_range: 1,
            max_rounds: 3,
            pursuer_starts: [tile(0), tile(1)],
            evader_start: tile(24),
            ..GameConfig::default()
        })
        .expect("valid configuration");

        let events = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::First,
            },
        );

        assert_eq!(query::legal_destinations(&world), vec![tile(5)]);
        assert_eq!(
            events,
            vec![
                Event::PursuerSelected {
                    pursuer: PursuerId::First,
                    origin: tile(0),
                    destinations: vec![tile(5)],
                },
                Event::PhaseChanged {
                    phase: Phase::PursuerSelected,
                },
            ]
        );
    }

    #[test]
    fn reselecting_switches_the_pursuer() {
        let mut world = five_by_five(EvasionKind::Greedy);
        let _ = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::First,
            },
        );
        let _ = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::Second,
            },
        );

        assert_eq!(query::selected_pursuer(&world), Some(PursuerId::Second));
        assert_eq!(query::legal_destinations(&world), vec![tile(3), tile(9)]);
    }

    #[test]
    fn illegal_tile_is_ignored() {
        let mut world = five_by_five(EvasionKind::Greedy);
        let _ = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::First,
            },
        );

        let events = run(&mut world, Command::SelectTile { tile: tile(12) });

        assert_eq!(query::phase(&world), Phase::PursuerSelected);
        assert_eq!(
            query::piece_tile(&world, PieceId::Pursuer(PursuerId::First)),
            tile(0)
        );
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                command: Command::SelectTile { tile: tile(12) },
                phase: Phase::PursuerSelected,
            }]
        );
    }

    #[test]
    fn end_turn_before_a_move_is_ignored() {
        let mut world = five_by_five(EvasionKind::Greedy);
        let _ = run(&mut world, Command::EndTurn);
        assert_eq!(query::phase(&world), Phase::Init);
        assert_eq!(query::round_count(&world), 0);
    }

    #[test]
    fn evader_turn_marks_evader_destinations() {
        let mut world = five_by_five(EvasionKind::Greedy);
        let _ = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::First,
            },
        );
        let _ = run(&mut world, Command::SelectTile { tile: tile(5) });
        assert_eq!(query::selected_destination(&world), Some(tile(5)));

        let events = run(&mut world, Command::EndTurn);

        assert_eq!(query::phase(&world), Phase::EvaderTurn);
        assert_eq!(query::selected_pursuer(&world), None);
        assert_eq!(
            query::legal_destinations(&world),
            vec![tile(17), tile(21), tile(23)]
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::PieceMoved {
                piece: PieceId::Evader,
                ..
            }
        )));
    }

    #[test]
    fn stranded_evader_stays_in_place() {
        let mut world = World::new(GameConfig {
            side: 2,
            move_range: 1,
            max_rounds: 2,
            pursuer_starts: [tile(3), tile(2)],
            evader_start: tile(0),
            evasion: EvasionKind::Random,
            seed: 5,
        })
        .expect("valid configuration");

        let _ = run(
            &mut world,
            Command::SelectPursuer {
                pursuer: PursuerId::First,
            },
        );
        let _ = run(&mut world, Command::SelectTile { tile: tile(1) });
        let events = run(&mut world, Command::EndTurn);

        assert!(events.contains(&Event::EvaderStranded {
            tile: tile(0),
            reason: pursuit_core::EvasionError::NoReachableTile { origin: tile(0) },
        }));
        assert_eq!(query::piece_tile(&world, PieceId::Evader), tile(0));
        assert_eq!(query::phase(&world), Phase::EvaderTurn);
    }

    #[test]
    fn world_reports_the_configured_strategy() {
        assert_eq!(
            query::evasion_kind(&five_by_five(EvasionKind::Greedy)),
            EvasionKind::Greedy
        );
        assert_eq!(
            query::evasion_kind(&five_by_five(EvasionKind::Random)),
            EvasionKind::Random
        );
    }

    #[test]
    fn world_rejects_invalid_configuration() {
        let result = World::new(GameConfig {
            side: 3,
            evader_start: tile(9),
            pursuer_starts: [tile(0), tile(1)],
            ..GameConfig::default()
        });
        assert!(matches!(result, Err(ConfigError::StartOutOfBounds { .. })));
    }
}
