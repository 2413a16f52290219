//! Plain-text rendering of the board for terminal play.

use std::fmt::Write as _;

use pursuit_core::{Outcome, Phase, PieceId, PursuerId};
use pursuit_world::{query, World};

const PURSUER_GLYPHS: [char; 2] = ['0', '1'];
const EVADER_GLYPH: char = 'E';
const DESTINATION_GLYPH: char = '*';
const EMPTY_GLYPH: char = '.';

/// Draws the grid with piece positions and marked destinations, followed by
/// a status line.
pub(crate) fn render(world: &World) -> String {
    let grid = query::grid(world);
    let pieces = query::pieces(world);
    let side = grid.side();
    let mut out = String::new();

    for tile in grid.tiles() {
        let glyph = if let Some(pursuer) = PursuerId::ALL
            .into_iter()
            .find(|pursuer| pieces.pursuer(*pursuer) == tile)
        {
            PURSUER_GLYPHS[pursuer.index()]
        } else if pieces.evader() == tile {
            EVADER_GLYPH
        } else if query::is_legal_destination(world, tile) {
            DESTINATION_GLYPH
        } else {
            EMPTY_GLYPH
        };

        out.push(glyph);
        if tile.column(side) + 1 == side {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }

    let _ = write!(
        out,
        "round {}/{} | {}",
        query::round_count(world),
        query::config(world).max_rounds,
        status(world)
    );
    out
}

fn status(world: &World) -> String {
    match query::phase(world) {
        Phase::Init => "select a pursuer".to_owned(),
        Phase::PursuerSelected => {
            let pursuer = query::selected_pursuer(world).map_or(0, PursuerId::index);
            format!("pursuer {pursuer} selected, pick a * tile")
        }
        Phase::TileSelected => "move committed, end the turn".to_owned(),
        Phase::EvaderTurn => format!(
            "evader moved to {}, end the round",
            query::piece_tile(world, PieceId::Evader).get()
        ),
        Phase::Restarting => "restarting".to_owned(),
        Phase::End => match query::outcome(world) {
            Some(Outcome::PursuersWin) => "you win! type 'again' to replay".to_owned(),
            Some(Outcome::EvaderWins) | None => "you lose! type 'again' to replay".to_owned(),
        },
    }
}
