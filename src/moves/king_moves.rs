//! King scope: the eight neighbours plus pseudo-legal castling hops.
//!
//! Castling destinations only require the right, the king on its home
//! square and empty cells between king and rook. Whether the king is in,
//! passes through or lands in check is decided by the transition function.

use crate::game_state::chess_rules::{king_home, CastleSide};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::knight_moves::offset_scope;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
];

pub fn king_scope(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    offset_scope(game_state, from, color, &KING_OFFSETS, out);
    castling_scope(game_state, from, color, out);
}

fn castling_scope(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    if from != king_home(color) {
        return;
    }

    let rights = game_state.castling_rights;
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        let allowed = match side {
            CastleSide::Kingside => rights.kingside(color),
            CastleSide::Queenside => rights.queenside(color),
        };
        if !allowed {
            continue;
        }

        let path_clear = side
            .files_between()
            .iter()
            .all(|&file| game_state.is_empty_at(Square::new(file, from.rank)));
        if path_clear {
            out.push(side.king_destination(color));
        }
    }
}
