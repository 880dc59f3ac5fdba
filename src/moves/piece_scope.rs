//! Pseudo-legal scope of a single piece.
//!
//! Scope ignores king safety entirely. Destinations are produced in a fixed
//! per-kind order, which the successor enumerator relies on for stable
//! discovery order.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::king_moves::king_scope;
use crate::moves::knight_moves::knight_scope;
use crate::moves::pawn_moves::pawn_scope;
use crate::moves::sliding_moves::{sliding_directions, sliding_scope};

/// Append the scope of the piece on `from` to `out`. Empty cells add nothing.
pub fn extend_piece_scope(game_state: &GameState, from: Square, out: &mut Vec<Square>) {
    let Some(piece) = game_state.piece_at(from) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_scope(game_state, from, piece.color, out),
        PieceKind::Knight => knight_scope(game_state, from, piece.color, out),
        PieceKind::King => king_scope(game_state, from, piece.color, out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            if let Some(directions) = sliding_directions(piece.kind) {
                sliding_scope(game_state, from, piece.color, directions, out);
            }
        }
    }
}

/// Scope of the piece on `from` as a fresh vector.
pub fn piece_scope(game_state: &GameState, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    extend_piece_scope(game_state, from, &mut out);
    out
}

/// Total scope size of every piece of `color`, castling and en passant included.
pub fn scope_count(game_state: &GameState, color: Color) -> usize {
    let mut buffer = Vec::with_capacity(32);
    let mut total = 0;
    for (square, piece) in game_state.occupied() {
        if piece.color != color {
            continue;
        }
        buffer.clear();
        extend_piece_scope(game_state, square, &mut buffer);
        total += buffer.len();
    }
    total
}
