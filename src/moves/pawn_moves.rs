use crate::game_state::{chess_types::*, game_state::GameState};

/// Internal rank a pawn of `color` must stand on to capture en passant.
#[inline]
pub const fn en_passant_capture_rank(color: Color) -> u8 {
    match color {
        Color::White => 3,
        Color::Black => 4,
    }
}

pub fn pawn_scope(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    let dir = color.pawn_direction();

    // pushes
    if let Some(one_step) = from.offset(0, dir) {
        if game_state.is_empty_at(one_step) {
            out.push(one_step);
            if from.rank == color.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, dir) {
                    if game_state.is_empty_at(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    // captures
    for d_file in [-1i8, 1] {
        let Some(to) = from.offset(d_file, dir) else {
            continue;
        };
        if matches!(game_state.piece_at(to), Some(piece) if piece.color != color) {
            out.push(to);
        }
    }

    // en passant
    let Some(target) = game_state.en_passant else {
        return;
    };
    if target.color != color.opposite() || from.rank != en_passant_capture_rank(color) {
        return;
    }
    for d_file in [-1i8, 1] {
        let Some(beside) = from.offset(d_file, 0) else {
            continue;
        };
        if beside.file == target.file {
            if let Some(to) = beside.offset(0, dir) {
                out.push(to);
            }
        }
    }
}
