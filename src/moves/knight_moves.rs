use crate::game_state::{chess_types::*, game_state::GameState};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
];

/// Push every on-board offset target not held by a piece of `color`.
pub fn offset_scope(
    game_state: &GameState,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in offsets {
        let Some(to) = from.offset(d_file, d_rank) else {
            continue;
        };
        match game_state.piece_at(to) {
            Some(piece) if piece.color == color => {}
            _ => out.push(to),
        }
    }
}

#[inline]
pub fn knight_scope(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    offset_scope(game_state, from, color, &KNIGHT_OFFSETS, out);
}
