//! Ray-cast scope for bishops, rooks and queens.
//!
//! One routine walks every direction of a piece's table until it meets the
//! board edge, an own piece (excluded) or an enemy piece (included as a
//! capture). Direction order fixes the order destinations are discovered in.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
];

/// Direction table for a sliding piece kind, `None` for non-sliders.
#[inline]
pub fn sliding_directions(kind: PieceKind) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::Bishop => Some(&BISHOP_DIRECTIONS),
        PieceKind::Rook => Some(&ROOK_DIRECTIONS),
        PieceKind::Queen => Some(&QUEEN_DIRECTIONS),
        _ => None,
    }
}

pub fn sliding_scope(
    game_state: &GameState,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_file, d_rank) {
            match game_state.piece_at(next) {
                None => out.push(next),
                Some(piece) => {
                    if piece.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lone_piece(kind: PieceKind, at: Square) -> GameState {
        let mut game = GameState::new_empty();
        game.place_piece(at, Some(Piece::new(Color::White, kind)));
        game
    }

    #[test]
    fn rook_on_open_board_reaches_fourteen_cells() {
        let d4 = Square::new(3, 4);
        let game = lone_piece(PieceKind::Rook, d4);
        let mut out = Vec::new();
        sliding_scope(&game, d4, Color::White, &ROOK_DIRECTIONS, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn queen_from_corner_reaches_twenty_one_cells() {
        let a1 = Square::new(0, 7);
        let game = lone_piece(PieceKind::Queen, a1);
        let mut out = Vec::new();
        sliding_scope(&game, a1, Color::White, &QUEEN_DIRECTIONS, &mut out);
        assert_eq!(out.len(), 21);
    }

    #[test]
    fn rays_stop_at_blockers() {
        let c1 = Square::new(2, 7);
        let mut game = lone_piece(PieceKind::Bishop, c1);
        // own pawn on d2, enemy knight on a3
        game.place_piece(
            Square::new(3, 6),
            Some(Piece::new(Color::White, PieceKind::Pawn)),
        );
        game.place_piece(
            Square::new(0, 5),
            Some(Piece::new(Color::Black, PieceKind::Knight)),
        );
        let mut out = Vec::new();
        sliding_scope(&game, c1, Color::White, &BISHOP_DIRECTIONS, &mut out);
        assert_eq!(out, vec![Square::new(1, 6), Square::new(0, 5)]);
    }
}
