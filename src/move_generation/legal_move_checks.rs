//! Check detection.
//!
//! A king is in check exactly when it stands inside the scope of some enemy
//! piece. Both kings must be present; a missing king is reported as
//! `ChessErrors::MissingKing` rather than "not in check".

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::piece_scope::extend_piece_scope;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckStatus {
    pub white_in_check: bool,
    pub black_in_check: bool,
}

impl CheckStatus {
    #[inline]
    pub const fn for_color(self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }
}

pub fn inspect_check(game_state: &GameState) -> ChessResult<CheckStatus> {
    let white_king = game_state.king_square(Color::White)?;
    let black_king = game_state.king_square(Color::Black)?;

    let mut status = CheckStatus::default();
    let mut scope = Vec::with_capacity(32);

    for (square, piece) in game_state.occupied() {
        let already_found = match piece.color {
            Color::White => status.black_in_check,
            Color::Black => status.white_in_check,
        };
        if already_found {
            continue;
        }

        scope.clear();
        extend_piece_scope(game_state, square, &mut scope);
        match piece.color {
            Color::White => status.black_in_check = scope.contains(&black_king),
            Color::Black => status.white_in_check = scope.contains(&white_king),
        }

        if status.white_in_check && status.black_in_check {
            break;
        }
    }

    Ok(status)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> ChessResult<bool> {
    Ok(inspect_check(game_state)?.for_color(color))
}
