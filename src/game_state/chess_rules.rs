//! Canonical chess-rule constants.
//!
//! Starting array, home squares of kings and rooks, and the castling
//! geometry shared by scope generation and move application.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_HOME_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::new(KING_HOME_FILE, color.home_rank())
}

#[inline]
pub const fn kingside_rook_home(color: Color) -> Square {
    Square::new(KINGSIDE_ROOK_FILE, color.home_rank())
}

#[inline]
pub const fn queenside_rook_home(color: Color) -> Square {
    Square::new(QUEENSIDE_ROOK_FILE, color.home_rank())
}

/// Castling side, identified by the king's horizontal travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Classify a king move; only a two-file horizontal hop is a castle.
    pub fn from_king_move(from: Square, to: Square) -> Option<CastleSide> {
        if from.rank != to.rank {
            return None;
        }
        match to.file as i8 - from.file as i8 {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => kingside_rook_home(color),
            CastleSide::Queenside => queenside_rook_home(color),
        }
    }

    /// Cell the king passes over (and the rook lands on).
    #[inline]
    pub const fn transit_square(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::new(KING_HOME_FILE + 1, color.home_rank()),
            CastleSide::Queenside => Square::new(KING_HOME_FILE - 1, color.home_rank()),
        }
    }

    #[inline]
    pub const fn king_destination(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => Square::new(KING_HOME_FILE + 2, color.home_rank()),
            CastleSide::Queenside => Square::new(KING_HOME_FILE - 2, color.home_rank()),
        }
    }

    /// Files strictly between king and rook, which must all be empty.
    #[inline]
    pub const fn files_between(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }
}
