//! Square conversions for algebraic coordinates.
//!
//! Internal ranks count down from the eighth rank: `a8` is file 0 rank 0 and
//! `h1` is file 7 rank 7. These helpers are the only place that mapping lives.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to an internal square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    Ok(Square::new(file - b'a', b'8' - rank))
}

/// Convert an internal square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file);
    let rank_char = char::from(b'8' - square.rank);
    format!("{file_char}{rank_char}")
}
