//! GameState-to-FEN serializer.
//!
//! Positions carry no clocks, so the halfmove and fullmove fields are always
//! written as `0 1`.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board(game_state);
    let side = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_rights(game_state.castling_rights);
    let en_passant = game_state
        .en_passant
        .map(|target| square_to_algebraic(target.passed_square()))
        .unwrap_or_else(|| "-".to_owned());

    format!("{board} {side} {castling} {en_passant} 0 1")
}

fn generate_board(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in 0..8u8 {
        let mut empty_run = 0u8;

        for file in 0..8u8 {
            match game_state.piece_at(Square::new(file, rank)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_run += 1,
            }
        }

        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_rights(rights: CastlingRights) -> String {
    let mut out = String::new();
    if rights.white_kingside {
        out.push('K');
    }
    if rights.white_queenside {
        out.push('Q');
    }
    if rights.black_kingside {
        out.push('k');
    }
    if rights.black_queenside {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

pub(crate) fn piece_to_fen_char(piece: Piece) -> char {
    let ch = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}
