//! Long algebraic move text (`e2e4`, `e7e8n`) to and from `MoveRequest`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn long_algebraic_to_request(text: &str) -> ChessResult<MoveRequest> {
    let text = text.trim();
    let invalid = || ChessErrors::InvalidMoveText(text.to_owned());

    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;

    match text.as_bytes().get(4) {
        None => Ok(MoveRequest::new(from, to)),
        Some(&ch) => {
            let promotion = promotion_from_char(char::from(ch)).ok_or_else(invalid)?;
            Ok(MoveRequest::with_promotion(from, to, promotion))
        }
    }
}

pub fn request_to_long_algebraic(request: &MoveRequest) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(request.from));
    out.push_str(&square_to_algebraic(request.to));
    if let Some(kind) = request.promotion.and_then(promotion_to_char) {
        out.push(kind);
    }
    out
}

/// Text of the move that produced `game_state`, `None` for a root Position.
///
/// Generated successors promote without naming a piece, so the suffix is
/// read off the board when the request left it implicit.
pub fn last_move_text(game_state: &GameState) -> Option<String> {
    let request = game_state.last_move?;
    let mut out = request_to_long_algebraic(&request);

    if request.promotion.is_none() {
        let mover = game_state.side_to_move.opposite();
        let was_pawn = game_state
            .previous
            .as_deref()
            .and_then(|prev| prev.piece_at(request.from))
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        if was_pawn && request.to.rank == mover.promotion_rank() {
            if let Some(ch) = game_state
                .piece_at(request.to)
                .and_then(|piece| promotion_to_char(piece.kind))
            {
                out.push(ch);
            }
        }
    }

    Some(out)
}

fn promotion_from_char(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

fn promotion_to_char(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Knight => Some('n'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Rook => Some('r'),
        PieceKind::Queen => Some('q'),
        PieceKind::Pawn | PieceKind::King => None,
    }
}
