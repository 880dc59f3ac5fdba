//! Legality filter and transition function.
//!
//! `try_move` is the only way to advance a game: it validates a request
//! against turn ownership, piece scope and king safety, applies castling,
//! en passant and promotion side effects, and returns a brand new Position.
//! The input Position is never modified.

use std::fmt;
use std::sync::Arc;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{kingside_rook_home, queenside_rook_home, CastleSide};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::piece_scope::piece_scope;

/// Why a move request was refused. Rejections are ordinary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    NoPieceAtOrigin,
    NotSideToMove,
    OwnPieceAtDestination,
    OutsideScope,
    InvalidPromotion,
    CastlesOutOfCheck,
    CastlesThroughCheck,
    LeavesKingInCheck,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMove::NoPieceAtOrigin => "no piece on the origin square",
            IllegalMove::NotSideToMove => "piece does not belong to the side to move",
            IllegalMove::OwnPieceAtDestination => "destination holds an own piece",
            IllegalMove::OutsideScope => "destination is outside the piece's scope",
            IllegalMove::InvalidPromotion => "invalid promotion choice",
            IllegalMove::CastlesOutOfCheck => "cannot castle while in check",
            IllegalMove::CastlesThroughCheck => "cannot castle through an attacked square",
            IllegalMove::LeavesKingInCheck => "move leaves own king in check",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(GameState),
    Rejected(IllegalMove),
}

impl MoveOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }

    /// The new Position, or `None` if the move was rejected.
    #[inline]
    pub fn accepted(self) -> Option<GameState> {
        match self {
            MoveOutcome::Accepted(next) => Some(next),
            MoveOutcome::Rejected(_) => None,
        }
    }

    #[inline]
    pub fn rejection(&self) -> Option<IllegalMove> {
        match self {
            MoveOutcome::Accepted(_) => None,
            MoveOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialMove {
    Plain,
    Castle(CastleSide),
    EnPassant,
}

fn classify(game_state: &GameState, piece: Piece, request: &MoveRequest) -> SpecialMove {
    match piece.kind {
        PieceKind::King => CastleSide::from_king_move(request.from, request.to)
            .map(SpecialMove::Castle)
            .unwrap_or(SpecialMove::Plain),
        PieceKind::Pawn
            if request.from.file != request.to.file && game_state.is_empty_at(request.to) =>
        {
            SpecialMove::EnPassant
        }
        _ => SpecialMove::Plain,
    }
}

pub fn try_move(game_state: &GameState, request: MoveRequest) -> ChessResult<MoveOutcome> {
    let Some(piece) = game_state.piece_at(request.from) else {
        return Ok(MoveOutcome::Rejected(IllegalMove::NoPieceAtOrigin));
    };
    let color = piece.color;
    if color != game_state.side_to_move {
        return Ok(MoveOutcome::Rejected(IllegalMove::NotSideToMove));
    }
    if matches!(game_state.piece_at(request.to), Some(target) if target.color == color) {
        return Ok(MoveOutcome::Rejected(IllegalMove::OwnPieceAtDestination));
    }
    if !piece_scope(game_state, request.from).contains(&request.to) {
        return Ok(MoveOutcome::Rejected(IllegalMove::OutsideScope));
    }

    let promotes = piece.kind == PieceKind::Pawn && request.to.rank == color.promotion_rank();
    if let Some(choice) = request.promotion {
        if !promotes || !choice.is_promotion_target() {
            return Ok(MoveOutcome::Rejected(IllegalMove::InvalidPromotion));
        }
    }

    let mut next = game_state.clone();
    match classify(game_state, piece, &request) {
        SpecialMove::Plain => {
            let landed = if promotes {
                Piece::new(color, request.promotion.unwrap_or(PieceKind::Queen))
            } else {
                piece
            };
            next.place_piece(request.to, Some(landed));
            next.place_piece(request.from, None);
        }
        SpecialMove::Castle(side) => {
            if is_king_in_check(game_state, color)? {
                return Ok(MoveOutcome::Rejected(IllegalMove::CastlesOutOfCheck));
            }

            let transit = side.transit_square(color);
            next.place_piece(transit, Some(piece));
            next.place_piece(request.from, None);
            if is_king_in_check(&next, color)? {
                return Ok(MoveOutcome::Rejected(IllegalMove::CastlesThroughCheck));
            }

            let rook_home = side.rook_home(color);
            next.place_piece(request.to, Some(piece));
            next.place_piece(transit, next.piece_at(rook_home));
            next.place_piece(rook_home, None);
        }
        SpecialMove::EnPassant => {
            next.place_piece(request.to, Some(piece));
            next.place_piece(request.from, None);
            next.place_piece(Square::new(request.to.file, request.from.rank), None);
        }
    }

    if is_king_in_check(&next, color)? {
        return Ok(MoveOutcome::Rejected(IllegalMove::LeavesKingInCheck));
    }

    next.side_to_move = color.opposite();
    update_castling_rights(&mut next.castling_rights, piece, &request);
    next.en_passant = if piece.kind == PieceKind::Pawn
        && request.from.rank.abs_diff(request.to.rank) == 2
    {
        Some(EnPassantTarget {
            color,
            file: request.from.file,
        })
    } else {
        None
    };
    next.result = None;
    next.previous = Some(Arc::new(game_state.clone()));
    next.last_move = Some(request);

    Ok(MoveOutcome::Accepted(next))
}

fn update_castling_rights(rights: &mut CastlingRights, piece: Piece, request: &MoveRequest) {
    let color = piece.color;
    match piece.kind {
        PieceKind::King => rights.revoke_all(color),
        PieceKind::Rook if request.from == kingside_rook_home(color) => {
            rights.revoke_kingside(color)
        }
        PieceKind::Rook if request.from == queenside_rook_home(color) => {
            rights.revoke_queenside(color)
        }
        _ => {}
    }

    // A rook captured on its home square takes the right with it.
    let enemy = color.opposite();
    if request.to == kingside_rook_home(enemy) {
        rights.revoke_kingside(enemy);
    } else if request.to == queenside_rook_home(enemy) {
        rights.revoke_queenside(enemy);
    }
}
