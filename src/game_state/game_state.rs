//! Core position representation.
//!
//! `GameState` is the single state entity of the engine: an 8x8 mailbox
//! board, side to move, castling rights, en-passant target and an optional
//! terminal result. Positions are value snapshots; the rules engine never
//! mutates a published one and instead derives a fresh copy per move.

use std::fmt;
use std::sync::Arc;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Indexed `[file][rank]` in internal coordinates.
    pub board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<EnPassantTarget>,
    pub result: Option<GameResult>,

    /// Position this one was derived from. History only; rules never read it.
    pub previous: Option<Arc<GameState>>,
    pub last_move: Option<MoveRequest>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            result: None,
            previous: None,
            last_move: None,
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant == other.en_passant
            && self.result == other.result
    }
}

impl Eq for GameState {}

impl GameState {
    /// Board with no pieces, White to move and no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial array with all castling rights.
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.file as usize][square.rank as usize]
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn place_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.file as usize][square.rank as usize] = piece;
    }

    /// Occupied cells with their pieces, in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Locate the king of `color`; its absence is a corrupted Position.
    pub fn king_square(&self, color: Color) -> ChessResult<Square> {
        self.occupied()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .ok_or(ChessErrors::MissingKing(color))
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// Copy of `self` carrying the given terminal result.
    pub fn with_result(mut self, result: Option<GameResult>) -> Self {
        self.result = result;
        self
    }

    /// Number of Positions reachable by walking `previous` links.
    pub fn history_len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.previous.as_deref();
        while let Some(parent) = cursor {
            count += 1;
            cursor = parent.previous.as_deref();
        }
        count
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate_fen(self))
    }
}
