//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type for faults and malformed input.
//! Rule violations by a move request are deliberately NOT errors: they are
//! reported as `MoveOutcome::Rejected` by the transition function so callers
//! can treat them as "try another move".
//!
//! Usage guidelines:
//! - Text parsing (`InvalidFen`, `InvalidAlgebraic`, `InvalidMoveText`) is
//!   recoverable and suitable for showing to a user.
//! - `MissingKing` means a corrupted Position. It aborts whatever operation
//!   produced or consumed that Position and should not be recovered from.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Color;

pub type ChessResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// The board does not contain a king for the given side.
    ///
    /// This is a data-integrity fault, never a legal game outcome.
    MissingKing(Color),

    /// A FEN string had malformed structure or contents.
    ///
    /// Payload: description of the offending field.
    InvalidFen(String),

    /// A square name outside `a1..h8`.
    ///
    /// Payload: the original text.
    InvalidAlgebraic(String),

    /// Long-algebraic move text (`e2e4`, `e7e8q`) that could not be parsed.
    ///
    /// Payload: the original text.
    InvalidMoveText(String),

    /// An engine or the game driver failed for a reason other than the above.
    EngineFailure(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::MissingKing(color) => {
                write!(f, "corrupted position: no {color:?} king on the board")
            }
            ChessErrors::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidAlgebraic(text) => write!(f, "invalid algebraic square: {text}"),
            ChessErrors::InvalidMoveText(text) => write!(f, "invalid move text: {text}"),
            ChessErrors::EngineFailure(msg) => write!(f, "engine failure: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
