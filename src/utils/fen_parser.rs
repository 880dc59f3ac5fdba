//! FEN-to-GameState parser.
//!
//! Reads the board, side to move, castling rights and en-passant fields of a
//! Forsyth-Edwards Notation string. Clock fields are optional; when present
//! they must be numbers but are otherwise ignored.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{king_home, kingside_rook_home, queenside_rook_home};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

fn invalid(msg: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidFen(msg.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;

    let clocks: Vec<&str> = parts.collect();
    if !clocks.is_empty() && clocks.len() != 2 {
        return Err(invalid("expected both clock fields or neither"));
    }
    for clock in &clocks {
        clock
            .parse::<u32>()
            .map_err(|_| invalid(format!("invalid clock field: {clock}")))?;
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    validate_kings(&game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    validate_castling_rights(&game_state)?;
    game_state.en_passant = parse_en_passant(en_passant_part)?;
    validate_en_passant(&game_state)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    // FEN lists the eighth rank first, which is internal rank 0.
    for (rank, rank_str) in ranks.iter().enumerate() {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            game_state.place_piece(Square::new(file, rank as u8), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn validate_kings(game_state: &GameState) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let king = Piece::new(color, PieceKind::King);
        let count = game_state
            .occupied()
            .filter(|&(_, piece)| piece == king)
            .count();
        if count != 1 {
            return Err(invalid(format!("expected one {color:?} king, found {count}")));
        }
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        };
        if *flag {
            return Err(invalid(format!("duplicate castling rights character: {ch}")));
        }
        *flag = true;
    }

    Ok(rights)
}

/// A right is only meaningful while its king and rook are on their home cells.
fn validate_castling_rights(game_state: &GameState) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let king = Piece::new(color, PieceKind::King);
        let rook = Piece::new(color, PieceKind::Rook);
        let rights = game_state.castling_rights;

        let wants_any = rights.kingside(color) || rights.queenside(color);
        if wants_any && game_state.piece_at(king_home(color)) != Some(king) {
            return Err(invalid(format!("{color:?} castling rights without a king at home")));
        }
        if rights.kingside(color) && game_state.piece_at(kingside_rook_home(color)) != Some(rook) {
            return Err(invalid(format!(
                "{color:?} kingside right without a rook at home"
            )));
        }
        if rights.queenside(color) && game_state.piece_at(queenside_rook_home(color)) != Some(rook)
        {
            return Err(invalid(format!(
                "{color:?} queenside right without a rook at home"
            )));
        }
    }
    Ok(())
}

/// The target names the passed-over cell: rank 3 after a White double step,
/// rank 6 after a Black one.
fn parse_en_passant(en_passant_part: &str) -> ChessResult<Option<EnPassantTarget>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))?;

    let color = match en_passant_part.as_bytes()[1] {
        b'3' => Color::White,
        b'6' => Color::Black,
        _ => {
            return Err(invalid(format!(
                "en-passant square must be on rank 3 or 6: {en_passant_part}"
            )))
        }
    };

    Ok(Some(EnPassantTarget {
        color,
        file: square.file,
    }))
}

/// The double-stepper must be the side that just moved and still stand on
/// its landing cell.
fn validate_en_passant(game_state: &GameState) -> ChessResult<()> {
    let Some(target) = game_state.en_passant else {
        return Ok(());
    };
    if target.color == game_state.side_to_move {
        return Err(invalid(format!(
            "en-passant target credits {:?}, the side to move",
            target.color
        )));
    }

    let landing_rank = match target.color {
        Color::White => 4,
        Color::Black => 3,
    };
    let pawn = Piece::new(target.color, PieceKind::Pawn);
    if game_state.piece_at(Square::new(target.file, landing_rank)) != Some(pawn) {
        return Err(invalid("en-passant target without a double-stepped pawn"));
    }
    Ok(())
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
