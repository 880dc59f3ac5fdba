//! Perft node counting over the legal move generator.
//!
//! Counts the leaves of the legal move tree at a fixed depth together with
//! the usual breakdown (captures, en passant, castles, promotions, checks and
//! checkmates), for comparison against published reference tables.

use std::thread;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, has_legal_move, GeneratedMove,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state)? {
        perft_recurse(game_state, &mv, depth, 1, &mut total)?;
    }
    Ok(total)
}

/// Same counts as `perft`, with one worker thread per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return perft(game_state, depth);
    }

    let root_moves = generate_legal_moves(game_state)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let parent = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(&parent, &mv, depth, 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle
            .join()
            .map_err(|_| ChessErrors::EngineFailure("perft worker thread panicked".to_owned()))?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(
    parent: &GameState,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    if current_depth == search_depth {
        count_leaf(parent, mv, counts)?;
        return Ok(());
    }

    let child = &mv.game_after_move;
    for next in generate_legal_moves(child)? {
        perft_recurse(child, &next, search_depth, current_depth + 1, counts)?;
    }
    Ok(())
}

fn count_leaf(parent: &GameState, mv: &GeneratedMove, counts: &mut PerftCounts) -> ChessResult<()> {
    counts.nodes += 1;

    let request = mv.request;
    let Some(moved) = parent.piece_at(request.from) else {
        return Ok(());
    };

    let en_passant = moved.kind == PieceKind::Pawn
        && request.from.file != request.to.file
        && parent.is_empty_at(request.to);
    if en_passant {
        counts.en_passant += 1;
    }
    if en_passant || parent.piece_at(request.to).is_some() {
        counts.captures += 1;
    }
    if moved.kind == PieceKind::King && request.from.file.abs_diff(request.to.file) == 2 {
        counts.castles += 1;
    }
    if moved.kind == PieceKind::Pawn && request.to.rank == moved.color.promotion_rank() {
        counts.promotions += 1;
    }

    let after = &mv.game_after_move;
    if is_king_in_check(after, after.side_to_move)? {
        counts.checks += 1;
        if !has_legal_move(after)? {
            counts.checkmates += 1;
        }
    }

    Ok(())
}
