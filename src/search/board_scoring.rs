//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Scores are absolute: positive favors White, negative favors Black. A
//! terminal Position scores `+inf` / `-inf` for a win and `0.0` for a draw.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::piece_scope::scope_count;

pub trait BoardScorer: Send + Sync {
    fn score(&self, game_state: &GameState) -> f64;
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.1,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Fixed score of a finished game, `None` while play continues.
#[inline]
pub fn terminal_score(game_state: &GameState) -> Option<f64> {
    game_state.result.map(|result| match result {
        GameResult::WhiteWins => f64::INFINITY,
        GameResult::BlackWins => f64::NEG_INFINITY,
        GameResult::Draw => 0.0,
    })
}

/// White material minus Black material.
pub fn material_balance(game_state: &GameState) -> f64 {
    game_state
        .occupied()
        .map(|(_, piece)| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}

/// Raw (unfiltered) scope size of White minus that of Black.
pub fn mobility_balance(game_state: &GameState) -> f64 {
    scope_count(game_state, Color::White) as f64 - scope_count(game_state, Color::Black) as f64
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> f64 {
        terminal_score(game_state).unwrap_or_else(|| material_balance(game_state))
    }
}

/// `4 * material + mobility`, the default evaluator used by search.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityScorer;

impl MobilityScorer {
    pub const MATERIAL_WEIGHT: f64 = 4.0;
}

impl BoardScorer for MobilityScorer {
    fn score(&self, game_state: &GameState) -> f64 {
        terminal_score(game_state).unwrap_or_else(|| {
            Self::MATERIAL_WEIGHT * material_balance(game_state) + mobility_balance(game_state)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(material_balance(&game), 0.0);
        assert_eq!(MobilityScorer.score(&game), 0.0);
        assert_eq!(MaterialScorer.score(&game), 0.0);
    }

    #[test]
    fn terminal_results_dominate() {
        let game = GameState::new_game();
        assert_eq!(
            MobilityScorer.score(&game.clone().with_result(Some(GameResult::WhiteWins))),
            f64::INFINITY
        );
        assert_eq!(
            MaterialScorer.score(&game.clone().with_result(Some(GameResult::BlackWins))),
            f64::NEG_INFINITY
        );
        assert_eq!(
            MobilityScorer.score(&game.with_result(Some(GameResult::Draw))),
            0.0
        );
    }

    #[test]
    fn material_and_mobility_combine() {
        // white: king e1 (5 cells) + rook a1 (7 up the file, 3 to the king);
        // black: king e8 (5 cells)
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(material_balance(&game), 5.0);
        assert_eq!(mobility_balance(&game), 15.0 - 5.0);
        assert_eq!(MobilityScorer.score(&game), 4.0 * 5.0 + 10.0);
    }

    #[test]
    fn bishop_is_worth_slightly_more_than_knight() {
        let game = GameState::from_fen("4k1n1/8/8/8/8/8/8/2B1K3 w - - 0 1")
            .expect("FEN should parse");
        assert!((material_balance(&game) - 0.1).abs() < 1e-9);
    }
}
