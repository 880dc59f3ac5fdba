//! One-ply engine: the successor the evaluator likes best for the mover.

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_generator::successors;
use crate::search::board_scoring::{BoardScorer, MobilityScorer};

pub struct GreedyEngine<S: BoardScorer = MobilityScorer> {
    scorer: S,
}

impl GreedyEngine<MobilityScorer> {
    pub fn new() -> Self {
        Self {
            scorer: MobilityScorer,
        }
    }
}

impl<S: BoardScorer> GreedyEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }
}

impl Default for GreedyEngine<MobilityScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> Engine for GreedyEngine<S> {
    fn name(&self) -> &str {
        "OakChess Greedy"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let children = successors(game_state)?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            children.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {}", depth));
        }

        let sign = match game_state.side_to_move {
            Color::White => 1.0,
            Color::Black => -1.0,
        };

        let mut best: Option<(f64, GameState)> = None;
        for child in children {
            let goodness = sign * self.scorer.score(&child);
            let improves = match &best {
                None => true,
                Some((best_goodness, _)) => goodness > *best_goodness,
            };
            if improves {
                best = Some((goodness, child));
            }
        }

        if let Some((goodness, child)) = best {
            out.info_lines.push(format!(
                "info string greedy_engine score {}",
                sign * goodness
            ));
            out.best_move = Some(child);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;
    use crate::search::board_scoring::MaterialScorer;
    use crate::search::minimax::best_move;

    #[test]
    fn matches_depth_one_search() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 3",
        ] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            let out = GreedyEngine::new()
                .choose_move(&game, &GoParams::default())
                .expect("engine should run");
            let searched = best_move(&game, game.side_to_move == Color::White, 1)
                .expect("search should run");
            assert_eq!(out.best_move, searched, "{fen}");
        }
    }

    #[test]
    fn material_greedy_takes_the_queen() {
        let game = GameState::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let out = GreedyEngine::with_scorer(MaterialScorer)
            .choose_move(&game, &GoParams::default())
            .expect("engine should run");
        let chosen = out.best_move.expect("moves exist");
        assert_eq!(
            chosen.piece_at(Square::new(3, 3)),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert!(out.info_lines.iter().any(|l| l.contains("score 3")));
    }
}
