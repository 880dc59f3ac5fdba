//! Random-move engine.
//!
//! Selects uniformly from legal successors and is primarily used for
//! diagnostics, integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::successors;

pub struct RandomEngine {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomEngine {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: Self::make_rng(seed),
            seed,
        }
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "OakChess Random"
    }

    fn new_game(&mut self) {
        self.rng = Self::make_rng(self.seed);
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let children = successors(game_state)?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            children.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine requested_depth {}",
                depth
            ));
        }

        if children.is_empty() {
            return Ok(out);
        }

        let picked = children
            .as_slice()
            .choose(&mut self.rng)
            .ok_or_else(|| ChessErrors::EngineFailure("failed to choose a random move".to_owned()))?;

        out.best_move = Some(picked.clone());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_successor() {
        let game = GameState::new_game();
        let legal = successors(&game).expect("kings present");
        let mut engine = RandomEngine::new(Some(7));
        for _ in 0..10 {
            let out = engine
                .choose_move(&game, &GoParams::default())
                .expect("engine should run");
            let picked = out.best_move.expect("start position has moves");
            assert!(legal.contains(&picked));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let game = GameState::new_game();
        let mut a = RandomEngine::new(Some(42));
        let mut b = RandomEngine::new(Some(42));
        for _ in 0..5 {
            let pa = a.choose_move(&game, &GoParams::default()).expect("engine a");
            let pb = b.choose_move(&game, &GoParams::default()).expect("engine b");
            assert_eq!(pa.best_move, pb.best_move);
        }

        a.new_game();
        let mut fresh = RandomEngine::new(Some(42));
        assert_eq!(
            a.choose_move(&game, &GoParams::default()).expect("engine a").best_move,
            fresh.choose_move(&game, &GoParams::default()).expect("fresh").best_move
        );
    }

    #[test]
    fn no_move_when_checkmated() {
        let game = GameState::from_fen("k1Q5/8/K7/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        let out = RandomEngine::new(Some(1))
            .choose_move(&game, &GoParams::default())
            .expect("engine should run");
        assert!(out.best_move.is_none());
    }
}
