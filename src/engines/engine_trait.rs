//! Engine abstraction layer used by the game driver and match tooling.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub max_nodes: Option<u64>,
}

impl GoParams {
    #[inline]
    pub fn is_budgeted(&self) -> bool {
        self.movetime_ms.is_some() || self.max_nodes.is_some()
    }
}

/// `best_move` is the chosen successor Position, `None` when the side to move
/// has no legal move. `info_lines` are UCI-style `info ...` records.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<GameState>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput>;
}
