//! Minimax engine.
//!
//! Fixed-depth alpha-beta search by default. When the caller supplies a node
//! or time budget the same search runs under iterative deepening and reports
//! the deepest depth it completed.

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::search::board_scoring::{BoardScorer, MobilityScorer};
use crate::search::iterative_deepening::{iterative_deepening_search, SearchBudget};
use crate::search::minimax::{minimax_search, SearchConfig, SuccessorOrdering};

pub struct MinimaxEngine<S: BoardScorer = MobilityScorer> {
    config: SearchConfig,
    scorer: S,
}

impl MinimaxEngine<MobilityScorer> {
    pub fn new(default_depth: u8) -> Self {
        Self::with_config(
            SearchConfig {
                max_depth: default_depth,
                ..SearchConfig::default()
            },
            MobilityScorer,
        )
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_config(config: SearchConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for MinimaxEngine<MobilityScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_depth)
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("invalid switch value '{other}'")),
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "OakChess Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.config.max_depth = value
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Ordering") {
            self.config.ordering = match value.trim().to_ascii_lowercase().as_str() {
                "scored" => SuccessorOrdering::Scored,
                "discovery" => SuccessorOrdering::Discovery,
                _ => return Err(format!("invalid Ordering value '{value}'")),
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Pruning") {
            self.config.pruning = parse_switch(value)?;
            return Ok(());
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let config = SearchConfig {
            max_depth: params.depth.unwrap_or(self.config.max_depth),
            ..self.config
        };
        let maximizing = game_state.side_to_move == Color::White;

        let mut out = EngineOutput::default();

        if params.is_budgeted() {
            let budget = SearchBudget {
                max_nodes: params.max_nodes,
                movetime_ms: params.movetime_ms,
            };
            let result =
                iterative_deepening_search(game_state, maximizing, &self.scorer, config, budget)?;
            out.info_lines.push(format!(
                "info depth {} score {} nodes {} time {}",
                result.reached_depth, result.score, result.nodes, result.elapsed_ms
            ));
            if result.aborted {
                out.info_lines
                    .push("info string minimax_engine budget exhausted".to_owned());
            }
            out.best_move = result.best;
        } else {
            let result = minimax_search(game_state, maximizing, &self.scorer, config)?;
            out.info_lines.push(format!(
                "info depth {} score {} nodes {}",
                config.max_depth, result.score, result.nodes
            ));
            out.best_move = result.best;
        }

        Ok(out)
    }
}
