//! Iterative deepening over the minimax search with an optional budget.
//!
//! Depths `1..=max_depth` are searched in turn. A node or wall-clock budget is
//! checked between successor expansions; when it runs out the in-flight depth
//! is abandoned and the deepest fully completed result is returned.

use std::time::{Duration, Instant};

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::ordered_successors;
use crate::search::board_scoring::BoardScorer;
use crate::search::minimax::{run_search, Interrupt, SearchConfig, SearchControl};

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBudget {
    pub max_nodes: Option<u64>,
    pub movetime_ms: Option<u64>,
}

impl SearchBudget {
    pub const UNLIMITED: Self = Self {
        max_nodes: None,
        movetime_ms: None,
    };
}

#[derive(Debug, Clone, Default)]
pub struct IterativeResult {
    pub best: Option<GameState>,
    pub score: f64,
    pub reached_depth: u8,
    pub nodes: u64,
    pub aborted: bool,
    pub elapsed_ms: u128,
}

pub fn iterative_deepening_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    maximizing: bool,
    scorer: &S,
    config: SearchConfig,
    budget: SearchBudget,
) -> ChessResult<IterativeResult> {
    let start = Instant::now();
    let mut control = SearchControl {
        nodes: 0,
        max_nodes: budget.max_nodes,
        deadline: budget
            .movetime_ms
            .map(|ms| start + Duration::from_millis(ms)),
    };

    let mut result = IterativeResult {
        score: scorer.score(game_state),
        ..IterativeResult::default()
    };

    for depth in 1..=config.max_depth {
        let depth_config = SearchConfig {
            max_depth: depth,
            ..config
        };
        match run_search(game_state, maximizing, scorer, depth_config, &mut control) {
            Ok(completed) => {
                result.best = completed.best;
                result.score = completed.score;
                result.reached_depth = depth;
                if game_state.is_terminal() || result.best.is_none() {
                    break;
                }
            }
            Err(Interrupt::BudgetExhausted) => {
                result.aborted = true;
                break;
            }
            Err(Interrupt::Fault(err)) => return Err(err),
        }
    }

    // Not even depth 1 finished: fall back to the best-looking child.
    if result.aborted && result.reached_depth == 0 {
        result.best = ordered_successors(game_state, scorer)?.next();
    }

    result.nodes = control.nodes;
    result.elapsed_ms = start.elapsed().as_millis();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;
    use crate::search::board_scoring::MobilityScorer;
    use crate::search::minimax::minimax_search;

    const ITALIAN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

    #[test]
    fn unlimited_budget_matches_fixed_depth() {
        let game = GameState::from_fen(ITALIAN).expect("FEN should parse");
        let config = SearchConfig::default();
        let deepened = iterative_deepening_search(
            &game,
            true,
            &MobilityScorer,
            config,
            SearchBudget::UNLIMITED,
        )
        .expect("search should run");
        let fixed =
            minimax_search(&game, true, &MobilityScorer, config).expect("search should run");

        assert!(!deepened.aborted);
        assert_eq!(deepened.reached_depth, config.max_depth);
        assert_eq!(deepened.best, fixed.best);
        assert_eq!(deepened.score, fixed.score);
        assert!(deepened.nodes > fixed.nodes);
    }

    #[test]
    fn node_budget_keeps_last_completed_depth() {
        let game = GameState::from_fen(ITALIAN).expect("FEN should parse");
        let depth_one = minimax_search(
            &game,
            true,
            &MobilityScorer,
            SearchConfig {
                max_depth: 1,
                ..SearchConfig::default()
            },
        )
        .expect("search should run");

        // Enough for depth 1 but far too little for depth 3.
        let budget = SearchBudget {
            max_nodes: Some(depth_one.nodes + 5),
            movetime_ms: None,
        };
        let result = iterative_deepening_search(
            &game,
            true,
            &MobilityScorer,
            SearchConfig {
                max_depth: 3,
                ..SearchConfig::default()
            },
            budget,
        )
        .expect("search should run");

        assert!(result.aborted);
        assert_eq!(result.reached_depth, 1);
        assert_eq!(result.best, depth_one.best);
    }

    #[test]
    fn exhausted_before_depth_one_still_moves() {
        let game = GameState::new_game();
        let result = iterative_deepening_search(
            &game,
            true,
            &MobilityScorer,
            SearchConfig::default(),
            SearchBudget {
                max_nodes: Some(1),
                movetime_ms: None,
            },
        )
        .expect("search should run");
        assert!(result.aborted);
        assert_eq!(result.reached_depth, 0);
        let child = result.best.expect("fallback move");
        assert_eq!(child.side_to_move, Color::Black);
    }

    #[test]
    fn zero_movetime_aborts_immediately() {
        let game = GameState::new_game();
        let result = iterative_deepening_search(
            &game,
            true,
            &MobilityScorer,
            SearchConfig::default(),
            SearchBudget {
                max_nodes: None,
                movetime_ms: Some(0),
            },
        )
        .expect("search should run");
        assert!(result.aborted);
        assert!(result.best.is_some());
    }

    #[test]
    fn terminal_root_stops_after_first_pass() {
        let game = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1")
            .expect("FEN should parse");
        let result = iterative_deepening_search(
            &game,
            false,
            &MobilityScorer,
            SearchConfig {
                max_depth: 4,
                ..SearchConfig::default()
            },
            SearchBudget::UNLIMITED,
        )
        .expect("search should run");
        assert!(result.best.is_none());
        assert_eq!(result.reached_depth, 1);
        assert!(!result.aborted);
    }
}
