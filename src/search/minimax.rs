//! Depth-bounded minimax with alpha-beta pruning.
//!
//! White maximizes and Black minimizes the absolute evaluator score. The
//! search returns the successor Position achieving the best score; among
//! equally scored children the first one examined is kept, so the result
//! depends on successor order but never on whether pruning is enabled.

use std::time::Instant;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{
    ordered_successors, successors, with_terminal_result,
};
use crate::search::board_scoring::{BoardScorer, MobilityScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorOrdering {
    /// Board scan order.
    Discovery,
    /// Best evaluator score for the mover first, scan order on ties.
    Scored,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub ordering: SuccessorOrdering,
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            ordering: SuccessorOrdering::Scored,
            pruning: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best: Option<GameState>,
    pub score: f64,
    pub nodes: u64,
}

/// Why a recursive search stopped before finishing.
#[derive(Debug)]
pub(crate) enum Interrupt {
    Fault(ChessErrors),
    BudgetExhausted,
}

impl From<ChessErrors> for Interrupt {
    fn from(err: ChessErrors) -> Self {
        Interrupt::Fault(err)
    }
}

/// Node accounting plus an optional node/time budget checked per expansion.
#[derive(Debug, Default)]
pub(crate) struct SearchControl {
    pub nodes: u64,
    pub max_nodes: Option<u64>,
    pub deadline: Option<Instant>,
}

impl SearchControl {
    fn charge(&mut self) -> Result<(), Interrupt> {
        self.nodes += 1;
        if matches!(self.max_nodes, Some(limit) if self.nodes > limit) {
            return Err(Interrupt::BudgetExhausted);
        }
        if matches!(self.deadline, Some(deadline) if Instant::now() >= deadline) {
            return Err(Interrupt::BudgetExhausted);
        }
        Ok(())
    }
}

/// Best successor for the side to move with the default evaluator.
///
/// `maximizing` is `true` when the side to move is White. Returns `None` at
/// depth 0 or when the Position has no successors.
pub fn best_move(
    game_state: &GameState,
    maximizing: bool,
    depth: u8,
) -> ChessResult<Option<GameState>> {
    let config = SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    };
    Ok(minimax_search(game_state, maximizing, &MobilityScorer, config)?.best)
}

pub fn minimax_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    maximizing: bool,
    scorer: &S,
    config: SearchConfig,
) -> ChessResult<SearchResult> {
    let mut control = SearchControl::default();
    match run_search(game_state, maximizing, scorer, config, &mut control) {
        Ok(result) => Ok(result),
        Err(Interrupt::Fault(err)) => Err(err),
        Err(Interrupt::BudgetExhausted) => Err(ChessErrors::EngineFailure(
            "unbudgeted search was interrupted".to_owned(),
        )),
    }
}

pub(crate) fn run_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    maximizing: bool,
    scorer: &S,
    config: SearchConfig,
    control: &mut SearchControl,
) -> Result<SearchResult, Interrupt> {
    let (score, best) = minimax(
        game_state,
        maximizing,
        config.max_depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        scorer,
        &config,
        control,
    )?;
    Ok(SearchResult {
        best,
        score,
        nodes: control.nodes,
    })
}

fn children_of<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    scorer: &S,
    ordering: SuccessorOrdering,
) -> ChessResult<Box<dyn Iterator<Item = GameState>>> {
    Ok(match ordering {
        SuccessorOrdering::Discovery => Box::new(successors(game_state)?.into_iter()),
        SuccessorOrdering::Scored => Box::new(ordered_successors(game_state, scorer)?),
    })
}

#[allow(clippy::too_many_arguments)]
fn minimax<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    maximizing: bool,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    scorer: &S,
    config: &SearchConfig,
    control: &mut SearchControl,
) -> Result<(f64, Option<GameState>), Interrupt> {
    control.charge()?;

    if depth == 0 || game_state.is_terminal() {
        return Ok((scorer.score(game_state), None));
    }

    let children = children_of(game_state, scorer, config.ordering)?;
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_child: Option<GameState> = None;

    for child in children {
        let (score, _) = minimax(
            &child,
            !maximizing,
            depth - 1,
            alpha,
            beta,
            scorer,
            config,
            control,
        )?;

        if maximizing {
            if best_child.is_none() || score > best_score {
                best_score = score;
                best_child = Some(child);
            }
            alpha = alpha.max(score);
        } else {
            if best_child.is_none() || score < best_score {
                best_score = score;
                best_child = Some(child);
            }
            beta = beta.min(score);
        }

        if config.pruning && beta <= alpha {
            break;
        }
    }

    if best_child.is_none() {
        // Untagged root with no legal moves.
        let tagged = with_terminal_result(game_state.clone())?;
        return Ok((scorer.score(&tagged), None));
    }

    Ok((best_score, best_child))
}
