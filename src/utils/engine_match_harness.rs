//! Engine-vs-engine matches for local strength checks.
//!
//! A match plays two engines from a Position, optionally after a seeded
//! random opening so repeated games do not all follow the same line. A series
//! assigns seats by a seeded coin flip and tallies results per contender.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{successors, with_terminal_result};
use crate::utils::game_driver::engine_move;
use crate::utils::long_algebraic::last_move_text;

const SEAT_SEED_SALT: u64 = 0x5EA7_0FC0_FFEE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Checkmate { winner: Color },
    Stalemate,
    PlyLimit,
}

impl MatchOutcome {
    fn of(game_state: &GameState) -> Self {
        match game_state.result {
            Some(GameResult::WhiteWins) => MatchOutcome::Checkmate {
                winner: Color::White,
            },
            Some(GameResult::BlackWins) => MatchOutcome::Checkmate {
                winner: Color::Black,
            },
            Some(GameResult::Draw) => MatchOutcome::Stalemate,
            None => MatchOutcome::PlyLimit,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Moves made and time spent thinking by one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTally {
    pub moves: u32,
    pub thinking: Duration,
}

impl SideTally {
    fn record(&mut self, elapsed: Duration) {
        self.moves = self.moves.saturating_add(1);
        self.thinking = self.thinking.saturating_add(elapsed);
    }

    fn absorb(&mut self, other: SideTally) {
        self.moves = self.moves.saturating_add(other.moves);
        self.thinking = self.thinking.saturating_add(other.thinking);
    }

    pub fn avg_move_ms(&self) -> f64 {
        if self.moves == 0 {
            return 0.0;
        }
        self.thinking.as_secs_f64() * 1000.0 / f64::from(self.moves)
    }
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Random plies played before the engines take over. Empty disables it.
    pub opening_plies: RangeInclusive<u8>,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_plies: 2..=6,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening: Vec<String>,
    pub moves: Vec<String>,
    pub white: SideTally,
    pub black: SideTally,
}

/// Play one match. `seed` drives the random opening; `None` hands `start`
/// straight to the engines.
pub fn play_match(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    start: GameState,
    seed: Option<u64>,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let mut state = with_terminal_result(start)?;
    let mut opening = Vec::new();
    if let Some(seed) = seed {
        state = random_opening(state, seed, config.opening_plies.clone(), &mut opening)?;
    }

    white.new_game();
    black.new_game();

    let mut moves = Vec::new();
    let mut white_tally = SideTally::default();
    let mut black_tally = SideTally::default();

    for _ in 0..config.max_plies {
        if state.is_terminal() {
            break;
        }

        let started = Instant::now();
        let (next, _) = match state.side_to_move {
            Color::White => engine_move(white, &state, &config.go_params)?,
            Color::Black => engine_move(black, &state, &config.go_params)?,
        };
        let elapsed = started.elapsed();
        match state.side_to_move {
            Color::White => white_tally.record(elapsed),
            Color::Black => black_tally.record(elapsed),
        }

        if let Some(text) = last_move_text(&next) {
            moves.push(text);
        }
        state = next;
    }

    Ok(MatchResult {
        outcome: MatchOutcome::of(&state),
        final_state: state,
        opening,
        moves,
        white: white_tally,
        black: black_tally,
    })
}

fn random_opening(
    mut state: GameState,
    seed: u64,
    plies: RangeInclusive<u8>,
    played: &mut Vec<String>,
) -> ChessResult<GameState> {
    if plies.is_empty() {
        return Ok(state);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let target = rng.random_range(plies);

    for _ in 0..target {
        if state.is_terminal() {
            break;
        }
        let children = successors(&state)?;
        let Some(chosen) = children.choose(&mut rng) else {
            break;
        };
        let text = last_move_text(chosen).ok_or_else(|| {
            ChessErrors::EngineFailure("opening successor has no recorded move".to_owned())
        })?;
        played.push(text);
        state = chosen.clone();
    }

    Ok(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contender {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesGame {
    pub seed: u64,
    pub first_plays: Color,
    pub outcome: MatchOutcome,
}

impl SeriesGame {
    pub fn winner(&self) -> Option<Contender> {
        self.outcome.winner().map(|color| {
            if color == self.first_plays {
                Contender::First
            } else {
                Contender::Second
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    pub games: Vec<SeriesGame>,
    pub first: SideTally,
    pub second: SideTally,
}

impl SeriesStats {
    pub fn wins(&self, contender: Contender) -> usize {
        self.games
            .iter()
            .filter(|game| game.winner() == Some(contender))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.games
            .iter()
            .filter(|game| game.winner().is_none())
            .count()
    }

    pub fn report(&self) -> String {
        let mut total = self.first;
        total.absorb(self.second);
        format!(
            "games={} first_wins={} second_wins={} draws={} first_avg_ms={:.3} second_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games.len(),
            self.wins(Contender::First),
            self.wins(Contender::Second),
            self.draws(),
            self.first.avg_move_ms(),
            self.second.avg_move_ms(),
            total.avg_move_ms()
        )
    }
}

/// Play `config.games` matches between fresh engines from the two factories.
///
/// Game `i` starts from the standard Position after a random opening seeded
/// with `base_seed + i`. Seats come from a coin flip seeded by `base_seed`.
pub fn play_series<F1, F2>(first: F1, second: F2, config: &SeriesConfig) -> ChessResult<SeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut seat_rng = StdRng::seed_from_u64(config.base_seed ^ SEAT_SEED_SALT);
    let mut stats = SeriesStats::default();

    for index in 0..config.games {
        let seed = config.base_seed.wrapping_add(u64::from(index));
        let first_plays = if seat_rng.random_bool(0.5) {
            Color::White
        } else {
            Color::Black
        };

        let mut first_engine = first();
        let mut second_engine = second();
        let result = match first_plays {
            Color::White => play_match(
                &mut *first_engine,
                &mut *second_engine,
                GameState::new_game(),
                Some(seed),
                &config.per_game,
            )?,
            Color::Black => play_match(
                &mut *second_engine,
                &mut *first_engine,
                GameState::new_game(),
                Some(seed),
                &config.per_game,
            )?,
        };

        let (first_tally, second_tally) = match first_plays {
            Color::White => (result.white, result.black),
            Color::Black => (result.black, result.white),
        };
        stats.first.absorb(first_tally);
        stats.second.absorb(second_tally);

        let game = SeriesGame {
            seed,
            first_plays,
            outcome: result.outcome,
        };
        stats.games.push(game);

        if config.verbose {
            println!(
                "[series] game {}/{} seed={} first={:?} outcome={:?} moves={}",
                index + 1,
                config.games,
                seed,
                first_plays,
                game.outcome,
                result.moves.join(" ")
            );
        }
    }

    Ok(stats)
}
