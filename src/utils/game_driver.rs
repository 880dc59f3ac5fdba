//! Turn-by-turn game driver.
//!
//! Alternates the two configured players from a starting Position until the
//! game ends or the ply limit is hit. Engine players pick a successor through
//! the `Engine` trait; human players type long algebraic moves that go
//! through `try_move`, and rejected or malformed input is reported and asked
//! for again. Every Position is tagged with its terminal result before being
//! appended to the history.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{try_move, MoveOutcome};
use crate::move_generation::legal_move_generator::{successors, with_terminal_result};
use crate::utils::long_algebraic::{last_move_text, long_algebraic_to_request};
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Minimax { depth: u8 },
    Greedy,
    Random { seed: Option<u64> },
}

impl PlayerKind {
    /// Engine backing this player, `None` for a human.
    pub fn build_engine(self) -> Option<Box<dyn Engine>> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Minimax { depth } => Some(Box::new(MinimaxEngine::new(depth.max(1)))),
            PlayerKind::Greedy => Some(Box::new(GreedyEngine::new())),
            PlayerKind::Random { seed } => Some(Box::new(RandomEngine::new(seed))),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    /// `human`, `greedy`, `minimax`, `minimax:<depth>`, `random`, `random:<seed>`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let lowered = text.trim().to_ascii_lowercase();
        let (name, arg) = match lowered.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lowered.as_str(), None),
        };

        match (name, arg) {
            ("human", None) => Ok(PlayerKind::Human),
            ("greedy", None) => Ok(PlayerKind::Greedy),
            ("minimax", None) => Ok(PlayerKind::Minimax { depth: 2 }),
            ("minimax", Some(depth)) => match depth.parse::<u8>() {
                Ok(0) => Err("minimax depth must be at least 1".to_owned()),
                Ok(depth) => Ok(PlayerKind::Minimax { depth }),
                Err(_) => Err(format!("invalid minimax depth '{depth}'")),
            },
            ("random", None) => Ok(PlayerKind::Random { seed: None }),
            ("random", Some(seed)) => seed
                .parse::<u64>()
                .map(|seed| PlayerKind::Random { seed: Some(seed) })
                .map_err(|_| format!("invalid random seed '{seed}'")),
            _ => Err(format!("unknown player kind '{text}'")),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("human"),
            PlayerKind::Minimax { depth } => write!(f, "minimax:{depth}"),
            PlayerKind::Greedy => f.write_str("greedy"),
            PlayerKind::Random { seed: None } => f.write_str("random"),
            PlayerKind::Random { seed: Some(seed) } => write!(f, "random:{seed}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    pub max_plies: u16,
    pub verbose: bool,
    pub go_params: GoParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::Minimax { depth: 2 },
            max_plies: 300,
            verbose: false,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(GameResult),
    MaxPlies,
    /// A human player quit or ran out of input.
    Abandoned(Color),
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Every Position in order, starting Position first.
    pub history: Vec<GameState>,
    pub moves: Vec<String>,
    pub end: GameEnd,
}

impl GameRecord {
    #[inline]
    pub fn final_state(&self) -> Option<&GameState> {
        self.history.last()
    }
}

fn write_out<W: Write>(out: &mut W, text: &str) -> ChessResult<()> {
    writeln!(out, "{text}").map_err(|e| ChessErrors::EngineFailure(format!("output error: {e}")))
}

/// Ask `engine` for a move and confirm it is one of the legal successors.
pub fn engine_move(
    engine: &mut dyn Engine,
    game_state: &GameState,
    params: &GoParams,
) -> ChessResult<(GameState, Vec<String>)> {
    let output = engine.choose_move(game_state, params)?;
    let chosen = output.best_move.ok_or_else(|| {
        ChessErrors::EngineFailure(format!("{} returned no move from a live position", engine.name()))
    })?;

    if !successors(game_state)?.contains(&chosen) {
        return Err(ChessErrors::EngineFailure(format!(
            "{} returned an illegal move",
            engine.name()
        )));
    }

    Ok((with_terminal_result(chosen)?, output.info_lines))
}

/// Read lines until one is a legal move. `None` when the human quits.
fn human_move<W: Write>(
    game_state: &GameState,
    input: &mut dyn Iterator<Item = String>,
    out: &mut W,
) -> ChessResult<Option<GameState>> {
    write_out(out, &format!("{:?} to move:", game_state.side_to_move))?;

    for line in input {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("resign") {
            return Ok(None);
        }

        let request = match long_algebraic_to_request(text) {
            Ok(request) => request,
            Err(err) => {
                write_out(out, &format!("{err}"))?;
                continue;
            }
        };

        match try_move(game_state, request)? {
            MoveOutcome::Accepted(next) => return Ok(Some(with_terminal_result(next)?)),
            MoveOutcome::Rejected(reason) => {
                write_out(out, &format!("illegal move {text}: {reason}"))?;
            }
        }
    }

    Ok(None)
}

pub fn play_game<W: Write>(
    start: GameState,
    config: &GameConfig,
    human_input: &mut dyn Iterator<Item = String>,
    out: &mut W,
) -> ChessResult<GameRecord> {
    let mut white_engine = config.white.build_engine();
    let mut black_engine = config.black.build_engine();
    for engine in [white_engine.as_mut(), black_engine.as_mut()].into_iter().flatten() {
        engine.new_game();
    }

    let mut state = with_terminal_result(start)?;
    let mut history = vec![state.clone()];
    let mut moves = Vec::new();

    if config.verbose {
        write_out(out, &render_game_state(&state))?;
    }

    let mut end = GameEnd::MaxPlies;
    for _ in 0..config.max_plies {
        if let Some(result) = state.result {
            end = GameEnd::Finished(result);
            break;
        }

        let mover = state.side_to_move;
        let engine = match mover {
            Color::White => white_engine.as_mut(),
            Color::Black => black_engine.as_mut(),
        };

        let next = match engine {
            Some(engine) => {
                let (next, info_lines) = engine_move(&mut **engine, &state, &config.go_params)?;
                if config.verbose {
                    for line in &info_lines {
                        write_out(out, line)?;
                    }
                }
                next
            }
            None => match human_move(&state, human_input, out)? {
                Some(next) => next,
                None => {
                    end = GameEnd::Abandoned(mover);
                    break;
                }
            },
        };

        if let Some(text) = last_move_text(&next) {
            if config.verbose {
                write_out(out, &format!("{mover:?} plays {text}"))?;
            }
            moves.push(text);
        }
        if config.verbose {
            write_out(out, &render_game_state(&next))?;
        }

        history.push(next.clone());
        state = next;
    }

    if let (GameEnd::MaxPlies, Some(result)) = (end, state.result) {
        end = GameEnd::Finished(result);
    }

    if config.verbose {
        let summary = match end {
            GameEnd::Finished(result) => format!("game over: {}", result.as_str()),
            GameEnd::MaxPlies => format!("stopped after {} plies", config.max_plies),
            GameEnd::Abandoned(color) => format!("{color:?} left the game"),
        };
        write_out(out, &summary)?;
    }

    Ok(GameRecord {
        history,
        moves,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> std::vec::IntoIter<String> {
        items
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_player_kinds() {
        assert_eq!("human".parse::<PlayerKind>(), Ok(PlayerKind::Human));
        assert_eq!(
            "Minimax:3".parse::<PlayerKind>(),
            Ok(PlayerKind::Minimax { depth: 3 })
        );
        assert_eq!(
            "minimax".parse::<PlayerKind>(),
            Ok(PlayerKind::Minimax { depth: 2 })
        );
        assert_eq!(
            "random:9".parse::<PlayerKind>(),
            Ok(PlayerKind::Random { seed: Some(9) })
        );
        assert!("random:x".parse::<PlayerKind>().is_err());
        assert!("alphazero".parse::<PlayerKind>().is_err());
        assert_eq!(
            "minimax:0".parse::<PlayerKind>(),
            Err("minimax depth must be at least 1".to_owned())
        );
        assert_eq!(PlayerKind::Random { seed: Some(9) }.to_string(), "random:9");
    }

    #[test]
    fn fools_mate_by_hand() {
        let config = GameConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Human,
            ..GameConfig::default()
        };
        let mut input = lines(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        let mut out = Vec::new();
        let record = play_game(GameState::new_game(), &config, &mut input, &mut out)
            .expect("game should run");

        assert_eq!(record.end, GameEnd::Finished(GameResult::BlackWins));
        assert_eq!(record.moves, vec!["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(record.history.len(), 5);
        let last = record.final_state().expect("history is never empty");
        assert_eq!(last.history_len(), 4);
    }

    #[test]
    fn bad_human_input_is_retried() {
        let config = GameConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Human,
            max_plies: 1,
            ..GameConfig::default()
        };
        let mut input = lines(&["e2", "e2e5", "e7e5", "", "e2e4"]);
        let mut out = Vec::new();
        let record = play_game(GameState::new_game(), &config, &mut input, &mut out)
            .expect("game should run");

        assert_eq!(record.moves, vec!["e2e4"]);
        assert_eq!(record.end, GameEnd::MaxPlies);
        let printed = String::from_utf8(out).expect("utf8 output");
        assert!(printed.contains("invalid move text: e2"));
        assert!(printed.contains("illegal move e2e5"));
        assert!(printed.contains("illegal move e7e5"));
    }

    #[test]
    fn human_can_quit() {
        let config = GameConfig::default();
        let mut input = lines(&["quit"]);
        let mut out = Vec::new();
        let record = play_game(GameState::new_game(), &config, &mut input, &mut out)
            .expect("game should run");
        assert_eq!(record.end, GameEnd::Abandoned(Color::White));
        assert!(record.moves.is_empty());
    }

    #[test]
    fn engines_play_to_the_ply_limit() {
        let config = GameConfig {
            white: PlayerKind::Random { seed: Some(3) },
            black: PlayerKind::Greedy,
            max_plies: 12,
            verbose: true,
            ..GameConfig::default()
        };
        let mut input = lines(&[]);
        let mut out = Vec::new();
        let record = play_game(GameState::new_game(), &config, &mut input, &mut out)
            .expect("game should run");

        assert_eq!(record.history.len(), record.moves.len() + 1);
        for pair in record.history.windows(2) {
            assert!(successors(&pair[0]).expect("kings present").contains(&pair[1]));
        }
        let printed = String::from_utf8(out).expect("utf8 output");
        assert!(printed.contains("info string"));
    }

    #[test]
    fn already_finished_start_plays_nothing() {
        let start = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").expect("FEN should parse");
        let config = GameConfig {
            white: PlayerKind::Greedy,
            black: PlayerKind::Greedy,
            ..GameConfig::default()
        };
        let mut input = lines(&[]);
        let mut out = Vec::new();
        let record = play_game(start, &config, &mut input, &mut out).expect("game should run");
        assert_eq!(record.end, GameEnd::Finished(GameResult::Draw));
        assert_eq!(record.history.len(), 1);
    }

    #[test]
    fn minimax_finishes_a_mate() {
        let start = GameState::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let config = GameConfig {
            white: PlayerKind::Minimax { depth: 2 },
            black: PlayerKind::Human,
            ..GameConfig::default()
        };
        let mut input = lines(&[]);
        let mut out = Vec::new();
        let record = play_game(start, &config, &mut input, &mut out).expect("game should run");
        assert_eq!(record.end, GameEnd::Finished(GameResult::WhiteWins));
        assert_eq!(record.moves.len(), 1);
    }

    #[test]
    fn zero_depth_minimax_still_moves() {
        let config = GameConfig {
            white: PlayerKind::Minimax { depth: 0 },
            black: PlayerKind::Greedy,
            max_plies: 2,
            ..GameConfig::default()
        };
        let mut input = lines(&[]);
        let mut out = Vec::new();
        let record = play_game(GameState::new_game(), &config, &mut input, &mut out)
            .expect("game should run");
        assert_eq!(record.end, GameEnd::MaxPlies);
        assert_eq!(record.moves.len(), 2);
    }
}
