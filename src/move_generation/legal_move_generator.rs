//! Full legal move generation pipeline.
//!
//! Walks the board in scan order, expands each own piece's scope, and keeps
//! the requests the transition function accepts. On top of that sit terminal
//! detection and the two successor enumerators used by search: plain
//! discovery order, and a scored order that yields the best children first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{try_move, MoveOutcome};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::piece_scope::extend_piece_scope;
use crate::search::board_scoring::BoardScorer;

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub request: MoveRequest,
    pub game_after_move: GameState,
}

/// Visit every legal transition in discovery order until `visit` returns `false`.
fn for_each_legal_move<F>(game_state: &GameState, mut visit: F) -> ChessResult<()>
where
    F: FnMut(MoveRequest, GameState) -> ChessResult<bool>,
{
    let side = game_state.side_to_move;
    let mut scope = Vec::with_capacity(32);

    for (from, piece) in game_state.occupied() {
        if piece.color != side {
            continue;
        }
        scope.clear();
        extend_piece_scope(game_state, from, &mut scope);
        for &to in &scope {
            let request = MoveRequest::new(from, to);
            if let MoveOutcome::Accepted(next) = try_move(game_state, request)? {
                if !visit(request, next)? {
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

/// All legal transitions for the side to move. Promotions are to a queen.
pub fn generate_legal_moves(game_state: &GameState) -> ChessResult<Vec<GeneratedMove>> {
    let mut legal = Vec::with_capacity(48);
    for_each_legal_move(game_state, |request, game_after_move| {
        legal.push(GeneratedMove {
            request,
            game_after_move,
        });
        Ok(true)
    })?;
    Ok(legal)
}

/// Stops at the first legal transition found.
pub fn has_legal_move(game_state: &GameState) -> ChessResult<bool> {
    let mut found = false;
    for_each_legal_move(game_state, |_, _| {
        found = true;
        Ok(false)
    })?;
    Ok(found)
}

/// Checkmate or stalemate classification for the side to move.
pub fn terminal_result(game_state: &GameState) -> ChessResult<Option<GameResult>> {
    if has_legal_move(game_state)? {
        return Ok(None);
    }

    let side = game_state.side_to_move;
    if is_king_in_check(game_state, side)? {
        Ok(Some(GameResult::checkmated(side)))
    } else {
        Ok(Some(GameResult::Draw))
    }
}

/// Copy of `game_state` tagged with its terminal result.
pub fn with_terminal_result(game_state: GameState) -> ChessResult<GameState> {
    let result = terminal_result(&game_state)?;
    Ok(game_state.with_result(result))
}

/// Legal successor Positions in discovery order, each tagged with its result.
pub fn successors(game_state: &GameState) -> ChessResult<Vec<GameState>> {
    if game_state.is_terminal() {
        return Ok(Vec::new());
    }

    generate_legal_moves(game_state)?
        .into_iter()
        .map(|mv| with_terminal_result(mv.game_after_move))
        .collect()
}

struct ScoredChild {
    goodness: f64,
    discovery: usize,
    state: GameState,
}

impl PartialEq for ScoredChild {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredChild {}

impl PartialOrd for ScoredChild {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredChild {
    // Max-heap order: higher goodness first, then earlier discovery.
    fn cmp(&self, other: &Self) -> Ordering {
        self.goodness
            .partial_cmp(&other.goodness)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.discovery.cmp(&self.discovery))
    }
}

/// Successors yielded best-first for the side that just moved.
///
/// Finite and single-pass: every child is scored up front, then popped from
/// a heap one at a time. Equal scores come out in discovery order.
pub struct OrderedSuccessors {
    heap: BinaryHeap<ScoredChild>,
}

impl OrderedSuccessors {
    pub fn new<S: BoardScorer + ?Sized>(game_state: &GameState, scorer: &S) -> ChessResult<Self> {
        let mover = game_state.side_to_move;
        let children = successors(game_state)?;
        let heap = children
            .into_iter()
            .enumerate()
            .map(|(discovery, state)| {
                let score = scorer.score(&state);
                let goodness = match mover {
                    Color::White => score,
                    Color::Black => -score,
                };
                ScoredChild {
                    goodness,
                    discovery,
                    state,
                }
            })
            .collect();
        Ok(Self { heap })
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.heap.len()
    }
}

impl Iterator for OrderedSuccessors {
    type Item = GameState;

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop().map(|child| child.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

#[inline]
pub fn ordered_successors<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    scorer: &S,
) -> ChessResult<OrderedSuccessors> {
    OrderedSuccessors::new(game_state, scorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MobilityScorer;

    #[test]
    fn start_position_has_twenty_successors() {
        let game = GameState::new_game();
        let children = successors(&game).expect("kings present");
        assert_eq!(children.len(), 20);
        assert!(children.iter().all(|c| c.result.is_none()));
        assert!(children.iter().all(|c| c.side_to_move == Color::Black));
    }

    #[test]
    fn discovery_order_is_file_major_then_scope_order() {
        let game = GameState::new_game();
        let moves = generate_legal_moves(&game).expect("kings present");
        // a2 pawn, b2 pawn, then the b1 knight
        let first: Vec<MoveRequest> = moves.iter().take(6).map(|m| m.request).collect();
        assert_eq!(
            first,
            vec![
                MoveRequest::new(Square::new(0, 6), Square::new(0, 5)),
                MoveRequest::new(Square::new(0, 6), Square::new(0, 4)),
                MoveRequest::new(Square::new(1, 6), Square::new(1, 5)),
                MoveRequest::new(Square::new(1, 6), Square::new(1, 4)),
                MoveRequest::new(Square::new(1, 7), Square::new(0, 5)),
                MoveRequest::new(Square::new(1, 7), Square::new(2, 5)),
            ]
        );
    }

    #[test]
    fn queen_checkmate_is_white_win() {
        // queen two files from the cornered king, white king covers a7/b7
        for fen in ["k1Q5/8/K7/8/8/8/8/8 b - - 0 1", "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1"] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            assert_eq!(
                terminal_result(&game).expect("kings present"),
                Some(GameResult::WhiteWins),
                "{fen}"
            );
            assert!(successors(&game).expect("kings present").is_empty());
        }
    }

    #[test]
    fn back_rank_queen_mate_two_files_away() {
        // queen on e8 gives check along the rank; f7/g7/h7 are covered
        let game = GameState::from_fen("4Q2k/5ppp/8/8/8/8/8/6K1 b - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            terminal_result(&game).expect("kings present"),
            Some(GameResult::WhiteWins)
        );
    }

    #[test]
    fn stalemate_is_a_draw() {
        // black king on a8, white queen on b6 covers every flight square
        let game = GameState::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            terminal_result(&game).expect("kings present"),
            Some(GameResult::Draw)
        );
    }

    #[test]
    fn live_position_has_no_result() {
        assert_eq!(
            terminal_result(&GameState::new_game()).expect("kings present"),
            None
        );
    }

    #[test]
    fn mating_successor_is_tagged() {
        let game = GameState::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1")
            .expect("FEN should parse");
        let children = successors(&game).expect("kings present");
        let mates: Vec<&GameState> = children
            .iter()
            .filter(|c| c.result == Some(GameResult::WhiteWins))
            .collect();
        assert!(!mates.is_empty());
        for mate in mates {
            assert!(successors(mate).expect("kings present").is_empty());
        }
    }

    #[test]
    fn ordered_successors_keep_the_same_set() {
        let game = GameState::from_fen(
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        )
        .expect("FEN should parse");
        let plain = successors(&game).expect("kings present");
        let ordered: Vec<GameState> = ordered_successors(&game, &MobilityScorer)
            .expect("kings present")
            .collect();
        assert_eq!(plain.len(), ordered.len());
        for child in &plain {
            assert!(ordered.contains(child));
        }
    }

    #[test]
    fn ordered_successors_are_best_first_for_the_mover() {
        let scorer = MobilityScorer;
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 3",
        ] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            let sign = match game.side_to_move {
                Color::White => 1.0,
                Color::Black => -1.0,
            };
            let scores: Vec<f64> = ordered_successors(&game, &scorer)
                .expect("kings present")
                .map(|child| sign * scorer.score(&child))
                .collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{fen}: {scores:?}");
        }
    }

    #[test]
    fn ordered_ties_keep_discovery_order() {
        let scorer = MobilityScorer;
        let game = GameState::new_game();
        let plain = successors(&game).expect("kings present");
        let ordered: Vec<GameState> = ordered_successors(&game, &scorer)
            .expect("kings present")
            .collect();
        for pair in ordered.windows(2) {
            if scorer.score(&pair[0]) == scorer.score(&pair[1]) {
                let a = plain.iter().position(|c| c == &pair[0]).expect("present");
                let b = plain.iter().position(|c| c == &pair[1]).expect("present");
                assert!(a < b);
            }
        }
    }

    #[test]
    fn terminal_positions_have_no_successors() {
        let game = GameState::new_game().with_result(Some(GameResult::Draw));
        assert!(successors(&game).expect("kings present").is_empty());
        assert_eq!(
            ordered_successors(&game, &MobilityScorer)
                .expect("kings present")
                .remaining(),
            0
        );
    }

    #[test]
    fn random_walks_keep_rights_monotonic_and_en_passant_honest() {
        use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

        let starts = [
            GameState::new_game(),
            GameState::from_fen(
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            )
            .expect("FEN should parse"),
        ];

        for (index, start) in starts.iter().enumerate() {
            for seed in 0..8u64 {
                let mut rng = StdRng::seed_from_u64(seed * 31 + index as u64);
                let mut state = start.clone();

                for ply in 0..80 {
                    let children = successors(&state).expect("kings present");
                    let Some(next) = children.choose(&mut rng) else {
                        break;
                    };
                    let request = next.last_move.expect("successor records its move");
                    let mover = state.piece_at(request.from).expect("mover on origin");

                    assert!(
                        next.castling_rights.is_subset_of(&state.castling_rights),
                        "rights grew at ply {ply} (seed {seed})"
                    );
                    assert!(!is_king_in_check(next, mover.color).expect("kings present"));

                    let double_step = mover.kind == PieceKind::Pawn
                        && request.from.rank.abs_diff(request.to.rank) == 2;
                    match next.en_passant {
                        Some(target) => {
                            assert!(double_step, "stray target at ply {ply} (seed {seed})");
                            assert_eq!(target.color, mover.color);
                            assert_eq!(target.file, request.to.file);
                        }
                        None => assert!(!double_step, "lost target at ply {ply} (seed {seed})"),
                    }

                    state = next.clone();
                }
            }
        }
    }
}
