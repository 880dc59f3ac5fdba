//! Play a game in the terminal.
//!
//! Run with:
//! `cargo run --release --bin play_game`
//! `cargo run --release --bin play_game -- --white minimax:3 --black random:7 --verbose`

use std::io::{self, BufRead};

use clap::Parser;

use oak_chess::chess_errors::ChessErrors;
use oak_chess::engines::engine_trait::GoParams;
use oak_chess::game_state::game_state::GameState;
use oak_chess::utils::game_driver::{play_game, GameConfig, GameEnd, PlayerKind};

#[derive(Parser, Debug)]
#[command(name = "play_game", about = "Play chess against the minimax engine or watch engines play")]
struct Args {
    /// White player: human, greedy, minimax[:depth], random[:seed]
    #[arg(long, default_value = "human")]
    white: PlayerKind,

    /// Black player: human, greedy, minimax[:depth], random[:seed]
    #[arg(long, default_value = "minimax:2")]
    black: PlayerKind,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Stop after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: u16,

    /// Per-move time budget for minimax players, in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Print the board and engine info after every move
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), ChessErrors> {
    let args = Args::parse();

    let start = match &args.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };

    let config = GameConfig {
        white: args.white,
        black: args.black,
        max_plies: args.max_plies,
        verbose: args.verbose,
        go_params: GoParams {
            movetime_ms: args.movetime,
            ..GoParams::default()
        },
    };

    let stdin = io::stdin();
    let mut human_input = stdin.lock().lines().map_while(Result::ok);
    let mut stdout = io::stdout();

    let record = play_game(start, &config, &mut human_input, &mut stdout)?;

    println!("moves: {}", record.moves.join(" "));
    match record.end {
        GameEnd::Finished(result) => println!("result: {}", result.as_str()),
        GameEnd::MaxPlies => println!("result: unfinished after {} plies", config.max_plies),
        GameEnd::Abandoned(color) => println!("result: {color:?} abandoned the game"),
    }
    if let Some(last) = record.final_state() {
        println!("final: {}", last.get_fen());
    }
    Ok(())
}
