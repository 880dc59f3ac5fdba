//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --player1 minimax:3 --player2 greedy --verbose`

use clap::Parser;

use oak_chess::chess_errors::ChessErrors;
use oak_chess::engines::engine_trait::{Engine, GoParams};
use oak_chess::utils::engine_match_harness::{play_series, MatchConfig, SeriesConfig};
use oak_chess::utils::game_driver::PlayerKind;

#[derive(Parser, Debug)]
#[command(name = "engine_match_series", about = "Play a seeded series between two engines")]
struct Args {
    /// First engine: greedy, minimax[:depth], random[:seed]
    #[arg(long, default_value = "minimax:2")]
    player1: PlayerKind,

    /// Second engine: greedy, minimax[:depth], random[:seed]
    #[arg(long, default_value = "greedy")]
    player2: PlayerKind,

    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    /// Per-move time budget in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    #[arg(long, short)]
    verbose: bool,
}

fn factory(kind: PlayerKind) -> Result<impl Fn() -> Box<dyn Engine>, ChessErrors> {
    if kind == PlayerKind::Human {
        return Err(ChessErrors::EngineFailure(
            "a match series needs two engine players".to_owned(),
        ));
    }
    Ok(move || match kind.build_engine() {
        Some(engine) => engine,
        None => unreachable!("human players are rejected above"),
    })
}

fn main() -> Result<(), ChessErrors> {
    let args = Args::parse();

    let stats = play_series(
        factory(args.player1)?,
        factory(args.player2)?,
        &SeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                go_params: GoParams {
                    movetime_ms: args.movetime,
                    ..GoParams::default()
                },
                ..MatchConfig::default()
            },
            verbose: args.verbose,
        },
    )?;

    println!("{} vs {}", args.player1, args.player2);
    println!("{}", stats.report());
    for game in &stats.games {
        println!(
            "seed {} player1 as {:?}: {:?}",
            game.seed, game.first_plays, game.outcome
        );
    }
    Ok(())
}
