use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use twenty48_engine::engine::Direction;
use twenty48_engine::game::Game;

/// Safety net against a game that somehow never ends.
const MAX_TURNS_PER_GAME: u32 = 100_000;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play seeded games with random moves and report scores", long_about = None)]
struct Args {
    /// Number of games to play
    #[clap(short, long, default_value_t = 20)]
    games: u32,

    /// Seed of the first game; game i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

struct GameResult {
    score: u64,
    steps: u32,
    max_tile: u32,
}

fn play_random_game(seed: u64) -> GameResult {
    let mut game = Game::new(seed);
    let mut mover = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let mut turns = 0;
    while !game.is_game_over() {
        if turns == MAX_TURNS_PER_GAME {
            warn!("game with seed {} hit the turn limit", seed);
            break;
        }
        // Only legal moves are drawn, so every turn makes progress.
        let legal: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| game.board().can_move(d))
            .collect();
        let Some(&direction) = legal.choose(&mut mover) else {
            break;
        };
        game.process_move(direction);
        turns += 1;
    }

    GameResult {
        score: game.score(),
        steps: game.steps(),
        max_tile: game.board().max_tile().unwrap_or(0),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    info!("playing {} games starting at seed {}", args.games, args.seed);

    let mut results = Vec::with_capacity(args.games as usize);
    for i in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(i));
        let result = play_random_game(seed);
        println!(
            "  Seed: {:<6} Score: {:<7} Steps: {:<5} Max tile: {}",
            seed, result.score, result.steps, result.max_tile
        );
        results.push(result);
    }

    let total: u64 = results.iter().map(|r| r.score).sum();
    let best = results.iter().map(|r| r.max_tile).max().unwrap_or(0);
    println!("\n--- Rollout Complete ---");
    println!("Games played: {}", results.len());
    println!("Average score: {:.2}", total as f64 / results.len() as f64);
    println!("Best tile: {}", best);
    Ok(())
}
