use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use twenty48_engine::engine::Direction;
use twenty48_engine::game::Game;
use twenty48_engine::utils::read_board_file;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Seed for tile spawns (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,

    /// Start from a board layout file (rows like "2 . . 4")
    #[clap(short, long)]
    board: Option<PathBuf>,
}

fn new_game(args: &Args) -> Result<Game> {
    let seed = args.seed.unwrap_or_else(rand::random);
    match &args.board {
        Some(path) => {
            let board = read_board_file(path)
                .with_context(|| format!("Failed to read board from {}", path.display()))?;
            Ok(Game::new_with_board(board, seed))
        }
        None => Ok(Game::new(seed)),
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Error reading input")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

fn print_status(game: &Game) {
    println!("---------------------");
    let last = game
        .last_move()
        .map_or_else(|| "-".to_string(), |d| d.arrow().to_string());
    println!("Score: {}, Steps: {}, Last action: {}", game.score(), game.steps(), last);
    let highlight = game.last_spawn().map(|s| (s.row, s.col));
    println!("{}", game.board().to_string_with_highlight(highlight));
}

/// Answer to the game-over prompt.
#[derive(Debug, PartialEq, Eq)]
enum GameOverChoice {
    PlayAgain,
    /// Close the prompt and keep the final board on screen.
    Dismiss,
    /// Input ended.
    Quit,
}

/// Asks whether to start over, resetting the game on "y".
fn offer_reset(game: &mut Game, input: &mut impl BufRead) -> Result<GameOverChoice> {
    println!("---------------------");
    println!("GAME OVER! Final score: {}", game.score());
    print!("Play again? (y/n): ");
    io::stdout().flush()?;

    match read_line(input)? {
        Some(answer) if answer.eq_ignore_ascii_case("y") => {
            game.reset();
            Ok(GameOverChoice::PlayAgain)
        }
        Some(_) => Ok(GameOverChoice::Dismiss),
        None => Ok(GameOverChoice::Quit),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut game = new_game(&args)?;
    let mut stdin = io::stdin().lock();
    // Set once the game-over prompt is dismissed; cleared by a reset.
    let mut dismissed = false;
    println!("Welcome to 2048!");

    loop {
        print_status(&game);

        if game.is_game_over() && !dismissed {
            match offer_reset(&mut game, &mut stdin)? {
                GameOverChoice::PlayAgain => continue,
                GameOverChoice::Dismiss => dismissed = true,
                GameOverChoice::Quit => break,
            }
        }

        print!("Move with w/a/s/d (or h/j/k/l), 'r' to reset, 'q' to quit: ");
        io::stdout().flush()?;

        let Some(command) = read_line(&mut stdin)? else {
            break; // EOF
        };

        match command.as_str() {
            "q" => break,
            "r" => {
                game.reset();
                dismissed = false;
                println!("New game.");
            }
            _ => {
                let mut chars = command.chars();
                match (chars.next().and_then(Direction::from_key), chars.next()) {
                    (Some(direction), None) => {
                        let report = game.process_move(direction);
                        if !report.changed {
                            println!("Nothing moves {}.", direction);
                        } else if report.score_delta > 0 {
                            println!("+{}", report.score_delta);
                        }
                    }
                    _ => println!("Invalid input. Use w/a/s/d, h/j/k/l, 'r' or 'q'."),
                }
            }
        }
    }

    println!("Thanks for playing! Final score: {}", game.score());
    Ok(())
}
