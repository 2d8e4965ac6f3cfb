//! Game session: the state a front end holds between moves.
//!
//! A `Game` owns the current board, the running score and the random number
//! generator used for tile injection. Each call to `Game::process_move` runs
//! one whole turn (slide, spawn if anything moved, game-over check) so no
//! half-finished board is ever visible to the caller.
use crate::engine::{Board, Direction, BOARD_SIZE};
use crate::spawn::{place_random_tile, Spawn};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// What happened during one call to `Game::process_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    /// `false` if the slide changed nothing; the turn is then discarded.
    pub changed: bool,
    pub score_delta: u64,
    /// The tile injected after the slide, if any.
    pub spawn: Option<Spawn>,
    /// Whether the board reached after this turn has no legal move left.
    pub game_over: bool,
}

/// Manages the state and progression of a 2048 game session.
///
/// # Examples
/// ```
/// use twenty48_engine::engine::Direction;
/// use twenty48_engine::game::Game;
///
/// let mut game = Game::new(2048);
/// assert_eq!(game.score(), 0);
///
/// let report = game.process_move(Direction::Left);
/// if report.changed {
///     println!("Scored {}, total {}", report.score_delta, game.score());
/// }
/// if report.game_over {
///     game.reset();
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    score: u64,
    steps: u32,
    last_move: Option<Direction>,
    last_spawn: Option<Spawn>,
    rng: SmallRng,
}

impl Game {
    /// Starts a 4x4 game whose tile spawns are reproducible from `seed`.
    ///
    /// The board starts with a single random tile.
    pub fn new(seed: u64) -> Self {
        Self::start(Board::new_empty(BOARD_SIZE), SmallRng::seed_from_u64(seed))
    }

    /// Starts a 4x4 game seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::start(Board::new_empty(BOARD_SIZE), SmallRng::from_entropy())
    }

    /// Continues play from a given board. No tile is added and the score
    /// starts at 0; later spawns come from `seed`.
    pub fn new_with_board(board: Board, seed: u64) -> Self {
        Game {
            board,
            score: 0,
            steps: 0,
            last_move: None,
            last_spawn: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn start(empty: Board, mut rng: SmallRng) -> Self {
        let (board, last_spawn) = place_random_tile(&empty, &mut rng);
        Game {
            board,
            score: 0,
            steps: 0,
            last_move: None,
            last_spawn,
            rng,
        }
    }

    /// Returns an immutable reference to the current game board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Points earned from merges since the game started or was last reset.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of turns that changed the board.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// The direction of the last turn that changed the board.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// The tile added most recently, either by the last turn or at start.
    pub fn last_spawn(&self) -> Option<Spawn> {
        self.last_spawn
    }

    /// Plays one turn in `direction`.
    ///
    /// 1. The board is slid with `Board::resolve`.
    /// 2. If that changed the board, the points are added to the score, a
    ///    random tile is injected, the step counter goes up and `direction`
    ///    becomes the last move.
    /// 3. The resulting board is checked with `Board::is_over`.
    ///
    /// A turn that changes nothing leaves the whole session as it was.
    pub fn process_move(&mut self, direction: Direction) -> MoveReport {
        let outcome = self.board.resolve(direction);

        if !outcome.changed {
            debug!("move {} rejected: board unchanged", direction);
            return MoveReport {
                direction,
                changed: false,
                score_delta: 0,
                spawn: None,
                game_over: self.board.is_over(),
            };
        }

        let (board, spawn) = place_random_tile(&outcome.board, &mut self.rng);
        self.board = board;
        self.score += outcome.score_delta;
        self.steps += 1;
        self.last_move = Some(direction);
        self.last_spawn = spawn;

        let game_over = self.board.is_over();
        debug!(
            "move {} scored {} (total {}), step {}",
            direction, outcome.score_delta, self.score, self.steps
        );
        if game_over {
            info!(
                "game over after {} steps, score {}, max tile {:?}",
                self.steps,
                self.score,
                self.board.max_tile()
            );
        }

        MoveReport {
            direction,
            changed: true,
            score_delta: outcome.score_delta,
            spawn,
            game_over,
        }
    }

    /// Checks whether no move can change the board.
    pub fn is_game_over(&self) -> bool {
        self.board.is_over()
    }

    /// Starts over on an empty board of the same size with one random tile.
    /// Score, steps and the last move are cleared; the RNG keeps running.
    pub fn reset(&mut self) {
        info!("reset after {} steps with score {}", self.steps, self.score);
        let (board, spawn) = place_random_tile(&Board::new_empty(self.board.size()), &mut self.rng);
        self.board = board;
        self.score = 0;
        self.steps = 0;
        self.last_move = None;
        self.last_spawn = spawn;
    }
}
