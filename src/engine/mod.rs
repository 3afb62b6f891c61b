//! The game-state engine: board, snake, food, and the per-tick step
mod cell;
mod food;
mod grid;
mod snake;
pub(crate) use self::cell::{Cell, Heading, IllegalHeading};
use self::food::FoodSpawner;
pub(crate) use self::grid::{CellState, Grid};
use self::grid::NoEmptyCell;
pub(crate) use self::snake::Snake;
use crate::consts;
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

/// Fixed parameters of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EngineConfig {
    /// Length of each side of the square board
    pub(crate) board_size: u16,

    /// Whether the snake re-enters on the opposite side when it leaves the
    /// board instead of colliding with the edge
    pub(crate) wraparound: bool,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            board_size: consts::DEFAULT_BOARD_SIZE,
            wraparound: false,
        }
    }
}

impl EngineConfig {
    /// Check that a game can be played with this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board is too small to hold the starting snake or
    /// larger than [`consts::MAX_BOARD_SIZE`].
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if (consts::MIN_BOARD_SIZE..=consts::MAX_BOARD_SIZE).contains(&self.board_size) {
            Ok(())
        } else {
            Err(EngineError::InvalidConfiguration(format!(
                "board size must be between {} and {}, got {}",
                consts::MIN_BOARD_SIZE,
                consts::MAX_BOARD_SIZE,
                self.board_size
            )))
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum EngineError {
    #[error("invalid game configuration: {0}")]
    InvalidConfiguration(String),
}

/// Where a game stands
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    /// The snake ran into something.  Terminal until a new run is started.
    GameOver(Collision),
    /// The snake filled the board and there is nowhere left to put food.
    /// Terminal until a new run is started.
    Won,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Collision {
    pub(crate) kind: CollisionKind,

    /// The cell the head tried to move into.  For a boundary collision, this
    /// is off the board.
    pub(crate) cell: Cell,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CollisionKind {
    Boundary,
    SelfCollision,
}

/// What changed during one call to [`Engine::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// The head moved to `head` and the tail left `vacated`, which is now
    /// empty unless it is the same cell as `head`.
    Moved { head: Cell, vacated: Cell },

    /// The head moved onto food at `head`, the snake grew by one, and new
    /// food was placed at `food`.
    AteFood { head: Cell, food: Cell },

    /// The head moved onto food at `head` and there was no space left for
    /// new food.  The game is won.
    Won { head: Cell },

    /// The move was blocked and the game is over.  Nothing on the board
    /// changed.
    GameOver(Collision),
}

/// A single game of snake: owns the board, the snake, the food, and the
/// score, and advances them one tick at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<R = rand::rngs::ThreadRng> {
    config: EngineConfig,
    grid: Grid,
    snake: Snake,
    spawner: FoodSpawner<R>,
    food: Option<Cell>,
    score: u32,
    state: GameState,

    /// Heading to switch to at the start of the next step
    pending: Option<Heading>,
}

impl Engine<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Engine::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine and start its first run.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` is invalid.
    pub(crate) fn new_with_rng(config: EngineConfig, rng: R) -> Result<Engine<R>, EngineError> {
        let (grid, snake) = initial_board(config)?;
        let mut engine = Engine {
            config,
            grid,
            snake,
            spawner: FoodSpawner::new(rng),
            food: None,
            score: 0,
            state: GameState::Running,
            pending: None,
        };
        engine.begin();
        Ok(engine)
    }

    /// Discard the current game and start a fresh one: an empty board, the
    /// snake at its starting position, one piece of food, and the score
    /// reset.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the engine's configuration is invalid.
    pub(crate) fn start_run(&mut self) -> Result<(), EngineError> {
        let (grid, snake) = initial_board(self.config)?;
        self.grid = grid;
        self.snake = snake;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.score = u32::try_from(self.snake.len()).unwrap_or(u32::MAX);
        self.pending = None;
        self.state = GameState::Running;
        self.food = None;
        info!(
            "Started new run on {size}x{size} board{wrap}",
            size = self.config.board_size,
            wrap = if self.config.wraparound {
                " with wraparound"
            } else {
                ""
            }
        );
        self.place_food();
    }

    /// Advance the game by one tick.  Returns `None` without doing anything
    /// if the game is already over.
    pub(crate) fn step(&mut self) -> Option<Step> {
        if !self.running() {
            return None;
        }
        if let Some(heading) = self.pending.take() {
            self.snake.turn(heading);
        }
        let mut candidate = self.snake.propose_next_head(self.snake.heading());
        if self.config.wraparound {
            candidate = self.grid.wrap(candidate);
        }
        match self.grid.get(candidate) {
            None => Some(self.collide(CollisionKind::Boundary, candidate)),
            // The tail moves out of the way during a non-growing move, and a
            // move onto a body cell is never a growing move.
            Some(CellState::Body) if candidate != self.snake.tail() => {
                Some(self.collide(CollisionKind::SelfCollision, candidate))
            }
            Some(CellState::Food) => {
                self.grid.set(candidate, CellState::Body);
                self.snake.grow_to(candidate);
                self.score = self.score.saturating_add(1);
                debug!(
                    "Ate food at {candidate}; score is now {}, with {} empty cells left",
                    self.score,
                    self.grid.empty_count()
                );
                Some(match self.place_food() {
                    Some(food) => Step::AteFood {
                        head: candidate,
                        food,
                    },
                    None => Step::Won { head: candidate },
                })
            }
            Some(CellState::Empty | CellState::Body) => {
                let vacated = self.snake.advance_to(candidate);
                self.grid.set(vacated, CellState::Empty);
                self.grid.set(candidate, CellState::Body);
                Some(Step::Moved {
                    head: candidate,
                    vacated,
                })
            }
        }
    }

    /// Spawn new food and return its location.  If the board is full, the
    /// game is won instead, and `None` is returned.
    fn place_food(&mut self) -> Option<Cell> {
        match self.spawner.spawn(&mut self.grid) {
            Ok(cell) => {
                self.food = Some(cell);
                Some(cell)
            }
            Err(NoEmptyCell) => {
                self.food = None;
                self.state = GameState::Won;
                info!("Board filled; game won with score {}", self.score);
                None
            }
        }
    }
}

impl<R> Engine<R> {
    /// Ask for the snake to turn to `heading` on the next step.
    ///
    /// A request for the reverse of the snake's current heading is ignored,
    /// as are requests made once the game is over; otherwise, the request
    /// replaces any earlier request made since the last step.  Returns
    /// whether the request was accepted.
    pub(crate) fn request_heading(&mut self, heading: Heading) -> bool {
        if !self.running() || heading == self.snake.heading().opposite() {
            return false;
        }
        self.pending = Some(heading);
        true
    }

    fn collide(&mut self, kind: CollisionKind, cell: Cell) -> Step {
        let collision = Collision { kind, cell };
        self.state = GameState::GameOver(collision);
        info!(
            "Game over: {kind:?} collision at {cell} with score {}",
            self.score
        );
        Step::GameOver(collision)
    }

    pub(crate) fn config(&self) -> EngineConfig {
        self.config
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Cell> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }
}

/// Build an empty board with the snake in its starting position: in the top
/// row, at the left edge, facing right
fn initial_board(config: EngineConfig) -> Result<(Grid, Snake), EngineError> {
    config.validate()?;
    let mut grid = Grid::new(config.board_size)?;
    let snake = Snake::new(
        (0..i32::from(consts::INITIAL_SNAKE_LENGTH)).map(|col| Cell::new(0, col)),
        Heading::Right,
    )?;
    for &cell in snake.body() {
        if !grid.in_bounds(cell) {
            return Err(EngineError::InvalidConfiguration(format!(
                "starting snake cell {cell} is off the board"
            )));
        }
        grid.set(cell, CellState::Body);
    }
    Ok((grid, snake))
}

#[cfg(test)]
impl<R> Engine<R> {
    /// Move the food to `cell`, which must be empty
    pub(crate) fn move_food(&mut self, cell: Cell) {
        if let Some(old) = self.food.take() {
            self.grid.set(old, CellState::Empty);
        }
        assert_eq!(self.grid.set(cell, CellState::Food), CellState::Empty);
        self.food = Some(cell);
    }
}
