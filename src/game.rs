// one tick moves the head one cell in the current direction;
// hitting a wall or the body ends the game, eating food grows the snake by one
use rand::Rng;

use crate::config::GameConfig;
use crate::food::place_food;
use crate::grid::{Cell, Direction, Grid};
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The head left the grid
    Wall,
    /// The head ran into the body
    SelfCollision,
    /// The snake covers every cell, nowhere left for food
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Over(EndReason),
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over, nothing changed
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

#[derive(Debug, Clone)]
pub struct GameState<R = rand::rngs::ThreadRng> {
    rng: R,
    start: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Cell,
    // direction of the last move, turns are checked against it
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    best_score: u32,
    new_record: bool,
    status: GameStatus,
}

impl GameState<rand::rngs::ThreadRng> {
    pub fn new(config: &GameConfig, best_score: u32) -> Self {
        GameState::new_with_rng(config, best_score, rand::rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn new_with_rng(config: &GameConfig, best_score: u32, rng: R) -> GameState<R> {
        GameState {
            rng,
            start: config.clone(),
            grid: config.grid(),
            snake: Snake::new(config.start_cell()),
            food: config.food_cell(),
            direction: config.initial_direction,
            pending_direction: config.initial_direction,
            score: 0,
            best_score,
            new_record: false,
            status: GameStatus::Running,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether the finished game beat the previous best score
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Queues a turn for the next tick. Reversing into the body is refused,
    /// as is any turn while paused or after the game ended.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running || direction.is_opposite_of(self.direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            over => over,
        };
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }
        self.direction = self.pending_direction;
        let new_head = self.snake.head().step(self.direction);

        if !self.grid.contains(&new_head) {
            return self.end(EndReason::Wall);
        }
        // the tail has not moved yet, so it counts as body here
        if self.snake.occupies(&new_head) {
            return self.end(EndReason::SelfCollision);
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        log::debug!("Food eaten at {:?}, score {}", new_head, self.score);
        match place_food(&self.grid, &self.snake, &mut self.rng) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            None => self.end(EndReason::BoardFull),
        }
    }

    /// Starts over from the configured position, keeping the best score
    pub fn restart(&mut self) {
        self.record_best_score();
        self.snake = Snake::new(self.start.start_cell());
        self.food = self.start.food_cell();
        self.direction = self.start.initial_direction;
        self.pending_direction = self.start.initial_direction;
        self.score = 0;
        self.new_record = false;
        self.status = GameStatus::Running;
        log::info!("Game restarted");
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.new_record = self.record_best_score();
        self.status = GameStatus::Over(reason);
        log::info!("Game over ({:?}) with score {}", reason, self.score);
        TickOutcome::Ended(reason)
    }

    /// Raises the best score to the current score if it is higher
    pub fn record_best_score(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            return true;
        }
        false
    }
}
