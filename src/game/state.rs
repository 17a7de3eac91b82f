use std::time::Duration;

use rand::Rng;

use super::action::Direction;
use super::config::{GameConfig, GRID_HEIGHT, GRID_WIDTH};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell in the middle of the grid
    pub fn center() -> Self {
        Self::new((GRID_WIDTH / 2) as i32, (GRID_HEIGHT / 2) as i32)
    }

    /// Move position by delta, wrapping around the grid edges
    pub fn wrapped_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: (self.x + dx).rem_euclid(GRID_WIDTH as i32),
            y: (self.y + dy).rem_euclid(GRID_HEIGHT as i32),
        }
    }

    /// Move position one cell in a direction, wrapping around the grid edges
    pub fn wrapped_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy)
    }

    pub fn is_in_bounds(&self) -> bool {
        (0..GRID_WIDTH as i32).contains(&self.x) && (0..GRID_HEIGHT as i32).contains(&self.y)
    }
}

/// What happened when the snake was asked to step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game goes on (whether or not the snake moved)
    Continues,
    /// The head would have run into the body; nothing was changed
    Collided,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Heading of the last admitted step
    direction: Direction,
    /// Heading the next admitted step will use
    pending: Direction,
    /// Length the body grows toward by keeping its tail
    target_len: usize,
    score: u32,
    /// Moves per second
    speed: u32,
    /// Time accumulated since the last admitted step
    since_last_move: Duration,
    config: GameConfig,
}

impl Snake {
    /// Create a snake with given head, direction and full length, body laid out
    /// behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        Self::with_config(head, direction, length, GameConfig::default())
    }

    pub fn with_config(
        head: Position,
        direction: Direction,
        length: usize,
        config: GameConfig,
    ) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.wrapped_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pending: direction,
            target_len: length,
            score: 0,
            speed: config.base_speed,
            since_last_move: Duration::ZERO,
            config,
        }
    }

    /// A fresh snake: a single cell at the grid centre with a random heading,
    /// growing toward the configured initial length
    pub fn spawn<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let mut snake = Self::with_config(Position::center(), Direction::Up, 1, config);
        snake.reset(rng);
        snake
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let direction = Direction::random(rng);
        self.body = vec![Position::center()];
        self.direction = direction;
        self.pending = direction;
        self.target_len = self.config.initial_snake_length;
        self.score = 0;
        self.speed = self.config.base_speed;
        self.since_last_move = Duration::ZERO;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Heading the snake last moved in
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading the snake will take on its next step
    pub fn heading(&self) -> Direction {
        self.pending
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Time between two admitted steps at the current speed
    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    /// Steer the snake. A request to turn straight back onto the neck is
    /// ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending = direction;
        }
    }

    /// Advance the snake clock by `elapsed` and move one cell if a full move
    /// interval has passed since the last admitted step.
    pub fn step(&mut self, elapsed: Duration) -> StepOutcome {
        self.since_last_move += elapsed;
        if self.since_last_move < self.move_interval() {
            return StepOutcome::Continues;
        }
        self.since_last_move = Duration::ZERO;

        let heading = self.pending;
        let new_head = self.head().wrapped_in_direction(heading);

        // The tail moves out of the way this step unless the snake is growing
        let vacating_tail = self.body.len() >= self.target_len;
        let blocking = if vacating_tail {
            &self.body[..self.body.len() - 1]
        } else {
            &self.body[..]
        };
        if blocking.contains(&new_head) {
            return StepOutcome::Collided;
        }

        self.direction = heading;
        self.body.insert(0, new_head);
        self.body.truncate(self.target_len);

        StepOutcome::Continues
    }

    /// Eat one piece of food
    pub fn grow(&mut self) {
        self.target_len += 1;
        self.score += self.config.food_score;

        if self.score % self.config.speedup_every == 0 && self.speed < self.config.max_speed {
            self.speed += 1;
            tracing::info!(speed = self.speed, score = self.score, "Snake speeds up");
        }
    }

    /// Check if a position is occupied by the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
