use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::Food,
    state::{Snake, StepOutcome},
};

/// Whether a round is running or finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// What a tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing worth reporting (the snake may or may not have moved)
    Nothing,
    /// The snake ate the food and grew
    AteFood,
    /// The snake ran into itself; the round is over
    GameOver,
}

/// Complete game state, owned by whoever drives the loop
pub struct Game {
    snake: Snake,
    food: Food,
    phase: Phase,
    high_score: u32,
    /// High score as it stood when the current round began
    best_at_round_start: u32,
    rng: StdRng,
}

impl Game {
    /// Create a game, seeding the RNG from the config or from entropy
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(config, &mut rng);
        let food = Food::spawn(&mut rng, &snake.body);
        info!(heading = ?snake.heading(), "New round");
        Self::from_parts(snake, food, rng)
    }

    /// Resume from a known snake and food, e.g. to replay a scripted round
    pub fn from_parts(snake: Snake, food: Food, rng: StdRng) -> Self {
        Self {
            snake,
            food,
            phase: Phase::Playing,
            high_score: 0,
            best_at_round_start: 0,
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once a finished round has beaten the previous best
    pub fn is_new_high_score(&self) -> bool {
        self.phase == Phase::GameOver && self.score() > self.best_at_round_start
    }

    /// Apply a player action. Returns false if the action does not apply in
    /// the current phase.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Move(direction) => self.change_direction(direction),
            Action::Restart => self.restart(),
        }
    }

    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.snake.change_direction(direction);
        true
    }

    /// Start a new round. Only valid after game over.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }

        self.snake.reset(&mut self.rng);
        self.food.randomize(&mut self.rng, &self.snake.body);
        self.phase = Phase::Playing;
        self.best_at_round_start = self.high_score;
        info!(heading = ?self.snake.heading(), high_score = self.high_score, "New round");
        true
    }

    /// Advance the game by `elapsed`. The snake moves only when its own move
    /// interval has passed, so this can be called at any frame rate.
    pub fn tick(&mut self, elapsed: Duration) -> TickEvent {
        let event = match self.phase {
            Phase::GameOver => TickEvent::Nothing,
            Phase::Playing => match self.snake.step(elapsed) {
                StepOutcome::Collided => {
                    self.phase = Phase::GameOver;
                    info!(
                        score = self.score(),
                        length = self.snake.len(),
                        "Game over"
                    );
                    TickEvent::GameOver
                }
                StepOutcome::Continues if self.snake.head() == self.food.position => {
                    self.snake.grow();
                    self.food.randomize(&mut self.rng, &self.snake.body);
                    debug!(
                        score = self.score(),
                        food = ?self.food.position,
                        "Food eaten"
                    );
                    TickEvent::AteFood
                }
                StepOutcome::Continues => TickEvent::Nothing,
            },
        };

        if self.score() > self.high_score {
            self.high_score = self.score();
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Position;

    fn seeded(seed: u64) -> Game {
        Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Replace the snake with a known one heading right from `head`
    fn place_snake(game: &mut Game, head: Position, length: usize) {
        game.snake = Snake::new(head, Direction::Right, length);
        game.food.position = Position::new(0, 0);
    }

    fn interval(game: &Game) -> Duration {
        game.snake.move_interval()
    }

    #[test]
    fn test_new_game() {
        let game = seeded(1);
        assert!(game.is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 0);
        assert_eq!(game.snake().len(), 1);
        assert!(!game.snake().occupies(game.food().position));
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = seeded(99);
        let b = seeded(99);
        assert_eq!(a.snake().heading(), b.snake().heading());
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_plain_step() {
        let mut game = seeded(2);
        place_snake(&mut game, Position::new(10, 10), 3);

        let event = game.tick(interval(&game));

        assert_eq!(event, TickEvent::Nothing);
        assert_eq!(game.snake().head(), Position::new(11, 10));
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn test_food_consumption() {
        let mut game = seeded(3);
        place_snake(&mut game, Position::new(10, 10), 3);
        game.food.position = Position::new(11, 10);

        let event = game.tick(interval(&game));

        assert_eq!(event, TickEvent::AteFood);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().target_len(), 4);
        assert_ne!(game.food().position, Position::new(11, 10));
        assert!(!game.snake().occupies(game.food().position));

        // Tail is kept on the following step
        game.food.position = Position::new(0, 0);
        game.tick(interval(&game));
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn test_no_move_no_food() {
        let mut game = seeded(4);
        place_snake(&mut game, Position::new(10, 10), 3);
        game.food.position = Position::new(11, 10);

        assert_eq!(game.tick(Duration::from_millis(1)), TickEvent::Nothing);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_high_score_tracks_score() {
        let mut game = seeded(5);
        place_snake(&mut game, Position::new(10, 10), 3);
        game.food.position = Position::new(11, 10);
        game.tick(interval(&game));
        assert_eq!(game.high_score(), 10);
    }

    /// Swap in a five-cell snake that has eaten `meals` times and steer it
    /// into its own body
    fn crash_after(game: &mut Game, meals: usize) {
        // Body: (5,5) (4,5) (3,5) (2,5) (1,5); a U-turn hits mid-body
        game.snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        for _ in 0..meals {
            game.snake.grow();
        }
        game.food.position = Position::new(20, 20);
        for direction in [Direction::Down, Direction::Left] {
            game.change_direction(direction);
            let step = interval(game);
            assert_eq!(game.tick(step), TickEvent::Nothing);
        }
        game.change_direction(Direction::Up);
        let step = interval(game);
        assert_eq!(game.tick(step), TickEvent::GameOver);
    }

    fn crash(game: &mut Game) {
        crash_after(game, 0);
    }

    #[test]
    fn test_collision_ends_round() {
        let mut game = seeded(6);
        crash(&mut game);

        assert_eq!(game.phase(), Phase::GameOver);
        let frozen = game.snake().clone();
        assert_eq!(game.tick(Duration::from_secs(1)), TickEvent::Nothing);
        assert_eq!(game.snake(), &frozen);
        assert!(!game.change_direction(Direction::Down));
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut game = seeded(7);
        assert!(!game.restart());
        assert!(!game.apply(Action::Restart));

        place_snake(&mut game, Position::new(10, 10), 3);
        game.food.position = Position::new(11, 10);
        game.tick(interval(&game));
        crash(&mut game);

        assert!(game.apply(Action::Restart));
        assert!(game.is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.snake().target_len(), 3);
        assert_eq!(game.high_score(), 10);
        assert!(!game.snake().occupies(game.food().position));
    }

    #[test]
    fn test_new_high_score_flag() {
        let mut game = seeded(8);
        crash_after(&mut game, 1);
        assert_eq!(game.high_score(), 10);
        assert!(game.is_new_high_score());

        // Tying the best is not a new high score
        game.restart();
        assert!(!game.is_new_high_score());
        crash_after(&mut game, 1);
        assert!(!game.is_new_high_score());

        game.restart();
        crash_after(&mut game, 3);
        assert_eq!(game.high_score(), 30);
        assert!(game.is_new_high_score());

        // High score survives restarts
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 30);
    }
}
