use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake, Velocity},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the game has terminated
    pub terminated: bool,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            ate_food,
            collision_type: None,
            terminated: false,
        }
    }

    fn dead(ate_food: bool, collision_type: Option<CollisionType>) -> Self {
        Self {
            ate_food,
            collision_type,
            terminated: true,
        }
    }
}

/// The game engine that handles all game logic
///
/// The engine is generic over its random source so games can be replayed
/// from a seed.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a deterministic engine
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: one segment at the centre, at rest, score zero
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(Position::new(center_x, center_y));
        let food = self.spawn_food(&snake);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one tick of the game
    ///
    /// `turn` is applied first if the current velocity allows it. A terminated
    /// state is left untouched.
    pub fn step(&mut self, state: &mut GameState, turn: Option<Direction>) -> StepResult {
        if !state.is_alive {
            return StepResult::dead(false, None);
        }

        if let Some(direction) = turn {
            if state.velocity.allows(direction) {
                state.velocity = Velocity::from(direction);
            }
        }

        // Nothing moves until the first turn
        if state.velocity.is_zero() {
            return StepResult::moved(false);
        }

        let new_head = state.snake.head().moved_with(state.velocity);
        let ate_food = new_head == state.food;
        state.steps += 1;

        // Food under the new head counts even when the move is fatal
        if ate_food {
            state.score += 1;
        }

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            return StepResult::dead(ate_food, Some(collision_type));
        }

        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.food = self.spawn_food(&state.snake);
        }

        StepResult::moved(ate_food)
    }

    /// Check if the new head position causes a collision
    ///
    /// The body is checked as it stands before this tick's tail removal, so
    /// running into the cell the tail is about to leave is fatal.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a food cell uniformly over the grid
    ///
    /// The snake's body is only excluded when `food_avoids_snake` is set and
    /// some cell is still free.
    fn spawn_food(&mut self, snake: &Snake) -> Position {
        if self.config.food_avoids_snake {
            let free: Vec<Position> =
                grid_cells(self.config.grid_width, self.config.grid_height)
                    .filter(|pos| !snake.occupies(*pos))
                    .collect();

            if let Some(pos) = free.choose(&mut self.rng) {
                return *pos;
            }
        }

        let x = self.rng.gen_range(0..self.config.grid_width) as i32;
        let y = self.rng.gen_range(0..self.config.grid_height) as i32;
        Position::new(x, y)
    }
}

fn grid_cells(width: usize, height: usize) -> impl Iterator<Item = Position> {
    let (width, height) = (width as i32, height as i32);
    (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
}
