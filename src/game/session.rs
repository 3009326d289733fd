//! An owned game session driven by explicit commands
//!
//! The session wraps a [`GameEngine`] and the state of the current game. It
//! does no timing of its own: the driver calls [`GameSession::tick`] at a fixed
//! interval and feeds player input through [`GameSession::handle`].

use rand::{Rng, rngs::StdRng};

use super::{
    action::{Command, Direction},
    engine::{GameEngine, StepResult},
    state::GameState,
};

/// Where the session is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started
    Idle,
    /// A game is in progress
    Running,
    /// The last game ended in a collision
    GameOver,
}

/// What the driver should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

pub struct GameSession<R: Rng = StdRng> {
    engine: GameEngine<R>,
    state: Option<GameState>,
    pending_direction: Option<Direction>,
}

impl<R: Rng> GameSession<R> {
    /// Create an idle session
    pub fn new(engine: GameEngine<R>) -> Self {
        Self {
            engine,
            state: None,
            pending_direction: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Idle,
            Some(state) if state.is_alive => Phase::Running,
            Some(_) => Phase::GameOver,
        }
    }

    /// State of the current or last game
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.score)
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Begin a fresh game, discarding any previous one
    pub fn start(&mut self) {
        self.state = Some(self.engine.reset());
        self.pending_direction = None;
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Turn(direction) => {
                self.request_turn(direction);
                Flow::Continue
            }
            Command::Restart => {
                self.start();
                Flow::Continue
            }
            Command::Close => {
                self.state = None;
                self.pending_direction = None;
                Flow::Close
            }
        }
    }

    /// Advance the running game by one tick
    ///
    /// Returns `None` when no game is running.
    pub fn tick(&mut self) -> Option<StepResult> {
        let state = self.state.as_mut().filter(|state| state.is_alive)?;
        let turn = self.pending_direction.take();
        Some(self.engine.step(state, turn))
    }

    // Only turns the current velocity allows are buffered; the latest wins.
    fn request_turn(&mut self, direction: Direction) {
        let Some(state) = self.state.as_ref().filter(|state| state.is_alive) else {
            return;
        };

        if state.velocity.allows(direction) {
            self.pending_direction = Some(direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, GameConfig, Position, Velocity};

    fn session() -> GameSession {
        GameSession::new(GameEngine::seeded(GameConfig::default(), 99))
    }

    fn running() -> GameSession {
        let mut session = session();
        session.start();
        session
    }

    #[test]
    fn test_starts_idle() {
        let mut session = session();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.state().is_none());
        assert_eq!(session.score(), 0);
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_start_runs() {
        let session = running();
        assert_eq!(session.phase(), Phase::Running);

        let state = session.state().unwrap();
        assert_eq!(state.snake.segments(), &[Position::new(10, 10)]);
        assert_eq!(state.velocity, Velocity::ZERO);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_turn_ignored_while_idle() {
        let mut session = session();
        assert_eq!(session.handle(Command::Turn(Direction::Up)), Flow::Continue);
        assert!(session.pending_direction().is_none());
    }

    #[test]
    fn test_last_valid_turn_wins() {
        let mut session = running();
        session.handle(Command::Turn(Direction::Right));
        session.tick();

        // Moving right: Down then Left (same axis, refused) then Up
        session.handle(Command::Turn(Direction::Down));
        session.handle(Command::Turn(Direction::Left));
        assert_eq!(session.pending_direction(), Some(Direction::Down));
        session.handle(Command::Turn(Direction::Up));
        assert_eq!(session.pending_direction(), Some(Direction::Up));

        session.tick();
        let state = session.state().unwrap();
        assert_eq!(state.velocity, Velocity::from(Direction::Up));
        assert!(session.pending_direction().is_none());
    }

    #[test]
    fn test_reversal_within_one_tick_refused() {
        let mut session = running();
        session.handle(Command::Turn(Direction::Right));
        session.tick();

        // Up is buffered, but Left is judged against the current (rightward)
        // velocity and refused, so the snake cannot fold back on itself.
        session.handle(Command::Turn(Direction::Up));
        session.handle(Command::Turn(Direction::Left));
        session.tick();

        assert_eq!(
            session.state().unwrap().velocity,
            Velocity::from(Direction::Up)
        );
    }

    #[test]
    fn test_wall_ends_game_and_restart_recovers() {
        let mut session = GameSession::new(GameEngine::seeded(GameConfig::new(3, 3), 5));
        session.start();
        session.state.as_mut().unwrap().food = Position::new(0, 0);
        session.handle(Command::Turn(Direction::Right));

        // (1,1) -> (2,1) -> wall
        assert!(!session.tick().unwrap().terminated);
        let result = session.tick().unwrap();
        assert!(result.terminated);
        assert_eq!(result.collision_type, Some(CollisionType::Wall));
        assert_eq!(session.phase(), Phase::GameOver);

        // Terminal until restarted
        assert!(session.tick().is_none());
        session.handle(Command::Turn(Direction::Up));
        assert!(session.pending_direction().is_none());

        session.handle(Command::Restart);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.state().unwrap().snake.head(), Position::new(1, 1));
    }

    #[test]
    fn test_close_stops_session() {
        let mut session = running();
        session.handle(Command::Turn(Direction::Left));

        assert_eq!(session.handle(Command::Close), Flow::Close);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.pending_direction().is_none());
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_score_tracks_food() {
        let mut session = running();
        session.state.as_mut().unwrap().food = Position::new(11, 10);
        session.handle(Command::Turn(Direction::Right));

        let result = session.tick().unwrap();
        assert!(result.ate_food);
        assert_eq!(session.score(), 1);
        assert_eq!(session.state().unwrap().snake.len(), 2);
    }
}
