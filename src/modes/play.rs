use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{
    Command, Flow, GameConfig, GameEngine, GameSession, Phase, StepResult, TILE_COLUMNS, TILE_ROWS,
};
use crate::input::{InputHandler, KeyAction, PromptAction};
use crate::leaderboard::{LeaderboardClient, LeaderboardUpdate, MAX_NAME_LEN};
use crate::render::{Hud, Renderer, grid_viewport};

/// Size `config`'s grid to fill the current terminal
pub fn fit_to_terminal(config: &mut GameConfig) -> Result<()> {
    let (columns, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;
    let (columns, rows) = grid_viewport(columns, rows);
    let fitted = GameConfig::from_viewport(columns, rows, TILE_COLUMNS, TILE_ROWS);

    config.grid_width = fitted.grid_width;
    config.grid_height = fitted.grid_height;
    Ok(())
}

/// Name typed after a qualifying game
#[derive(Debug, Clone, PartialEq, Eq)]
struct NamePrompt {
    score: u32,
    name: String,
}

pub struct PlayMode {
    session: GameSession,
    leaderboard: LeaderboardClient,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    show_high_scores: bool,
    name_prompt: Option<NamePrompt>,
    status: Option<String>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>, leaderboard: LeaderboardClient) -> Self {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };

        Self {
            session: GameSession::new(engine),
            leaderboard,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            show_high_scores: false,
            name_prompt: None,
            status: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.start_game();

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                Some(update) = self.leaderboard.next_update() => {
                    self.on_leaderboard_update(update);
                }

                _ = render_timer.tick() => {
                    let state = self.session.state();
                    let phase = self.session.phase();
                    let hud = Hud {
                        high_scores: self.leaderboard.cached(),
                        show_high_scores: self.show_high_scores,
                        name_prompt: self.name_prompt.as_ref().map(|prompt| prompt.name.as_str()),
                        status: self.status.as_deref(),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, phase, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            if self.name_prompt.is_some() {
                self.handle_prompt_key(key);
            } else {
                self.handle_game_key(key);
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(command) => self.apply_command(command),
            KeyAction::ToggleHighScores => self.show_high_scores = !self.show_high_scores,
            KeyAction::None => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let action = self.input_handler.handle_prompt_key(key);
        let Some(prompt) = self.name_prompt.as_mut() else {
            return;
        };

        match action {
            PromptAction::Push(c) => {
                if prompt.name.chars().count() < MAX_NAME_LEN {
                    prompt.name.push(c);
                }
            }
            PromptAction::Pop => {
                prompt.name.pop();
            }
            PromptAction::Submit => self.submit_name(),
            PromptAction::Cancel => self.name_prompt = None,
            PromptAction::Quit => self.apply_command(Command::Close),
            PromptAction::None => {}
        }
    }

    fn apply_command(&mut self, command: Command) {
        if self.session.handle(command) == Flow::Close {
            info!("Session closed");
            self.should_quit = true;
            return;
        }

        if command == Command::Restart {
            self.on_restart();
        }
    }

    fn update_game(&mut self) {
        if let Some(result) = self.session.tick() {
            if result.terminated {
                self.on_game_over(&result);
            }
        }
    }

    fn start_game(&mut self) {
        self.session.start();
        self.on_restart();
    }

    fn on_restart(&mut self) {
        self.name_prompt = None;
        self.status = None;
        self.leaderboard.refresh_in_background();

        if let Some(state) = self.session.state() {
            info!(
                "Game started on a {}x{} grid",
                state.grid_width, state.grid_height
            );
        }
    }

    fn on_game_over(&mut self, result: &StepResult) {
        let score = self.session.score();
        info!("Game over with score {} ({:?})", score, result.collision_type);

        if self.leaderboard.cached().is_empty() {
            debug!("High-score cache is empty, so any score qualifies");
        }

        if self.leaderboard.is_qualifying(score) {
            self.name_prompt = Some(NamePrompt {
                score,
                name: String::new(),
            });
        }
    }

    fn submit_name(&mut self) {
        let Some(prompt) = self.name_prompt.take() else {
            return;
        };

        if self.leaderboard.submit_score(&prompt.name, prompt.score) {
            self.status = Some("Saving score...".to_string());
        } else {
            debug!("Blank name, score {} not submitted", prompt.score);
        }
    }

    fn on_leaderboard_update(&mut self, update: LeaderboardUpdate) {
        self.leaderboard.apply(&update);

        if let LeaderboardUpdate::Submitted(entry) = &update {
            self.status = Some(format!("Saved {} for {}", entry.score, entry.name));
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crate::leaderboard::{HighScoreEntry, MemoryStore};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use tokio::time::timeout;

    fn full_board() -> Vec<HighScoreEntry> {
        (1..=10)
            .map(|score| HighScoreEntry::new(format!("p{score}"), score * 10))
            .collect()
    }

    fn mode_with(store: Arc<MemoryStore>) -> PlayMode {
        let leaderboard = LeaderboardClient::new(store, 10);
        let mut mode = PlayMode::new(GameConfig::new(1, 1), Some(1), leaderboard);
        mode.session.start();
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(mode: &mut PlayMode, text: &str) {
        for c in text.chars() {
            mode.handle_event(key(KeyCode::Char(c)));
        }
    }

    /// On a 1x1 grid any move hits the wall on the next tick
    fn crash(mode: &mut PlayMode) {
        mode.handle_event(key(KeyCode::Right));
        mode.update_game();
        assert_eq!(mode.phase(), Phase::GameOver);
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode_with(Arc::new(MemoryStore::new()));
        assert_eq!(mode.phase(), Phase::Running);
        assert_eq!(mode.session.score(), 0);
        assert_eq!(mode.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_keys_steer_the_session() {
        let mut mode = mode_with(Arc::new(MemoryStore::new()));
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.session.pending_direction(), Some(Direction::Up));

        mode.handle_event(key(KeyCode::Char('h')));
        assert!(mode.show_high_scores);
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let mut mode = mode_with(Arc::new(MemoryStore::new()));
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_with_room_prompts_for_name() {
        let mut mode = mode_with(Arc::new(MemoryStore::new()));
        crash(&mut mode);

        assert_eq!(
            mode.name_prompt,
            Some(NamePrompt {
                score: 0,
                name: String::new()
            })
        );

        // Typing goes to the prompt, not the game
        type_text(&mut mode, "qr");
        mode.handle_event(key(KeyCode::Backspace));
        assert_eq!(mode.name_prompt.as_ref().unwrap().name, "q");
        assert!(!mode.should_quit);
        assert_eq!(mode.phase(), Phase::GameOver);
    }

    #[tokio::test]
    async fn test_game_over_on_full_board_skips_prompt() {
        let store = Arc::new(MemoryStore::with_rows(full_board()));
        let mut mode = mode_with(store);
        mode.leaderboard.fetch_top_scores().await;

        crash(&mut mode);

        assert!(mode.name_prompt.is_none());
    }

    #[tokio::test]
    async fn test_submitted_name_reaches_store() {
        let store = Arc::new(MemoryStore::new());
        let mut mode = mode_with(store.clone());
        {
            let state = mode.session.state().unwrap();
            assert_eq!(state.snake.head(), Position::new(0, 0));
        }
        crash(&mut mode);

        type_text(&mut mode, "ada");
        mode.handle_event(key(KeyCode::Enter));
        assert!(mode.name_prompt.is_none());
        assert_eq!(mode.status.as_deref(), Some("Saving score..."));

        // Submitted, then the refreshed board
        for _ in 0..2 {
            let update = timeout(Duration::from_secs(5), mode.leaderboard.next_update())
                .await
                .unwrap()
                .unwrap();
            mode.on_leaderboard_update(update);
        }

        assert_eq!(store.len(), 1);
        assert_eq!(mode.leaderboard.cached()[0].name, "ada");
        assert!(mode.status.as_deref().unwrap().starts_with("Saved"));
    }

    #[tokio::test]
    async fn test_escape_skips_submission() {
        let store = Arc::new(MemoryStore::new());
        let mut mode = mode_with(store.clone());
        crash(&mut mode);

        type_text(&mut mode, "ada");
        mode.handle_event(key(KeyCode::Esc));

        assert!(mode.name_prompt.is_none());
        assert!(!mode.should_quit);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_restart_after_game_over() {
        let mut mode = mode_with(Arc::new(MemoryStore::with_rows(full_board())));
        mode.leaderboard.fetch_top_scores().await;
        crash(&mut mode);

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.phase(), Phase::Running);
        assert_eq!(mode.session.score(), 0);
        assert!(mode.name_prompt.is_none());
    }
}
