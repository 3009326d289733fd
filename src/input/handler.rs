use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    ToggleHighScores,
    None,
}

/// Keys while the high-score name prompt is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Push(char),
    Pop,
    Submit,
    Cancel,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Game(Command::Close);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Command::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::Game(Command::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::Game(Command::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::Game(Command::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(Command::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(Command::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(Command::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(Command::Turn(Direction::Right))
            }

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                KeyAction::Game(Command::Close)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Restart),
            KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ToggleHighScores,

            _ => KeyAction::None,
        }
    }

    /// Keys are text while a name is being typed
    pub fn handle_prompt_key(&self, key: KeyEvent) -> PromptAction {
        if is_ctrl_c(&key) {
            return PromptAction::Quit;
        }

        match key.code {
            KeyCode::Enter => PromptAction::Submit,
            KeyCode::Esc => PromptAction::Cancel,
            KeyCode::Backspace => PromptAction::Pop,
            KeyCode::Char(c) if !c.is_control() => PromptAction::Push(c),
            _ => PromptAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
