use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GRID_BORDER, GameState, Phase, Position, TILE_COLUMNS, TILE_ROWS};
use crate::leaderboard::HighScoreEntry;

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 1;
const BORDER: u16 = GRID_BORDER;
pub const SIDE_PANEL_WIDTH: u16 = 30;

/// Terminal cells left for the grid once the chrome is drawn
pub fn grid_viewport(columns: u16, rows: u16) -> (u16, u16) {
    (
        columns.saturating_sub(BORDER + SIDE_PANEL_WIDTH),
        rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS + BORDER),
    )
}

/// Framed on-screen size of `tiles` tiles, clamped to the terminal coordinate range
fn framed_extent(tiles: usize, tile_cells: u16) -> u16 {
    u16::try_from(tiles)
        .unwrap_or(u16::MAX)
        .saturating_mul(tile_cells)
        .saturating_add(BORDER)
}

/// Everything on screen that is not the grid itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub high_scores: &'a [HighScoreEntry],
    pub show_high_scores: bool,
    /// Name typed so far, while the high-score prompt is open
    pub name_prompt: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: Option<&GameState>, phase: Phase, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS),
                Constraint::Min(0),
                Constraint::Length(FOOTER_ROWS),
            ])
            .split(frame.area());

        let stats = self.render_stats(state, hud);
        frame.render_widget(stats, chunks[0]);

        let grid_width = state.map_or(0, |s| framed_extent(s.grid_width, TILE_COLUMNS));
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(grid_width),
                Constraint::Length(SIDE_PANEL_WIDTH),
                Constraint::Min(0),
            ])
            .split(chunks[1]);

        let grid_area = Rect {
            height: state.map_or(body[0].height, |s| {
                framed_extent(s.grid_height, TILE_ROWS).min(body[0].height)
            }),
            ..body[0]
        };

        match (phase, state) {
            (Phase::GameOver, Some(state)) => {
                frame.render_widget(self.render_game_over(state, hud), grid_area)
            }
            (_, Some(state)) => frame.render_widget(self.render_grid(state), grid_area),
            (_, None) => {}
        }

        let side = if hud.show_high_scores {
            self.render_high_scores(hud.high_scores)
        } else {
            self.render_help()
        };
        frame.render_widget(side, body[1]);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("  ", Style::default())
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats<'a>(&self, state: Option<&GameState>, hud: &Hud<'a>) -> Paragraph<'a> {
        let score = state.map_or(0, |s| s.score);
        let length = state.map_or(0, |s| s.snake.len());
        let best = hud.high_scores.first().map_or(0, |entry| entry.score);

        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(length.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best.to_string(), Style::default().fg(Color::White)),
        ];

        if let Some(status) = hud.status {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(status, Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over<'a>(&self, state: &GameState, hud: &Hud<'a>) -> Paragraph<'a> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        match hud.name_prompt {
            Some(name) => {
                text.push(Line::from(vec![Span::styled(
                    "New High Score!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )]));
                text.push(Line::from(vec![
                    Span::styled("Name: ", Style::default().fg(Color::Gray)),
                    Span::styled(format!("{name}_"), Style::default().fg(Color::White)),
                ]));
                text.push(Line::from(vec![Span::styled(
                    "Enter to save, Esc to skip",
                    Style::default().fg(Color::DarkGray),
                )]));
            }
            None => {
                text.push(Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "R",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "Q",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to quit", Style::default().fg(Color::Gray)),
                ]));
            }
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_high_scores<'a>(&self, scores: &'a [HighScoreEntry]) -> Paragraph<'a> {
        let lines: Vec<Line> = if scores.is_empty() {
            vec![Line::from(Span::styled(
                "No high scores yet!",
                Style::default().fg(Color::Gray),
            ))]
        } else {
            scores
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>2}. ", index + 1),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(format!("{:<18}", entry.name), Style::default().fg(Color::White)),
                        Span::styled(
                            format!("{:>5}", entry.score),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" High Scores "),
        )
    }

    fn render_help(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![
            Line::from(vec![Span::styled("↑↓←→ / WASD", key), Span::raw("  steer")]),
            Line::from(vec![Span::styled("R", key), Span::raw("  restart")]),
            Line::from(vec![Span::styled("H", key), Span::raw("  high scores")]),
            Line::from(vec![Span::styled("Q / Esc", key), Span::raw("  quit")]),
        ];

        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Controls "),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("H", Style::default().fg(Color::Cyan)),
            Span::raw(" high scores | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: Option<&GameState>, phase: Phase, hud: &Hud) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, phase, hud))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_grid_viewport() {
        assert_eq!(grid_viewport(80, 30), (48, 24));
        assert_eq!(grid_viewport(10, 3), (0, 0));
    }

    #[test]
    fn test_framed_extent_saturates() {
        assert_eq!(framed_extent(10, TILE_COLUMNS), 22);
        assert_eq!(framed_extent(40_000, TILE_COLUMNS), u16::MAX);
        assert_eq!(framed_extent(usize::MAX, TILE_ROWS), u16::MAX);
    }

    #[test]
    fn test_oversized_grid_draws_clipped() {
        let state = GameState::new(
            Snake::new(Position::new(0, 0)),
            Position::new(3, 0),
            40_000,
            1,
        );

        let screen = draw(Some(&state), Phase::Running, &Hud::default());

        assert!(screen.contains("■"));
    }

    #[test]
    fn test_running_game_shows_score_and_snake() {
        let mut engine = GameEngine::seeded(GameConfig::new(10, 10), 1);
        let mut state = engine.reset();
        state.score = 7;

        let screen = draw(Some(&state), Phase::Running, &Hud::default());

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains("■"));
        assert!(screen.contains("Controls"));
    }

    #[test]
    fn test_game_over_with_name_prompt() {
        let mut engine = GameEngine::seeded(GameConfig::new(20, 20), 1);
        let mut state = engine.reset();
        state.is_alive = false;

        let hud = Hud {
            name_prompt: Some("ada"),
            ..Default::default()
        };
        let screen = draw(Some(&state), Phase::GameOver, &hud);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("New High Score!"));
        assert!(screen.contains("ada_"));
    }

    #[test]
    fn test_high_score_panel() {
        let scores = vec![
            HighScoreEntry::new("ada", 12),
            HighScoreEntry::new("bob", 7),
        ];
        let hud = Hud {
            high_scores: &scores,
            show_high_scores: true,
            ..Default::default()
        };

        let screen = draw(None, Phase::Idle, &hud);
        assert!(screen.contains("High Scores"));
        assert!(screen.contains("ada"));
        assert!(screen.contains("Best: 12"));

        let empty = Hud {
            show_high_scores: true,
            ..Default::default()
        };
        assert!(draw(None, Phase::Idle, &empty).contains("No high scores yet!"));
    }
}
