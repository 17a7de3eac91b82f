use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Direction, Game, Position, GRID_HEIGHT, GRID_WIDTH};
use crate::input::{Button, DirectionPad};
use crate::metrics::GameMetrics;

/// Each grid cell is drawn two terminal columns wide so it looks square
const CELL_WIDTH: u16 = 2;
const PAD_PANEL_WIDTH: u16 = 30;
const POPUP_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 13;
const BUTTON_WIDTH: u16 = 16;

/// Presentation state that does not belong to the game itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Draw the on-screen direction pad
    pub show_pad: bool,
    /// Last known mouse cell, for hover feedback
    pub pointer: Option<(u16, u16)>,
}

/// Clickable areas of the last drawn frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenLayout {
    pub pad: Option<DirectionPad>,
    pub play_again: Option<Button>,
}

/// Head cell text. The two characters act as eyes looking the way the snake
/// travels.
pub fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "˙˙",
        Direction::Down => "..",
        Direction::Left => ": ",
        Direction::Right => " :",
    }
}

fn pad_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "( ▲ )",
        Direction::Down => "( ▼ )",
        Direction::Left => "( ◀ )",
        Direction::Right => "( ▶ )",
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        game: &Game,
        metrics: &GameMetrics,
        options: &ViewOptions,
    ) -> ScreenLayout {
        let mut layout = ScreenLayout::default();

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics);
        frame.render_widget(stats, chunks[0]);

        let (play_area, pad_area) = if options.show_pad {
            let columns = Layout::default()
                .direction(LayoutDirection::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(PAD_PANEL_WIDTH)])
                .split(chunks[1]);
            (columns[0], Some(columns[1]))
        } else {
            (chunks[1], None)
        };

        let grid_area = centered_rect(
            GRID_WIDTH as u16 * CELL_WIDTH + 2,
            GRID_HEIGHT as u16 + 2,
            play_area,
        );
        let grid = self.render_grid(game);
        frame.render_widget(grid, grid_area);

        if let Some(pad_area) = pad_area {
            layout.pad = Some(self.render_pad(frame, pad_area, options));
        }

        if !game.is_playing() {
            layout.play_again = Some(self.render_game_over(frame, grid_area, game, options));
        }

        let controls = self.render_controls(game);
        frame.render_widget(controls, chunks[2]);

        layout
    }

    fn render_grid(&self, game: &Game) -> Paragraph<'static> {
        let snake = game.snake();
        // Everything behind the game over popup is drawn dimmed
        let dim = if game.is_playing() {
            Modifier::empty()
        } else {
            Modifier::DIM
        };

        let mut lines = Vec::with_capacity(GRID_HEIGHT);

        for y in 0..GRID_HEIGHT {
            let mut spans = Vec::with_capacity(GRID_WIDTH);

            for x in 0..GRID_WIDTH {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == snake.head() {
                    Span::styled(
                        head_glyph(snake.direction()),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD | dim),
                    )
                } else if snake.occupies(pos) {
                    Span::styled("██", Style::default().fg(Color::Green).add_modifier(dim))
                } else if pos == game.food().position {
                    Span::styled(
                        "◆ ",
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD | dim),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray).add_modifier(dim))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White).add_modifier(dim))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, game: &Game, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.high_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.snake().speed().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    /// Draw the popup and return the button hit-zone
    fn render_game_over(
        &self,
        frame: &mut Frame,
        grid_area: Rect,
        game: &Game,
        options: &ViewOptions,
    ) -> Button {
        let popup = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, grid_area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(6), // Headline and score
                Constraint::Length(3), // Button
                Constraint::Min(0),    // Hint
            ])
            .split(inner);

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
                    game.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        if game.is_new_high_score() {
            text.push(Line::from(vec![Span::styled(
                "New High Score!",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )]));
        }
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[0]);

        let button = Button::new(centered_rect(BUTTON_WIDTH, 3, rows[1]));
        let hovered = options
            .pointer
            .is_some_and(|(column, row)| button.contains(column, row));
        let button_style = if hovered {
            Style::default().fg(Color::White).bg(Color::LightBlue)
        } else {
            Style::default().fg(Color::White).bg(Color::Blue)
        };
        frame.render_widget(
            Paragraph::new("Play Again")
                .alignment(Alignment::Center)
                .style(button_style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                ),
            button.area,
        );

        let hint = Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[2]);

        button
    }

    /// Draw the direction pad and return its hit-zones
    fn render_pad(&self, frame: &mut Frame, area: Rect, options: &ViewOptions) -> DirectionPad {
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Touch "),
            area,
        );

        let pad = DirectionPad::centered_in(area);
        let hovered = options
            .pointer
            .and_then(|(column, row)| pad.hit_cell(column, row));

        for direction in Direction::ALL {
            let glyph = pad_glyph(direction);
            let (column, row) = pad.zone_center(direction).to_cell();
            let width = glyph.chars().count() as u16;
            let x = column.saturating_sub(width / 2);
            if x < area.x || x + width > area.x + area.width || row >= area.y + area.height {
                continue;
            }

            let style = if hovered == Some(direction) {
                Style::default().fg(Color::White).bg(Color::LightBlue)
            } else {
                Style::default().fg(Color::White).bg(Color::Blue)
            };
            frame.render_widget(
                Paragraph::new(glyph).style(style),
                Rect::new(x, row, width, 1),
            );
        }

        pad
    }

    fn render_controls(&self, game: &Game) -> Paragraph<'static> {
        let text = if game.is_playing() {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Green)),
                Span::raw(" or click "),
                Span::styled("Play Again", Style::default().fg(Color::Green)),
                Span::raw(" | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        };

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
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
    use crate::game::{Food, GameConfig, Snake};
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(game: &Game, options: ViewOptions) -> (String, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(110, 34)).unwrap();
        let metrics = GameMetrics::new();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|frame| {
                layout = Renderer::new().render(frame, game, &metrics, &options);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        (text, layout)
    }

    /// A game whose snake is one step away from biting itself
    fn doomed_game(meals: usize) -> Game {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        for _ in 0..meals {
            snake.grow();
        }
        let food = Food {
            position: Position::new(20, 20),
        };
        let mut game = Game::from_parts(snake, food, StdRng::seed_from_u64(1));
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            game.change_direction(direction);
            let interval = game.snake().move_interval();
            game.tick(interval);
        }
        assert!(!game.is_playing());
        game
    }

    #[test]
    fn test_head_glyph_follows_heading() {
        let glyphs: std::collections::HashSet<_> =
            Direction::ALL.into_iter().map(head_glyph).collect();
        assert_eq!(glyphs.len(), 4);
    }

    #[test]
    fn test_playing_screen() {
        let game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(3));
        let (text, layout) = draw(&game, ViewOptions::default());

        assert!(text.contains("Score: 0"));
        assert!(text.contains("High Score: 0"));
        assert!(text.contains(head_glyph(game.snake().direction())));
        assert!(!text.contains("GAME OVER"));
        assert_eq!(layout, ScreenLayout::default());
    }

    #[test]
    fn test_game_over_screen() {
        let game = doomed_game(2);
        let (text, layout) = draw(&game, ViewOptions::default());

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 20"));
        assert!(text.contains("New High Score!"));
        assert!(text.contains("Play Again"));

        let button = layout.play_again.expect("button drawn");
        assert_eq!(button.area.width, BUTTON_WIDTH);
        assert_eq!(button.area.height, 3);
    }

    #[test]
    fn test_game_over_without_record() {
        let game = doomed_game(0);
        let (text, _) = draw(&game, ViewOptions::default());
        assert!(text.contains("GAME OVER"));
        assert!(!text.contains("New High Score!"));
    }

    #[test]
    fn test_pad_is_drawn_on_request() {
        let game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(4));
        let options = ViewOptions {
            show_pad: true,
            pointer: None,
        };
        let (text, layout) = draw(&game, options);

        let pad = layout.pad.expect("pad drawn");
        assert!(text.contains("Touch"));
        assert!(text.contains("▲"));

        let (column, row) = pad.zone_center(Direction::Left).to_cell();
        assert_eq!(pad.hit_cell(column, row), Some(Direction::Left));
    }
}
