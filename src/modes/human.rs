use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Action, Game, GameConfig, TickEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, ScreenLayout, ViewOptions};

pub struct HumanMode {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    /// Hit-zones from the last drawn frame
    layout: ScreenLayout,
    view: ViewOptions,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let frame_interval = Duration::from_micros(1_000_000 / u64::from(config.frame_rate.max(1)));

        Self {
            game: Game::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_interval,
            layout: ScreenLayout::default(),
            view: ViewOptions::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

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

        // One timer drives both simulation and drawing; the snake's own move
        // interval decides how often it actually moves
        let mut frame_timer = interval(self.frame_interval);
        let mut last_frame = Instant::now();

        info!(frame_interval = ?self.frame_interval, "Game loop started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance and draw one frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.update_game(now - last_frame);
                    last_frame = now;

                    self.metrics.update();
                    let mut layout = self.layout;
                    terminal.draw(|frame| {
                        layout = self.renderer.render(frame, &self.game, &self.metrics, &self.view);
                    }).context("Failed to draw frame")?;
                    self.layout = layout;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(high_score = self.game.high_score(), "Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::GameAction(action) => self.apply(action),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }

        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => self.view.pointer = Some(cell),
            MouseEventKind::Down(MouseButton::Left) => {
                self.view.pointer = Some(cell);
                if !self.view.show_pad {
                    debug!("Pointer input seen, showing direction pad");
                    self.view.show_pad = true;
                }

                if self.game.is_playing() {
                    if let Some(direction) = self
                        .layout
                        .pad
                        .and_then(|pad| pad.hit_cell(cell.0, cell.1))
                    {
                        self.apply(Action::Move(direction));
                    }
                } else if self
                    .layout
                    .play_again
                    .is_some_and(|button| button.contains(cell.0, cell.1))
                {
                    self.apply(Action::Restart);
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, action: Action) {
        if self.game.apply(action) && action == Action::Restart {
            self.metrics.on_game_start();
        }
    }

    fn update_game(&mut self, elapsed: Duration) {
        match self.game.tick(elapsed) {
            TickEvent::GameOver => {
                self.metrics.on_game_over(self.game.score());
                if self.game.is_new_high_score() {
                    info!(high_score = self.game.high_score(), "New high score");
                }
            }
            TickEvent::AteFood | TickEvent::Nothing => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
