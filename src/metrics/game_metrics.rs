use std::time::{Duration, Instant};

/// Per-session counters shown alongside the score
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    round_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            round_running: true,
        }
    }

    /// Refresh the round timer. The clock stops once the round is over.
    pub fn update(&mut self) {
        if self.round_running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.round_running = false;
        self.games_played += 1;
        tracing::info!(
            final_score,
            games_played = self.games_played,
            duration = %self.format_time(),
            "Round finished"
        );
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
