pub mod input;
pub mod render;
pub mod shutdown;
pub mod state;

pub use shutdown::ShutdownManager;
pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};

use crate::ui::tui::Tui;

impl App {
    /// Runs the interactive loop until the user quits or Ctrl+C is pressed.
    ///
    /// Each iteration draws a frame, drains pending input and steps the world
    /// once the tick interval for the current time scale has elapsed.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        let mut last_config_check = Instant::now();

        let shutdown = ShutdownManager::new();
        shutdown.listen_for_ctrl_c();

        while self.running && !shutdown.is_shutdown_requested() {
            if last_config_check.elapsed() >= Duration::from_secs(2) {
                match self.check_config_reload() {
                    Ok(true) => tracing::info!("Configuration hot-reloaded successfully"),
                    Ok(false) => {}
                    Err(e) => tracing::warn!("Config reload failed: {e}"),
                }
                last_config_check = Instant::now();
            }

            tui.terminal.draw(|f| {
                self.draw(f);
            })?;

            self.frame_count += 1;
            if self.last_fps_update.elapsed() >= Duration::from_secs(1) {
                self.fps = self.frame_count as f64 / self.last_fps_update.elapsed().as_secs_f64();
                self.frame_count = 0;
                self.last_fps_update = Instant::now();
            }

            // Use 1ms poll interval to prevent busy-waiting while remaining responsive
            while event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_interval() {
                if !self.paused {
                    self.update_world();
                }
                last_tick = Instant::now();
            }
        }

        tracing::info!(
            tick = self.world.tick,
            total_infections = self.world.pop_stats.total_infections,
            "Session ended"
        );
        Ok(())
    }
}
