use anyhow::Result;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use crate::model::config::{AppConfig, VisualConfig};
use crate::model::history::OutbreakEvent;
use crate::model::palette;
use crate::model::snapshot::WorldSnapshot;
use crate::model::tuning::{Parameter, Step};
use crate::model::world::World;
use crate::ui::tui::rgb;

/// Messages kept in the outbreak log.
pub const EVENT_LOG_CAPACITY: usize = 15;
/// Ticks of infected/immune history kept for the sparklines.
pub const HISTORY_CAPACITY: usize = 200;

pub const MIN_TIME_SCALE: f64 = 0.25;
pub const MAX_TIME_SCALE: f64 = 4.0;

/// Turns an outbreak event into a log line for the terminal UI.
pub trait OutbreakEventExt {
    /// `None` for per-person events, which happen too often to list.
    fn to_ui_message(&self) -> Option<(String, Color)>;
}

impl OutbreakEventExt for OutbreakEvent {
    fn to_ui_message(&self) -> Option<(String, Color)> {
        match self {
            OutbreakEvent::Eradicated {
                tick,
                total_infections,
            } => Some((
                format!("Tick {tick}: outbreak eradicated after {total_infections} infections"),
                rgb(palette::HEALTHY),
            )),
            OutbreakEvent::ParameterChanged {
                parameter, value, ..
            } => Some((
                format!(
                    "{} set to {}",
                    parameter.display_name(),
                    parameter.format_value(*value)
                ),
                rgb(palette::UI_TEXT),
            )),
            OutbreakEvent::PatientZero { ordinal, tick, .. } => Some((
                format!("Tick {tick}: person #{ordinal} infected by hand"),
                rgb(palette::INFECTED),
            )),
            OutbreakEvent::Infection { .. }
            | OutbreakEvent::Recovery { .. }
            | OutbreakEvent::ImmunityWaned { .. } => None,
        }
    }
}

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub world: World,
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_last_modified: Option<SystemTime>,
    // FPS & Timing
    pub fps: f64,
    pub frame_count: u64,
    pub last_fps_update: Instant,
    pub time_scale: f64,
    // Outbreak history
    pub infected_history: VecDeque<u64>,
    pub immune_history: VecDeque<u64>,
    pub event_log: VecDeque<(String, Color)>,
    // Controls
    pub selected_parameter: Parameter,
    pub mouse_pos: Option<(u16, u16)>,
    pub show_help: bool,
    // Layout of the last frame, used for mouse hit testing
    pub last_world_rect: Rect,
    pub last_controls_rect: Rect,
    pub latest_snapshot: Option<WorldSnapshot>,
}

impl App {
    pub fn new(config: AppConfig, config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let config_last_modified = std::fs::metadata(&config_path)
            .and_then(|m| m.modified())
            .ok();
        let world = World::new(config.clone())?;

        let mut app = Self {
            running: true,
            paused: false,
            world,
            config,
            config_path,
            config_last_modified,
            fps: 0.0,
            frame_count: 0,
            last_fps_update: Instant::now(),
            time_scale: 1.0,
            infected_history: VecDeque::with_capacity(HISTORY_CAPACITY),
            immune_history: VecDeque::with_capacity(HISTORY_CAPACITY),
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            selected_parameter: Parameter::MoveSpeed,
            mouse_pos: None,
            show_help: false,
            last_world_rect: Rect::default(),
            last_controls_rect: Rect::default(),
            latest_snapshot: None,
        };
        app.push_event(
            format!(
                "Outbreak started: {} of {} people infected",
                app.world.pop_stats.infected,
                app.world.population()
            ),
            rgb(palette::INFECTED),
        );
        app.latest_snapshot = Some(app.world.create_snapshot());
        Ok(app)
    }

    pub fn push_event(&mut self, message: String, color: Color) {
        if self.event_log.len() >= EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back((message, color));
    }

    fn record_events(&mut self, events: &[OutbreakEvent]) {
        for event in events {
            if let Some((message, color)) = event.to_ui_message() {
                self.push_event(message, color);
            }
        }
    }

    /// Time between simulation steps at the current time scale.
    pub fn tick_interval(&self) -> Duration {
        let fps = self.config.target_fps.max(1) as f64;
        Duration::from_secs_f64(1.0 / fps / self.time_scale)
    }

    /// Advances the world one frame and refreshes histories and the snapshot.
    pub fn update_world(&mut self) {
        let events = self.world.update();
        self.record_events(&events);

        let stats = &self.world.pop_stats;
        for (history, value) in [
            (&mut self.infected_history, stats.infected as u64),
            (&mut self.immune_history, stats.recovered as u64),
        ] {
            if history.len() >= HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(value);
        }
        self.latest_snapshot = Some(self.world.create_snapshot());
    }

    pub fn adjust_parameter(&mut self, parameter: Parameter, step: Step) {
        self.selected_parameter = parameter;
        let event = self.world.adjust(parameter, step);
        self.record_events(std::slice::from_ref(&event));
        self.latest_snapshot = Some(self.world.create_snapshot());
    }

    /// Infects the healthy person nearest to a world position.
    pub fn infect_near(&mut self, x: f64, y: f64) {
        let reach = self.config.world.infection_radius() * 2.0;
        match self.world.seed_infection_near(x, y, reach) {
            Some(event) => self.record_events(std::slice::from_ref(&event)),
            None => self.push_event(
                "Nobody susceptible there".to_string(),
                rgb(palette::UI_TEXT),
            ),
        }
        self.latest_snapshot = Some(self.world.create_snapshot());
    }

    pub fn infect_random(&mut self) {
        match self.world.seed_random_infection() {
            Some(event) => self.record_events(std::slice::from_ref(&event)),
            None => self.push_event(
                "Nobody left to infect".to_string(),
                rgb(palette::UI_TEXT),
            ),
        }
        self.latest_snapshot = Some(self.world.create_snapshot());
    }

    /// Starts a new outbreak from the current configuration, keeping the live
    /// parameters.
    pub fn restart(&mut self) -> Result<()> {
        self.world = self.world.restarted_with(self.config.clone())?;
        self.infected_history.clear();
        self.immune_history.clear();
        self.push_event(
            format!(
                "Restarted: {} of {} people infected",
                self.world.pop_stats.infected,
                self.world.population()
            ),
            rgb(palette::INFECTED),
        );
        self.latest_snapshot = Some(self.world.create_snapshot());
        tracing::info!("World restarted");
        Ok(())
    }

    pub fn scale_time(&mut self, faster: bool) {
        self.time_scale = if faster {
            (self.time_scale * 2.0).min(MAX_TIME_SCALE)
        } else {
            (self.time_scale / 2.0).max(MIN_TIME_SCALE)
        };
    }

    /// Flips one of the visual effects and pushes the change into the world.
    pub fn toggle_visual<F>(&mut self, toggle: F)
    where
        F: FnOnce(&mut VisualConfig) -> (&'static str, bool),
    {
        let mut visual = self.config.visual.clone();
        let (name, enabled) = toggle(&mut visual);
        self.config.visual = visual.clone();
        self.world.apply_visual(visual);
        self.push_event(
            format!("{} {}", name, if enabled { "on" } else { "off" }),
            rgb(palette::UI_TEXT),
        );
        self.latest_snapshot = Some(self.world.create_snapshot());
    }

    /// Re-reads the config file when its modification time changed.
    ///
    /// Only the visual settings and target FPS are applied live. The world
    /// and disease sections are stored and take effect on the next restart.
    pub fn check_config_reload(&mut self) -> Result<bool> {
        let metadata = match std::fs::metadata(&self.config_path) {
            Ok(m) => m,
            Err(_) => return Ok(false),
        };
        let modified = metadata.modified()?;
        if Some(modified) == self.config_last_modified {
            return Ok(false);
        }
        self.config_last_modified = Some(modified);

        let content = std::fs::read_to_string(&self.config_path)?;
        match AppConfig::from_toml(&content) {
            Ok(new_config) => {
                let pending = new_config.world != self.config.world
                    || new_config.disease != self.config.disease;
                self.world.apply_visual(new_config.visual.clone());
                self.config = new_config;
                self.latest_snapshot = Some(self.world.create_snapshot());
                self.push_event(
                    format!("Configuration reloaded from {}", self.config_path.display()),
                    Color::Green,
                );
                if pending {
                    self.push_event(
                        "World and disease changes apply on restart [R]".to_string(),
                        Color::Yellow,
                    );
                }
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid {}: {}", self.config_path.display(), e);
                self.push_event(format!("Config rejected: {e}"), Color::Yellow);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::WorldConfig;

    fn app() -> App {
        let config = AppConfig {
            world: WorldConfig {
                population: 40,
                seed: Some(8),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(config, "does-not-exist.toml").unwrap()
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut app = app();
        for i in 0..40 {
            app.push_event(format!("event {i}"), Color::White);
        }
        assert_eq!(app.event_log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(app.event_log.back().unwrap().0, "event 39");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut app = app();
        for _ in 0..(HISTORY_CAPACITY + 10) {
            app.update_world();
        }
        assert_eq!(app.infected_history.len(), HISTORY_CAPACITY);
        assert_eq!(app.immune_history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_time_scale_limits() {
        let mut app = app();
        for _ in 0..10 {
            app.scale_time(true);
        }
        assert_eq!(app.time_scale, MAX_TIME_SCALE);
        for _ in 0..10 {
            app.scale_time(false);
        }
        assert_eq!(app.time_scale, MIN_TIME_SCALE);
    }

    #[test]
    fn test_tick_interval_follows_fps_and_scale() {
        let mut app = app();
        assert_eq!(app.tick_interval(), Duration::from_secs_f64(1.0 / 60.0));
        app.scale_time(true);
        assert_eq!(app.tick_interval(), Duration::from_secs_f64(1.0 / 60.0 / 2.0));
    }

    #[test]
    fn test_parameter_change_is_logged() {
        let mut app = app();
        app.adjust_parameter(Parameter::ImmunityDuration, Step::Decrease);
        let (msg, _) = app.event_log.back().unwrap();
        assert_eq!(msg, "Imm. Duration set to 9s");
    }

    fn temp_config_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "contagion-{}-{}.toml",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn app_watching(path: &std::path::Path) -> App {
        let config = AppConfig {
            world: WorldConfig {
                population: 40,
                seed: Some(8),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(config, path).unwrap()
    }

    fn edited_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.population = 25;
        config.world.seed = Some(8);
        config.visual.trail_length = 4;
        config.visual.glow_enabled = false;
        config.target_fps = 30;
        config
    }

    #[test]
    fn test_config_reload_missing_file() {
        let path = temp_config_path("missing");
        let mut app = app_watching(&path);
        assert!(!app.check_config_reload().unwrap());
        assert_eq!(app.config.target_fps, 60);
    }

    #[test]
    fn test_config_reload_applies_visual_and_fps() {
        let path = temp_config_path("edited");
        let mut app = app_watching(&path);
        std::fs::write(&path, edited_config().to_toml().unwrap()).unwrap();

        assert!(app.check_config_reload().unwrap());
        assert_eq!(app.config.target_fps, 30);
        assert_eq!(app.tick_interval(), Duration::from_secs_f64(1.0 / 30.0));
        assert_eq!(app.world.config.visual.trail_length, 4);
        let snapshot = app.latest_snapshot.as_ref().unwrap();
        assert!(!snapshot.visual.glow_enabled);
        // the running world keeps its population until a restart
        assert_eq!(app.world.population(), 40);

        // same modification time, nothing to do
        assert!(!app.check_config_reload().unwrap());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_reloaded_world_settings_apply_on_restart() {
        let path = temp_config_path("restart");
        let mut app = app_watching(&path);
        app.adjust_parameter(Parameter::InfectionChance, Step::Decrease);
        std::fs::write(&path, edited_config().to_toml().unwrap()).unwrap();

        assert!(app.check_config_reload().unwrap());
        let (msg, _) = app.event_log.back().unwrap();
        assert!(msg.contains("apply on restart"));

        app.restart().unwrap();
        assert_eq!(app.world.population(), 25);
        assert_eq!(app.world.person(0).unwrap().trail.capacity, 4);
        assert_eq!(app.world.tunables.infection_chance, 0.45);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_config_is_rejected_on_reload() {
        let path = temp_config_path("invalid");
        let mut app = app_watching(&path);
        std::fs::write(&path, "[world]\npopulation = 0\n").unwrap();

        assert!(!app.check_config_reload().unwrap());
        assert_eq!(app.config.world.population, 40);
        assert_eq!(app.config.target_fps, 60);
        let (msg, _) = app.event_log.back().unwrap();
        assert!(msg.starts_with("Config rejected"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_toggle_visual_reaches_snapshot() {
        let mut app = app();
        app.toggle_visual(|v| {
            v.trails_enabled = !v.trails_enabled;
            ("Trails", v.trails_enabled)
        });
        assert!(!app.latest_snapshot.as_ref().unwrap().visual.trails_enabled);
        assert!(!app.world.config.visual.trails_enabled);
    }
}
