//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml`
//! file. Every value has a default, so a partial file only overrides what it
//! names.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags such as `--seed` and `--set` (override the file)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 900
//! height = 650
//! population = 150
//! initial_infected = 4
//! seed = 42
//!
//! [disease]
//! infection_chance = 0.35
//! immunity_duration = 0
//!
//! [visual]
//! trails_enabled = false
//! ```

use crate::error::{Result, SimError};
use crate::tuning::{Parameter, Tunables};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level simulation configuration.
///
/// `height` is the height of the simulation area only; control widgets are
/// laid out outside of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub population: usize,
    pub initial_infected: usize,
    pub person_radius: f64,
    /// Contact distance as a multiple of `person_radius`.
    pub infection_radius_factor: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 650,
            population: 150,
            initial_infected: 4,
            person_radius: 6.0,
            infection_radius_factor: 3.0,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn infection_radius(&self) -> f64 {
        self.person_radius * self.infection_radius_factor
    }
}

/// Initial values of the live parameters plus fixed disease rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiseaseConfig {
    pub move_speed: f64,
    pub infection_chance: f64,
    pub infection_duration: u32,
    pub immunity_duration: u32,
    /// When false, recovered people skip the immune phase entirely.
    pub recovery_grants_immunity: bool,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        let t = Tunables::default();
        Self {
            move_speed: t.move_speed,
            infection_chance: t.infection_chance,
            infection_duration: t.infection_duration,
            immunity_duration: t.immunity_duration,
            recovery_grants_immunity: true,
        }
    }
}

impl DiseaseConfig {
    pub fn tunables(&self) -> Tunables {
        Tunables {
            move_speed: self.move_speed,
            infection_chance: self.infection_chance,
            infection_duration: self.infection_duration,
            immunity_duration: self.immunity_duration,
        }
    }

    /// Overrides the initial value of one live parameter.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> Result<()> {
        let mut tunables = self.tunables();
        tunables.set(parameter, value)?;
        self.move_speed = tunables.move_speed;
        self.infection_chance = tunables.infection_chance;
        self.infection_duration = tunables.infection_duration;
        self.immunity_duration = tunables.immunity_duration;
        Ok(())
    }
}

/// Visual effects shared by the terminal and browser renderers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VisualConfig {
    pub glow_enabled: bool,
    pub glow_layers: u32,
    /// Alpha (0-255) of the innermost glow layer.
    pub glow_alpha: u8,
    pub glow_expansion: f64,
    pub trails_enabled: bool,
    pub trail_length: usize,
    pub trail_alpha_start: u8,
    pub flash_enabled: bool,
    /// Frames a flash stays on screen.
    pub flash_duration: u32,
    /// Final flash radius as a multiple of the person radius.
    pub flash_radius_factor: f64,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            glow_enabled: true,
            glow_layers: 4,
            glow_alpha: 40,
            glow_expansion: 1.5,
            trails_enabled: true,
            trail_length: 10,
            trail_alpha_start: 60,
            flash_enabled: true,
            flash_duration: 15,
            flash_radius_factor: 4.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub disease: DiseaseConfig,
    pub visual: VisualConfig,
    pub target_fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            disease: DiseaseConfig::default(),
            visual: VisualConfig::default(),
            target_fps: 60,
        }
    }
}

fn ensure(condition: bool, msg: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SimError::invalid_config(msg))
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - The world must be large enough to hold one person
    /// - Population must be within `1..=10000` and contain the initial cases
    /// - Every live parameter must lie within its control-panel limits
    /// - Target FPS must be within `1..=240`
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        ensure(
            w.person_radius.is_finite() && w.person_radius > 0.0,
            "Person radius must be positive",
        )?;
        ensure(
            f64::from(w.width) > 2.0 * w.person_radius,
            "World width must exceed the person diameter",
        )?;
        ensure(
            f64::from(w.height) > 2.0 * w.person_radius,
            "World height must exceed the person diameter",
        )?;
        ensure(w.population > 0, "Population must be positive")?;
        ensure(w.population <= 10000, "Population too large (max 10000)")?;
        ensure(
            w.initial_infected <= w.population,
            "Initial infected cannot exceed the population",
        )?;
        ensure(
            w.infection_radius_factor.is_finite() && w.infection_radius_factor > 0.0,
            "Infection radius factor must be positive",
        )?;

        if let Some(p) = self.disease.tunables().out_of_range().first() {
            let (min, max) = p.limits();
            return Err(SimError::invalid_config(format!(
                "{} must be in [{}, {}]",
                p.key(),
                min,
                max
            )));
        }

        ensure(
            self.visual.glow_expansion >= 0.0,
            "Glow expansion must be non-negative",
        )?;
        ensure(
            self.visual.flash_radius_factor >= 0.0,
            "Flash radius factor must be non-negative",
        )?;

        ensure(self.target_fps > 0, "Target FPS must be positive")?;
        ensure(self.target_fps <= 240, "Target FPS too high (max 240)")?;
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Loads the file at `path`, falling back to defaults.
    ///
    /// A missing file is created with the default configuration. A file that
    /// fails to parse or validate is left untouched and a warning is logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", path.display(), e);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let default = Self::default();
                if let Ok(toml_str) = default.to_toml() {
                    if let Err(e) = std::fs::write(path, toml_str) {
                        tracing::warn!("Could not write default {}: {}", path.display(), e);
                    }
                }
                return default;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
            }
        }
        Self::default()
    }
}
