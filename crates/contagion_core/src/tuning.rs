//! Live-adjustable disease parameters.
//!
//! The control panel nudges each parameter by a fixed step. Every nudge is
//! clamped to the parameter's limits and then normalised: infection chance is
//! kept at two decimals and durations are snapped onto multiples of their
//! step, so repeated clicks never accumulate floating point drift.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frames per second the durations are expressed against.
pub const FRAMES_PER_SECOND: u32 = 60;

/// One of the four tunables exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    MoveSpeed,
    InfectionChance,
    InfectionDuration,
    ImmunityDuration,
}

/// Direction of a single control-panel nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Decrease,
    Increase,
}

impl Step {
    pub fn sign(self) -> f64 {
        match self {
            Step::Decrease => -1.0,
            Step::Increase => 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Step::Decrease => "-",
            Step::Increase => "+",
        }
    }
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::MoveSpeed,
        Parameter::InfectionChance,
        Parameter::InfectionDuration,
        Parameter::ImmunityDuration,
    ];

    /// Snake-case name used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::MoveSpeed => "move_speed",
            Parameter::InfectionChance => "infection_chance",
            Parameter::InfectionDuration => "infection_duration",
            Parameter::ImmunityDuration => "immunity_duration",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Parameter::MoveSpeed => "Speed",
            Parameter::InfectionChance => "Inf. Chance",
            Parameter::InfectionDuration => "Inf. Duration",
            Parameter::ImmunityDuration => "Imm. Duration",
        }
    }

    /// Amount one button press changes the value by.
    pub fn step(self) -> f64 {
        match self {
            Parameter::MoveSpeed => 0.1,
            Parameter::InfectionChance => 0.05,
            Parameter::InfectionDuration => 30.0,
            Parameter::ImmunityDuration => 60.0,
        }
    }

    /// Inclusive `(min, max)` bounds.
    pub fn limits(self) -> (f64, f64) {
        match self {
            Parameter::MoveSpeed => (0.1, 5.0),
            Parameter::InfectionChance => (0.0, 1.0),
            Parameter::InfectionDuration => (30.0, 3000.0),
            Parameter::ImmunityDuration => (0.0, 6000.0),
        }
    }

    pub fn is_duration(self) -> bool {
        matches!(
            self,
            Parameter::InfectionDuration | Parameter::ImmunityDuration
        )
    }

    /// Formats a value the way the control panel shows it.
    ///
    /// Durations are shown in whole seconds; an immunity of zero frames reads
    /// as `None`.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Parameter::MoveSpeed => format!("{:.1}", value),
            Parameter::InfectionChance => format!("{:.2}", value),
            Parameter::ImmunityDuration if value == 0.0 => "None".to_string(),
            Parameter::InfectionDuration | Parameter::ImmunityDuration => {
                format!("{}s", (value / FRAMES_PER_SECOND as f64) as i64)
            }
        }
    }

    pub fn next(self) -> Parameter {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Parameter {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "move_speed" | "speed" => Ok(Parameter::MoveSpeed),
            "infection_chance" | "chance" => Ok(Parameter::InfectionChance),
            "infection_duration" => Ok(Parameter::InfectionDuration),
            "immunity_duration" => Ok(Parameter::ImmunityDuration),
            other => Err(SimError::UnknownParameter(other.to_string())),
        }
    }
}

/// Parses a `name=value` assignment such as `chance=0.3`.
pub fn parse_assignment(text: &str) -> Result<(Parameter, f64), SimError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| SimError::invalid_value(text, "expected name=value"))?;
    let parameter: Parameter = name.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| SimError::invalid_value(parameter.key(), value.trim()))?;
    Ok((parameter, value))
}

/// Current values of the live parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tunables {
    pub move_speed: f64,
    /// Probability in `[0, 1]` that a contact infects.
    pub infection_chance: f64,
    /// Frames an infection lasts.
    pub infection_duration: u32,
    /// Frames immunity lasts after recovery; zero disables immunity.
    pub immunity_duration: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            move_speed: 1.2,
            infection_chance: 0.5,
            infection_duration: 700,
            immunity_duration: 600,
        }
    }
}

impl Tunables {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::MoveSpeed => self.move_speed,
            Parameter::InfectionChance => self.infection_chance,
            Parameter::InfectionDuration => f64::from(self.infection_duration),
            Parameter::ImmunityDuration => f64::from(self.immunity_duration),
        }
    }

    /// Sets a parameter to an explicit value after checking its limits.
    ///
    /// Durations count whole frames, so a fractional duration is rejected.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<(), SimError> {
        let (min, max) = parameter.limits();
        if !value.is_finite()
            || value < min
            || value > max
            || (parameter.is_duration() && value.fract() != 0.0)
        {
            return Err(SimError::invalid_value(parameter.key(), value.to_string()));
        }
        self.store(parameter, value);
        Ok(())
    }

    /// Applies one control-panel step and returns the new value.
    pub fn adjust(&mut self, parameter: Parameter, step: Step) -> f64 {
        let (min, max) = parameter.limits();
        let raw = (self.get(parameter) + step.sign() * parameter.step()).clamp(min, max);

        let value = match parameter {
            Parameter::MoveSpeed => raw,
            Parameter::InfectionChance => (raw * 100.0).round() / 100.0,
            Parameter::InfectionDuration | Parameter::ImmunityDuration => {
                snap_to_step(raw, parameter.step(), min)
            }
        };
        self.store(parameter, value);
        value
    }

    /// Returns every parameter that lies outside its limits.
    pub fn out_of_range(&self) -> Vec<Parameter> {
        Parameter::ALL
            .into_iter()
            .filter(|p| {
                let (min, max) = p.limits();
                let v = self.get(*p);
                !v.is_finite() || v < min || v > max
            })
            .collect()
    }

    fn store(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::MoveSpeed => self.move_speed = value,
            Parameter::InfectionChance => self.infection_chance = value,
            Parameter::InfectionDuration => self.infection_duration = value as u32,
            Parameter::ImmunityDuration => self.immunity_duration = value as u32,
        }
    }
}

/// Rounds onto the nearest multiple of `step` (ties to even), never below zero
/// nor below `min`.
fn snap_to_step(value: f64, step: f64, min: f64) -> f64 {
    let snapped = ((value / step).round_ties_even() * step).max(0.0);
    snapped.trunc().max(min)
}
