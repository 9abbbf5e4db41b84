use serde::{Deserialize, Serialize};

/// Expanding ring drawn where an infection just happened.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Flash {
    pub x: f64,
    pub y: f64,
    pub timer: u32,
    pub max_timer: u32,
    pub max_radius: f64,
}

impl Flash {
    pub fn new(x: f64, y: f64, max_timer: u32, max_radius: f64) -> Self {
        Self {
            x,
            y,
            timer: 0,
            max_timer,
            max_radius,
        }
    }

    /// Fraction of the flash lifetime already elapsed.
    pub fn progress(&self) -> f64 {
        if self.max_timer == 0 {
            1.0
        } else {
            self.timer as f64 / self.max_timer as f64
        }
    }

    pub fn is_expired(&self) -> bool {
        self.timer > self.max_timer
    }
}
