use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Infection state of a person.
///
/// Only `Healthy` people are susceptible. `Recovered` people are immune until
/// their immunity wanes, at which point they return to `Healthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Healthy,
    Infected,
    Recovered,
}

impl Status {
    /// Label shown in statistics panels.
    pub fn label(self) -> &'static str {
        match self {
            Status::Healthy => "Healthy",
            Status::Infected => "Infected",
            Status::Recovered => "Immune",
        }
    }
}

/// Unique identification of a person.
///
/// `ordinal` is the spawn order and fixes the order of every per-person pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub ordinal: usize,
}

/// Kinematic state of a person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Physics {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Heading in radians. Only rewritten when a wall bounce happens.
    pub angle: f64,
    pub speed: f64,
    pub radius: f64,
}

/// Infection and immunity timers of a person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub status: Status,
    pub infection_timer: u32,
    pub immunity_timer: u32,
    /// Drawn radius, swollen while infected.
    pub current_radius: f64,
}

impl Health {
    pub fn new(status: Status, radius: f64) -> Self {
        Self {
            status,
            infection_timer: 0,
            immunity_timer: 0,
            current_radius: radius,
        }
    }

    pub fn is_susceptible(&self) -> bool {
        self.status == Status::Healthy
    }

    pub fn is_infected(&self) -> bool {
        self.status == Status::Infected
    }
}

/// Recent positions of a person, newest last.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Trail {
    pub points: VecDeque<(f64, f64)>,
    pub capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, dropping the oldest once the trail is full.
    pub fn push(&mut self, x: f64, y: f64) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((x, y));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Owned copy of every component of one person.
///
/// Used when spawning and when tests or renderers need a plain value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    pub identity: Identity,
    pub physics: Physics,
    pub health: Health,
    pub trail: Trail,
}

impl Person {
    pub fn status(&self) -> Status {
        self.health.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_is_bounded() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(i as f64, 0.0);
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.points.front(), Some(&(2.0, 0.0)));
        assert_eq!(trail.points.back(), Some(&(4.0, 0.0)));
    }

    #[test]
    fn test_zero_capacity_trail_stays_empty() {
        let mut trail = Trail::with_capacity(0);
        trail.push(1.0, 1.0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Recovered.label(), "Immune");
        assert_eq!(Status::default(), Status::Healthy);
    }
}
