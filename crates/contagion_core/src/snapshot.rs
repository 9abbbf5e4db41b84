use crate::config::VisualConfig;
use crate::tuning::Tunables;
use contagion_data::{Flash, PopulationStats, Status};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Render-facing view of one person.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonSnapshot {
    pub id: Uuid,
    pub ordinal: usize,
    pub x: f64,
    pub y: f64,
    pub status: Status,
    pub current_radius: f64,
    /// Trail points, oldest first.
    pub trail: Vec<(f64, f64)>,
    pub trail_capacity: usize,
}

/// Immutable copy of everything a renderer needs for one frame.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u16,
    pub height: u16,
    pub person_radius: f64,
    pub people: Vec<PersonSnapshot>,
    pub flashes: Vec<Flash>,
    pub stats: PopulationStats,
    pub tunables: Tunables,
    pub visual: VisualConfig,
}
