use crate::model::config::AppConfig;
use crate::model::snapshot::{PersonSnapshot, WorldSnapshot};
use crate::model::spatial_hash::SpatialHash;
use crate::model::state::{Flash, Health, Identity, Person, Physics, PopulationStats, Trail};
use crate::model::tuning::Tunables;
use contagion_core::Metrics;
use rand_chacha::ChaCha8Rng;

pub mod init;
pub mod logic;
pub mod update;

/// Components of one person, in query order.
pub type PersonComponents<'a> = (&'a Identity, &'a Physics, &'a Health, &'a Trail);

/// The simulated population and everything needed to advance it.
///
/// People live in `ecs` as entities; `roster[ordinal]` is the handle of the
/// person spawned `ordinal`-th, and every per-person pass walks the roster in
/// that order.
pub struct World {
    pub width: u16,
    pub height: u16,
    pub tick: u64,
    pub ecs: hecs::World,
    pub config: AppConfig,
    pub tunables: Tunables,
    pub pop_stats: PopulationStats,
    pub spatial_hash: SpatialHash,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    roster: Vec<hecs::Entity>,
    position_buffer: Vec<(f64, f64)>,
    pair_buffer: Vec<(usize, usize)>,
}

impl World {
    pub fn population(&self) -> usize {
        self.roster.len()
    }

    pub fn population_stats(&self) -> &PopulationStats {
        &self.pop_stats
    }

    /// Owned copy of the person with the given spawn ordinal.
    pub fn person(&self, ordinal: usize) -> Option<Person> {
        let handle = *self.roster.get(ordinal)?;
        let mut query = self.ecs.query_one::<PersonComponents>(handle).ok()?;
        let (identity, physics, health, trail) = query.get()?;
        Some(Person {
            identity: *identity,
            physics: physics.clone(),
            health: health.clone(),
            trail: trail.clone(),
        })
    }

    /// Owned copies of every person, in ordinal order.
    pub fn people(&self) -> Vec<Person> {
        (0..self.roster.len())
            .filter_map(|ordinal| self.person(ordinal))
            .collect()
    }

    pub fn flash_count(&self) -> usize {
        self.ecs.query::<&Flash>().iter().count()
    }

    pub fn create_snapshot(&self) -> WorldSnapshot {
        let people = self
            .people()
            .into_iter()
            .map(|p| PersonSnapshot {
                id: p.identity.id,
                ordinal: p.identity.ordinal,
                x: p.physics.x,
                y: p.physics.y,
                status: p.health.status,
                current_radius: p.health.current_radius,
                trail: p.trail.points.iter().copied().collect(),
                trail_capacity: p.trail.capacity,
            })
            .collect();
        let flashes = self
            .ecs
            .query::<&Flash>()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();

        WorldSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            person_radius: self.config.world.person_radius,
            people,
            flashes,
            stats: self.pop_stats.clone(),
            tunables: self.tunables,
            visual: self.config.visual.clone(),
        }
    }
}
