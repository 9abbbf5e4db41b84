use crate::model::config::AppConfig;
use crate::model::error::Result;
use crate::model::spatial_hash::SpatialHash;
use crate::model::state::{Health, Identity, Physics, PopulationStats, Status, Trail};
use crate::model::systems::{movement, stats};
use crate::model::world::World;
use contagion_core::Metrics;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use uuid::Uuid;

impl World {
    /// Creates a world from a validated configuration.
    ///
    /// People are placed uniformly inside the walls with a uniform heading;
    /// the first `initial_infected` of them start infected.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let tunables = config.disease.tunables();
        let w = &config.world;
        let r = w.person_radius;

        let mut ecs = hecs::World::new();
        let mut roster = Vec::with_capacity(w.population);
        for ordinal in 0..w.population {
            let x = rng.gen_range(r..=f64::from(w.width) - r);
            let y = rng.gen_range(r..=f64::from(w.height) - r);
            let angle = rng.gen_range(0.0..TAU);
            let mut physics = Physics {
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                angle,
                speed: 0.0,
                radius: r,
            };
            movement::set_speed(&mut physics, tunables.move_speed);

            let status = if ordinal < w.initial_infected {
                Status::Infected
            } else {
                Status::Healthy
            };
            let identity = Identity {
                id: Uuid::new_v4(),
                ordinal,
            };
            roster.push(ecs.spawn((
                identity,
                physics,
                Health::new(status, r),
                Trail::with_capacity(config.visual.trail_length),
            )));
        }

        let mut pop_stats = PopulationStats::default();
        stats::update_population_stats(
            &mut pop_stats,
            ecs.query_mut::<&Health>().into_iter().map(|(_, h)| h.status),
            w.initial_infected as u64,
            0,
        );

        tracing::info!(
            population = w.population,
            initial_infected = w.initial_infected,
            seed = ?w.seed,
            "World created"
        );

        Ok(Self {
            width: w.width,
            height: w.height,
            tick: 0,
            spatial_hash: SpatialHash::new(w.infection_radius(), w.width, w.height),
            position_buffer: Vec::with_capacity(w.population),
            pair_buffer: Vec::new(),
            ecs,
            tunables,
            pop_stats,
            rng,
            metrics: Metrics::new(),
            roster,
            config,
        })
    }
}
