use crate::model::history::OutbreakEvent;
use crate::model::state::{Flash, Health, Identity, Physics, Trail};
use crate::model::systems::health::{self, Transition};
use crate::model::systems::{effects, infection, movement, stats};
use crate::model::world::World;

impl World {
    /// Advances the simulation by one frame.
    ///
    /// Systems run in a fixed order:
    /// - movement then status timers, person by person in ordinal order
    /// - the infection pass over all contact pairs
    /// - flash timers
    /// - population statistics
    ///
    /// # Returns
    /// Events (infections, recoveries, waning immunity, eradication) that
    /// occurred this frame, in the order they happened.
    pub fn update(&mut self) -> Vec<OutbreakEvent> {
        #[cfg(not(target_arch = "wasm32"))]
        let started = std::time::Instant::now();

        self.tick += 1;
        let mut events = Vec::new();

        self.pass_movement_and_health(&mut events);
        let new_infections = self.pass_infection(&mut events);
        effects::tick_flashes(&mut self.ecs);
        self.pass_stats(new_infections, &mut events);

        #[cfg(not(target_arch = "wasm32"))]
        let elapsed = started.elapsed();
        #[cfg(target_arch = "wasm32")]
        let elapsed = std::time::Duration::ZERO;
        self.metrics
            .record_tick(elapsed, self.roster.len(), self.pop_stats.infected);
        self.metrics
            .add_to_counter("infections", new_infections as u64);

        events
    }

    fn pass_movement_and_health(&mut self, events: &mut Vec<OutbreakEvent>) {
        let frame = self.tick;
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let grants_immunity = self.config.disease.recovery_grants_immunity;

        for &handle in &self.roster {
            let Ok((identity, physics, health, trail)) = self
                .ecs
                .query_one_mut::<(&Identity, &mut Physics, &mut Health, &mut Trail)>(handle)
            else {
                continue;
            };
            movement::step(physics, trail, width, height);
            let transition = health::advance(
                health,
                &self.tunables,
                grants_immunity,
                frame,
                physics.radius,
            );
            match transition {
                Some(Transition::Recovered { immune }) => events.push(OutbreakEvent::Recovery {
                    id: identity.id,
                    ordinal: identity.ordinal,
                    immune,
                    tick: frame,
                }),
                Some(Transition::ImmunityWaned) => events.push(OutbreakEvent::ImmunityWaned {
                    id: identity.id,
                    ordinal: identity.ordinal,
                    tick: frame,
                }),
                None => {}
            }
        }
    }

    /// Runs the contact pass and returns the number of new infections.
    fn pass_infection(&mut self, events: &mut Vec<OutbreakEvent>) -> usize {
        self.position_buffer.clear();
        let mut healths = Vec::with_capacity(self.roster.len());
        for &handle in &self.roster {
            if let Ok(mut query) = self.ecs.query_one::<(&Physics, &Health)>(handle) {
                if let Some((physics, health)) = query.get() {
                    self.position_buffer.push((physics.x, physics.y));
                    healths.push(health.clone());
                }
            }
        }

        let radius = self.config.world.infection_radius();
        self.spatial_hash.build(&self.position_buffer);
        infection::contact_pairs(
            &self.position_buffer,
            &self.spatial_hash,
            radius,
            &mut self.pair_buffer,
        );
        let infected = infection::spread(
            &mut healths,
            &self.pair_buffer,
            self.tunables.infection_chance,
            &mut self.rng,
        );

        for &(target, source) in &infected {
            let handle = self.roster[target];
            if let Ok((identity, health)) =
                self.ecs.query_one_mut::<(&Identity, &mut Health)>(handle)
            {
                *health = healths[target].clone();
                events.push(OutbreakEvent::Infection {
                    id: identity.id,
                    ordinal: target,
                    source,
                    tick: self.tick,
                });
            }
            let (x, y) = self.position_buffer[target];
            self.spawn_flash(x, y);
        }
        infected.len()
    }

    fn pass_stats(&mut self, new_infections: usize, events: &mut Vec<OutbreakEvent>) {
        let was_infected = self.pop_stats.infected;
        self.refresh_stats(new_infections as u64);
        if was_infected > 0 && self.pop_stats.infected == 0 {
            tracing::info!(
                tick = self.tick,
                total_infections = self.pop_stats.total_infections,
                "Outbreak eradicated"
            );
            events.push(OutbreakEvent::Eradicated {
                tick: self.tick,
                total_infections: self.pop_stats.total_infections,
            });
        }
    }

    pub(crate) fn refresh_stats(&mut self, new_infections: u64) {
        stats::update_population_stats(
            &mut self.pop_stats,
            self.ecs
                .query_mut::<&Health>()
                .into_iter()
                .map(|(_, h)| h.status),
            new_infections,
            self.tick,
        );
    }

    pub(crate) fn spawn_flash(&mut self, x: f64, y: f64) {
        let visual = &self.config.visual;
        if !visual.flash_enabled {
            return;
        }
        let max_radius = self.config.world.person_radius * visual.flash_radius_factor;
        self.ecs
            .spawn((Flash::new(x, y, visual.flash_duration, max_radius),));
    }
}

#[cfg(test)]
mod tests {
    use crate::model::config::{AppConfig, DiseaseConfig, WorldConfig};
    use crate::model::history::OutbreakEvent;
    use crate::model::state::Status;
    use crate::model::world::World;

    fn world_with(population: usize, initial: usize, chance: f64) -> World {
        let config = AppConfig {
            world: WorldConfig {
                population,
                initial_infected: initial,
                seed: Some(3),
                ..Default::default()
            },
            disease: DiseaseConfig {
                infection_chance: chance,
                ..Default::default()
            },
            ..Default::default()
        };
        World::new(config).unwrap()
    }

    #[test]
    fn test_population_is_conserved() {
        let mut world = world_with(80, 5, 0.8);
        for _ in 0..300 {
            world.update();
            assert_eq!(world.pop_stats.population(), 80);
        }
    }

    #[test]
    fn test_infection_events_are_counted() {
        let mut world = world_with(150, 10, 1.0);
        let mut infections = 0;
        for _ in 0..60 {
            infections += world
                .update()
                .iter()
                .filter(|e| matches!(e, OutbreakEvent::Infection { .. }))
                .count();
        }
        assert_eq!(world.pop_stats.total_infections, 10 + infections as u64);
        assert_eq!(world.metrics.counter("infections"), infections as u64);
    }

    #[test]
    fn test_eradication_is_reported_once() {
        let mut world = world_with(10, 1, 0.0);
        world.tunables.infection_duration = 5;
        let mut eradications = 0;
        for _ in 0..20 {
            eradications += world
                .update()
                .iter()
                .filter(|e| matches!(e, OutbreakEvent::Eradicated { .. }))
                .count();
        }
        assert_eq!(eradications, 1);
        assert_eq!(world.pop_stats.infected, 0);
        assert_eq!(world.person(0).unwrap().status(), Status::Recovered);
    }
}
