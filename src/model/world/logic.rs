use crate::model::config::{AppConfig, VisualConfig};
use crate::model::error::Result;
use crate::model::history::OutbreakEvent;
use crate::model::state::{Health, Identity, Physics, Status, Trail};
use crate::model::systems::movement;
use crate::model::tuning::{Parameter, Step};
use crate::model::world::World;
use rand::Rng;

impl World {
    /// Applies one control-panel step to a live parameter.
    ///
    /// A speed change is pushed to every person immediately; the other
    /// parameters are read by the systems on the next frame.
    pub fn adjust(&mut self, parameter: Parameter, step: Step) -> OutbreakEvent {
        let value = self.tunables.adjust(parameter, step);
        self.parameter_changed(parameter, value)
    }

    /// Sets a live parameter to an explicit, in-range value.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> Result<OutbreakEvent> {
        self.tunables.set(parameter, value)?;
        let value = self.tunables.get(parameter);
        Ok(self.parameter_changed(parameter, value))
    }

    fn parameter_changed(&mut self, parameter: Parameter, value: f64) -> OutbreakEvent {
        if parameter == Parameter::MoveSpeed {
            for (_, physics) in self.ecs.query_mut::<&mut Physics>() {
                movement::set_speed(physics, value);
            }
        }
        tracing::debug!(parameter = %parameter, value, "Parameter changed");
        OutbreakEvent::ParameterChanged {
            parameter,
            value,
            tick: self.tick,
        }
    }

    /// Infects the susceptible person closest to `(x, y)` within `max_distance`.
    ///
    /// The infection chance is bypassed. Returns `None` when nobody
    /// susceptible is close enough.
    pub fn seed_infection_near(&mut self, x: f64, y: f64, max_distance: f64) -> Option<OutbreakEvent> {
        let mut best: Option<(usize, f64)> = None;
        for (ordinal, &handle) in self.roster.iter().enumerate() {
            let Ok(mut query) = self.ecs.query_one::<(&Physics, &Health)>(handle) else {
                continue;
            };
            let Some((physics, health)) = query.get() else {
                continue;
            };
            if !health.is_susceptible() {
                continue;
            }
            let d = (physics.x - x).hypot(physics.y - y);
            if d <= max_distance && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((ordinal, d));
            }
        }
        best.and_then(|(ordinal, _)| self.infect_ordinal(ordinal))
    }

    /// Infects a uniformly chosen susceptible person.
    pub fn seed_random_infection(&mut self) -> Option<OutbreakEvent> {
        let susceptible: Vec<usize> = self
            .roster
            .iter()
            .enumerate()
            .filter(|(_, handle)| {
                self.ecs
                    .get::<&Health>(**handle)
                    .is_ok_and(|h| h.is_susceptible())
            })
            .map(|(ordinal, _)| ordinal)
            .collect();
        if susceptible.is_empty() {
            return None;
        }
        let pick = susceptible[self.rng.gen_range(0..susceptible.len())];
        self.infect_ordinal(pick)
    }

    fn infect_ordinal(&mut self, ordinal: usize) -> Option<OutbreakEvent> {
        let handle = *self.roster.get(ordinal)?;
        let (id, x, y) = {
            let (identity, physics, health) = self
                .ecs
                .query_one_mut::<(&Identity, &Physics, &mut Health)>(handle)
                .ok()?;
            if !health.is_susceptible() {
                return None;
            }
            health.status = Status::Infected;
            health.infection_timer = 0;
            health.immunity_timer = 0;
            (identity.id, physics.x, physics.y)
        };
        self.spawn_flash(x, y);
        self.refresh_stats(1);
        tracing::info!(ordinal, tick = self.tick, "Patient zero seeded");
        Some(OutbreakEvent::PatientZero {
            id,
            ordinal,
            tick: self.tick,
        })
    }

    /// Replaces the visual settings, resizing every trail to the new length.
    pub fn apply_visual(&mut self, visual: VisualConfig) {
        if visual.trail_length != self.config.visual.trail_length {
            for (_, trail) in self.ecs.query_mut::<&mut Trail>() {
                let mut resized = Trail::with_capacity(visual.trail_length);
                for &(x, y) in &trail.points {
                    resized.push(x, y);
                }
                *trail = resized;
            }
        }
        self.config.visual = visual;
    }

    /// A fresh world with the same configuration and the current live
    /// parameters.
    pub fn restarted(&self) -> Result<World> {
        self.restarted_with(self.config.clone())
    }

    /// A fresh world built from `config`, keeping the current live
    /// parameters in place of the config's initial ones.
    pub fn restarted_with(&self, mut config: AppConfig) -> Result<World> {
        config.disease.move_speed = self.tunables.move_speed;
        config.disease.infection_chance = self.tunables.infection_chance;
        config.disease.infection_duration = self.tunables.infection_duration;
        config.disease.immunity_duration = self.tunables.immunity_duration;
        World::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::WorldConfig;

    fn world() -> World {
        let config = AppConfig {
            world: WorldConfig {
                population: 30,
                initial_infected: 0,
                seed: Some(21),
                ..Default::default()
            },
            ..Default::default()
        };
        World::new(config).unwrap()
    }

    #[test]
    fn test_speed_change_respeeds_everyone() {
        let mut w = world();
        w.adjust(Parameter::MoveSpeed, Step::Increase);
        for p in w.people() {
            assert!((p.physics.speed - 1.3).abs() < 1e-9);
            assert!((p.physics.vx.hypot(p.physics.vy) - 1.3).abs() < 1e-9);
        }
    }

    #[test]
    fn test_set_parameter_rejects_out_of_range() {
        let mut w = world();
        assert!(w.set_parameter(Parameter::InfectionChance, 2.0).is_err());
        assert_eq!(w.tunables.infection_chance, 0.5);
        let ev = w.set_parameter(Parameter::ImmunityDuration, 0.0).unwrap();
        assert!(matches!(ev, OutbreakEvent::ParameterChanged { .. }));
        assert_eq!(w.tunables.immunity_duration, 0);
    }

    #[test]
    fn test_seed_infection_picks_nearest_susceptible() {
        let mut w = world();
        let target = w.person(7).unwrap().physics;
        let ev = w.seed_infection_near(target.x, target.y, 1.0).unwrap();
        assert!(matches!(ev, OutbreakEvent::PatientZero { ordinal: 7, .. }));
        assert_eq!(w.pop_stats.infected, 1);
        assert_eq!(w.pop_stats.total_infections, 1);
        assert_eq!(w.flash_count(), 1);

        // already infected, so nobody else within a zero radius
        assert!(w.seed_infection_near(target.x, target.y, 0.0).is_none());
    }

    #[test]
    fn test_random_seed_until_exhausted() {
        let mut w = world();
        for _ in 0..30 {
            assert!(w.seed_random_infection().is_some());
        }
        assert!(w.seed_random_infection().is_none());
        assert_eq!(w.pop_stats.infected, 30);
    }

    #[test]
    fn test_restart_keeps_tunables() {
        let mut w = world();
        w.adjust(Parameter::InfectionChance, Step::Decrease);
        let fresh = w.restarted().unwrap();
        assert_eq!(fresh.tick, 0);
        assert_eq!(fresh.tunables.infection_chance, 0.45);
    }

    #[test]
    fn test_restart_with_new_config_keeps_tunables() {
        let mut w = world();
        w.adjust(Parameter::MoveSpeed, Step::Increase);
        let mut config = w.config.clone();
        config.world.population = 12;
        config.disease.move_speed = 0.5;
        config.disease.recovery_grants_immunity = false;

        let fresh = w.restarted_with(config).unwrap();
        assert_eq!(fresh.population(), 12);
        assert!((fresh.tunables.move_speed - 1.3).abs() < 1e-9);
        assert!(!fresh.config.disease.recovery_grants_immunity);
    }

    #[test]
    fn test_apply_visual_resizes_trails() {
        let mut w = world();
        for _ in 0..10 {
            w.update();
        }
        let visual = VisualConfig {
            trail_length: 3,
            ..w.config.visual.clone()
        };
        w.apply_visual(visual);
        let p = w.person(0).unwrap();
        assert_eq!(p.trail.len(), 3);
        assert_eq!(p.trail.capacity, 3);
    }
}
