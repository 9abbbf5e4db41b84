pub mod macros;

use contagion_lib::model::config::AppConfig;
use contagion_lib::model::history::OutbreakEvent;
use contagion_lib::model::world::World;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_population(mut self, population: usize, initial_infected: usize) -> Self {
        self.config.world.population = population;
        self.config.world.initial_infected = initial_infected;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn build(self) -> World {
        World::new(self.config).expect("Failed to build world")
    }
}

/// Runs `ticks` frames and returns every event emitted along the way.
#[allow(dead_code)]
pub fn run_for(world: &mut World, ticks: u64) -> Vec<OutbreakEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(world.update());
    }
    events
}
