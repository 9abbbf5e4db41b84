use contagion_core::spatial_hash::SpatialHash;
use contagion_core::systems::{infection, movement};
use contagion_core::tuning::{Parameter, Step, Tunables};
use contagion_data::{Physics, Trail};
use contagion_lib::model::config::AppConfig;
use contagion_lib::model::world::World;
use proptest::prelude::*;

prop_compose! {
    fn arb_position()(
        x in 0.0f64..300.0,
        y in 0.0f64..200.0
    ) -> (f64, f64) {
        (x, y)
    }
}

prop_compose! {
    fn arb_physics()(
        x in 6.0f64..294.0,
        y in 6.0f64..194.0,
        angle in 0.0f64..std::f64::consts::TAU,
        speed in 0.1f64..5.0
    ) -> Physics {
        let mut physics = Physics {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            angle,
            speed: 0.0,
            radius: 6.0,
        };
        movement::set_speed(&mut physics, speed);
        physics
    }
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Increase), Just(Step::Decrease)]
}

fn arb_parameter() -> impl Strategy<Value = Parameter> {
    prop::sample::select(Parameter::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_people_never_leave_the_walls(
        mut physics in arb_physics(),
        frames in 1usize..500
    ) {
        let mut trail = Trail::with_capacity(10);
        for _ in 0..frames {
            movement::step(&mut physics, &mut trail, 300.0, 200.0);
            prop_assert!(physics.x >= 6.0 && physics.x <= 294.0, "x = {}", physics.x);
            prop_assert!(physics.y >= 6.0 && physics.y <= 194.0, "y = {}", physics.y);
        }
        prop_assert!(trail.len() <= 10);
    }

    #[test]
    fn test_bounces_preserve_speed(
        mut physics in arb_physics(),
        frames in 1usize..500
    ) {
        let speed = physics.speed;
        let mut trail = Trail::with_capacity(0);
        for _ in 0..frames {
            movement::step(&mut physics, &mut trail, 300.0, 200.0);
        }
        prop_assert!((physics.vx.hypot(physics.vy) - speed).abs() < 1e-9);
    }

    #[test]
    fn test_grid_pairs_match_brute_force(
        positions in prop::collection::vec(arb_position(), 0..120),
        radius in 4.0f64..40.0
    ) {
        let mut hash = SpatialHash::new(radius, 300, 200);
        hash.build(&positions);
        let mut pairs = Vec::new();
        infection::contact_pairs(&positions, &hash, radius, &mut pairs);
        prop_assert_eq!(pairs, infection::contact_pairs_brute_force(&positions, radius));
    }

    #[test]
    fn test_spatial_hash_cell_index_consistency(
        (x, y) in arb_position(),
        cell_size in 5.0f64..20.0
    ) {
        let spatial = SpatialHash::new(cell_size, 300, 200);
        if let Some(cell) = spatial.get_cell_idx(x, y) {
            prop_assert!(cell < spatial.cell_offsets.len() - 1,
                "Cell index {} out of range [0, {})", cell, spatial.cell_offsets.len() - 1);
        }
    }

    #[test]
    fn test_adjustments_stay_within_limits(
        steps in prop::collection::vec((arb_parameter(), arb_step()), 0..200)
    ) {
        let mut tunables = Tunables::default();
        for (parameter, step) in steps {
            let value = tunables.adjust(parameter, step);
            let (min, max) = parameter.limits();
            prop_assert!(value >= min && value <= max);
            prop_assert_eq!(tunables.get(parameter), value);
        }
        prop_assert!(tunables.out_of_range().is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_world_conserves_population(
        seed in any::<u64>(),
        population in 1usize..80,
        chance in 0.0f64..=1.0
    ) {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config.world.population = population;
        config.world.initial_infected = population.min(3);
        config.disease.infection_chance = chance;
        let mut world = World::new(config).unwrap();

        let mut previous_total = world.population_stats().total_infections;
        for _ in 0..60 {
            world.update();
            let stats = world.population_stats();
            prop_assert_eq!(stats.population(), population);
            prop_assert!(stats.total_infections >= previous_total);
            prop_assert!(stats.peak_infected >= stats.infected);
            previous_total = stats.total_infections;
        }
    }
}
