mod common;
use common::{run_for, WorldBuilder};
use contagion_lib::model::history::OutbreakEvent;
use contagion_lib::model::state::Status;
use contagion_lib::model::tuning::Parameter;

fn count_infections(events: &[OutbreakEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, OutbreakEvent::Infection { .. }))
        .count()
}

#[test]
fn test_zero_chance_never_spreads() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.disease.infection_chance = 0.0)
        .build();
    let events = run_for(&mut world, 300);

    assert_eq!(count_infections(&events), 0);
    assert_eq!(world.population_stats().total_infections, 4);
    assert_population!(world, 150);
}

#[test]
fn test_certain_chance_saturates_a_crowded_box() {
    let mut world = WorldBuilder::new()
        .with_size(40, 40)
        .with_population(10, 1)
        .with_config(|c| c.disease.infection_chance = 1.0)
        .build();
    let events = run_for(&mut world, 200);

    assert_eq!(count_infections(&events), 9);
    assert_eq!(world.population_stats().infected, 10);
    assert_eq!(world.population_stats().total_infections, 10);
}

#[test]
fn test_infection_sources_are_infected_people() {
    let mut world = WorldBuilder::new()
        .with_size(60, 60)
        .with_population(20, 2)
        .with_config(|c| c.disease.infection_chance = 1.0)
        .build();

    for _ in 0..100 {
        let before = world.people();
        for event in world.update() {
            if let OutbreakEvent::Infection { ordinal, source, .. } = event {
                assert_eq!(before[ordinal].status(), Status::Healthy);
                // the source was infected before this frame or earlier in it
                assert_ne!(ordinal, source);
                assert_status!(world, source, Status::Infected);
            }
        }
    }
}

#[test]
fn test_recovery_happens_exactly_at_duration() {
    let mut world = WorldBuilder::new().with_population(1, 1).build();
    world.tunables.infection_duration = 5;

    run_for(&mut world, 4);
    assert_status!(world, 0, Status::Infected);
    assert_eq!(world.person(0).unwrap().health.infection_timer, 4);

    let events = world.update();
    assert_status!(world, 0, Status::Recovered);
    assert!(matches!(
        events.as_slice(),
        [
            OutbreakEvent::Recovery {
                ordinal: 0,
                immune: true,
                tick: 5,
                ..
            },
            OutbreakEvent::Eradicated { tick: 5, .. }
        ]
    ));
}

#[test]
fn test_immunity_wanes_exactly_at_duration() {
    let mut world = WorldBuilder::new().with_population(1, 1).build();
    world.tunables.infection_duration = 5;
    world.tunables.immunity_duration = 3;

    run_for(&mut world, 7);
    assert_status!(world, 0, Status::Recovered);

    let events = world.update();
    assert_status!(world, 0, Status::Healthy);
    assert!(events
        .iter()
        .any(|e| matches!(e, OutbreakEvent::ImmunityWaned { tick: 8, .. })));
}

#[test]
fn test_zero_immunity_returns_to_healthy_next_frame() {
    let mut world = WorldBuilder::new()
        .with_population(1, 1)
        .with_config(|c| c.disease.immunity_duration = 0)
        .build();
    world.tunables.infection_duration = 5;

    run_for(&mut world, 5);
    assert_status!(world, 0, Status::Recovered);
    world.update();
    assert_status!(world, 0, Status::Healthy);
}

#[test]
fn test_recovery_without_immunity_skips_immune_phase() {
    let mut world = WorldBuilder::new()
        .with_population(1, 1)
        .with_config(|c| c.disease.recovery_grants_immunity = false)
        .build();
    world.tunables.infection_duration = 5;

    let events = run_for(&mut world, 5);
    assert_status!(world, 0, Status::Healthy);
    assert!(events.iter().any(|e| matches!(
        e,
        OutbreakEvent::Recovery {
            immune: false,
            ..
        }
    )));
}

#[test]
fn test_shortened_duration_applies_to_ongoing_infections() {
    let mut world = WorldBuilder::new().with_population(1, 1).build();
    run_for(&mut world, 40);
    assert_status!(world, 0, Status::Infected);

    world
        .set_parameter(Parameter::InfectionDuration, 30.0)
        .unwrap();
    world.update();
    assert_status!(world, 0, Status::Recovered);
}

#[test]
fn test_infected_radius_pulsates_and_resets() {
    let mut world = WorldBuilder::new().with_population(1, 1).build();
    world.tunables.infection_duration = 50;

    let mut radii = Vec::new();
    for _ in 0..49 {
        world.update();
        radii.push(world.person(0).unwrap().health.current_radius);
    }
    assert!(radii.iter().all(|r| (6.0..=8.0).contains(r)));
    assert!(radii.iter().any(|r| *r > 7.0));

    world.update();
    assert_eq!(world.person(0).unwrap().health.current_radius, 6.0);
}

#[test]
fn test_eradication_ends_with_everyone_uninfected() {
    let mut world = WorldBuilder::new()
        .with_population(30, 3)
        .with_config(|c| c.disease.infection_chance = 0.0)
        .build();
    world.tunables.infection_duration = 10;

    let events = run_for(&mut world, 10);
    assert!(events.iter().any(|e| matches!(
        e,
        OutbreakEvent::Eradicated {
            tick: 10,
            total_infections: 3
        }
    )));
    assert_eq!(world.population_stats().infected, 0);
    assert_eq!(world.population_stats().recovered, 3);
    assert_eq!(world.population_stats().peak_infected, 3);
}
