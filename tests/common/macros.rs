/// Asserts that the person with the given ordinal has the expected status.
#[macro_export]
macro_rules! assert_status {
    ($world:expr, $ordinal:expr, $status:expr) => {
        let person = $world.person($ordinal).expect("Person not found in world");
        assert_eq!(
            person.status(),
            $status,
            "Person {} has status {:?}, expected {:?}",
            $ordinal,
            person.status(),
            $status
        );
    };
}

/// Asserts that the status counts add up to the expected population.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.population_stats().population(),
            $count,
            "Population count mismatch"
        );
        assert_eq!($world.population(), $count, "Roster size mismatch");
    };
}

/// Asserts that every person lies inside the walls.
#[macro_export]
macro_rules! assert_inside_walls {
    ($world:expr) => {
        let width = f64::from($world.width);
        let height = f64::from($world.height);
        for p in $world.people() {
            let r = p.physics.radius;
            assert!(
                p.physics.x >= r - 1e-9 && p.physics.x <= width - r + 1e-9,
                "Person {} escaped horizontally: x = {}",
                p.identity.ordinal,
                p.physics.x
            );
            assert!(
                p.physics.y >= r - 1e-9 && p.physics.y <= height - r + 1e-9,
                "Person {} escaped vertically: y = {}",
                p.identity.ordinal,
                p.physics.y
            );
        }
    };
}
