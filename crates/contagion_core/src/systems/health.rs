use crate::tuning::Tunables;
use contagion_data::{Health, Status};

/// Status change produced by [`advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Infection ended. `immune` is false when recovery skips the immune phase.
    Recovered { immune: bool },
    /// Immunity ran out and the person is susceptible again.
    ImmunityWaned,
}

/// Radius of an infected person on `frame`, oscillating between `r` and `r + 2`.
pub fn pulsating_radius(base_radius: f64, frame: u64) -> f64 {
    let pulsation = ((frame as f64 * 0.1).sin() + 1.0) / 2.0;
    base_radius + pulsation * 2.0
}

/// Advances infection and immunity timers by one frame.
///
/// - Infected: the timer counts up and at `max(1, infection_duration)` the
///   person recovers into immunity (or straight to healthy).
/// - Recovered: with a zero immunity duration the person turns healthy at
///   once; otherwise the timer counts up to `immunity_duration`.
///
/// Durations are read on every call, so changing them takes effect for people
/// already mid-infection.
pub fn advance(
    health: &mut Health,
    tunables: &Tunables,
    recovery_grants_immunity: bool,
    frame: u64,
    base_radius: f64,
) -> Option<Transition> {
    let mut transition = None;

    match health.status {
        Status::Infected => {
            health.infection_timer += 1;
            if health.infection_timer >= tunables.infection_duration.max(1) {
                if recovery_grants_immunity {
                    health.status = Status::Recovered;
                    health.immunity_timer = 0;
                } else {
                    health.status = Status::Healthy;
                }
                health.infection_timer = 0;
                transition = Some(Transition::Recovered {
                    immune: recovery_grants_immunity,
                });
            }
        }
        Status::Recovered => {
            if tunables.immunity_duration == 0 {
                health.status = Status::Healthy;
                health.immunity_timer = 0;
                transition = Some(Transition::ImmunityWaned);
            } else {
                health.immunity_timer += 1;
                if health.immunity_timer >= tunables.immunity_duration {
                    health.status = Status::Healthy;
                    health.immunity_timer = 0;
                    transition = Some(Transition::ImmunityWaned);
                }
            }
        }
        Status::Healthy => {}
    }

    health.current_radius = if health.status == Status::Infected {
        pulsating_radius(base_radius, frame)
    } else {
        base_radius
    };

    transition
}
