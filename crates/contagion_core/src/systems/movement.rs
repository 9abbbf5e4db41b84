use crate::tuning::Parameter;
use contagion_data::{Physics, Trail};

/// Sets a new speed, keeping the stored heading.
///
/// The speed is clamped to the move-speed limits before the velocity is
/// recomputed, so the velocity magnitude always equals `physics.speed`.
pub fn set_speed(physics: &mut Physics, speed: f64) {
    let (min, max) = Parameter::MoveSpeed.limits();
    physics.speed = speed.clamp(min, max);
    physics.vx = physics.angle.cos() * physics.speed;
    physics.vy = physics.angle.sin() * physics.speed;
}

/// Advances one frame and reflects off the walls of a `width` x `height` area.
///
/// The position before moving is appended to `trail`. A person touching a wall
/// is pushed back to exactly one radius from it with the matching velocity
/// component pointing inward. Returns whether any bounce happened.
pub fn step(physics: &mut Physics, trail: &mut Trail, width: f64, height: f64) -> bool {
    trail.push(physics.x, physics.y);

    physics.x += physics.vx;
    physics.y += physics.vy;

    let r = physics.radius;
    let mut bounced = false;

    if physics.x <= r {
        physics.vx = physics.vx.abs();
        physics.x = r;
        bounced = true;
    } else if physics.x >= width - r {
        physics.vx = -physics.vx.abs();
        physics.x = width - r;
        bounced = true;
    }

    if physics.y <= r {
        physics.vy = physics.vy.abs();
        physics.y = r;
        bounced = true;
    } else if physics.y >= height - r {
        physics.vy = -physics.vy.abs();
        physics.y = height - r;
        bounced = true;
    }

    if bounced {
        physics.angle = physics.vy.atan2(physics.vx);
    }
    bounced
}
