//! Short-lived visual effects and the draw parameters both renderers share.

use crate::config::VisualConfig;
use contagion_data::Flash;

/// Advances every flash by one frame and despawns the expired ones.
///
/// A flash survives `max_timer + 1` updates. Returns how many were removed.
pub fn tick_flashes(ecs: &mut hecs::World) -> usize {
    let mut expired = Vec::new();
    for (handle, flash) in ecs.query_mut::<&mut Flash>() {
        flash.timer += 1;
        if flash.is_expired() {
            expired.push(handle);
        }
    }
    for handle in &expired {
        let _ = ecs.despawn(*handle);
    }
    expired.len()
}

/// Current ring radius and alpha of a flash.
///
/// The ring grows linearly while its alpha fades quadratically from 200.
pub fn flash_appearance(flash: &Flash) -> (u32, u8) {
    let progress = flash.progress();
    let radius = (progress * flash.max_radius).max(0.0) as u32;
    let alpha = (200.0 * (1.0 - progress * progress)).clamp(0.0, 255.0) as u8;
    (radius, alpha)
}

/// One dot of a motion trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailDot {
    pub x: f64,
    pub y: f64,
    pub alpha: u8,
    pub radius: u32,
}

/// Dots of a trail whose `points` are ordered oldest first, returned newest
/// first.
///
/// Fading is measured against the trail capacity, not its current length.
/// Dots whose integer radius drops to zero are skipped, and nothing is drawn
/// until the trail holds at least two points.
pub fn trail_dots(
    points: &[(f64, f64)],
    capacity: usize,
    radius: f64,
    alpha_start: u8,
) -> Vec<TrailDot> {
    if points.len() <= 1 || capacity == 0 {
        return Vec::new();
    }
    let cap = capacity as f64;
    points
        .iter()
        .rev()
        .enumerate()
        .filter_map(|(i, &(x, y))| {
            let fraction = i as f64 / cap;
            let alpha = (f64::from(alpha_start) * fraction).max(0.0) as u8;
            let dot_radius = (radius * (1.0 - fraction).max(0.0)) as u32;
            (dot_radius > 0).then_some(TrailDot {
                x,
                y,
                alpha,
                radius: dot_radius,
            })
        })
        .collect()
}

/// Glow rings for a person, outermost first, as `(radius, alpha)`.
pub fn glow_layers(current_radius: f64, visual: &VisualConfig) -> Vec<(u32, u8)> {
    (1..=visual.glow_layers)
        .rev()
        .filter_map(|i| {
            let radius = current_radius + f64::from(i) * visual.glow_expansion;
            if radius < 1.0 {
                return None;
            }
            let alpha = visual.glow_alpha / i.min(255) as u8;
            (alpha > 0).then_some((radius as u32, alpha))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagion_data::Trail;

    #[test]
    fn test_flash_lives_max_timer_plus_one_updates() {
        let mut ecs = hecs::World::new();
        ecs.spawn((Flash::new(1.0, 1.0, 15, 24.0),));
        for _ in 0..15 {
            assert_eq!(tick_flashes(&mut ecs), 0);
        }
        assert_eq!(tick_flashes(&mut ecs), 1);
        assert_eq!(ecs.len(), 0);
    }

    #[test]
    fn test_flash_appearance() {
        let mut f = Flash::new(0.0, 0.0, 10, 24.0);
        assert_eq!(flash_appearance(&f), (0, 200));
        f.timer = 5;
        assert_eq!(flash_appearance(&f), (12, 150));
        f.timer = 10;
        assert_eq!(flash_appearance(&f), (24, 0));
    }

    #[test]
    fn test_trail_dots_fade_and_shrink() {
        let mut trail = Trail::with_capacity(10);
        for i in 0..10 {
            trail.push(i as f64, 0.0);
        }
        let points: Vec<_> = trail.points.iter().copied().collect();
        let dots = trail_dots(&points, trail.capacity, 6.0, 60);
        // newest dot first, fully sized and transparent
        assert_eq!(dots[0], TrailDot { x: 9.0, y: 0.0, alpha: 0, radius: 6 });
        assert_eq!(dots[5].alpha, 30);
        // 6 * (1 - 9/10) truncates to zero
        assert_eq!(dots.len(), 9);
    }

    #[test]
    fn test_single_point_trail_is_hidden() {
        assert!(trail_dots(&[(1.0, 1.0)], 10, 6.0, 60).is_empty());
    }

    #[test]
    fn test_glow_layers() {
        let layers = glow_layers(6.0, &VisualConfig::default());
        assert_eq!(layers, vec![(12, 10), (10, 13), (9, 20), (7, 40)]);
    }
}
