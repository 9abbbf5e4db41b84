//! Proximity-based infection spread.
//!
//! Contacts are evaluated pair by pair in ascending `(i, j)` order with
//! `i < j`, where indices are spawn ordinals. A person infected earlier in the
//! pass can already infect partners that appear in later pairs, so the pair
//! order is part of the model and both enumeration strategies below produce
//! the same sequence.

use crate::spatial_hash::SpatialHash;
use contagion_data::{Health, Status};
use rand::Rng;

/// Appends every pair closer than `radius`, ordered by `(i, j)` with `i < j`.
pub fn contact_pairs(
    positions: &[(f64, f64)],
    hash: &SpatialHash,
    radius: f64,
    out: &mut Vec<(usize, usize)>,
) {
    out.clear();
    let mut candidates = Vec::new();
    for (i, &(x, y)) in positions.iter().enumerate() {
        hash.query_into(x, y, radius, &mut candidates);
        candidates.retain(|&j| {
            j > i && {
                let (ox, oy) = positions[j];
                (x - ox).hypot(y - oy) < radius
            }
        });
        candidates.sort_unstable();
        out.extend(candidates.iter().map(|&j| (i, j)));
    }
}

/// Quadratic reference enumeration of [`contact_pairs`].
pub fn contact_pairs_brute_force(positions: &[(f64, f64)], radius: f64) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let (ax, ay) = positions[i];
            let (bx, by) = positions[j];
            if (ax - bx).hypot(ay - by) < radius {
                out.push((i, j));
            }
        }
    }
    out
}

/// Attempts to infect a susceptible person.
///
/// Only `Healthy` people can catch the virus; the random draw is consumed only
/// for them. On success both timers restart.
pub fn try_infect<R: Rng + ?Sized>(health: &mut Health, chance: f64, rng: &mut R) -> bool {
    if health.status != Status::Healthy {
        return false;
    }
    if rng.gen::<f64>() < chance {
        health.status = Status::Infected;
        health.infection_timer = 0;
        health.immunity_timer = 0;
        return true;
    }
    false
}

/// Runs one infection pass over `pairs`.
///
/// Returns `(target, source)` for every new infection, in the order they
/// happened.
pub fn spread<R: Rng + ?Sized>(
    healths: &mut [Health],
    pairs: &[(usize, usize)],
    chance: f64,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let mut infected = Vec::new();
    for &(i, j) in pairs {
        if healths[i].is_infected() && healths[j].is_susceptible() {
            if try_infect(&mut healths[j], chance, rng) {
                infected.push((j, i));
            }
        } else if healths[j].is_infected()
            && healths[i].is_susceptible()
            && try_infect(&mut healths[i], chance, rng)
        {
            infected.push((i, j));
        }
    }
    infected
}
