//! Per-tick simulation systems.
//!
//! Each system is a set of free functions over plain components so the world
//! can run them in a fixed order and tests can drive them in isolation.

pub mod effects;
pub mod health;
pub mod infection;
pub mod movement;
pub mod stats;
