//! Core data structures for the Contagion simulation.

pub mod effect;
pub mod person;
pub mod stats;
