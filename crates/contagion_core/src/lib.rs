//! # Contagion Core
//!
//! The simulation engine for Contagion - an interactive SIRS epidemic
//! simulation of people drifting around a walled rectangle.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Wall-bounded movement with motion trails
//! - Infection, recovery and waning immunity timers
//! - Proximity-based spread with a tunable infection chance
//! - Live-adjustable parameters with stepped, clamped controls
//! - Spatial indexing for contact queries
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! - **Component-based people**: Identity, Physics, Health and Trail components
//! - **System-based updates**: movement, health, infection, effects, stats
//! - **Deterministic simulation**: seeded RNG and a fixed ordinal iteration
//!   order give reproducible outbreaks
//!
//! ## Example
//!
//! ```
//! use contagion_core::tuning::{Parameter, Step, Tunables};
//!
//! let mut tunables = Tunables::default();
//! let chance = tunables.adjust(Parameter::InfectionChance, Step::Decrease);
//! assert_eq!(chance, 0.45);
//! assert_eq!(Parameter::InfectionChance.format_value(chance), "0.45");
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types
pub mod error;
/// Outbreak events for logs and the UI
pub mod history;
/// Performance metrics collection and logging
pub mod metrics;
/// Colours shared by every renderer
pub mod palette;
/// Render-facing world snapshots
pub mod snapshot;
/// Spatial hashing for contact queries
pub mod spatial_hash;
/// Per-tick simulation systems
pub mod systems;
/// Live-adjustable disease parameters
pub mod tuning;

pub use error::{Result, SimError};
pub use metrics::{init_file_logging, init_logging, Metrics};
pub use tuning::{Parameter, Step, Tunables};
