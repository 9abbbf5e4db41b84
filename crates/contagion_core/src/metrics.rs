//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and tick accounting for monitoring
//! simulation performance and the course of the outbreak.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Metrics collector owned by the world.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    infected: AtomicU64,
    slowest_tick_us: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    report_every: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every 1000 ticks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_report_interval(1000)
    }

    /// Creates a collector that logs a summary every `report_every` ticks.
    /// Zero disables the periodic summary.
    #[must_use]
    pub fn with_report_interval(report_every: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            infected: AtomicU64::new(0),
            slowest_tick_us: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            report_every,
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, population: usize, infected: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(population as u64, Ordering::Relaxed);
        self.infected.store(infected as u64, Ordering::Relaxed);
        self.slowest_tick_us
            .fetch_max(duration.as_micros() as u64, Ordering::Relaxed);

        if self.report_every > 0 && tick.is_multiple_of(self.report_every) {
            tracing::info!(
                tick = tick,
                population = population,
                infected = infected,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Increments a named counter by `amount`.
    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn infected(&self) -> u64 {
        self.infected.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    /// Longest tick seen so far.
    #[must_use]
    pub fn slowest_tick(&self) -> Duration {
        Duration::from_micros(self.slowest_tick_us.load(Ordering::Relaxed))
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initializes a stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

/// Initializes a tracing subscriber that appends to the file at `path`.
///
/// Used while the terminal UI owns the screen.
pub fn init_file_logging<P: AsRef<Path>>(path: P, default_filter: &str) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.slowest_tick(), Duration::ZERO);
    }

    #[test]
    fn test_record_tick() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_millis(2), 150, 4);
        metrics.record_tick(Duration::from_millis(1), 150, 6);
        assert_eq!(metrics.tick_count(), 2);
        assert_eq!(metrics.population(), 150);
        assert_eq!(metrics.infected(), 6);
        assert_eq!(metrics.slowest_tick(), Duration::from_millis(2));
    }

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.add_to_counter("infections", 1);
        metrics.add_to_counter("infections", 3);
        metrics.add_to_counter("recoveries", 0);
        assert_eq!(metrics.counter("infections"), 4);
        assert_eq!(metrics.counter("recoveries"), 0);
    }
}
