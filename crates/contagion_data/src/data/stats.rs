use crate::data::person::Status;
use serde::{Deserialize, Serialize};

/// Aggregate counts of the population for one tick.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub healthy: usize,
    pub infected: usize,
    pub recovered: usize,
    /// Infections since the world was created, seeded cases included.
    pub total_infections: u64,
    pub peak_infected: usize,
    pub peak_tick: u64,
}

impl PopulationStats {
    pub fn population(&self) -> usize {
        self.healthy + self.infected + self.recovered
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Healthy => self.healthy,
            Status::Infected => self.infected,
            Status::Recovered => self.recovered,
        }
    }

    /// Share of the population currently infected, in `[0, 1]`.
    pub fn prevalence(&self) -> f64 {
        let total = self.population();
        if total == 0 {
            0.0
        } else {
            self.infected as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevalence_of_empty_population_is_zero() {
        assert_eq!(PopulationStats::default().prevalence(), 0.0);
    }

    #[test]
    fn test_counts_by_status() {
        let stats = PopulationStats {
            healthy: 3,
            infected: 1,
            recovered: 4,
            ..Default::default()
        };
        assert_eq!(stats.population(), 8);
        assert_eq!(stats.count(Status::Recovered), 4);
        assert!((stats.prevalence() - 0.125).abs() < f64::EPSILON);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"infected\":1"));
    }
}
