use contagion_data::{PopulationStats, Status};

/// Recounts statuses and updates the running peak.
///
/// `new_infections` is added to the cumulative total. The peak tick only moves
/// when the infected count strictly exceeds the previous peak.
pub fn update_population_stats<I>(
    stats: &mut PopulationStats,
    statuses: I,
    new_infections: u64,
    tick: u64,
) where
    I: IntoIterator<Item = Status>,
{
    stats.healthy = 0;
    stats.infected = 0;
    stats.recovered = 0;
    for status in statuses {
        match status {
            Status::Healthy => stats.healthy += 1,
            Status::Infected => stats.infected += 1,
            Status::Recovered => stats.recovered += 1,
        }
    }
    stats.total_infections += new_infections;
    if stats.infected > stats.peak_infected {
        stats.peak_infected = stats.infected;
        stats.peak_tick = tick;
    }
}
