//! Outbreak events emitted by the world each tick.

use crate::tuning::Parameter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something noteworthy that happened during a tick.
///
/// Serialised with an `event` tag so headless runs can stream JSON lines.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum OutbreakEvent {
    Infection {
        id: Uuid,
        ordinal: usize,
        source: usize,
        tick: u64,
    },
    Recovery {
        id: Uuid,
        ordinal: usize,
        immune: bool,
        tick: u64,
    },
    ImmunityWaned {
        id: Uuid,
        ordinal: usize,
        tick: u64,
    },
    /// The infected count dropped to zero after having been positive.
    Eradicated {
        tick: u64,
        total_infections: u64,
    },
    ParameterChanged {
        parameter: Parameter,
        value: f64,
        tick: u64,
    },
    /// An infection introduced by the user rather than by contact.
    PatientZero {
        id: Uuid,
        ordinal: usize,
        tick: u64,
    },
}

impl OutbreakEvent {
    pub fn tick(&self) -> u64 {
        match self {
            OutbreakEvent::Infection { tick, .. }
            | OutbreakEvent::Recovery { tick, .. }
            | OutbreakEvent::ImmunityWaned { tick, .. }
            | OutbreakEvent::Eradicated { tick, .. }
            | OutbreakEvent::ParameterChanged { tick, .. }
            | OutbreakEvent::PatientZero { tick, .. } => *tick,
        }
    }

    /// Contact infections happen constantly; everything else is rare enough
    /// to be worth surfacing individually.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            OutbreakEvent::Infection { .. }
                | OutbreakEvent::Recovery { .. }
                | OutbreakEvent::ImmunityWaned { .. }
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let ev = OutbreakEvent::Eradicated {
            tick: 900,
            total_infections: 37,
        };
        let json = ev.to_json().unwrap();
        assert!(json.contains("\"event\":\"Eradicated\""));
        assert_eq!(ev.tick(), 900);
        assert!(!ev.is_routine());
    }

    #[test]
    fn test_parameter_change_round_trips_through_json() {
        let ev = OutbreakEvent::ParameterChanged {
            parameter: Parameter::InfectionChance,
            value: 0.45,
            tick: 3,
        };
        let json = ev.to_json().unwrap();
        assert!(json.contains("infection_chance"));
        let back: OutbreakEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
