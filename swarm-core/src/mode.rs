//! Behaviour modes and the population shape each one runs on.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SwarmError;

/// Force law selected by the UI. Codes 0..=7 match the order of the
/// behaviour picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SimulationMode {
    #[default]
    FreeFall,
    CircularMotion,
    Cohesion,
    Alignment,
    Separation,
    CollisionAvoidance,
    Leader,
    CollaborativeAdversarial,
}

/// Shape of the agent state a mode runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    SinglePopulation,
    TwoTeam,
}

impl SimulationMode {
    pub const ALL: [SimulationMode; 8] = [
        SimulationMode::FreeFall,
        SimulationMode::CircularMotion,
        SimulationMode::Cohesion,
        SimulationMode::Alignment,
        SimulationMode::Separation,
        SimulationMode::CollisionAvoidance,
        SimulationMode::Leader,
        SimulationMode::CollaborativeAdversarial,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            SimulationMode::FreeFall => "free-fall",
            SimulationMode::CircularMotion => "circular-motion",
            SimulationMode::Cohesion => "cohesion",
            SimulationMode::Alignment => "alignment",
            SimulationMode::Separation => "separation",
            SimulationMode::CollisionAvoidance => "collision-avoidance",
            SimulationMode::Leader => "leader",
            SimulationMode::CollaborativeAdversarial => "collaborative-adversarial",
        }
    }

    pub fn topology(self) -> Topology {
        match self {
            SimulationMode::CollaborativeAdversarial => Topology::TwoTeam,
            _ => Topology::SinglePopulation,
        }
    }
}

impl TryFrom<i64> for SimulationMode {
    type Error = SwarmError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SwarmError::InvalidMode(code))
    }
}

impl FromStr for SimulationMode {
    type Err = SwarmError;

    /// Accepts either the kebab-case name or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i64>() {
            return Self::try_from(code);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| SwarmError::UnknownName {
                kind: "mode",
                name: s.into(),
            })
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() {
        for (i, mode) in SimulationMode::ALL.iter().enumerate() {
            assert_eq!(mode.code() as usize, i);
            assert_eq!(SimulationMode::try_from(i as i64), Ok(*mode));
        }
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(SimulationMode::try_from(8), Err(SwarmError::InvalidMode(8)));
        assert_eq!(SimulationMode::try_from(-1), Err(SwarmError::InvalidMode(-1)));
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("leader".parse(), Ok(SimulationMode::Leader));
        assert_eq!("7".parse(), Ok(SimulationMode::CollaborativeAdversarial));
        assert!("flocking".parse::<SimulationMode>().is_err());
    }

    #[test]
    fn only_combat_runs_two_teams() {
        for mode in SimulationMode::ALL {
            let expected = if mode == SimulationMode::CollaborativeAdversarial {
                Topology::TwoTeam
            } else {
                Topology::SinglePopulation
            };
            assert_eq!(mode.topology(), expected);
        }
    }
}
