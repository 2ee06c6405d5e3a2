//! Tuning constants for every behaviour.
//!
//! A [`SimulationParameters`] is handed to [`crate::Simulation::new`] once and
//! stays read-only for the lifetime of the simulation. With the `serde`
//! feature every field is optional on input and falls back to [`Default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};
use crate::integrator::Integrator;
use crate::vector::Vector2D;

/// Neighbourhood radii and gains shared by the flocking laws.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockingParams {
    /// Agents within this distance (inclusive) count as neighbours.
    pub cohesion_radius: f32,
    /// Agents within this distance (inclusive) push each other apart.
    pub repel_radius: f32,
    pub cohesion_gain: f32,
    pub alignment_gain: f32,
    pub separation_gain: f32,
}

impl Default for FlockingParams {
    fn default() -> Self {
        Self {
            cohesion_radius: 0.5,
            repel_radius: 0.08,
            cohesion_gain: 10.0,
            alignment_gain: 1.0,
            separation_gain: 500.0,
        }
    }
}

/// Static circular obstacle and the shape of its repulsion field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObstacleSpec {
    pub center: Vector2D,
    pub radius: f32,
    /// How far beyond its surface an agent notices the obstacle.
    pub eyesight_range: f32,
    /// Clearance below which the singular `x^-p` term kicks in.
    pub effect_band: f32,
    pub gain: f32,
    pub repel_power: f32,
}

impl Default for ObstacleSpec {
    fn default() -> Self {
        Self {
            center: Vector2D::zero(),
            radius: 0.2,
            eyesight_range: 1.0,
            effect_band: 0.2,
            gain: 10.0,
            repel_power: 0.5,
        }
    }
}

/// Fixed goal for collision avoidance and the PD gains used by every
/// "steer toward a point" term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GoalParams {
    pub position: Vector2D,
    /// Upper bound on the magnitude of the attraction term.
    pub max_drag: f32,
    pub p_gain: f32,
    pub d_gain: f32,
}

impl Default for GoalParams {
    fn default() -> Self {
        Self {
            position: Vector2D::new(-1.5, -0.5),
            max_drag: 20.0,
            p_gain: 20.0,
            d_gain: 8.0,
        }
    }
}

/// Weights applied in leader-following mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeaderParams {
    /// Multiplier on the alignment term for followers.
    pub alignment_weight: f32,
    /// Multiplier on the separation term for followers.
    pub separation_weight: f32,
    /// Multiplier on `d_gain` when followers match the leader's velocity.
    pub follower_damping: f32,
    /// Multiplier on `d_gain` for the leader's own damping.
    pub leader_damping: f32,
}

impl Default for LeaderParams {
    fn default() -> Self {
        Self {
            alignment_weight: 0.06,
            separation_weight: 0.5,
            follower_damping: 0.3,
            leader_damping: 0.5,
        }
    }
}

/// Breed/attack thresholds and the arena boundary for the two-team mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationParams {
    /// Breeding runs on every step whose count is a multiple of this.
    pub breed_gap: u64,
    pub breed_range: f32,
    pub death_range: f32,
    /// Enemies within `death_range` needed to kill an agent.
    pub enemy_kill: usize,
    /// Overcrowding radius as a fraction of `repel_radius`.
    pub repel_death_ratio: f32,
    /// Same-team agents (self included) within the overcrowding radius
    /// needed to kill an agent.
    pub repel_num: usize,
    pub safe_edge: f32,
    pub bound_edge: f32,
    pub bound_repel_acc: f32,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            breed_gap: 1000,
            breed_range: 0.09,
            death_range: 0.15,
            enemy_kill: 3,
            repel_death_ratio: 0.6,
            repel_num: 6,
            safe_edge: 1.75,
            bound_edge: 0.1,
            bound_repel_acc: 500.0,
        }
    }
}

impl PopulationParams {
    /// Coordinate beyond which the boundary push applies, on either axis.
    pub fn containment_limit(&self) -> f32 {
        self.safe_edge - self.bound_edge
    }
}

/// Pursuit strategy of the controlled team.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrategyParams {
    /// The strategy switches off once the controlled team reaches this size.
    pub population_cap: usize,
    /// Distance from the enemy centroid treated as its "surface".
    pub standoff: f32,
    /// Clearance below which the singular repulsion from the centroid applies.
    pub band: f32,
    /// Fraction of `p_gain` used to pull toward the enemy centroid.
    pub pursuit_ratio: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            population_cap: 180,
            standoff: 0.1,
            band: 0.1,
            pursuit_ratio: 0.5,
        }
    }
}

/// Every tuning constant of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    pub step_size: f32,
    pub integrator: Integrator,
    /// Downward (+y) acceleration in free fall.
    pub gravity: f32,
    /// Smallest clearance fed to the `x^-p` repulsion terms.
    pub min_clearance: f32,
    pub flocking: FlockingParams,
    pub obstacle: ObstacleSpec,
    pub goal: GoalParams,
    pub leader: LeaderParams,
    pub population: PopulationParams,
    pub strategy: StrategyParams,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            step_size: 0.0005,
            integrator: Integrator::default(),
            gravity: 9.81,
            min_clearance: 1e-3,
            flocking: FlockingParams::default(),
            obstacle: ObstacleSpec::default(),
            goal: GoalParams::default(),
            leader: LeaderParams::default(),
            population: PopulationParams::default(),
            strategy: StrategyParams::default(),
        }
    }
}

fn non_negative(name: &'static str, value: f32) -> SwarmResult<()> {
    if !value.is_finite() {
        return Err(SwarmError::InvalidParameter {
            name,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(SwarmError::InvalidParameter {
            name,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> SwarmResult<()> {
    non_negative(name, value)?;
    if value == 0.0 {
        return Err(SwarmError::InvalidParameter {
            name,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

impl SimulationParameters {
    /// Reject parameter sets that would make a step divide by zero or
    /// produce non-finite state.
    pub fn validate(&self) -> SwarmResult<()> {
        positive("step_size", self.step_size)?;
        if !self.gravity.is_finite() {
            return Err(SwarmError::InvalidParameter {
                name: "gravity",
                reason: "must be finite",
            });
        }
        positive("min_clearance", self.min_clearance)?;

        let f = &self.flocking;
        non_negative("flocking.cohesion_radius", f.cohesion_radius)?;
        non_negative("flocking.repel_radius", f.repel_radius)?;
        non_negative("flocking.cohesion_gain", f.cohesion_gain)?;
        non_negative("flocking.alignment_gain", f.alignment_gain)?;
        non_negative("flocking.separation_gain", f.separation_gain)?;

        let o = &self.obstacle;
        if !o.center.is_finite() {
            return Err(SwarmError::InvalidParameter {
                name: "obstacle.center",
                reason: "must be finite",
            });
        }
        non_negative("obstacle.radius", o.radius)?;
        non_negative("obstacle.eyesight_range", o.eyesight_range)?;
        positive("obstacle.effect_band", o.effect_band)?;
        non_negative("obstacle.gain", o.gain)?;
        non_negative("obstacle.repel_power", o.repel_power)?;

        let g = &self.goal;
        if !g.position.is_finite() {
            return Err(SwarmError::InvalidParameter {
                name: "goal.position",
                reason: "must be finite",
            });
        }
        non_negative("goal.max_drag", g.max_drag)?;
        non_negative("goal.p_gain", g.p_gain)?;
        non_negative("goal.d_gain", g.d_gain)?;

        let l = &self.leader;
        non_negative("leader.alignment_weight", l.alignment_weight)?;
        non_negative("leader.separation_weight", l.separation_weight)?;
        non_negative("leader.follower_damping", l.follower_damping)?;
        non_negative("leader.leader_damping", l.leader_damping)?;

        let p = &self.population;
        if p.breed_gap == 0 {
            return Err(SwarmError::InvalidParameter {
                name: "population.breed_gap",
                reason: "must be greater than zero",
            });
        }
        if p.enemy_kill == 0 || p.repel_num == 0 {
            return Err(SwarmError::InvalidParameter {
                name: "population.enemy_kill/repel_num",
                reason: "a zero threshold would kill every agent",
            });
        }
        non_negative("population.breed_range", p.breed_range)?;
        non_negative("population.death_range", p.death_range)?;
        non_negative("population.repel_death_ratio", p.repel_death_ratio)?;
        positive("population.safe_edge", p.safe_edge)?;
        non_negative("population.bound_edge", p.bound_edge)?;
        non_negative("population.bound_repel_acc", p.bound_repel_acc)?;

        let s = &self.strategy;
        non_negative("strategy.standoff", s.standoff)?;
        positive("strategy.band", s.band)?;
        non_negative("strategy.pursuit_ratio", s.pursuit_ratio)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationParameters::default().validate(), Ok(()));
    }

    #[test]
    fn zero_step_size_is_rejected() {
        let params = SimulationParameters {
            step_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SwarmError::InvalidParameter { name: "step_size", .. })
        ));
    }

    #[test]
    fn zero_breed_gap_is_rejected() {
        let mut params = SimulationParameters::default();
        params.population.breed_gap = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn nan_radius_is_rejected() {
        let mut params = SimulationParameters::default();
        params.flocking.cohesion_radius = f32::NAN;
        assert!(matches!(
            params.validate(),
            Err(SwarmError::InvalidParameter {
                reason: "must be finite",
                ..
            })
        ));
    }

    #[test]
    fn containment_limit_is_inside_safe_edge() {
        let p = PopulationParams::default();
        assert!((p.containment_limit() - 1.65).abs() < 1e-6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "step_size": 0.001, "flocking": { "repel_radius": 0.05 } }"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.step_size, 0.001);
        assert_eq!(params.flocking.repel_radius, 0.05);
        assert_eq!(params.flocking.cohesion_radius, 0.5);
        assert_eq!(params.population.breed_gap, 1000);
    }
}
