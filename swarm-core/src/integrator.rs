//! Fixed-step time integration.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::SwarmError;
use crate::vector::Vector2D;

/// Time-stepping scheme. Codes follow the order below (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Integrator {
    /// Both updates read the state at the start of the step.
    ExplicitEuler,
    /// Position first, then velocity from the acceleration at the new
    /// position.
    #[default]
    SymplecticEuler,
    /// Full step driven by the velocity and acceleration at the half step.
    ExplicitMidpoint,
}

impl Integrator {
    pub const ALL: [Integrator; 3] = [
        Integrator::ExplicitEuler,
        Integrator::SymplecticEuler,
        Integrator::ExplicitMidpoint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Integrator::ExplicitEuler => "explicit-euler",
            Integrator::SymplecticEuler => "symplectic-euler",
            Integrator::ExplicitMidpoint => "explicit-midpoint",
        }
    }

    /// Advance `agents` by one step of size `h`. `accel` maps a full agent
    /// state to one acceleration per agent.
    pub fn step<F>(self, agents: &mut [Agent], h: f32, accel: F)
    where
        F: Fn(&[Agent]) -> Vec<Vector2D>,
    {
        match self {
            Integrator::ExplicitEuler => {
                let acc = accel(agents);
                for (a, acc) in agents.iter_mut().zip(acc) {
                    a.position += a.velocity * h;
                    a.velocity += acc * h;
                }
            }
            Integrator::SymplecticEuler => {
                for a in agents.iter_mut() {
                    a.position += a.velocity * h;
                }
                let acc = accel(agents);
                for (a, acc) in agents.iter_mut().zip(acc) {
                    a.velocity += acc * h;
                }
            }
            Integrator::ExplicitMidpoint => {
                let half = h / 2.0;
                let acc = accel(agents);
                let mid: Vec<Agent> = agents
                    .iter()
                    .zip(acc)
                    .map(|(a, acc)| Agent::new(a.position + a.velocity * half, a.velocity + acc * half))
                    .collect();
                let mid_acc = accel(&mid);
                for ((a, m), acc) in agents.iter_mut().zip(&mid).zip(mid_acc) {
                    a.position += m.velocity * h;
                    a.velocity += acc * h;
                }
            }
        }
    }
}

impl TryFrom<i64> for Integrator {
    type Error = SwarmError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SwarmError::InvalidIntegrator(code))
    }
}

impl FromStr for Integrator {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i64>() {
            return Self::try_from(code);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.name() == s)
            .ok_or_else(|| SwarmError::UnknownName {
                kind: "integrator",
                name: s.into(),
            })
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const G: f32 = 9.81;

    fn gravity(agents: &[Agent]) -> Vec<Vector2D> {
        agents.iter().map(|_| Vector2D::new(0.0, G)).collect()
    }

    fn spring(agents: &[Agent]) -> Vec<Vector2D> {
        agents.iter().map(|a| -a.position).collect()
    }

    fn energy(a: &Agent) -> f32 {
        0.5 * a.velocity.dot(&a.velocity) + 0.5 * a.position.dot(&a.position)
    }

    #[test]
    fn symplectic_free_fall_matches_kinematics() {
        let h = 0.01;
        let mut agents = vec![Agent::default()];
        Integrator::SymplecticEuler.step(&mut agents, h, gravity);
        // x stays put on the first step because v0 = 0; the velocity picks up g*h.
        assert_eq!(agents[0].position, Vector2D::zero());
        assert!((agents[0].velocity.y - G * h).abs() < 1e-6);

        let mut agents = vec![Agent::default()];
        Integrator::ExplicitMidpoint.step(&mut agents, h, gravity);
        assert!((agents[0].position.y - 0.5 * G * h * h).abs() < 1e-7);
        assert!((agents[0].velocity.y - G * h).abs() < 1e-6);
    }

    #[test]
    fn explicit_euler_uses_old_velocity() {
        let h = 0.1;
        let mut agents = vec![Agent::new(Vector2D::zero(), Vector2D::new(1.0, 0.0))];
        Integrator::ExplicitEuler.step(&mut agents, h, gravity);
        assert!((agents[0].position.x - 0.1).abs() < 1e-6);
        assert_eq!(agents[0].position.y, 0.0);
        assert!((agents[0].velocity.y - G * h).abs() < 1e-6);
    }

    #[test]
    fn symplectic_orbit_energy_stays_bounded() {
        let h = 0.0005;
        let start = Agent::new(Vector2D::new(0.3, 0.0), Vector2D::new(0.0, 0.3));
        let e0 = energy(&start);
        let mut agents = vec![start];
        for _ in 0..20_000 {
            Integrator::SymplecticEuler.step(&mut agents, h, spring);
        }
        let drift = (energy(&agents[0]) - e0).abs() / e0;
        assert!(drift < 1e-2, "relative drift {drift}");
    }

    #[test]
    fn explicit_euler_gains_energy_on_orbit() {
        let h = 0.01;
        let start = Agent::new(Vector2D::new(1.0, 0.0), Vector2D::new(0.0, 1.0));
        let e0 = energy(&start);
        let mut agents = vec![start];
        for _ in 0..1_000 {
            Integrator::ExplicitEuler.step(&mut agents, h, spring);
        }
        assert!(energy(&agents[0]) > e0);
    }

    #[test]
    fn codes_and_names_parse() {
        assert_eq!(Integrator::try_from(0), Ok(Integrator::ExplicitEuler));
        assert_eq!(Integrator::try_from(2), Ok(Integrator::ExplicitMidpoint));
        assert_eq!(Integrator::try_from(3), Err(SwarmError::InvalidIntegrator(3)));
        assert_eq!("symplectic-euler".parse(), Ok(Integrator::SymplecticEuler));
        assert_eq!(Integrator::default(), Integrator::SymplecticEuler);
    }
}
