//! Simulation controller.
//!
//! [`Simulation`] owns the agent state for the active mode, the run/pause
//! flag and the step counter. The owning application calls
//! [`Simulation::step`] once per tick and reads state back through the
//! accessors, all of which return owned copies.

use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::{random_point, Agent, AgentSet};
use crate::error::{SwarmError, SwarmResult};
use crate::force::{self, ForceContext};
use crate::mode::{SimulationMode, Topology};
use crate::params::{ObstacleSpec, SimulationParameters};
use crate::population;
use crate::vector::Vector2D;

/// Smallest population a simulation can be built with; leader mode needs
/// agent 0 to exist.
pub const MIN_AGENTS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Team {
    /// The team driven by the pursuit strategy.
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Agent state in the shape the current mode needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Population {
    Single(AgentSet),
    TwoTeam { a: AgentSet, b: AgentSet },
}

impl Population {
    pub fn len(&self) -> usize {
        match self {
            Population::Single(agents) => agents.len(),
            Population::TwoTeam { a, b } => a.len() + b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn team(&self, team: Team) -> Option<&AgentSet> {
        match (self, team) {
            (Population::TwoTeam { a, .. }, Team::A) => Some(a),
            (Population::TwoTeam { b, .. }, Team::B) => Some(b),
            (Population::Single(_), _) => None,
        }
    }

    /// Every agent, Team A before Team B.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        let none: &[Agent] = &[];
        let (first, second) = match self {
            Population::Single(agents) => (agents.as_slice(), none),
            Population::TwoTeam { a, b } => (a.as_slice(), b.as_slice()),
        };
        first.iter().chain(second.iter())
    }
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub step: u64,
    pub mode: SimulationMode,
    pub run_state: RunState,
    pub population: Population,
    pub obstacle: ObstacleSpec,
    pub goal: Vector2D,
    pub target: Vector2D,
}

/// The boids simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimulationParameters,
    mode: SimulationMode,
    population: Population,
    run_state: RunState,
    step_count: u64,
    target: Vector2D,
    agent_count: usize,
    rng: SmallRng,
}

impl Simulation {
    /// Build a paused simulation of `agent_count` agents in free-fall mode.
    /// The same `seed` reproduces the same run.
    pub fn new(agent_count: usize, params: SimulationParameters, seed: u64) -> SwarmResult<Self> {
        if agent_count < MIN_AGENTS {
            return Err(SwarmError::InvalidAgentCount {
                min: MIN_AGENTS,
                got: agent_count,
            });
        }
        params.validate()?;

        let mut sim = Self {
            params,
            mode: SimulationMode::default(),
            population: Population::Single(AgentSet::new()),
            run_state: RunState::Paused,
            step_count: 0,
            target: Vector2D::zero(),
            agent_count,
            rng: SmallRng::seed_from_u64(seed),
        };
        sim.reseed();
        Ok(sim)
    }

    /// Like [`Simulation::new`] with a seed drawn from the OS.
    #[cfg(feature = "std")]
    pub fn from_entropy(agent_count: usize, params: SimulationParameters) -> SwarmResult<Self> {
        let seed = SmallRng::from_entropy().gen();
        Self::new(agent_count, params, seed)
    }

    /// Switch to `mode`, discarding all agent state and re-seeding it. Also
    /// re-seeds when `mode` is already active.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        log::debug!("switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.reseed();
    }

    /// [`Simulation::set_mode`] from a raw UI code; out-of-range codes are
    /// rejected and leave the simulation untouched.
    pub fn set_mode_code(&mut self, code: i64) -> SwarmResult<()> {
        let mode = SimulationMode::try_from(code)?;
        self.set_mode(mode);
        Ok(())
    }

    /// Re-seed the current mode.
    pub fn reset(&mut self) {
        self.set_mode(self.mode);
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        log::debug!("run state now {:?}", self.run_state);
    }

    /// Point the leader steers toward, in simulation coordinates.
    pub fn set_external_target(&mut self, point: Vector2D) {
        self.target = point;
    }

    /// Advance one tick. Does nothing while paused.
    pub fn step(&mut self) {
        if self.run_state == RunState::Paused {
            return;
        }
        self.step_count += 1;

        let params = &self.params;
        let h = params.step_size;
        let integrator = params.integrator;

        match &mut self.population {
            Population::Single(agents) => {
                let mode = self.mode;
                let ctx = ForceContext::new(params).with_target(self.target);
                integrator.step(agents.as_mut_slice(), h, |state| {
                    force::accelerations(mode, state, &ctx)
                });
            }
            Population::TwoTeam { a, b } => {
                let combat = SimulationMode::CollaborativeAdversarial;
                if self.step_count.is_multiple_of(params.population.breed_gap) {
                    let born_a = population::breed(a, &params.population);
                    let born_b = population::breed(b, &params.population);
                    log::debug!("step {}: {} born in A, {} born in B", self.step_count, born_a, born_b);
                }

                let casualties =
                    population::attack(a, b, params.flocking.repel_radius, &params.population);
                if casualties.total() > 0 {
                    log::debug!(
                        "step {}: {} lost from A, {} lost from B",
                        self.step_count,
                        casualties.team_a,
                        casualties.team_b
                    );
                }

                let ctx_a = ForceContext::new(params).with_opponents(b.as_slice());
                integrator.step(a.as_mut_slice(), h, |state| {
                    force::accelerations(combat, state, &ctx_a)
                });
                let ctx_b = ForceContext::new(params);
                integrator.step(b.as_mut_slice(), h, |state| {
                    force::accelerations(combat, state, &ctx_b)
                });

                log::trace!("step {}: A {} vs B {}", self.step_count, a.len(), b.len());
            }
        }
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Steps taken since the last mode switch or reset.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn params(&self) -> SimulationParameters {
        self.params
    }

    /// Number of agents currently alive, across both teams.
    pub fn agent_count(&self) -> usize {
        self.population.len()
    }

    /// Population size requested at construction.
    pub fn requested_agents(&self) -> usize {
        self.agent_count
    }

    /// All positions, Team A before Team B in the two-team mode.
    pub fn positions(&self) -> Vec<Vector2D> {
        self.population.agents().map(|a| a.position).collect()
    }

    /// All velocities, in the same order as [`Simulation::positions`].
    pub fn velocities(&self) -> Vec<Vector2D> {
        self.population.agents().map(|a| a.velocity).collect()
    }

    /// One team's agents; `None` outside the two-team mode.
    pub fn team(&self, team: Team) -> Option<AgentSet> {
        self.population.team(team).cloned()
    }

    pub fn population(&self) -> Population {
        self.population.clone()
    }

    pub fn obstacle(&self) -> ObstacleSpec {
        self.params.obstacle
    }

    pub fn goal(&self) -> Vector2D {
        self.params.goal.position
    }

    pub fn target(&self) -> Vector2D {
        self.target
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step_count,
            mode: self.mode,
            run_state: self.run_state,
            population: self.population.clone(),
            obstacle: self.params.obstacle,
            goal: self.params.goal.position,
            target: self.target,
        }
    }

    fn reseed(&mut self) {
        self.step_count = 0;
        let n = self.agent_count;
        let rng = &mut self.rng;
        self.population = match self.mode.topology() {
            Topology::SinglePopulation => Population::Single(seed_single(self.mode, n, rng)),
            Topology::TwoTeam => {
                let a = seed_team(n / 2, 0.5, rng);
                // Team B mirrors Team A's initial velocities.
                let b = a
                    .iter()
                    .map(|agent| Agent::new(random_point(rng, -1.5), agent.velocity))
                    .collect();
                Population::TwoTeam { a, b }
            }
        };
        log::debug!("seeded {} agents for {} mode", self.population.len(), self.mode);
    }
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vector2D {
    random_point(rng, -0.5)
}

fn seed_single<R: Rng + ?Sized>(mode: SimulationMode, n: usize, rng: &mut R) -> AgentSet {
    (0..n)
        .map(|_| match mode {
            SimulationMode::FreeFall => Agent::random_in_unit_box(rng, -0.5),
            SimulationMode::CircularMotion => {
                let position = random_point(rng, -0.5);
                Agent::new(position, Vector2D::new(-position.y, position.x))
            }
            SimulationMode::CollisionAvoidance => Agent::random_in_unit_box(rng, 0.5),
            _ => Agent::new(random_point(rng, -0.5), random_velocity(rng)),
        })
        .collect()
}

fn seed_team<R: Rng + ?Sized>(n: usize, lo: f32, rng: &mut R) -> AgentSet {
    (0..n)
        .map(|_| Agent::new(random_point(rng, lo), random_velocity(rng)))
        .collect()
}
