#![cfg_attr(not(feature = "std"), no_std)]

//! Two-dimensional boids simulation core.
//!
//! A [`Simulation`] owns one population (or two competing teams), advances it
//! with one of three [`Integrator`]s under the force law selected by
//! [`SimulationMode`], and in the two-team mode grows and shrinks the teams
//! with the rules in [`population`]. Windowing, rendering and input handling
//! live outside this crate; they talk to it through [`Simulation`]'s methods
//! and [`Snapshot`].
//!
//! ```
//! use swarm_core::{Simulation, SimulationMode, SimulationParameters};
//!
//! let mut sim = Simulation::new(40, SimulationParameters::default(), 7).unwrap();
//! sim.set_mode(SimulationMode::Cohesion);
//! sim.resume();
//! sim.step();
//! assert_eq!(sim.positions().len(), 40);
//! ```

extern crate alloc;

pub mod agent;
pub mod controller;
pub mod error;
pub mod force;
pub mod integrator;
pub mod mode;
pub mod params;
pub mod population;
#[cfg(feature = "std")]
pub mod shared;
pub mod vector;

pub use agent::{Agent, AgentSet};
pub use controller::{Population, RunState, Simulation, Snapshot, Team};
pub use error::{SwarmError, SwarmResult};
pub use force::ForceContext;
pub use integrator::Integrator;
pub use mode::{SimulationMode, Topology};
pub use params::{
    FlockingParams, GoalParams, LeaderParams, ObstacleSpec, PopulationParams,
    SimulationParameters, StrategyParams,
};
pub use population::Casualties;
#[cfg(feature = "std")]
pub use shared::SharedSimulation;
pub use vector::Vector2D;
