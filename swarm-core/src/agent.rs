//! Agent records and the growable set that holds a population.

use alloc::vec::Vec;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::vector::Vector2D;

/// A single simulated particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    pub fn at_rest(position: Vector2D) -> Self {
        Self::new(position, Vector2D::zero())
    }

    /// Agent with position drawn uniformly from `[lo, lo + 1)` on both axes.
    pub fn random_in_unit_box<R: Rng + ?Sized>(rng: &mut R, lo: f32) -> Self {
        Self::at_rest(random_point(rng, lo))
    }

    /// The agent halfway between two parents, moving at their mean velocity.
    pub fn midpoint(a: &Agent, b: &Agent) -> Self {
        Self::new(
            (a.position + b.position) / 2.0,
            (a.velocity + b.velocity) / 2.0,
        )
    }
}

pub(crate) fn random_point<R: Rng + ?Sized>(rng: &mut R, lo: f32) -> Vector2D {
    Vector2D::new(lo + rng.gen::<f32>(), lo + rng.gen::<f32>())
}

/// Ordered collection of agents.
///
/// Indices identify agents only within a single step: [`AgentSet::push`] and
/// [`AgentSet::retain_indexed`] shift them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentSet {
    agents: Vec<Agent>,
}

impl AgentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn push(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    pub fn positions(&self) -> Vec<Vector2D> {
        self.agents.iter().map(|a| a.position).collect()
    }

    pub fn velocities(&self) -> Vec<Vector2D> {
        self.agents.iter().map(|a| a.velocity).collect()
    }

    /// Keep the agents for which `keep(index, agent)` is true, preserving the
    /// relative order of survivors. Returns how many were removed.
    pub fn retain_indexed<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &Agent) -> bool,
    {
        let before = self.agents.len();
        let mut index = 0;
        self.agents.retain(|agent| {
            let kept = keep(index, agent);
            index += 1;
            kept
        });
        before - self.agents.len()
    }
}

impl From<Vec<Agent>> for AgentSet {
    fn from(agents: Vec<Agent>) -> Self {
        Self { agents }
    }
}

impl FromIterator<Agent> for AgentSet {
    fn from_iter<I: IntoIterator<Item = Agent>>(iter: I) -> Self {
        Self {
            agents: iter.into_iter().collect(),
        }
    }
}

impl Extend<Agent> for AgentSet {
    fn extend<I: IntoIterator<Item = Agent>>(&mut self, iter: I) {
        self.agents.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AgentSet {
    type Item = &'a Agent;
    type IntoIter = core::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
