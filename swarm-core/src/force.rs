//! Force laws.
//!
//! [`accelerations`] is a pure function of the agents' state, the mode and a
//! [`ForceContext`]; it returns one acceleration per agent, in agent order,
//! and never mutates anything. All neighbour tests are Euclidean and
//! inclusive (`<=`). A zero-length displacement contributes zero force.

use alloc::vec::Vec;

use crate::agent::Agent;
use crate::mode::SimulationMode;
use crate::params::{GoalParams, SimulationParameters};
use crate::vector::{powf, Vector2D};

/// Everything besides the agents themselves that a force law may read.
#[derive(Debug, Clone, Copy)]
pub struct ForceContext<'a> {
    pub params: &'a SimulationParameters,
    /// Externally supplied point the leader steers toward.
    pub target: Vector2D,
    /// Opposing team, set only for the controlled team in the two-team mode.
    pub opponents: Option<&'a [Agent]>,
}

impl<'a> ForceContext<'a> {
    pub fn new(params: &'a SimulationParameters) -> Self {
        Self {
            params,
            target: Vector2D::zero(),
            opponents: None,
        }
    }

    pub fn with_target(mut self, target: Vector2D) -> Self {
        self.target = target;
        self
    }

    pub fn with_opponents(mut self, opponents: &'a [Agent]) -> Self {
        self.opponents = Some(opponents);
        self
    }
}

/// Compute the acceleration of every agent under `mode`.
pub fn accelerations(mode: SimulationMode, agents: &[Agent], ctx: &ForceContext<'_>) -> Vec<Vector2D> {
    let p = ctx.params;
    match mode {
        SimulationMode::FreeFall => agents.iter().map(|_| free_fall(p)).collect(),
        SimulationMode::CircularMotion => agents.iter().map(|a| -a.position).collect(),
        SimulationMode::Cohesion => per_agent(agents, |i| flocking(i, agents, p, FlockWeights::COHESION)),
        SimulationMode::Alignment => per_agent(agents, |i| flocking(i, agents, p, FlockWeights::ALIGNMENT)),
        SimulationMode::Separation => per_agent(agents, |i| flocking(i, agents, p, FlockWeights::SEPARATION)),
        SimulationMode::CollisionAvoidance => per_agent(agents, |i| collision_avoidance(i, agents, p)),
        SimulationMode::Leader => per_agent(agents, |i| leader_follow(i, agents, ctx)),
        SimulationMode::CollaborativeAdversarial => per_agent(agents, |i| team_combat(i, agents, ctx)),
    }
}

fn per_agent<F>(agents: &[Agent], f: F) -> Vec<Vector2D>
where
    F: Fn(usize) -> Vector2D,
{
    (0..agents.len()).map(f).collect()
}

fn free_fall(p: &SimulationParameters) -> Vector2D {
    Vector2D::new(0.0, p.gravity)
}

/// Multipliers on the cohesion, alignment and separation gains.
#[derive(Debug, Clone, Copy)]
struct FlockWeights {
    cohesion: f32,
    alignment: f32,
    separation: f32,
}

impl FlockWeights {
    const COHESION: Self = Self {
        cohesion: 1.0,
        alignment: 0.0,
        separation: 0.0,
    };
    const ALIGNMENT: Self = Self {
        cohesion: 1.0,
        alignment: 1.0,
        separation: 0.0,
    };
    const SEPARATION: Self = Self {
        cohesion: 1.0,
        alignment: 1.0,
        separation: 1.0,
    };
}

/// Cohesion toward the neighbour centroid, alignment with the neighbour mean
/// velocity, and summed short-range repulsion, each scaled by `w`.
fn flocking(i: usize, agents: &[Agent], p: &SimulationParameters, w: FlockWeights) -> Vector2D {
    let f = &p.flocking;
    let me = &agents[i];

    let mut pos_sum = Vector2D::zero();
    let mut vel_sum = Vector2D::zero();
    let mut repel_sum = Vector2D::zero();
    let mut neighbors = 0usize;

    for (j, other) in agents.iter().enumerate() {
        if j == i {
            continue;
        }
        let offset = me.position - other.position;
        let d = offset.magnitude();
        if d <= f.cohesion_radius {
            pos_sum += other.position;
            vel_sum += other.velocity;
            neighbors += 1;
        }
        if d <= f.repel_radius {
            repel_sum += offset;
        }
    }

    let mut acc = repel_sum * (f.separation_gain * w.separation);
    if neighbors > 0 {
        let n = neighbors as f32;
        acc += (pos_sum / n - me.position) * (f.cohesion_gain * w.cohesion);
        acc += (vel_sum / n - me.velocity) * (f.alignment_gain * w.alignment);
    }
    acc
}

/// Pull from `from` toward `to`, proportional to distance and capped at
/// `max_drag`.
fn capped_attraction(from: Vector2D, to: Vector2D, goal: &GoalParams) -> Vector2D {
    let offset = to - from;
    let drag = (goal.p_gain * offset.magnitude()).min(goal.max_drag);
    offset.normalize() * drag
}

/// `gain * x^-power` pointing along `offset`, where `x` is the clearance
/// beyond `surface`. Zero once the clearance reaches `band`.
fn singular_repulsion(
    offset: Vector2D,
    surface: f32,
    band: f32,
    gain: f32,
    power: f32,
    min_clearance: f32,
) -> Vector2D {
    let clearance = offset.magnitude() - surface;
    if clearance < band {
        offset.normalize() * (gain * powf(clearance.max(min_clearance), -power))
    } else {
        Vector2D::zero()
    }
}

fn obstacle_repulsion(position: Vector2D, p: &SimulationParameters) -> Vector2D {
    let o = &p.obstacle;
    let offset = position - o.center;
    if offset.magnitude() > o.radius + o.eyesight_range {
        return Vector2D::zero();
    }
    let close = singular_repulsion(
        offset,
        o.radius,
        o.effect_band,
        o.gain,
        o.repel_power,
        p.min_clearance,
    );
    let band = offset.normalize() * (o.gain * powf(o.effect_band, -o.repel_power));
    close + band
}

fn collision_avoidance(i: usize, agents: &[Agent], p: &SimulationParameters) -> Vector2D {
    let me = &agents[i];
    flocking(i, agents, p, FlockWeights::SEPARATION)
        + obstacle_repulsion(me.position, p)
        + capped_attraction(me.position, p.goal.position, &p.goal)
        - me.velocity * p.goal.d_gain
}

/// Agent 0 chases the external target; everyone else flocks loosely and
/// chases agent 0.
fn leader_follow(i: usize, agents: &[Agent], ctx: &ForceContext<'_>) -> Vector2D {
    let p = ctx.params;
    let me = &agents[i];
    let leader = &agents[0];

    if i == 0 {
        return capped_attraction(me.position, ctx.target, &p.goal)
            - me.velocity * (p.leader.leader_damping * p.goal.d_gain);
    }

    let weights = FlockWeights {
        cohesion: 1.0,
        alignment: p.leader.alignment_weight,
        separation: p.leader.separation_weight,
    };
    flocking(i, agents, p, weights)
        + capped_attraction(me.position, leader.position, &p.goal)
        + (leader.velocity - me.velocity) * (p.leader.follower_damping * p.goal.d_gain)
}

/// Per-axis constant push back toward the arena once an agent crosses the
/// containment limit.
fn containment(position: Vector2D, p: &SimulationParameters) -> Vector2D {
    let limit = p.population.containment_limit();
    let push = p.population.bound_repel_acc;
    let axis = |v: f32| {
        if v > limit {
            -push
        } else if v < -limit {
            push
        } else {
            0.0
        }
    };
    Vector2D::new(axis(position.x), axis(position.y))
}

fn team_combat(i: usize, agents: &[Agent], ctx: &ForceContext<'_>) -> Vector2D {
    let p = ctx.params;
    let me = &agents[i];
    let mut acc = flocking(i, agents, p, FlockWeights::SEPARATION) + containment(me.position, p);

    if let Some(enemies) = ctx.opponents {
        acc += pursuit(i, agents, enemies, p);
    }
    acc
}

/// Strategy of the controlled team: even-indexed agents close in on the
/// enemy centroid while their own team is below the population cap, backing
/// off sharply when they get within the standoff band.
fn pursuit(i: usize, team: &[Agent], enemies: &[Agent], p: &SimulationParameters) -> Vector2D {
    let s = &p.strategy;
    if !i.is_multiple_of(2) || team.len() >= s.population_cap {
        return Vector2D::zero();
    }
    let Some(target) = Vector2D::centroid(enemies.iter().map(|e| e.position)) else {
        return Vector2D::zero();
    };

    let me = &team[i];
    let offset = me.position - target;
    let repel = singular_repulsion(
        offset,
        s.standoff,
        s.band,
        p.obstacle.gain,
        p.obstacle.repel_power,
        p.min_clearance,
    );
    let drag = p.goal.p_gain * offset.magnitude() * s.pursuit_ratio;
    repel + (-offset).normalize() * drag - me.velocity * p.goal.d_gain
}
