//! Birth and death rules for the two-team mode.
//!
//! Both rules resize the teams in place; agent indices are not stable across
//! a call.

use alloc::vec::Vec;

use crate::agent::{Agent, AgentSet};
use crate::params::PopulationParams;

/// Agents removed from each team by one [`attack`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Casualties {
    pub team_a: usize,
    pub team_b: usize,
}

impl Casualties {
    pub fn total(&self) -> usize {
        self.team_a + self.team_b
    }
}

/// Append one child for every unordered pair of agents closer than
/// `breed_range`. Only agents present when the pass starts can be parents.
/// Returns the number of children added.
pub fn breed(team: &mut AgentSet, params: &PopulationParams) -> usize {
    let parents = team.as_slice();
    let mut children = Vec::new();
    for (i, a) in parents.iter().enumerate() {
        for b in &parents[i + 1..] {
            if a.position.distance(&b.position) < params.breed_range {
                children.push(Agent::midpoint(a, b));
            }
        }
    }
    let born = children.len();
    team.extend(children);
    born
}

/// Whether `agent` dies given its enemies and its own team (itself
/// included). Counts use strict `<`.
fn doomed(agent: &Agent, own_team: &[Agent], enemies: &[Agent], repel_radius: f32, p: &PopulationParams) -> bool {
    let within = |others: &[Agent], range: f32| {
        others
            .iter()
            .filter(|o| o.position.distance(&agent.position) < range)
            .count()
    };
    let enemy_cnt = within(enemies, p.death_range);
    let repel_cnt = within(own_team, p.repel_death_ratio * repel_radius);
    enemy_cnt >= p.enemy_kill || repel_cnt >= p.repel_num
}

fn kill_flags(team: &[Agent], enemies: &[Agent], repel_radius: f32, p: &PopulationParams) -> Vec<bool> {
    team.iter()
        .map(|agent| doomed(agent, team, enemies, repel_radius, p))
        .collect()
}

/// Remove agents overwhelmed by enemies or crushed by their own team.
///
/// Both teams are judged against the state at the start of the call, so a
/// death on one side never spares or dooms anyone on the other side in the
/// same pass.
pub fn attack(
    team_a: &mut AgentSet,
    team_b: &mut AgentSet,
    repel_radius: f32,
    params: &PopulationParams,
) -> Casualties {
    let doomed_a = kill_flags(team_a.as_slice(), team_b.as_slice(), repel_radius, params);
    let doomed_b = kill_flags(team_b.as_slice(), team_a.as_slice(), repel_radius, params);
    Casualties {
        team_a: team_a.retain_indexed(|i, _| !doomed_a[i]),
        team_b: team_b.retain_indexed(|i, _| !doomed_b[i]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;
    use alloc::vec;

    const REPEL_RADIUS: f32 = 0.08;

    fn at(x: f32, y: f32) -> Agent {
        Agent::at_rest(Vector2D::new(x, y))
    }

    #[test]
    fn close_pair_breeds_one_child_at_midpoint() {
        let p = PopulationParams::default();
        let mut team: AgentSet = vec![
            Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0)),
            Agent::new(Vector2D::new(p.breed_range - 0.001, 0.0), Vector2D::new(0.0, 1.0)),
        ]
        .into();
        assert_eq!(breed(&mut team, &p), 1);
        assert_eq!(team.len(), 3);
        let child = team.get(2).copied().unwrap();
        assert!((child.position.x - (p.breed_range - 0.001) / 2.0).abs() < 1e-6);
        assert_eq!(child.velocity, Vector2D::new(0.5, 0.5));
    }

    #[test]
    fn breed_counts_every_qualifying_pair() {
        let p = PopulationParams::default();
        let mut team: AgentSet = vec![at(0.0, 0.0), at(0.02, 0.0), at(0.04, 0.0), at(5.0, 5.0)].into();
        assert_eq!(breed(&mut team, &p), 3);
        assert_eq!(team.len(), 7);
    }

    #[test]
    fn breed_range_is_exclusive_and_empty_team_is_fine() {
        let p = PopulationParams::default();
        let mut team: AgentSet = vec![at(0.0, 0.0), at(1.0, 0.0)].into();
        assert_eq!(breed(&mut team, &p), 0);
        let mut empty = AgentSet::new();
        assert_eq!(breed(&mut empty, &p), 0);
    }

    #[test]
    fn surrounded_agent_dies() {
        let p = PopulationParams::default();
        let mut a: AgentSet = vec![at(0.0, 0.0), at(3.0, 3.0)].into();
        let mut b: AgentSet = vec![at(0.1, 0.0), at(-0.1, 0.0), at(0.0, 0.1)].into();
        let casualties = attack(&mut a, &mut b, REPEL_RADIUS, &p);
        assert_eq!(casualties.team_a, 1);
        assert_eq!(a.positions(), vec![Vector2D::new(3.0, 3.0)]);
        // Each B agent sees only one enemy.
        assert_eq!(casualties.team_b, 0);
    }

    #[test]
    fn lone_agent_survives() {
        let p = PopulationParams::default();
        let mut a: AgentSet = vec![at(0.0, 0.0)].into();
        let mut b: AgentSet = vec![at(1.0, 1.0)].into();
        assert_eq!(attack(&mut a, &mut b, REPEL_RADIUS, &p), Casualties::default());
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn overcrowding_counts_self() {
        // repel_num = 6 with self counted: five close team-mates are enough.
        let p = PopulationParams::default();
        let cluster: Vec<Agent> = (0..6).map(|i| at(i as f32 * 0.001, 0.0)).collect();
        let mut a: AgentSet = cluster.into();
        let mut b = AgentSet::new();
        let casualties = attack(&mut a, &mut b, REPEL_RADIUS, &p);
        assert_eq!(casualties.team_a, 6);
        assert!(a.is_empty());

        let mut a: AgentSet = (0..5).map(|i| at(i as f32 * 0.001, 0.0)).collect();
        assert_eq!(attack(&mut a, &mut b, REPEL_RADIUS, &p).total(), 0);
    }

    #[test]
    fn both_sides_judged_on_the_same_snapshot() {
        let p = PopulationParams::default();
        let mut a: AgentSet = vec![at(0.0, 0.0), at(0.01, 0.0), at(0.0, 0.01)].into();
        let mut b: AgentSet = vec![at(0.05, 0.0), at(0.05, 0.01), at(0.05, -0.01)].into();
        let casualties = attack(&mut a, &mut b, REPEL_RADIUS, &p);
        assert_eq!(casualties, Casualties { team_a: 3, team_b: 3 });
    }

    #[test]
    fn removal_keeps_survivor_order() {
        let p = PopulationParams::default();
        let mut a: AgentSet = vec![at(-2.0, 0.0), at(0.0, 0.0), at(2.0, 0.0)].into();
        let mut b: AgentSet = vec![at(0.05, 0.0), at(-0.05, 0.0), at(0.0, 0.05)].into();
        attack(&mut a, &mut b, REPEL_RADIUS, &p);
        assert_eq!(a.positions(), vec![Vector2D::new(-2.0, 0.0), Vector2D::new(2.0, 0.0)]);
    }
}
