//! Headless driver pieces shared by the `swarm-cli` binary and its tests.
//!
//! The driver stands in for the windowing loop: it applies scripted UI and
//! pointer commands at their scheduled step, advances the simulation once
//! per tick and writes renderer frames as JSON lines.

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use swarm_core::{Population, Simulation, SimulationParameters, Snapshot, Vector2D};
use swarm_shared::{
    ControlCommand, FrameSnapshot, ObstacleFrame, Position, ScheduledCommand, StatusResponse,
    TeamFrame,
};

fn to_position(v: Vector2D) -> Position {
    Position::new(v.x, v.y)
}

/// Read parameters from a JSON file; absent fields keep their defaults.
pub fn load_params(path: &Path) -> Result<SimulationParameters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file {}", path.display()))?;
    let params: SimulationParameters = serde_json::from_str(&text)
        .with_context(|| format!("Invalid parameter file {}", path.display()))?;
    params.validate().context("Parameter file rejected")?;
    Ok(params)
}

/// Parse a JSON-lines command script. Blank lines and lines starting with
/// `#` are skipped. The result is ordered by step.
pub fn parse_script(text: &str) -> Result<Vec<ScheduledCommand>> {
    let mut commands = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd = ScheduledCommand::from_json_line(line)
            .with_context(|| format!("Bad command on script line {}", n + 1))?;
        commands.push(cmd);
    }
    commands.sort_by_key(|c| c.at);
    Ok(commands)
}

pub fn load_script(path: &Path) -> Result<Vec<ScheduledCommand>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read command script {}", path.display()))?;
    parse_script(&text)
}

/// Forward one collaborator command to the simulation.
pub fn apply_command(sim: &mut Simulation, command: &ControlCommand) -> Result<()> {
    match command {
        ControlCommand::SetMode { mode } => sim
            .set_mode_code(*mode)
            .context("UI sent an unknown mode")?,
        ControlCommand::TogglePause => sim.toggle_pause(),
        ControlCommand::Pause => sim.pause(),
        ControlCommand::Resume => sim.resume(),
        ControlCommand::Reset => sim.reset(),
        ControlCommand::SetTarget(update) => {
            let p = update.position;
            sim.set_external_target(Vector2D::new(p.x, p.y));
            log::debug!("leader target: ({}, {})", p.x, p.y);
        }
    }
    Ok(())
}

/// Renderer view of a snapshot. Obstacle and goal markers are only present
/// in collision-avoidance mode, the target only in leader mode.
pub fn frame(snapshot: &Snapshot) -> FrameSnapshot {
    use swarm_core::SimulationMode;

    let team = |name: &str, agents: &swarm_core::AgentSet| TeamFrame {
        team: name.to_string(),
        positions: agents.iter().map(|a| to_position(a.position)).collect(),
    };
    let teams = match &snapshot.population {
        Population::Single(agents) => vec![team("flock", agents)],
        Population::TwoTeam { a, b } => vec![team("a", a), team("b", b)],
    };

    let avoiding = snapshot.mode == SimulationMode::CollisionAvoidance;
    FrameSnapshot {
        step: snapshot.step,
        mode: snapshot.mode.name().to_string(),
        running: snapshot.run_state == swarm_core::RunState::Running,
        teams,
        obstacle: avoiding.then(|| ObstacleFrame {
            center: to_position(snapshot.obstacle.center),
            radius: snapshot.obstacle.radius,
        }),
        goal: avoiding.then(|| to_position(snapshot.goal)),
        target: (snapshot.mode == SimulationMode::Leader).then(|| to_position(snapshot.target)),
    }
}

pub fn status(sim: &Simulation) -> StatusResponse {
    let population = sim.population();
    let team_sizes = match &population {
        Population::Single(agents) => vec![agents.len()],
        Population::TwoTeam { a, b } => vec![a.len(), b.len()],
    };
    StatusResponse {
        mode: sim.mode().name().to_string(),
        step: sim.step_count(),
        running: sim.is_running(),
        agent_count: population.len(),
        team_sizes,
    }
}

/// Fixed-rate caller: one [`Simulation::step`] per tick.
pub struct Driver {
    sim: Simulation,
    script: VecDeque<ScheduledCommand>,
}

impl Driver {
    pub fn new(sim: Simulation, script: Vec<ScheduledCommand>) -> Self {
        Self {
            sim,
            script: script.into(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Run `ticks` ticks, writing a frame every `every` ticks (never when
    /// `every` is 0). Commands scheduled at tick `t` apply before tick `t`
    /// runs.
    pub fn run<W: Write>(&mut self, ticks: u64, every: u64, out: &mut W) -> Result<StatusResponse> {
        for tick in 0..ticks {
            while self.script.front().is_some_and(|c| c.at <= tick) {
                if let Some(scheduled) = self.script.pop_front() {
                    log::info!("tick {}: {:?}", tick, scheduled.command);
                    apply_command(&mut self.sim, &scheduled.command)?;
                }
            }

            self.sim.step();

            if every > 0 && (tick + 1).is_multiple_of(every) {
                let frame = frame(&self.sim.snapshot());
                serde_json::to_writer(&mut *out, &frame).context("Failed to write frame")?;
                writeln!(out)?;
            }
        }

        if !self.script.is_empty() {
            log::warn!("{} scripted commands scheduled past the last tick were skipped", self.script.len());
        }
        Ok(status(&self.sim))
    }
}
