use anyhow::Result;
use swarm_cli::{apply_command, frame, parse_script, status, Driver};
use swarm_core::{Simulation, SimulationMode, SimulationParameters};
use swarm_shared::{ControlCommand, FrameSnapshot, Position, TargetPositionUpdate};

fn paused_sim(n: usize) -> Simulation {
    Simulation::new(n, SimulationParameters::default(), 99).unwrap()
}

fn frames(output: &[u8]) -> Vec<FrameSnapshot> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn script_lines_are_parsed_and_ordered() -> Result<()> {
    let script = r#"
# switch to combat half way
{"at": 50, "command": {"type": "set_mode", "mode": 7}}
{"at": 0, "command": {"type": "resume"}}

{"at": 10, "command": {"type": "set_target", "position": {"x": 1.0, "y": 0.0}}}
"#;
    let commands = parse_script(script)?;
    let steps: Vec<u64> = commands.iter().map(|c| c.at).collect();
    assert_eq!(steps, vec![0, 10, 50]);
    Ok(())
}

#[test]
fn malformed_script_line_reports_its_number() {
    let err = parse_script("{\"at\": 1, \"command\": {\"type\": \"resume\"}}\nnot json").unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
}

#[test]
fn driver_emits_frames_on_schedule() -> Result<()> {
    let mut sim = paused_sim(10);
    sim.set_mode(SimulationMode::Cohesion);
    let script = parse_script(r#"{"at": 0, "command": {"type": "resume"}}"#)?;

    let mut out = Vec::new();
    let summary = Driver::new(sim, script).run(30, 10, &mut out)?;

    let frames = frames(&out);
    assert_eq!(frames.len(), 3);
    assert_eq!(frames.iter().map(|f| f.step).collect::<Vec<_>>(), vec![10, 20, 30]);
    assert!(frames.iter().all(|f| f.agent_count() == 10 && f.mode == "cohesion"));
    assert_eq!(summary.step, 30);
    assert_eq!(summary.team_sizes, vec![10]);
    Ok(())
}

#[test]
fn paused_driver_does_not_advance() -> Result<()> {
    let mut out = Vec::new();
    let summary = Driver::new(paused_sim(5), Vec::new()).run(20, 0, &mut out)?;
    assert!(out.is_empty());
    assert_eq!(summary.step, 0);
    assert!(!summary.running);
    Ok(())
}

#[test]
fn scripted_mode_switch_reshapes_frames() -> Result<()> {
    let mut sim = paused_sim(20);
    sim.resume();
    let script = parse_script(r#"{"at": 5, "command": {"type": "set_mode", "mode": 7}}"#)?;

    let mut out = Vec::new();
    let summary = Driver::new(sim, script).run(10, 5, &mut out)?;

    let frames = frames(&out);
    assert_eq!(frames[0].teams.len(), 1);
    assert_eq!(frames[1].mode, "collaborative-adversarial");
    assert_eq!(frames[1].teams.iter().map(|t| t.team.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    // Counter restarts on the mode switch.
    assert_eq!(summary.step, 5);
    Ok(())
}

#[test]
fn unknown_mode_code_is_an_error() {
    let mut sim = paused_sim(5);
    let err = apply_command(&mut sim, &ControlCommand::SetMode { mode: 12 }).unwrap_err();
    assert!(format!("{err:#}").contains("12"));
    assert_eq!(sim.mode(), SimulationMode::FreeFall);
}

#[test]
fn frames_carry_mode_specific_markers() -> Result<()> {
    let mut sim = paused_sim(8);

    sim.set_mode(SimulationMode::CollisionAvoidance);
    let f = frame(&sim.snapshot());
    assert_eq!(f.goal, Some(Position::new(-1.5, -0.5)));
    assert_eq!(f.obstacle.map(|o| o.radius), Some(0.2));
    assert!(f.target.is_none());

    sim.set_mode(SimulationMode::Leader);
    apply_command(
        &mut sim,
        &ControlCommand::SetTarget(TargetPositionUpdate {
            position: Position::new(0.25, 0.75),
        }),
    )?;
    let f = frame(&sim.snapshot());
    assert_eq!(f.target, Some(Position::new(0.25, 0.75)));
    assert!(f.obstacle.is_none());

    let s = status(&sim);
    assert_eq!(s.mode, "leader");
    assert_eq!(s.agent_count, 8);
    Ok(())
}
