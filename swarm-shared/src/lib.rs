#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Represents a 2D position in simulation coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer-derived target for the leader, sent by the input collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetPositionUpdate {
    pub position: Position,
}

/// A request from the UI or input collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Select a behaviour by its picker code (0..=7)
    SetMode { mode: i64 },
    TogglePause,
    Pause,
    Resume,
    /// Re-seed the current mode
    Reset,
    SetTarget(TargetPositionUpdate),
}

/// A command to apply right before the given step runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledCommand {
    pub at: u64,
    pub command: ControlCommand,
}

/// Positions of one population as seen by the renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamFrame {
    /// "flock" for single-population modes, "a"/"b" for the two teams
    pub team: String,
    pub positions: Vec<Position>,
}

/// Static obstacle drawn in collision-avoidance mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObstacleFrame {
    pub center: Position,
    pub radius: f32,
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub step: u64,
    pub mode: String,
    pub running: bool,
    pub teams: Vec<TeamFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle: Option<ObstacleFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Position>,
}

impl FrameSnapshot {
    pub fn agent_count(&self) -> usize {
        self.teams.iter().map(|t| t.positions.len()).sum()
    }
}

/// Summary of a run, reported when the driver stops
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub mode: String,
    pub step: u64,
    pub running: bool,
    pub agent_count: usize,
    /// One entry per population, in the same order as `FrameSnapshot::teams`
    pub team_sizes: Vec<usize>,
}

#[cfg(feature = "std")]
impl ScheduledCommand {
    /// Parse one line of a JSON-lines command script
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_frame_agent_count() {
        let frame = FrameSnapshot {
            step: 3,
            mode: "collaborative-adversarial".into(),
            running: true,
            teams: vec![
                TeamFrame {
                    team: "a".into(),
                    positions: vec![Position::new(1.0, 1.0); 4],
                },
                TeamFrame {
                    team: "b".into(),
                    positions: vec![Position::new(-1.0, -1.0); 2],
                },
            ],
            obstacle: None,
            goal: None,
            target: None,
        };
        assert_eq!(frame.agent_count(), 6);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_parse_scheduled_commands() {
        let cmd = ScheduledCommand::from_json_line(r#"{"at": 120, "command": {"type": "set_mode", "mode": 7}}"#)
            .unwrap();
        assert_eq!(cmd.at, 120);
        assert_eq!(cmd.command, ControlCommand::SetMode { mode: 7 });

        let cmd = ScheduledCommand::from_json_line(
            r#"{"at": 5, "command": {"type": "set_target", "position": {"x": 0.5, "y": -0.25}}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd.command,
            ControlCommand::SetTarget(TargetPositionUpdate {
                position: Position::new(0.5, -0.25)
            })
        );

        let cmd = ScheduledCommand::from_json_line(r#"{"at": 0, "command": {"type": "toggle_pause"}}"#).unwrap();
        assert_eq!(cmd.command, ControlCommand::TogglePause);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_frame_skips_absent_markers() {
        let frame = FrameSnapshot {
            step: 0,
            mode: "free-fall".into(),
            running: false,
            teams: vec![],
            obstacle: None,
            goal: None,
            target: None,
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(!json.contains("obstacle"));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
