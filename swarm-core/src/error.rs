//! Errors raised at the boundary of the simulation core.
//!
//! Only construction and decoding of raw codes can fail. Coincident agents,
//! empty teams and other degenerate states inside a step are handled by the
//! force laws themselves and never surface here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwarmError {
    #[error("unknown simulation mode code {0} (expected 0..=7)")]
    InvalidMode(i64),

    #[error("unknown integrator code {0} (expected 0..=2)")]
    InvalidIntegrator(i64),

    #[error("unknown {kind} name `{name}`")]
    UnknownName {
        kind: &'static str,
        name: alloc::string::String,
    },

    #[error("agent count must be at least {min}, got {got}")]
    InvalidAgentCount { min: usize, got: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

pub type SwarmResult<T> = Result<T, SwarmError>;
