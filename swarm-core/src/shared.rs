//! Lock-protected handle for hosts that step and render on different threads.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::controller::{Simulation, Snapshot};
use crate::mode::SimulationMode;
use crate::vector::Vector2D;

/// Cloneable handle to one [`Simulation`] behind a single mutex. Each call
/// holds the lock for its whole duration, so a snapshot never observes a
/// half-finished step.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    pub fn new(sim: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sim)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Simulation> {
        // A panic mid-step leaves plain numeric state behind; keep serving it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn step(&self) {
        self.lock().step();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn set_mode(&self, mode: SimulationMode) {
        self.lock().set_mode(mode);
    }

    pub fn toggle_pause(&self) {
        self.lock().toggle_pause();
    }

    pub fn set_external_target(&self, point: Vector2D) {
        self.lock().set_external_target(point);
    }

    /// Run `f` with exclusive access, for anything the wrappers above miss.
    pub fn with<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut self.lock())
    }
}
