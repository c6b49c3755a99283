//! Hook for watching the event loop, e.g. to redraw or pace playback.

use crate::core::particle::Particle;

/// Trait for observing processed events.
///
/// Called by [`Simulation::run`](crate::core::Simulation::run) between completed
/// iterations, so `particles` is always a consistent snapshot. All methods have
/// default no-op implementations.
pub trait StepObserver {
    /// Called after a collision has been applied at `time`; `delta` is the simulated
    /// time elapsed since the previous processed event.
    fn on_event(&mut self, _time: f64, _delta: f64, _particles: &[Particle]) {}

    /// Called once when the run reaches its duration.
    fn on_terminate(&mut self, _time: f64, _particles: &[Particle]) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpObserver;

impl StepObserver for NoOpObserver {}
