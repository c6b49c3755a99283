//! Event-driven collision engine.
//!
//! Leaves first: the pure physics kernel ([`physics`], [`particle`], [`wall`]), the
//! event type and its priority queue ([`event`], [`queue`]), and the driver that owns
//! all state and runs the loop ([`sim`]).

pub mod event;
pub mod observer;
pub mod particle;
pub mod physics;
pub mod queue;
pub mod sim;
pub mod wall;

pub use event::{Event, EventKind};
pub use observer::{NoOpObserver, StepObserver};
pub use particle::{Particle, ParticleState};
pub use queue::EventQueue;
pub use sim::{Phase, Simulation, StepOutcome};
pub use wall::Wall;
