//! Event-driven simulation of elastic collisions between discs in a square arena.
//!
//! State only changes at the instants when a collision can occur. Future collisions
//! are kept as time-stamped events in a binary min-heap; each particle carries a
//! collision counter, and an event whose participants have collided since it was
//! scheduled is discarded when it surfaces.
//!
//! ```
//! use partsim::config::SimConfig;
//! use partsim::core::{ParticleState, Simulation};
//!
//! # fn main() -> partsim::error::Result<()> {
//! let config = SimConfig::new(100, 10.0)
//!     .with_particle(ParticleState::new("a", 45.0, 50.0, 1.0, 0.0, 1.0))
//!     .with_particle(ParticleState::new("b", 55.0, 50.0, -1.0, 0.0, 1.0));
//! let report = Simulation::new(config)?.run_to_end()?;
//! assert_eq!(report.particles[0].vx, -1.0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod report;

pub use crate::config::SimConfig;
pub use crate::core::Simulation;
pub use crate::error::{Error, Result};
pub use crate::report::{Report, RunStats};
