//! Final-state report produced when a run terminates.

use crate::core::particle::ParticleState;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters accumulated by the event loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Collisions applied.
    pub processed: u64,
    /// Events discarded because a participant collided after they were scheduled.
    pub stale: u64,
    /// Particle-particle collisions applied.
    pub pair_collisions: u64,
    /// Particle-wall collisions applied.
    pub wall_collisions: u64,
}

/// Arena, duration and every particle's state, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub width: u32,
    pub duration: f64,
    /// Simulation time the states refer to; equals `duration` after a full run.
    pub time: f64,
    pub particles: Vec<ParticleState>,
    pub stats: RunStats,
}

impl Report {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Text form: the width, the duration, then one `name x y vx vy radius` line per
/// particle. Floats use their shortest round-trip representation.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.width)?;
        writeln!(f, "{:?}", self.duration)?;
        for p in &self.particles {
            if !p.name.is_empty() {
                write!(f, "{} ", p.name)?;
            }
            writeln!(
                f,
                "{:?} {:?} {:?} {:?} {:?}",
                p.x, p.y, p.vx, p.vy, p.radius
            )?;
        }
        Ok(())
    }
}
