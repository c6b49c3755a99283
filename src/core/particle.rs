use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fixed spatial dimension (2D arena).
pub const DIM: usize = 2;

/// Plain initial/final state of one particle, as read from input and written to reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl ParticleState {
    pub fn new(name: impl Into<String>, x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            vx,
            vy,
            radius,
        }
    }
}

/// A circular particle moving in the arena.
///
/// Fields:
/// - `name`: diagnostic label from the input
/// - `r`: position vector [x, y]
/// - `v`: velocity vector [vx, vy]
/// - `radius`: disc radius (> 0), constant for the particle's lifetime
/// - `last_update`: simulation time at which position/velocity were last brought current
/// - `collision_count`: incremented each time the particle participates in a realized collision
#[derive(Debug, Clone)]
pub struct Particle {
    /// Diagnostic name.
    pub name: String,
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Disc radius (> 0).
    pub radius: f64,
    /// Time of the last update.
    pub last_update: f64,
    /// Collision participation counter (for event invalidation).
    pub collision_count: u64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is non-positive or any component is NaN/inf.
    pub fn new(name: impl Into<String>, r: [f64; DIM], v: [f64; DIM], radius: f64) -> Result<Self> {
        let name = name.into();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "radius of '{name}' must be finite and > 0"
            )));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "position of '{name}' must be finite"
            )));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "velocity of '{name}' must be finite"
            )));
        }
        Ok(Self {
            name,
            r,
            v,
            radius,
            last_update: 0.0,
            collision_count: 0,
        })
    }

    /// Build a particle from its plain state.
    pub fn from_state(state: &ParticleState) -> Result<Self> {
        Self::new(
            state.name.clone(),
            [state.x, state.y],
            [state.vx, state.vy],
            state.radius,
        )
    }

    /// Current state as a plain value.
    pub fn state(&self) -> ParticleState {
        ParticleState::new(
            self.name.clone(),
            self.r[0],
            self.r[1],
            self.v[0],
            self.v[1],
            self.radius,
        )
    }

    /// Increment the collision counter (used for event invalidation).
    #[inline]
    pub fn bump_collision_count(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
    }

    /// Kinetic energy for unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * vsq
    }

    /// Whether the disc lies entirely inside `[0, width]` on both axes.
    pub fn inside_arena(&self, width: f64) -> bool {
        self.r
            .iter()
            .all(|&c| c - self.radius >= 0.0 && c + self.radius <= width)
    }

    /// Whether this disc strictly overlaps another.
    pub fn overlaps(&self, other: &Particle) -> bool {
        let dx = self.r[0] - other.r[0];
        let dy = self.r[1] - other.r[1];
        let min = self.radius + other.radius;
        dx * dx + dy * dy < min * min
    }
}
