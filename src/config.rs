//! Run configuration: arena, duration and the initial particle list.

use crate::core::particle::{Particle, ParticleState};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything needed to start a simulation.
///
/// # Builder Pattern
/// ```
/// use partsim::config::SimConfig;
/// use partsim::core::ParticleState;
///
/// let config = SimConfig::new(100, 20.0)
///     .with_particle(ParticleState::new("a", 10.0, 50.0, 1.0, 0.0, 1.0))
///     .with_particle(ParticleState::new("b", 90.0, 50.0, -1.0, 0.0, 1.0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Side length of the square arena `[0, width] x [0, width]`.
    pub width: u32,
    /// Simulated time at which the run stops.
    pub duration: f64,
    /// Initial particle states, in report order.
    #[serde(default)]
    pub particles: Vec<ParticleState>,
}

impl SimConfig {
    /// An empty arena of side `width` simulated for `duration`.
    pub fn new(width: u32, duration: f64) -> Self {
        Self {
            width,
            duration,
            particles: Vec::new(),
        }
    }

    /// Append a particle.
    pub fn with_particle(mut self, particle: ParticleState) -> Self {
        self.particles.push(particle);
        self
    }

    /// Check the configuration and build the validated particle list.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for a zero width, a negative or non-finite duration, or a
    ///   particle with a non-positive radius or non-finite component
    /// - `Error::OutOfArena` when a disc crosses a wall
    /// - `Error::Overlap` when two discs overlap
    pub fn validate(&self) -> Result<Vec<Particle>> {
        if self.width == 0 {
            return Err(Error::InvalidParam("arena width must be > 0".into()));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(Error::InvalidParam(
                "duration must be finite and >= 0".into(),
            ));
        }
        let width = f64::from(self.width);
        let particles = self
            .particles
            .iter()
            .map(Particle::from_state)
            .collect::<Result<Vec<_>>>()?;

        for p in &particles {
            if !p.inside_arena(width) {
                return Err(Error::OutOfArena {
                    name: p.name.clone(),
                });
            }
        }
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                if a.overlaps(b) {
                    return Err(Error::Overlap {
                        a: a.name.clone(),
                        b: b.name.clone(),
                    });
                }
            }
        }
        Ok(particles)
    }

    /// Generate `num_particles` discs of identical `radius` at random non-overlapping
    /// positions with velocity components uniform in [-1, 1].
    ///
    /// Particles are placed with simple rejection sampling. `seed = None` draws a
    /// nondeterministic seed.
    pub fn random(
        num_particles: usize,
        width: u32,
        radius: f64,
        duration: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        let side = f64::from(width);
        if side < 2.0 * radius {
            return Err(Error::InvalidParam(
                "width must be at least 2 * radius".into(),
            ));
        }

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut config = Self::new(width, duration);
        let max_attempts = 1_000_000usize;
        for id in 0..num_particles {
            let mut attempts = 0usize;
            let (x, y) = loop {
                if attempts >= max_attempts {
                    return Err(Error::InvalidParam(format!(
                        "failed to place particle {id} without overlap; try fewer particles or smaller radius"
                    )));
                }
                attempts += 1;
                let x = rng.random_range(radius..=side - radius);
                let y = rng.random_range(radius..=side - radius);
                let min_sq = (2.0 * radius) * (2.0 * radius);
                let clear = config.particles.iter().all(|p| {
                    let (dx, dy) = (p.x - x, p.y - y);
                    dx * dx + dy * dy >= min_sq
                });
                if clear {
                    break (x, y);
                }
            };
            let vx = rng.random_range(-1.0..=1.0);
            let vy = rng.random_range(-1.0..=1.0);
            config
                .particles
                .push(ParticleState::new(format!("p{id}"), x, y, vx, vy, radius));
        }
        Ok(config)
    }
}
