use crate::core::particle::Particle;
use crate::core::wall::Wall;
use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// Kinds of events scheduled by the driver.
///
/// Tie-breaking for deterministic ordering prefers `Pair` < `Boundary` < `Terminate`
/// when times are equal, so collisions due exactly at the end of the run still happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Particle-to-particle collision between particles `i` and `j`.
    Pair { i: u32, j: u32 },
    /// Particle-to-wall collision for particle `i`.
    Boundary { i: u32, wall: Wall },
    /// End of the simulated duration.
    Terminate,
}

impl EventKind {
    #[inline]
    fn order_key(&self) -> (u8, u32, u32) {
        match *self {
            EventKind::Pair { i, j } => (0, i, j),
            EventKind::Boundary { i, wall } => (1, i, wall.index()),
            EventKind::Terminate => (2, 0, 0),
        }
    }
}

/// A scheduled event in the priority queue with deterministic ordering.
///
/// - `time`: event occurrence time (finite, non-NaN).
/// - `created`: simulation time at which the event was computed.
/// - `kind`: event kind and participants.
/// - `cc_i`, `cc_j`: collision-count snapshots for invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub created: NotNan<f64>,
    pub kind: EventKind,
    pub cc_i: u64,
    pub cc_j: Option<u64>,
}

impl Event {
    /// Create a new event, validating that both times are finite.
    pub fn new(
        time: f64,
        created: f64,
        kind: EventKind,
        cc_i: u64,
        cc_j: Option<u64>,
    ) -> Result<Self> {
        Ok(Self {
            time: finite_time(time, "event time")?,
            created: finite_time(created, "creation time")?,
            kind,
            cc_i,
            cc_j,
        })
    }

    /// Particle-particle collision event with both participants' counter snapshots.
    pub fn pair(time: f64, created: f64, i: u32, j: u32, cc_i: u64, cc_j: u64) -> Result<Self> {
        Self::new(time, created, EventKind::Pair { i, j }, cc_i, Some(cc_j))
    }

    /// Particle-wall collision event.
    pub fn boundary(time: f64, created: f64, i: u32, wall: Wall, cc_i: u64) -> Result<Self> {
        Self::new(time, created, EventKind::Boundary { i, wall }, cc_i, None)
    }

    /// Sentinel marking the end of the run.
    pub fn terminate(time: f64) -> Result<Self> {
        Self::new(time, 0.0, EventKind::Terminate, 0, None)
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }

    /// Whether every participant is still in the state the event was computed from,
    /// i.e. none of them has collided since.
    pub fn is_current(&self, particles: &[Particle]) -> bool {
        let count = |i: u32| particles.get(i as usize).map(|p| p.collision_count);
        match self.kind {
            EventKind::Pair { i, j } => {
                count(i) == Some(self.cc_i) && self.cc_j.is_some() && count(j) == self.cc_j
            }
            EventKind::Boundary { i, .. } => count(i) == Some(self.cc_i),
            EventKind::Terminate => true,
        }
    }
}

fn finite_time(t: f64, what: &str) -> Result<NotNan<f64>> {
    if !t.is_finite() {
        return Err(Error::InvalidParam(format!("{what} must be finite")));
    }
    NotNan::new(t).map_err(|_| Error::InvalidParam(format!("{what} cannot be NaN")))
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.kind.order_key().cmp(&other.kind.order_key()))
            // Final tie-breaker on cc snapshots to ensure a total order.
            .then_with(|| {
                (self.cc_i, self.cc_j.unwrap_or(0)).cmp(&(other.cc_i, other.cc_j.unwrap_or(0)))
            })
            .then_with(|| self.created.cmp(&other.created))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
