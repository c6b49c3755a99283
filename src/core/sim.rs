use crate::config::SimConfig;
use crate::core::event::{Event, EventKind};
use crate::core::observer::{NoOpObserver, StepObserver};
use crate::core::particle::{Particle, DIM};
use crate::core::physics;
use crate::core::queue::EventQueue;
use crate::core::wall::Wall;
use crate::error::{Error, Result};
use crate::report::{Report, RunStats};

/// Small numeric tolerance for time checks.
const EPS_TIME: f64 = 1e-12;

/// Lifecycle of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial events are being computed.
    Seeding,
    /// Events are being processed.
    Running,
    /// The duration has been reached; no further events are processed.
    Terminated,
}

/// Result of processing one dequeued event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A collision was applied at `time`.
    Collision { time: f64, kind: EventKind },
    /// The event scheduled for `time` was superseded by an earlier collision and discarded.
    Stale { time: f64, kind: EventKind },
    /// The run reached its duration.
    Terminated,
}

/// Event-driven simulation of equal-mass discs in a square arena with reflecting walls.
///
/// Walls are the four sides of `[0, width] x [0, width]`; see [`Wall`].
/// The simulation exclusively owns its particles and its event queue.
#[derive(Debug)]
pub struct Simulation {
    time_now: f64,
    width: u32,
    duration: f64,
    particles: Vec<Particle>,
    pq: EventQueue<Event>,
    phase: Phase,
    stats: RunStats,
}

impl Simulation {
    /// Validate `config` and seed the event queue.
    ///
    /// Errors: any configuration error from [`SimConfig::validate`]; nothing is simulated
    /// when the configuration is rejected.
    pub fn new(config: SimConfig) -> Result<Self> {
        let particles = config.validate()?;
        if u32::try_from(particles.len()).is_err() {
            return Err(Error::InvalidParam("too many particles".into()));
        }
        if config.duration == 0.0 {
            log::warn!("zero-duration run: the report will equal the initial state");
        }

        let mut sim = Self {
            time_now: 0.0,
            width: config.width,
            duration: config.duration,
            particles,
            pq: EventQueue::new(),
            phase: Phase::Seeding,
            stats: RunStats::default(),
        };

        sim.schedule_initial_events()?;
        sim.phase = Phase::Running;
        Ok(sim)
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Configured end time.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Arena side length.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only snapshot of the particles, in input order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Events still queued, including superseded ones not yet discarded.
    pub fn pending_events(&self) -> usize {
        self.pq.len()
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Compute total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        physics::momentum(&self.particles)
    }

    /// Final-state report for the current time.
    pub fn report(&self) -> Report {
        Report {
            width: self.width,
            duration: self.duration,
            time: self.time_now,
            particles: self.particles.iter().map(Particle::state).collect(),
            stats: self.stats,
        }
    }

    /// Process the next event in the queue.
    ///
    /// Superseded events are discarded and reported as [`StepOutcome::Stale`]. Once the
    /// termination event (or any event past the duration) surfaces, all particles are
    /// moved to the end time and every further call returns [`StepOutcome::Terminated`].
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.phase == Phase::Terminated {
            return Ok(StepOutcome::Terminated);
        }

        let ev = self.pq.extract_min()?;
        let t_ev = ev.time_f64();

        let at_end = t_ev >= self.duration && self.time_now >= self.duration;
        if matches!(ev.kind, EventKind::Terminate) || t_ev > self.duration || at_end {
            self.finish()?;
            return Ok(StepOutcome::Terminated);
        }

        if self.time_now > t_ev || !ev.is_current(&self.particles) {
            self.stats.stale += 1;
            log::trace!("discarding stale {:?} at t={}", ev.kind, t_ev);
            return Ok(StepOutcome::Stale {
                time: t_ev,
                kind: ev.kind,
            });
        }

        self.drift_all(t_ev)?;
        self.time_now = t_ev;

        match ev.kind {
            EventKind::Pair { i, j } => {
                let (ii, jj) = (i as usize, j as usize);
                let (pi, pj) = pair_mut(&mut self.particles, ii, jj)?;
                physics::resolve_particle_collision(pi, pj, t_ev)?;
                pi.bump_collision_count();
                pj.bump_collision_count();

                self.reschedule_for_particle(ii, None)?;
                self.reschedule_for_particle(jj, Some(ii))?;
                self.stats.pair_collisions += 1;
            }
            EventKind::Boundary { i, wall } => {
                let ii = i as usize;
                self.resolve_wall(ii, wall);
                self.particles[ii].bump_collision_count();

                self.reschedule_for_particle(ii, None)?;
                self.stats.wall_collisions += 1;
            }
            EventKind::Terminate => {
                self.finish()?;
                return Ok(StepOutcome::Terminated);
            }
        }
        self.stats.processed += 1;
        log::trace!("t={} applied {:?}", t_ev, ev.kind);

        Ok(StepOutcome::Collision {
            time: t_ev,
            kind: ev.kind,
        })
    }

    /// Run until the duration is reached, notifying `observer` after every collision.
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<Report> {
        loop {
            let before = self.time_now;
            match self.step()? {
                StepOutcome::Collision { time, .. } => {
                    observer.on_event(time, time - before, &self.particles)
                }
                StepOutcome::Stale { .. } => {}
                StepOutcome::Terminated => {
                    observer.on_terminate(self.time_now, &self.particles);
                    break;
                }
            }
        }
        Ok(self.report())
    }

    /// Run to the end without observation.
    pub fn run_to_end(&mut self) -> Result<Report> {
        self.run(&mut NoOpObserver)
    }

    /// Advance the simulation to `target_time` (must be ≥ current time), processing every
    /// event due up to then. Targets beyond the duration stop at the duration.
    pub fn advance_to(&mut self, target_time: f64) -> Result<()> {
        if !target_time.is_finite() {
            return Err(Error::InvalidParam("target_time must be finite".into()));
        }
        if target_time < self.time_now - EPS_TIME {
            return Err(Error::InvalidParam(
                "target_time cannot be earlier than current time".into(),
            ));
        }

        while self.phase != Phase::Terminated {
            let due = self
                .pq
                .peek()
                .is_some_and(|next| next.time_f64() <= target_time);
            if !due {
                break;
            }
            self.step()?;
        }

        if self.phase != Phase::Terminated && target_time > self.time_now {
            let to = target_time.min(self.duration);
            self.drift_all(to)?;
            self.time_now = to;
        }
        Ok(())
    }

    // ============ Internal helpers ============

    fn schedule_initial_events(&mut self) -> Result<()> {
        // Pairs (naive, all i < j)
        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                self.schedule_pair(i, j)?;
            }
        }

        for i in 0..n {
            self.schedule_walls(i)?;
        }

        self.pq.insert(Event::terminate(self.duration)?);
        log::debug!(
            "seeded {} events for {} particles (duration {})",
            self.pq.len(),
            n,
            self.duration
        );
        Ok(())
    }

    fn reschedule_for_particle(&mut self, i: usize, skip: Option<usize>) -> Result<()> {
        self.schedule_walls(i)?;

        for j in 0..self.particles.len() {
            if j == i || Some(j) == skip {
                continue;
            }
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            self.schedule_pair(a, b)?;
        }
        Ok(())
    }

    /// Queue the collision of `a < b`, if they will ever collide.
    fn schedule_pair(&mut self, a: usize, b: usize) -> Result<()> {
        let (pa, pb) = (&self.particles[a], &self.particles[b]);
        let dt = physics::collision_time(pa, pb);
        if !dt.is_finite() {
            return Ok(());
        }
        let t_abs = self.time_now + dt;
        if !t_abs.is_finite() {
            return Ok(());
        }
        let ev = Event::pair(
            t_abs,
            self.time_now,
            a as u32,
            b as u32,
            pa.collision_count,
            pb.collision_count,
        )?;
        self.pq.insert(ev);
        Ok(())
    }

    /// Queue every finite wall contact for particle `i`.
    fn schedule_walls(&mut self, i: usize) -> Result<()> {
        let width = f64::from(self.width);
        for wall in Wall::ALL {
            let p = &self.particles[i];
            let dt = physics::wall_collision_time(p, wall, width);
            if !dt.is_finite() {
                continue;
            }
            let ev = Event::boundary(
                self.time_now + dt,
                self.time_now,
                i as u32,
                wall,
                p.collision_count,
            )?;
            self.pq.insert(ev);
        }
        Ok(())
    }

    /// Reflect particle `i` off `wall` and snap it onto the contact line.
    fn resolve_wall(&mut self, i: usize, wall: Wall) {
        let width = f64::from(self.width);
        let p = &mut self.particles[i];
        physics::resolve_wall_collision(p, wall, self.time_now);
        let axis = wall.axis();
        p.r[axis] = if wall.is_max() {
            width - p.radius
        } else {
            p.radius
        };
    }

    /// Drift all particles to the specified absolute time by linear motion.
    fn drift_all(&mut self, to_time: f64) -> Result<()> {
        if to_time < self.time_now - EPS_TIME {
            return Err(Error::InvalidParam("cannot drift backwards in time".into()));
        }
        let dt = to_time - self.time_now;
        for p in &mut self.particles {
            if dt > 0.0 {
                physics::advance_position(p, dt);
            }
            p.last_update = to_time;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.drift_all(self.duration)?;
        self.time_now = self.duration;
        self.phase = Phase::Terminated;
        log::debug!(
            "terminated at t={}: {} collisions ({} pair, {} wall), {} stale events discarded, {} left queued",
            self.time_now,
            self.stats.processed,
            self.stats.pair_collisions,
            self.stats.wall_collisions,
            self.stats.stale,
            self.pq.len()
        );
        Ok(())
    }
}

/// Two distinct mutable particles out of one slice.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> Result<(&mut Particle, &mut Particle)> {
    if i == j || i.max(j) >= particles.len() {
        return Err(Error::InvalidParam(format!(
            "invalid particle pair ({i}, {j})"
        )));
    }
    if i < j {
        let (lo, hi) = particles.split_at_mut(j);
        Ok((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = particles.split_at_mut(i);
        Ok((&mut hi[0], &mut lo[j]))
    }
}
