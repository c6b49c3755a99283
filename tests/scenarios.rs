use approx::assert_abs_diff_eq;
use partsim::core::{Particle, ParticleState, Phase, StepObserver};
use partsim::{Result, SimConfig, Simulation};

/// Two equal discs on a head-on course exchange their velocities along the axis.
#[test]
fn head_on_pair_swaps_velocities() -> Result<()> {
    let config = SimConfig::new(100, 20.0)
        .with_particle(ParticleState::new("left", 40.0, 50.0, 1.0, 0.0, 1.0))
        .with_particle(ParticleState::new("right", 60.0, 50.0, -1.0, 0.0, 1.0));
    let mut sim = Simulation::new(config)?;

    // Contact when the 18-unit gap closes at relative speed 2.
    sim.advance_to(9.0)?;
    assert_eq!(sim.stats().pair_collisions, 1);

    let report = sim.run_to_end()?;
    let (a, b) = (&report.particles[0], &report.particles[1]);
    assert_abs_diff_eq!(a.vx, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.vx, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.vy, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.x, 38.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.x, 62.0, epsilon = 1e-9);
    assert_eq!(report.time, 20.0);
    Ok(())
}

/// A disc launched at the left wall bounces exactly once at the contact time.
#[test]
fn single_particle_bounces_off_left_wall() -> Result<()> {
    let config = SimConfig::new(100, 20.0)
        .with_particle(ParticleState::new("solo", 10.0, 50.0, -1.0, 0.0, 1.0));
    let mut sim = Simulation::new(config)?;

    sim.advance_to(8.5)?;
    assert_eq!(sim.particles()[0].v, [-1.0, 0.0]);
    assert_eq!(sim.stats().wall_collisions, 0);

    // Edge reaches x = 0 when the center reaches x = radius = 1, i.e. at t = 9.
    sim.advance_to(9.0)?;
    assert_eq!(sim.stats().wall_collisions, 1);
    assert_eq!(sim.particles()[0].v, [1.0, 0.0]);
    assert_eq!(sim.particles()[0].last_update, 9.0);

    let report = sim.run_to_end()?;
    assert_eq!(report.stats.wall_collisions, 1);
    let p = &report.particles[0];
    assert_eq!((p.vx, p.vy), (1.0, 0.0));
    assert_abs_diff_eq!(p.x, 12.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.y, 50.0, epsilon = 1e-12);
    Ok(())
}

/// With duration 0 nothing moves and the report is the input.
#[test]
fn zero_duration_reports_initial_state() -> Result<()> {
    let initial = vec![
        ParticleState::new("a", 10.0, 10.0, 3.0, -2.0, 1.0),
        ParticleState::new("b", 20.0, 30.0, -1.0, 0.5, 2.0),
        ParticleState::new("c", 90.0, 90.0, 0.0, 0.0, 5.0),
    ];
    let config = initial
        .iter()
        .cloned()
        .fold(SimConfig::new(100, 0.0), SimConfig::with_particle);
    let mut sim = Simulation::new(config)?;
    let report = sim.run_to_end()?;

    assert_eq!(sim.phase(), Phase::Terminated);
    assert_eq!(report.width, 100);
    assert_eq!(report.duration, 0.0);
    assert_eq!(report.particles, initial);
    assert_eq!(report.stats.processed, 0);
    Ok(())
}

/// A disc touching a wall and moving into it must not be reflected in a zero-length run.
#[test]
fn zero_duration_ignores_contact_at_start() -> Result<()> {
    let initial = ParticleState::new("w", 1.0, 50.0, -1.0, 0.0, 1.0);
    let config = SimConfig::new(100, 0.0).with_particle(initial.clone());
    let report = Simulation::new(config)?.run_to_end()?;

    assert_eq!(report.particles, vec![initial]);
    assert_eq!(report.stats.processed, 0);
    assert_eq!(report.time, 0.0);
    Ok(())
}

/// Discs that start touching and closing bounce apart at once instead of passing through.
#[test]
fn touching_pair_bounces_immediately() -> Result<()> {
    let config = SimConfig::new(100, 1.0)
        .with_particle(ParticleState::new("a", 49.0, 50.0, 1.0, 0.0, 1.0))
        .with_particle(ParticleState::new("b", 51.0, 50.0, -1.0, 0.0, 1.0));
    let report = Simulation::new(config)?.run_to_end()?;

    let (a, b) = (&report.particles[0], &report.particles[1]);
    assert_eq!(report.stats.pair_collisions, 1);
    assert_abs_diff_eq!(a.x, 48.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.x, 52.0, epsilon = 1e-12);
    assert!(b.x - a.x >= 2.0);
    Ok(())
}

/// Invalid configurations fail before anything is simulated.
#[test]
fn bad_configs_fail_fast() {
    let overlapping = SimConfig::new(100, 5.0)
        .with_particle(ParticleState::new("a", 10.0, 10.0, 0.0, 0.0, 2.0))
        .with_particle(ParticleState::new("b", 12.0, 10.0, 0.0, 0.0, 2.0));
    assert!(Simulation::new(overlapping).is_err());

    let outside = SimConfig::new(100, 5.0)
        .with_particle(ParticleState::new("a", 99.5, 10.0, 0.0, 0.0, 1.0));
    assert!(Simulation::new(outside).is_err());

    let negative = SimConfig::new(100, 5.0)
        .with_particle(ParticleState::new("a", 50.0, 50.0, 0.0, 0.0, -1.0));
    assert!(Simulation::new(negative).is_err());
}

#[derive(Default)]
struct Recorder {
    times: Vec<f64>,
    deltas: f64,
    terminated_at: Option<f64>,
}

impl StepObserver for Recorder {
    fn on_event(&mut self, time: f64, delta: f64, particles: &[Particle]) {
        assert!(particles.iter().all(|p| p.last_update == time));
        self.times.push(time);
        self.deltas += delta;
    }

    fn on_terminate(&mut self, time: f64, _particles: &[Particle]) {
        self.terminated_at = Some(time);
    }
}

/// The observer sees every applied collision, in time order, with consistent snapshots.
#[test]
fn observer_sees_each_collision() -> Result<()> {
    let config = SimConfig::random(20, 60, 1.0, 30.0, Some(5))?;
    let mut sim = Simulation::new(config)?;
    let mut rec = Recorder::default();
    let report = sim.run(&mut rec)?;

    assert_eq!(rec.times.len() as u64, report.stats.processed);
    assert!(rec.times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(rec.terminated_at, Some(30.0));
    if let Some(&last) = rec.times.last() {
        assert_abs_diff_eq!(rec.deltas, last, epsilon = 1e-9);
    }
    Ok(())
}
