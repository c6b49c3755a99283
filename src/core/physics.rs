//! Pure collision kernel: contact times, velocity responses and free flight.
//!
//! Every function here works on particles passed in by reference; none of them touch
//! the event queue or hold state of their own. Times returned are relative to the
//! particles' current state, the driver turns them into absolute event times.

use crate::core::particle::{Particle, DIM};
use crate::core::wall::Wall;
use crate::error::{Error, Result};

/// Minimum accepted particle-particle root; smaller roots are the collision just resolved.
pub const COLLISION_EPSILON: f64 = 1e-6;

/// Below this a quadratic coefficient or denominator counts as zero.
const EPS_DENOM: f64 = 1e-12;

/// Time until the discs `p` and `q` touch, or `f64::INFINITY` if they never do under
/// their current velocities.
///
/// Solves `|dx + dv t|^2 = (r_p + r_q)^2` picking the cancellation-free formula for
/// each root based on the sign of the linear coefficient. Roots at or below
/// [`COLLISION_EPSILON`] are dropped, except for closing discs whose entry root falls
/// there: those are in contact already and collide immediately (`0`).
pub fn collision_time(p: &Particle, q: &Particle) -> f64 {
    let mut dx = [0.0_f64; DIM];
    let mut dv = [0.0_f64; DIM];
    for k in 0..DIM {
        dx[k] = p.r[k] - q.r[k];
        dv[k] = p.v[k] - q.v[k];
    }
    let a = dot(&dv, &dv);
    if a <= EPS_DENOM {
        // No relative motion
        return f64::INFINITY;
    }
    let b = 2.0 * dot(&dv, &dx);
    let r_sum = p.radius + q.radius;
    let c = dot(&dx, &dx) - r_sum * r_sum;

    let disc = b * b - 4.0 * a * c;
    if !disc.is_finite() || disc <= 0.0 {
        return f64::INFINITY;
    }
    let s = disc.sqrt();

    let (t1, t2) = if b >= 0.0 {
        let m = -b - s;
        (m / (2.0 * a), safe_div(2.0 * c, m))
    } else {
        let m = -b + s;
        let entry = safe_div(2.0 * c, m);
        if entry <= COLLISION_EPSILON {
            return 0.0;
        }
        (entry, m / (2.0 * a))
    };

    [t1, t2]
        .into_iter()
        .filter(|t| t.is_finite() && *t > COLLISION_EPSILON)
        .fold(f64::INFINITY, f64::min)
}

/// Time until the edge of `p` reaches `wall` in an arena of side `width`.
///
/// Returns `f64::INFINITY` when the relevant velocity component is zero or points away
/// from the wall. A particle already in contact and moving into the wall gets `0`.
pub fn wall_collision_time(p: &Particle, wall: Wall, width: f64) -> f64 {
    let axis = wall.axis();
    let x = p.r[axis];
    let v = p.v[axis];
    let (distance, speed) = if wall.is_max() {
        if v <= 0.0 {
            return f64::INFINITY;
        }
        (width - p.radius - x, v)
    } else {
        if v >= 0.0 {
            return f64::INFINITY;
        }
        (x - p.radius, -v)
    };
    let t = distance.max(0.0) / speed;
    if t.is_finite() {
        t
    } else {
        f64::INFINITY
    }
}

/// Elastic response of two equal-mass discs in contact.
///
/// The relative velocity's component along the line of centers is exchanged; the
/// tangential components are untouched. Positions are not modified. Both particles'
/// `last_update` is set to `now`.
pub fn resolve_particle_collision(p: &mut Particle, q: &mut Particle, now: f64) -> Result<()> {
    let mut dx = [0.0_f64; DIM];
    let mut dv = [0.0_f64; DIM];
    for k in 0..DIM {
        dx[k] = p.r[k] - q.r[k];
        dv[k] = p.v[k] - q.v[k];
    }
    let dist_sq = dot(&dx, &dx);
    if dist_sq <= EPS_DENOM {
        return Err(Error::Math(format!(
            "coincident centers for '{}' and '{}'",
            p.name, q.name
        )));
    }
    let common = dot(&dv, &dx) / dist_sq;
    for (k, &dxk) in dx.iter().enumerate() {
        p.v[k] -= common * dxk;
        q.v[k] += common * dxk;
    }
    p.last_update = now;
    q.last_update = now;
    Ok(())
}

/// Specular reflection off `wall`: negates the velocity component normal to it.
pub fn resolve_wall_collision(p: &mut Particle, wall: Wall, now: f64) {
    let axis = wall.axis();
    p.v[axis] = -p.v[axis];
    p.last_update = now;
}

/// Free flight for `delta` time units. Boundaries are handled by wall events only.
#[inline]
pub fn advance_position(p: &mut Particle, delta: f64) {
    for k in 0..DIM {
        p.r[k] += p.v[k] * delta;
    }
}

/// Total linear momentum (unit masses).
pub fn momentum(particles: &[Particle]) -> [f64; DIM] {
    let mut m = [0.0_f64; DIM];
    for p in particles {
        for (mk, &vk) in m.iter_mut().zip(p.v.iter()) {
            *mk += vk;
        }
    }
    m
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn safe_div(num: f64, den: f64) -> f64 {
    if den.abs() <= EPS_DENOM {
        f64::INFINITY
    } else {
        num / den
    }
}
