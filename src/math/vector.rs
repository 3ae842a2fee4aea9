//! Direction helpers on `DVec3`
//!
//! Growth directions are unit vectors sampled uniformly over the sphere
//! and filtered by their angle to a reference direction.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use crate::core::{Error, Result};

/// World up (+Y). Reference for trunk splits and branch angles.
pub const UP: DVec3 = DVec3::Y;

/// Normalize `v`, failing on a zero-length vector.
pub fn normalize(v: DVec3) -> Result<DVec3> {
    v.try_normalize().ok_or(Error::ZeroVector)
}

/// Angle between two non-zero vectors in degrees.
pub fn angle_between(a: DVec3, b: DVec3) -> f64 {
    let cos = a.dot(b) / (a.length() * b.length());
    // Rounding can push |cos| a hair past 1 for parallel vectors
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Reflect the horizontal components: `(x, y, z) -> (-x, y, -z)`.
pub fn mirror_horizontal(v: DVec3) -> DVec3 {
    DVec3::new(-v.x, v.y, -v.z)
}

/// Uniform random unit vector.
///
/// Samples `theta ~ U(0, 2pi)` and `z ~ U(-1, 1)`, then
/// `x = sqrt(1 - z^2) cos(theta)`, `y = sqrt(1 - z^2) sin(theta)`.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let theta = rng.random_range(0.0..TAU);
    let z: f64 = rng.random_range(-1.0..=1.0);
    let s = (1.0 - z * z).sqrt();
    DVec3::new(s * theta.cos(), s * theta.sin(), z)
}

/// Rejection-sample a unit vector whose angle to `reference` lies in
/// `[min_angle, max_angle]` degrees (inclusive).
///
/// With `max_attempts == None` this never gives up, so an impossible range
/// (e.g. `min_angle > max_angle`, or `max_angle < 0`) loops forever. Pass a
/// limit to get `Error::SamplingExhausted` instead.
pub fn random_vector_within_angle<R: Rng + ?Sized>(
    rng: &mut R,
    reference: DVec3,
    min_angle: f64,
    max_angle: f64,
    max_attempts: Option<u32>,
) -> Result<DVec3> {
    let mut attempts = 0u32;
    loop {
        if let Some(limit) = max_attempts {
            if attempts >= limit {
                return Err(Error::SamplingExhausted {
                    reference,
                    min_angle,
                    max_angle,
                    attempts,
                });
            }
        }
        attempts = attempts.saturating_add(1);

        let candidate = random_unit_vector(rng);
        let angle = angle_between(reference, candidate);
        if min_angle <= angle && angle <= max_angle {
            return Ok(candidate);
        }
    }
}
