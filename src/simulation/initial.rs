//! Initial condition generator
//!
//! Builds a bound, rotating, roughly spherical cluster:
//! - radii from a Rayleigh distribution, directions uniform on the sphere,
//! - circular-orbit speed perpendicular to the radius vector, using the
//!   total body count as the enclosed mass,
//! - Gaussian noise on every velocity component,
//! - unit masses.
//!
//! The RNG is seeded once and draws happen in a fixed order: all radii,
//! all azimuths, all polar samples, then the velocity noise body by body
//! (x, y, z). Same seed, same N, same crate versions give bit-identical output.

use std::f64::consts::TAU;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};
use crate::simulation::states::{NVec3, Population};

/// Below this, `p x z` is treated as degenerate and `p x y` is used instead
const PERP_TOLERANCE: f64 = 1e-8;

/// Shape of the generated cluster
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    pub radial_scale: f64, // Rayleigh scale for radii
    pub circular_factor: f64, // multiplier on sqrt(G N / r)
    pub velocity_noise: f64, // std dev of per-component noise
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            radial_scale: 1.0,
            circular_factor: 0.5,
            velocity_noise: 0.1,
        }
    }
}

impl Generator {
    pub fn validate(&self) -> Result<()> {
        if !self.radial_scale.is_finite() || self.radial_scale <= 0.0 {
            return Err(Error::InvalidConfig("radial_scale must be finite and > 0".into()));
        }
        if !self.circular_factor.is_finite() || self.circular_factor < 0.0 {
            return Err(Error::InvalidConfig("circular_factor must be finite and >= 0".into()));
        }
        if !self.velocity_noise.is_finite() || self.velocity_noise < 0.0 {
            return Err(Error::InvalidConfig("velocity_noise must be finite and >= 0".into()));
        }
        Ok(())
    }

    /// Generate `n` bodies from `seed`. `n == 0` gives an empty population.
    pub fn generate(&self, n: usize, g: f64, seed: u64) -> Result<Population> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let radii: Vec<f64> = (0..n).map(|_| rayleigh(&mut rng, self.radial_scale)).collect();
        let azimuths: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..TAU)).collect();
        // acos of a uniform cosine keeps the poles from clustering
        let polars: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0_f64).acos()).collect();

        let positions: Vec<NVec3> = radii
            .iter()
            .zip(azimuths.iter().zip(polars.iter()))
            .map(|(&r, (&theta, &phi))| spherical_to_cartesian(r, theta, phi))
            .collect();

        let mut velocities: Vec<NVec3> = positions
            .iter()
            .map(|p| compute_initial_velocity(p, g, n, self.circular_factor))
            .collect();

        let noise = Normal::new(0.0, self.velocity_noise)
            .map_err(|e| Error::InvalidConfig(format!("velocity_noise: {e}")))?;
        for v in velocities.iter_mut() {
            for c in v.iter_mut() {
                *c += noise.sample(&mut rng);
            }
        }

        let masses = vec![1.0; n];

        info!("generated {n} bodies from seed {seed}");
        Population::new(positions, velocities, masses)
    }
}

/// Rayleigh sample by inverse CDF: `scale * sqrt(-2 ln(1 - u))`, u in [0, 1)
fn rayleigh<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    let u: f64 = rng.gen();
    scale * (-2.0 * (-u).ln_1p()).sqrt()
}

/// `theta` is the azimuth in the xy-plane, `phi` the angle from +z
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> NVec3 {
    NVec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Circular-orbit velocity for a body at `position` in a cluster of `n` unit masses.
///
/// Speed is `factor * sqrt(g * n / |p|)`, direction is `p x z` normalised,
/// falling back to `p x y` when `p` is (nearly) parallel to z. A body at the
/// origin gets zero velocity.
pub fn compute_initial_velocity(position: &NVec3, g: f64, n: usize, factor: f64) -> NVec3 {
    let r_mag = position.norm();
    if r_mag == 0.0 {
        return NVec3::zeros();
    }
    let v_circ = factor * (g * n as f64 / r_mag).sqrt();

    let mut perp = position.cross(&NVec3::z());
    if perp.norm() < PERP_TOLERANCE {
        perp = position.cross(&NVec3::y());
    }

    v_circ * perp.normalize()
}
