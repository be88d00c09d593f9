//! Fixed-step time integration for the N-body population
//!
//! Semi-implicit (symplectic) Euler driven by an `AccelSet`: kick the
//! velocities with the start-of-step acceleration, then drift the positions
//! with the kicked velocities.

use log::error;

use super::forces::AccelSet;
use super::states::{NVec3, Population};
use crate::error::{Error, Result};

/// Advance the population by one step of semi-implicit Euler.
/// Uses one force evaluation per step and updates positions, velocities,
/// and `pop.t` in place. `dt` is taken as given, including zero.
pub fn semi_implicit_euler(pop: &mut Population, forces: &AccelSet, dt: f64) {
    let n = pop.len();
    // Time still advances with no bodies
    pop.t += dt;
    if n == 0 {
        return;
    }

    // a_n from x_n
    let mut acc = vec![NVec3::zeros(); n];
    forces.accumulate_accels(&*pop, &mut acc);

    // Kick: v_n+1 = v_n + dt * a_n
    for (v, a) in pop.velocities.iter_mut().zip(acc.iter()) {
        *v += dt * *a;
    }

    // Drift with the new velocity: x_n+1 = x_n + dt * v_n+1
    for (x, v) in pop.positions.iter_mut().zip(pop.velocities.iter()) {
        *x += dt * *v;
    }
}

/// Surface the first non-finite component as [`Error::NumericalInstability`].
pub fn check_finite(pop: &Population, step: u64) -> Result<()> {
    match pop.first_non_finite() {
        Some((body, quantity)) => {
            error!("non-finite {quantity} on body {body} after step {step}");
            Err(Error::NumericalInstability { step, body, quantity })
        }
        None => Ok(()),
    }
}
