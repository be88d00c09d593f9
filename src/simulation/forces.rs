//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the `AccelSet` that sums registered
//! terms, and direct all-pairs Newtonian gravity with Plummer softening

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::simulation::states::{NVec3, Population};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `pop`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, pop: &Population, out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(pop, out);
        }
    }
}

/// Trait for acceleration sources operating on a [`Population`]
/// Implementations add their contribution into `out[i]` for each body.
/// Positions and masses are read-only here.
pub trait Acceleration {
    fn acceleration(&self, pop: &Population, out: &mut [NVec3]);
}

/// Newtonian gravity with softening, direct N^2 sum
///
/// Every body `i` sums over every body `j` (including itself, whose term is
/// forced to zero). No pairs are skipped or approximated, whatever their
/// distance.
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub eps2: f64, // softening length squared
}

impl NewtonianGravity {
    /// Net acceleration on body `i` from every body in the population
    fn accel_on(&self, i: usize, pos: &[NVec3], masses: &[f64]) -> NVec3 {
        let xi = pos[i];
        let mut acc = NVec3::zeros();

        for (j, (xj, mj)) in pos.iter().zip(masses.iter()).enumerate() {
            // r_ij points from i to j, so i is pulled along +r
            let r = xj - xi;
            let d2 = r.dot(&r) + self.eps2;

            // (|r|^2 + eps^2)^(-3/2); a body never pulls on itself
            let inv_d3 = if j == i { 0.0 } else { d2.powf(-1.5) };

            acc += *mj * inv_d3 * r;
        }

        self.g * acc
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, pop: &Population, out: &mut [NVec3]) {
        if pop.is_empty() { // No bodies, return
            return;
        }
        let pos = pop.positions();
        let masses = pop.masses();

        // One writer per output index, so the outer loop splits cleanly
        #[cfg(feature = "parallel")]
        out.par_iter_mut().enumerate().for_each(|(i, a)| {
            *a += self.accel_on(i, pos, masses);
        });

        #[cfg(not(feature = "parallel"))]
        for (i, a) in out.iter_mut().enumerate() {
            *a += self.accel_on(i, pos, masses);
        }
    }
}

/// Accelerations from direct softened gravity alone, one per body.
pub fn compute_accelerations(pop: &Population, g: f64, softening: f64) -> Vec<NVec3> {
    let gravity = NewtonianGravity {
        g,
        eps2: softening * softening,
    };
    let mut out = vec![NVec3::zeros(); pop.len()];
    gravity.acceleration(pop, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::simulation::initial::Generator;

    fn pop_of(positions: Vec<NVec3>, masses: Vec<f64>) -> Result<Population> {
        let n = positions.len();
        Population::new(positions, vec![NVec3::zeros(); n], masses)
    }

    #[test]
    fn empty_population_is_noop() {
        let acc = compute_accelerations(&Population::empty(), 1.0, 0.1);
        assert!(acc.is_empty());
    }

    #[test]
    fn accel_set_zeroes_stale_buffer() -> Result<()> {
        let pop = pop_of(vec![NVec3::new(1.0, 2.0, 3.0)], vec![1.0])?;
        let set = AccelSet::new().with(NewtonianGravity { g: 1.0, eps2: 0.01 });
        let mut out = vec![NVec3::new(9.0, 9.0, 9.0)];
        set.accumulate_accels(&pop, &mut out);
        assert_eq!(out[0], NVec3::zeros());
        Ok(())
    }

    #[test]
    fn terms_are_summed() -> Result<()> {
        let pop = pop_of(vec![NVec3::zeros(), NVec3::new(1.0, 0.0, 0.0)], vec![1.0, 1.0])?;
        let single = AccelSet::new().with(NewtonianGravity { g: 1.0, eps2: 0.0 });
        let double = AccelSet::new()
            .with(NewtonianGravity { g: 1.0, eps2: 0.0 })
            .with(NewtonianGravity { g: 1.0, eps2: 0.0 });

        let mut a1 = vec![NVec3::zeros(); 2];
        let mut a2 = vec![NVec3::zeros(); 2];
        single.accumulate_accels(&pop, &mut a1);
        double.accumulate_accels(&pop, &mut a2);

        assert!((a2[0] - 2.0 * a1[0]).norm() < 1e-15);
        Ok(())
    }

    #[test]
    fn split_loop_matches_serial_sum_exactly() -> Result<()> {
        // With `parallel` on, compute_accelerations takes the rayon path
        let pop = Generator::default().generate(257, 1.0, 42)?;
        let gravity = NewtonianGravity { g: 1.0, eps2: 0.1 * 0.1 };

        let expected: Vec<NVec3> = (0..pop.len())
            .map(|i| gravity.accel_on(i, pop.positions(), pop.masses()))
            .collect();

        assert_eq!(compute_accelerations(&pop, 1.0, 0.1), expected);
        Ok(())
    }

    #[test]
    fn heavier_source_pulls_harder() -> Result<()> {
        // body 0 sits between a light body on -x and a heavy one on +x
        let pop = pop_of(
            vec![NVec3::zeros(), NVec3::new(-1.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0)],
            vec![1.0, 1.0, 3.0],
        )?;
        let acc = compute_accelerations(&pop, 1.0, 0.0);
        assert!((acc[0].x - 2.0).abs() < 1e-12, "got {:?}", acc[0]);
        assert!(acc[0].y.abs() < 1e-15 && acc[0].z.abs() < 1e-15);
        Ok(())
    }
}
