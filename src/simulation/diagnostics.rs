//! Conserved-quantity diagnostics
//!
//! Read-only queries over a [`Population`]. The potential uses the same
//! Plummer softening as the force law, so the total energy is the quantity
//! the integrator should keep bounded.

use crate::simulation::states::{NVec3, Population};

/// Snapshot of the bulk quantities at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub t: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub momentum: NVec3,
    pub center_of_mass: NVec3,
    pub max_radius: f64,
}

impl Diagnostics {
    pub fn measure(pop: &Population, g: f64, softening: f64) -> Self {
        Self {
            t: pop.t,
            kinetic: kinetic_energy(pop),
            potential: potential_energy(pop, g, softening),
            momentum: total_momentum(pop),
            center_of_mass: center_of_mass(pop),
            max_radius: max_radius(pop),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// sum of 1/2 m |v|^2
pub fn kinetic_energy(pop: &Population) -> f64 {
    pop.velocities()
        .iter()
        .zip(pop.masses().iter())
        .fold(0.0, |k, (v, m)| k + 0.5 * m * v.norm_squared())
}

/// -sum over pairs i < j of G m_i m_j / sqrt(|r_ij|^2 + eps^2)
pub fn potential_energy(pop: &Population, g: f64, softening: f64) -> f64 {
    let pos = pop.positions();
    let m = pop.masses();
    let eps2 = softening * softening;
    let n = pop.len();

    let mut u = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let r = pos[j] - pos[i];
            u -= m[i] * m[j] / (r.norm_squared() + eps2).sqrt();
        }
    }
    g * u
}

pub fn total_energy(pop: &Population, g: f64, softening: f64) -> f64 {
    kinetic_energy(pop) + potential_energy(pop, g, softening)
}

/// sum of m v
pub fn total_momentum(pop: &Population) -> NVec3 {
    pop.velocities()
        .iter()
        .zip(pop.masses().iter())
        .fold(NVec3::zeros(), |acc, (v, m)| acc + *m * v)
}

/// Mass-weighted mean position, origin for an empty population
pub fn center_of_mass(pop: &Population) -> NVec3 {
    let total: f64 = pop.masses().iter().sum();
    if total <= 0.0 {
        return NVec3::zeros();
    }
    let weighted = pop
        .positions()
        .iter()
        .zip(pop.masses().iter())
        .fold(NVec3::zeros(), |acc, (x, m)| acc + *m * x);
    weighted / total
}

/// Largest distance of any body from the origin
pub fn max_radius(pop: &Population) -> f64 {
    pop.positions().iter().map(|x| x.norm()).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn pair() -> Result<Population> {
        Population::new(
            vec![NVec3::new(-1.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0)],
            vec![NVec3::new(0.0, 1.0, 0.0), NVec3::new(0.0, -2.0, 0.0)],
            vec![2.0, 1.0],
        )
    }

    #[test]
    fn kinetic_energy_sums_bodies() -> Result<()> {
        // 0.5*2*1 + 0.5*1*4
        assert!((kinetic_energy(&pair()?) - 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn potential_energy_softened() -> Result<()> {
        let pop = pair()?;
        assert!((potential_energy(&pop, 1.0, 0.0) + 1.0).abs() < 1e-12);
        let expected = -2.0 / (4.0_f64 + 0.25).sqrt();
        assert!((potential_energy(&pop, 1.0, 0.5) - expected).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn momentum_and_com() -> Result<()> {
        let pop = pair()?;
        assert!(total_momentum(&pop).norm() < 1e-12);
        let com = center_of_mass(&pop);
        assert!((com - NVec3::new(-1.0 / 3.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((max_radius(&pop) - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn empty_population_is_all_zero() {
        let d = Diagnostics::measure(&Population::empty(), 1.0, 0.1);
        assert_eq!(d.total_energy(), 0.0);
        // +0.0, so logs never show "-0"
        assert!(d.kinetic.is_sign_positive());
        assert!(d.potential.is_sign_positive());
        assert!(d.total_energy().is_sign_positive());
        assert_eq!(d.center_of_mass, NVec3::zeros());
    }
}
