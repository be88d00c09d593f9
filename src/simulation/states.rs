//! Core state type for the N-body simulation.
//!
//! `Population` keeps bodies as parallel arrays (positions, velocities,
//! masses). Index `i` is the only identity a body has, and the arrays are
//! never reordered, resized or replaced after construction.

use nalgebra::Vector3;

use crate::error::{Error, Quantity, Result};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Population {
    pub(crate) positions: Vec<NVec3>, // 3d positions
    pub(crate) velocities: Vec<NVec3>, // 3d velocities
    pub(crate) masses: Vec<f64>, // read-only after creation
    pub t: f64, // time
}

impl Population {
    /// Build a population from parallel arrays.
    ///
    /// Errors with [`Error::InvalidConfig`] if the arrays differ in length,
    /// if any component is non-finite, or if a mass is not positive.
    pub fn new(positions: Vec<NVec3>, velocities: Vec<NVec3>, masses: Vec<f64>) -> Result<Self> {
        let n = positions.len();
        if velocities.len() != n || masses.len() != n {
            return Err(Error::InvalidConfig(format!(
                "array lengths differ: {} positions, {} velocities, {} masses",
                n,
                velocities.len(),
                masses.len()
            )));
        }
        if let Some(i) = masses.iter().position(|m| !m.is_finite() || *m <= 0.0) {
            return Err(Error::InvalidConfig(format!("mass of body {i} must be finite and > 0")));
        }

        let pop = Self {
            positions,
            velocities,
            masses,
            t: 0.0,
        };
        if let Some((i, q)) = pop.first_non_finite() {
            return Err(Error::InvalidConfig(format!("{q} of body {i} must be finite")));
        }
        Ok(pop)
    }

    /// A population with no bodies
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            velocities: Vec::new(),
            masses: Vec::new(),
            t: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[NVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[NVec3] {
        &self.velocities
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// First body (lowest index) with a NaN/inf component, positions checked before velocities.
    pub fn first_non_finite(&self) -> Option<(usize, Quantity)> {
        for (i, (x, v)) in self.positions.iter().zip(self.velocities.iter()).enumerate() {
            if !x.iter().all(|c| c.is_finite()) {
                return Some((i, Quantity::Position));
            }
            if !v.iter().all(|c| c.is_finite()) {
                return Some((i, Quantity::Velocity));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_rejected() {
        let err = Population::new(vec![NVec3::zeros(); 2], vec![NVec3::zeros(); 1], vec![1.0; 2])
            .unwrap_err();
        assert!(err.to_string().contains("lengths differ"));
    }

    #[test]
    fn non_positive_mass_rejected() {
        let err = Population::new(vec![NVec3::zeros()], vec![NVec3::zeros()], vec![0.0]).unwrap_err();
        assert!(err.to_string().contains("mass of body 0"));
    }

    #[test]
    fn nan_position_rejected() {
        let x = NVec3::new(0.0, f64::NAN, 0.0);
        let err = Population::new(vec![x], vec![NVec3::zeros()], vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("position of body 0"));
    }

    #[test]
    fn first_non_finite_reports_lowest_index() -> Result<()> {
        let mut pop = Population::new(vec![NVec3::zeros(); 3], vec![NVec3::zeros(); 3], vec![1.0; 3])?;
        assert_eq!(pop.first_non_finite(), None);

        pop.velocities[2].x = f64::INFINITY;
        pop.positions[1].z = f64::NAN;
        assert_eq!(pop.first_non_finite(), Some((1, Quantity::Position)));
        Ok(())
    }

    #[test]
    fn empty_population_has_no_bodies() {
        let pop = Population::empty();
        assert!(pop.is_empty());
        assert_eq!(pop.len(), 0);
        assert!(pop.masses().is_empty());
    }
}
