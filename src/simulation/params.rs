//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the run's fixed settings:
//! - gravitational constant and softening length (`g`, `softening`),
//! - fixed step size `dt`,
//! - body count and random seed

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size
    pub softening: f64, // softening length epsilon (not squared)
    pub n: usize, // body count
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 1.0,
            dt: 0.01,
            softening: 0.1,
            n: 1000,
            seed: 42,
        }
    }
}

impl Parameters {
    /// Reject parameters the engine must not start with.
    pub fn validate(&self) -> Result<()> {
        if !self.g.is_finite() || self.g < 0.0 {
            return Err(Error::InvalidConfig(format!("G must be finite and >= 0, got {}", self.g)));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidConfig(format!("dt must be finite and > 0, got {}", self.dt)));
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "softening must be finite and >= 0, got {}",
                self.softening
            )));
        }
        Ok(())
    }

    /// epsilon^2, the term added to every squared pair distance
    pub fn eps2(&self) -> f64 {
        self.softening * self.softening
    }
}
