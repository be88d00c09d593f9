//! Simulation engine
//!
//! `Engine` owns the population for the rest of the run, together with the
//! fixed parameters and the force set. An outside driver (an animation loop,
//! the CLI) calls [`Engine::update`] once per frame and reads back positions.

use log::{info, warn};

use crate::error::{Error, Result};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::{check_finite, semi_implicit_euler};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, Population};

pub struct Engine {
    parameters: Parameters,
    population: Population,
    forces: AccelSet,
    steps: u64, // completed steps
    halted_at: Option<u64>, // step that blew up, if any
}

impl Engine {
    /// Take ownership of `population` and register direct softened gravity.
    ///
    /// Errors with [`Error::InvalidConfig`] if the parameters are invalid or
    /// the population size differs from `parameters.n`.
    pub fn new(population: Population, parameters: Parameters) -> Result<Self> {
        parameters.validate()?;
        if population.len() != parameters.n {
            return Err(Error::InvalidConfig(format!(
                "population has {} bodies but n = {}",
                population.len(),
                parameters.n
            )));
        }

        let forces = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            eps2: parameters.eps2(),
        });

        info!(
            "engine ready: n = {}, G = {}, dt = {}, softening = {}",
            parameters.n, parameters.g, parameters.dt, parameters.softening
        );

        Ok(Self {
            parameters,
            population,
            forces,
            steps: 0,
            halted_at: None,
        })
    }

    /// Advance by one fixed step and return the post-step positions.
    ///
    /// A non-finite position or velocity halts the engine: this call returns
    /// [`Error::NumericalInstability`] and every later call [`Error::Halted`].
    pub fn update(&mut self) -> Result<&[NVec3]> {
        if let Some(step) = self.halted_at {
            return Err(Error::Halted { step });
        }

        semi_implicit_euler(&mut self.population, &self.forces, self.parameters.dt);
        self.steps += 1;

        if let Err(e) = check_finite(&self.population, self.steps) {
            warn!("halting engine at step {}", self.steps);
            self.halted_at = Some(self.steps);
            return Err(e);
        }

        Ok(self.population.positions())
    }

    /// Positions in body order, stable across calls
    pub fn positions(&self) -> &[NVec3] {
        self.population.positions()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> f64 {
        self.population.t
    }

    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }
}
