//! Configuration types for loading a simulation run from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! run. A run consists of:
//!
//! - [`ParametersConfig`] – physical constants, step size, body count, seed
//! - [`GeneratorConfig`]  – shape of the initial cluster
//! - [`RunConfig`]        – how long the driver plays and how often it reports
//! - [`ScenarioConfig`]   – top-level wrapper used to load a run from YAML
//!
//! Every field has a default, so an empty document is a valid run.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 1.0              # gravitational constant
//!   dt: 0.01            # fixed step size
//!   softening: 0.1      # softening length epsilon
//!   n: 1000             # body count
//!   seed: 42            # deterministic seed
//!
//! generator:
//!   radial_scale: 1.0   # Rayleigh scale of the radii
//!   circular_factor: 0.5
//!   velocity_noise: 0.1 # std dev of velocity noise
//!
//! run:
//!   frames: 1000        # number of update calls
//!   report_every: 100   # frames between diagnostics lines
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::initial::Generator;
use crate::simulation::params::Parameters;

/// Global numerical and physical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64,         // gravitational constant
    pub dt: f64,        // time step size
    pub softening: f64, // prevent singular forces at very small separations
    pub n: usize,       // number of bodies
    pub seed: u64,      // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            g: p.g,
            dt: p.dt,
            softening: p.softening,
            n: p.n,
            seed: p.seed,
        }
    }
}

/// Shape of the initial cluster
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub radial_scale: f64,
    pub circular_factor: f64,
    pub velocity_noise: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let g = Generator::default();
        Self {
            radial_scale: g.radial_scale,
            circular_factor: g.circular_factor,
            velocity_noise: g.velocity_noise,
        }
    }
}

/// Driver settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub frames: u64,
    pub report_every: u64, // 0 disables periodic reports
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 1000,
            report_every: 100,
        }
    }
}

/// Top-level run configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub generator: GeneratorConfig,
    pub run: RunConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Runtime parameters, validated
    pub fn parameters(&self) -> Result<Parameters> {
        let p = Parameters {
            g: self.parameters.g,
            dt: self.parameters.dt,
            softening: self.parameters.softening,
            n: self.parameters.n,
            seed: self.parameters.seed,
        };
        p.validate()?;
        Ok(p)
    }

    /// Runtime generator, validated
    pub fn generator(&self) -> Result<Generator> {
        let g = Generator {
            radial_scale: self.generator.radial_scale,
            circular_factor: self.generator.circular_factor,
            velocity_noise: self.generator.velocity_noise,
        };
        g.validate()?;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_gives_defaults() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("{}")?;
        assert_eq!(cfg.parameters()?, Parameters::default());
        assert_eq!(cfg.generator()?, Generator::default());
        assert_eq!(cfg.run.frames, 1000);
        Ok(())
    }

    #[test]
    fn partial_document_overrides() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("parameters:\n  G: 2.5\n  n: 10\nrun:\n  frames: 3\n")?;
        let p = cfg.parameters()?;
        assert_eq!(p.g, 2.5);
        assert_eq!(p.n, 10);
        assert_eq!(p.dt, 0.01);
        assert_eq!(cfg.run.frames, 3);
        Ok(())
    }

    #[test]
    fn negative_body_count_is_a_parse_error() {
        let err = ScenarioConfig::from_yaml_str("parameters:\n  n: -5\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(ScenarioConfig::from_yaml_str("parameters:\n  theta: 0.5\n").is_err());
    }

    #[test]
    fn non_positive_dt_rejected() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("parameters:\n  dt: 0.0\n")?;
        assert!(matches!(cfg.parameters(), Err(Error::InvalidConfig(_))));
        Ok(())
    }
}
