//! Build a fully-initialized simulation run from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - a validated `Engine` owning the generated `Population`
//! - the driver settings (`RunConfig`)

use log::info;

use crate::configuration::config::{RunConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::engine::Engine;

/// Runtime bundle constructed from a [`ScenarioConfig`]
///
/// Generation runs once here; afterwards the engine is the only owner of
/// the bodies.
pub struct Scenario {
    pub engine: Engine,
    pub run: RunConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        // Validate everything before drawing a single random number
        let parameters = cfg.parameters()?;
        let generator = cfg.generator()?;

        let population = generator.generate(parameters.n, parameters.g, parameters.seed)?;
        let engine = Engine::new(population, parameters)?;

        info!(
            "scenario built: {} frames, report every {}",
            cfg.run.frames, cfg.run.report_every
        );

        Ok(Self {
            engine,
            run: cfg.run.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn builds_requested_body_count() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("parameters:\n  n: 16\n")?;
        let scenario = Scenario::build_scenario(&cfg)?;
        assert_eq!(scenario.engine.positions().len(), 16);
        assert_eq!(scenario.engine.steps(), 0);
        Ok(())
    }

    #[test]
    fn invalid_dt_never_builds() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("parameters:\n  dt: -1.0\n  n: 4\n")?;
        assert!(matches!(Scenario::build_scenario(&cfg), Err(Error::InvalidConfig(_))));
        Ok(())
    }
}
