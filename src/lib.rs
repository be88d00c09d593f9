pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Quantity, Result};

pub use simulation::states::{Population, NVec3};
pub use simulation::params::Parameters;
pub use simulation::initial::{Generator, compute_initial_velocity};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, compute_accelerations};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;
pub use simulation::diagnostics::Diagnostics;

pub use configuration::config::{ParametersConfig, GeneratorConfig, RunConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_accelerations, bench_update};
