pub mod states;
pub mod params;
pub mod initial;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod diagnostics;
