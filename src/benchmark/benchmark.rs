use std::time::Instant;

use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::forces::compute_accelerations;
use crate::simulation::initial::Generator;
use crate::simulation::params::Parameters;
use crate::simulation::states::Population;

/// Helper to build a generated population of size `n`
fn make_population(n: usize, p: &Parameters) -> Result<Population> {
    Generator::default().generate(n, p.g, p.seed)
}

/// Time one direct-sum acceleration pass for each `n`
pub fn bench_accelerations(ns: &[usize]) -> Result<()> {
    let params = Parameters::default();

    for &n in ns {
        let pop = make_population(n, &params)?;

        // Warm up
        let _ = compute_accelerations(&pop, params.g, params.softening);

        let t0 = Instant::now();
        let acc = compute_accelerations(&pop, params.g, params.softening);
        let elapsed = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, accelerations = {elapsed:8.6} s ({} bodies)", acc.len());
    }
    Ok(())
}

/// Time `steps` full engine updates for each `n`
/// Paste output directly into a spreadsheet to graph
pub fn bench_update(ns: &[usize], steps: u64) -> Result<()> {
    println!("N,ms_per_step");

    for &n in ns {
        let params = Parameters { n, ..Parameters::default() };
        let mut engine = Engine::new(make_population(n, &params)?, params)?;

        // Warm-up one step
        engine.update()?;

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.update()?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps.max(1) as f64;

        println!("{n},{ms:.6}");
    }
    Ok(())
}
