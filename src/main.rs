use galsim::simulation::diagnostics::Diagnostics;
use galsim::{ScenarioConfig, Scenario};
use galsim::{bench_accelerations, bench_update};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "galsim", about = "Direct-sum gravitational N-body simulation")]
struct Args {
    /// Scenario file; bare names are looked up under scenarios/
    #[arg(short, long, default_value = "default.yaml")]
    file: String,

    /// Override the body count
    #[arg(short = 'n', long)]
    bodies: Option<usize>,

    /// Override the random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Time the force pass and the update step instead of running
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let given = PathBuf::from(&args.file);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file)
    };

    let mut cfg = if config_path.exists() {
        ScenarioConfig::from_path(&config_path)
            .with_context(|| format!("failed to load scenario {}", config_path.display()))?
    } else {
        info!("{} not found, using built-in defaults", config_path.display());
        ScenarioConfig::default()
    };

    if let Some(n) = args.bodies {
        cfg.parameters.n = n;
    }
    if let Some(seed) = args.seed {
        cfg.parameters.seed = seed;
    }
    if let Some(frames) = args.frames {
        cfg.run.frames = frames;
    }
    Ok(cfg)
}

fn report(d: &Diagnostics, step: u64) {
    info!(
        "step {step:6} t = {:8.3}  E = {:+.6e} (K = {:.6e}, U = {:+.6e})  |p| = {:.3e}  r_max = {:.3}",
        d.t,
        d.total_energy(),
        d.kinetic,
        d.potential,
        d.momentum.norm(),
        d.max_radius,
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_accelerations(&[200, 400, 800, 1600, 3200])?;
        bench_update(&[200, 400, 800, 1600], 3)?;
        return Ok(());
    }

    let cfg = load_scenario(&args)?;
    let mut scenario = Scenario::build_scenario(&cfg).context("failed to build scenario")?;

    let (g, softening) = {
        let p = scenario.engine.parameters();
        (p.g, p.softening)
    };
    let report_every = scenario.run.report_every;

    let d0 = Diagnostics::measure(scenario.engine.population(), g, softening);
    report(&d0, 0);

    // Stand-in for the render loop: one update per frame, positions read back each time
    for frame in 1..=scenario.run.frames {
        let n_positions = scenario.engine.update().context("simulation aborted")?.len();
        debug!(
            "step {} t = {:.4}: {} positions",
            scenario.engine.steps(),
            scenario.engine.time(),
            n_positions
        );

        if report_every > 0 && frame % report_every == 0 {
            let d = Diagnostics::measure(scenario.engine.population(), g, softening);
            report(&d, frame);
        }
    }

    let d1 = Diagnostics::measure(scenario.engine.population(), g, softening);
    let drift = if d0.total_energy() != 0.0 {
        ((d1.total_energy() - d0.total_energy()) / d0.total_energy()).abs()
    } else {
        0.0
    };
    info!(
        "finished {} steps, relative energy drift {:.3e}",
        scenario.engine.steps(),
        drift
    );

    Ok(())
}
