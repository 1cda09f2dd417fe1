// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use lrp_model::prelude::InstanceLoader;
use lrp_solver::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::{path::PathBuf, time::Instant};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct RunRecord {
    instance: String,
    method: String,
    seed: u64,
    iterations: usize,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    initial_objective: f64,
    final_objective: f64,
    feasible: bool,
}

#[derive(Debug)]
struct Args {
    instance_dir: PathBuf,
    method: String,
    seed: u64,
    iterations: Option<usize>,
    params_file: Option<PathBuf>,
    output: Option<PathBuf>,
}

const USAGE: &str = "Usage: lrp-cli <instance-dir> [--method cw|nn|random|regret2|regret3|cluster] \
[--seed N] [--iterations N] [--params FILE] [--output FILE]";

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let instance_dir = PathBuf::from(args.next().ok_or(USAGE)?);
    let mut parsed = Args {
        instance_dir,
        method: "cw".to_string(),
        seed: 1234,
        iterations: None,
        params_file: None,
        output: None,
    };
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--method" => parsed.method = value()?,
            "--seed" => {
                parsed.seed = value()?.parse().map_err(|e| format!("--seed: {e}"))?;
            }
            "--iterations" => {
                parsed.iterations =
                    Some(value()?.parse().map_err(|e| format!("--iterations: {e}"))?);
            }
            "--params" => parsed.params_file = Some(PathBuf::from(value()?)),
            "--output" => parsed.output = Some(PathBuf::from(value()?)),
            _ => return Err(format!("Unknown flag `{flag}`.\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn load_params(args: &Args) -> Result<AlnsParams, Box<dyn std::error::Error>> {
    let mut params = match &args.params_file {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(file)?
        }
        None => AlnsParams::default(),
    };
    if let Some(iterations) = args.iterations {
        params.iterations = iterations;
    }
    Ok(params)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let instance = InstanceLoader::new().from_dir(&args.instance_dir)?;
    tracing::info!(
        instance = instance.name(),
        customers = instance.num_customers(),
        depots = instance.num_depots(),
        "Loaded instance"
    );

    let params = load_params(&args)?;
    let method = InitMethod::parse(&args.method)?;
    let engine = Alns::new(params)?;

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let initial = initial_solution(&mut rng, &instance, method)?;
    let initial_objective = objective(&initial, CostPhases::ALL);
    tracing::info!(objective = initial_objective, method = %method, "Initial solution built");

    let bests = engine.run(&mut rng, &initial);
    let best = bests.last().unwrap_or(&initial);
    let final_objective = objective(best, CostPhases::ALL);
    let runtime = t0.elapsed();

    tracing::info!(
        objective = final_objective,
        feasible = is_feasible(best),
        runtime_ms = runtime.as_millis() as u64,
        "Search finished"
    );

    let record = RunRecord {
        instance: instance.name().to_string(),
        method: method.name().to_string(),
        seed: args.seed,
        iterations: engine.params().iterations,
        start_ts,
        end_ts: Utc::now(),
        runtime_ms: runtime.as_millis(),
        initial_objective,
        final_objective,
        feasible: is_feasible(best),
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}-run.json", instance.name())));
    std::fs::write(&output, serde_json::to_string_pretty(&record)?)?;
    tracing::info!(path = %output.display(), "Run record written");

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
