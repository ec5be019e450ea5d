/*!
 * schedsim - Demo Entry Point
 *
 * Reads a JSON simulation request from a file argument (or stdin), runs the
 * selected policy engine to completion, and writes the full result plus the
 * derived metrics as JSON to stdout. All rendering is left to consumers.
 */

use std::io::Read;

use log::info;
use miette::{IntoDiagnostic, WrapErr};
use serde::Serialize;

use sched_sim::{finalize, simulate, MetricsSummary, SimulationRequest, SimulationResult};

#[derive(Serialize)]
struct Output {
    result: SimulationResult,
    metrics: MetricsSummary,
}

fn read_request() -> miette::Result<SimulationRequest> {
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read request from {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .into_diagnostic()
                .wrap_err("failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw)
        .into_diagnostic()
        .wrap_err("request is not valid JSON")
}

fn main() -> miette::Result<()> {
    env_logger::init();

    let request = read_request()?;
    let spec = request.validate()?;

    info!(
        "Running {} over {} processes",
        spec.policy.name(),
        spec.processes.len()
    );

    let result = simulate(&spec.processes, &spec.policy, spec.context_switch_delay)?;
    let metrics = finalize(&result);

    let output = Output { result, metrics };
    let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}
