/*!
 * First-Come-First-Served
 * Non-preemptive; earliest arrival runs to completion
 */

use crate::core::{SimResult, SimulationError};
use crate::sim::{Engine, SimulationResult};

/// Among ready processes, earliest arrival wins; ties break by process id
/// lexicographically.
fn select(engine: &Engine) -> Option<usize> {
    engine
        .processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready(engine.now))
        .min_by(|(_, a), (_, b)| a.arrival.cmp(&b.arrival).then_with(|| a.id.cmp(&b.id)))
        .map(|(idx, _)| idx)
}

pub(super) fn run(mut engine: Engine) -> SimResult<SimulationResult> {
    engine.log_frame(None, "FCFS simulation starts.");

    while !engine.all_complete() {
        let time_before = engine.now;

        let Some(idx) = select(&engine) else {
            let Some(target) = engine.next_arrival() else {
                return Err(SimulationError::NoProgress {
                    time: engine.now,
                    reason: "no ready process and no future arrivals".into(),
                });
            };
            let explanation = format!(
                "CPU is idle. Waiting for next process to arrive at time {}.",
                target
            );
            while engine.now < target {
                engine.idle_unit(&explanation);
            }
            engine.ensure_progress(time_before)?;
            continue;
        };

        let id = engine.processes[idx].id.clone();
        engine.maybe_context_switch(&id);

        if engine.processes[idx].first_execution.is_none() {
            engine.log_frame(Some(&id), format!("Process {} starts execution.", id));
        } else {
            engine.log_frame(Some(&id), format!("Process {} continues execution.", id));
        }

        // Non-preemptive: run the whole remaining burst.
        while engine.processes[idx].remaining > 0 {
            engine.run_unit(idx, None);
            let remaining = engine.processes[idx].remaining;
            if remaining > 0 {
                engine.log_frame(
                    Some(&id),
                    format!("Process {} executing. Remaining: {}.", id, remaining),
                );
            }
        }
        engine.complete(idx, format!("Process {} completed.", id));
        engine.ensure_progress(time_before)?;
    }

    Ok(engine.finish())
}
