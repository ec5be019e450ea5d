/*!
 * Shortest-Job-First
 * Non-preemptive; smallest total burst among ready processes runs to completion
 */

use crate::core::{SimResult, SimulationError};
use crate::sim::{Engine, SimulationResult};

/// Minimum original burst time wins; ties break by earlier arrival, then by
/// process id. Original and remaining burst coincide here because the policy
/// never preempts.
fn select(engine: &Engine) -> Option<usize> {
    engine
        .processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready(engine.now))
        .min_by(|(_, a), (_, b)| {
            a.burst
                .cmp(&b.burst)
                .then_with(|| a.arrival.cmp(&b.arrival))
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|(idx, _)| idx)
}

pub(super) fn run(mut engine: Engine) -> SimResult<SimulationResult> {
    engine.log_frame(None, "SJF simulation starts.");

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

        engine.log_frame(
            Some(&id),
            format!("Process {} selected (shortest job), starts execution.", id),
        );

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
