/*!
 * Shortest-Remaining-Time-First
 * Preemptive; re-evaluated every unit with a strict-improvement preemption rule
 */

use crate::core::{SimResult, SimulationError};
use crate::sim::{Engine, SimulationResult};

/// Minimum remaining burst wins; ties break by arrival, then id
fn best_candidate(engine: &Engine) -> Option<usize> {
    engine
        .processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready(engine.now))
        .min_by(|(_, a), (_, b)| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| a.arrival.cmp(&b.arrival))
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|(idx, _)| idx)
}

pub(super) fn run(mut engine: Engine) -> SimResult<SimulationResult> {
    engine.log_frame(None, "SRTF simulation starts.");

    // Index of the process currently holding the CPU across iterations
    let mut running: Option<usize> = None;

    while !engine.all_complete() {
        let time_before = engine.now;

        let Some(best) = best_candidate(&engine) else {
            running = None;
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

        // Preempt only on strictly shorter remaining time; equal remaining
        // keeps the incumbent (stability rule, avoids thrashing on ties).
        let chosen = match running {
            None => best,
            Some(current) => {
                if best != current
                    && engine.processes[best].remaining < engine.processes[current].remaining
                {
                    best
                } else {
                    current
                }
            }
        };

        let id = engine.processes[chosen].id.clone();
        let explanation = if running == Some(chosen) {
            format!("Process {} continues execution.", id)
        } else {
            match running {
                Some(previous) => format!(
                    "Process {} preempted by process {}.",
                    engine.processes[previous].id, id
                ),
                None if engine.processes[chosen].first_execution.is_none() => {
                    format!("Process {} starts execution.", id)
                }
                None => format!("Process {} resumes execution.", id),
            }
        };
        if running != Some(chosen) {
            engine.maybe_context_switch(&id);
        }

        engine.run_unit(chosen, None);
        if engine.processes[chosen].remaining == 0 {
            engine.complete(chosen, format!("Process {} completed.", id));
            running = None;
        } else {
            engine.log_frame(Some(&id), explanation);
            running = Some(chosen);
        }
        engine.ensure_progress(time_before)?;
    }

    Ok(engine.finish())
}
