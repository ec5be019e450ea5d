/*!
 * Round Robin
 * Single ready queue, fixed quantum, immediate tail admission of arrivals
 */

use crate::core::{SimResult, SimulationError, Time};
use crate::sim::{Engine, ProcessId, SimulationResult};
use std::collections::VecDeque;

/// Admit every not-yet-admitted process that has arrived by now, in
/// (arrival, id) order, to the tail of the ready queue
///
/// Called once per simulated unit, so tail order stays chronological and no
/// re-sorting of the queue is ever needed.
fn admit_arrivals(engine: &mut Engine, queue: &mut VecDeque<usize>, announce: Option<&ProcessId>) {
    let now = engine.now;
    let mut newly: Vec<usize> = engine
        .processes
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.admitted && p.is_ready(now))
        .map(|(idx, _)| idx)
        .collect();
    newly.sort_by(|&a, &b| {
        let (pa, pb) = (&engine.processes[a], &engine.processes[b]);
        pa.arrival.cmp(&pb.arrival).then_with(|| pa.id.cmp(&pb.id))
    });
    for idx in newly {
        engine.processes[idx].admitted = true;
        queue.push_back(idx);
        if announce.is_some() {
            let id = engine.processes[idx].id.clone();
            engine.log_frame(announce, format!("Process {} arrives and joins the ready queue.", id));
        }
    }
}

pub(super) fn run(mut engine: Engine, quantum: Time) -> SimResult<SimulationResult> {
    engine.log_frame(None, "Round Robin simulation starts.");

    let mut queue: VecDeque<usize> = VecDeque::new();

    while !engine.all_complete() {
        let time_before = engine.now;
        admit_arrivals(&mut engine, &mut queue, None);

        let Some(idx) = queue.pop_front() else {
            let Some(target) = engine.next_arrival() else {
                return Err(SimulationError::NoProgress {
                    time: engine.now,
                    reason: "ready queue empty and no future arrivals".into(),
                });
            };
            let explanation = format!(
                "CPU is idle. Waiting for next process to arrive at time {}.",
                target
            );
            while engine.now < target && queue.is_empty() {
                engine.idle_unit(&explanation);
                admit_arrivals(&mut engine, &mut queue, None);
            }
            engine.ensure_progress(time_before)?;
            continue;
        };

        let id = engine.processes[idx].id.clone();
        engine.maybe_context_switch(&id);
        // Arrivals that landed during the switch delay still precede this
        // slice's quantum expiry in the queue.
        admit_arrivals(&mut engine, &mut queue, None);

        if engine.processes[idx].first_execution.is_none() {
            engine.log_frame(Some(&id), format!("Process {} starts execution.", id));
        } else {
            engine.log_frame(Some(&id), format!("Process {} resumes execution.", id));
        }

        let mut used = 0;
        while used < quantum && engine.processes[idx].remaining > 0 {
            engine.run_unit(idx, None);
            used += 1;
            admit_arrivals(&mut engine, &mut queue, Some(&id));
            let remaining = engine.processes[idx].remaining;
            if remaining > 0 && used < quantum {
                engine.log_frame(
                    Some(&id),
                    format!(
                        "Process {} executing. Quantum remaining: {}, burst remaining: {}.",
                        id,
                        quantum - used,
                        remaining
                    ),
                );
            }
        }

        if engine.processes[idx].remaining == 0 {
            // Completed mid-slice; the rest of the quantum is not consumed.
            engine.complete(idx, format!("Process {} completed.", id));
        } else {
            queue.push_back(idx);
            engine.log_frame(
                None,
                format!("Process {} quantum expired. Moved to tail of ready queue.", id),
            );
        }
        engine.ensure_progress(time_before)?;
    }

    Ok(engine.finish())
}
