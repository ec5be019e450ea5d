/*!
 * Multi-Level Feedback Queue
 * Four strict-priority levels, demotion on quantum expiry, head re-entry on preemption
 */

use super::{Level3Discipline, MlfqConfig};
use crate::core::{QueueLevel, SimResult, SimulationError, MLFQ_LAST_LEVEL, MLFQ_LEVELS};
use crate::sim::{Engine, ProcessId, SimulationResult};
use std::collections::VecDeque;

type LevelQueues = [VecDeque<usize>; MLFQ_LEVELS];

/// Admit arrived processes into level 0, in (arrival, id) order
fn admit_arrivals(engine: &mut Engine, queues: &mut LevelQueues, announce: Option<&ProcessId>) {
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
        engine.processes[idx].enter_level(0);
        queues[0].push_back(idx);
        let id = engine.processes[idx].id.clone();
        engine.log_frame(announce, format!("Process {} arrives and enters Q0.", id));
    }
}

/// Pop the head of the highest-priority non-empty level
fn pick(queues: &mut LevelQueues) -> Option<(QueueLevel, usize)> {
    for (level, queue) in queues.iter_mut().enumerate() {
        if let Some(idx) = queue.pop_front() {
            return Some((level as QueueLevel, idx));
        }
    }
    None
}

/// Any process waiting at a level strictly above `level`
fn higher_level_ready(queues: &LevelQueues, level: QueueLevel) -> bool {
    queues[..level as usize].iter().any(|q| !q.is_empty())
}

pub(super) fn run(mut engine: Engine, config: &MlfqConfig) -> SimResult<SimulationResult> {
    engine.log_frame(None, "MLFQ simulation starts.");

    let mut queues: LevelQueues = Default::default();

    while !engine.all_complete() {
        let time_before = engine.now;
        admit_arrivals(&mut engine, &mut queues, None);

        let Some((level, idx)) = pick(&mut queues) else {
            let Some(target) = engine.next_arrival() else {
                return Err(SimulationError::NoProgress {
                    time: engine.now,
                    reason: "all queues empty and no future arrivals".into(),
                });
            };
            let explanation = format!(
                "CPU is idle. Waiting for next process to arrive at time {}.",
                target
            );
            while engine.now < target && queues.iter().all(|q| q.is_empty()) {
                engine.idle_unit(&explanation);
                admit_arrivals(&mut engine, &mut queues, None);
            }
            engine.ensure_progress(time_before)?;
            continue;
        };

        let id = engine.processes[idx].id.clone();
        engine.maybe_context_switch(&id);
        admit_arrivals(&mut engine, &mut queues, None);

        if engine.processes[idx].first_execution.is_none() {
            engine.log_frame(
                Some(&id),
                format!("Process {} starts execution from Q{}.", id, level),
            );
        } else {
            engine.log_frame(
                Some(&id),
                format!("Process {} resumes execution from Q{}.", id, level),
            );
        }

        let quantum = config.quantum_for(level, engine.processes[idx].remaining);
        let mut used = 0;
        let mut preempted = false;
        while used < quantum && engine.processes[idx].remaining > 0 {
            // Strict priority: a process ready at a higher level takes the
            // CPU immediately; the current one returns to the head of its
            // own level, keeping its place over everything queued behind it.
            if higher_level_ready(&queues, level) {
                queues[level as usize].push_front(idx);
                engine.log_frame(
                    None,
                    format!(
                        "Process {} (Q{}) preempted by a higher-priority process.",
                        id, level
                    ),
                );
                preempted = true;
                break;
            }
            engine.run_unit(idx, Some(level));
            engine.processes[idx].time_in_queue += 1;
            used += 1;
            admit_arrivals(&mut engine, &mut queues, Some(&id));
            let remaining = engine.processes[idx].remaining;
            if remaining > 0 && used < quantum && !higher_level_ready(&queues, level) {
                engine.log_frame(
                    Some(&id),
                    format!(
                        "Process {} executing in Q{}. Remaining: {}.",
                        id, level, remaining
                    ),
                );
            }
        }

        if preempted {
            engine.ensure_progress(time_before)?;
            continue;
        }

        if engine.processes[idx].remaining == 0 {
            engine.complete(idx, format!("Process {} (Q{}) completed.", id, level));
        } else if level < MLFQ_LAST_LEVEL {
            // Quantum exhausted below the last level: demote one level and
            // reset the residency counter.
            let next_level = level + 1;
            engine.processes[idx].enter_level(next_level);
            queues[next_level as usize].push_back(idx);
            engine.log_frame(
                None,
                format!(
                    "Process {} quantum expired in Q{}. Demoted to Q{}.",
                    id, level, next_level
                ),
            );
        } else {
            match config.level3 {
                Level3Discipline::RoundRobin { .. } => {
                    queues[MLFQ_LAST_LEVEL as usize].push_back(idx);
                    engine.log_frame(
                        None,
                        format!("Process {} quantum expired in Q3. Re-added to Q3 tail.", id),
                    );
                }
                Level3Discipline::Fcfs => {
                    // FCFS at Q3 keeps priority over later Q3 entrants.
                    queues[MLFQ_LAST_LEVEL as usize].push_front(idx);
                    engine.log_frame(
                        None,
                        format!("Process {} returns to the head of Q3.", id),
                    );
                }
            }
        }
        engine.ensure_progress(time_before)?;
    }

    Ok(engine.finish())
}
