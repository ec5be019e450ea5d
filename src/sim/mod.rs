/*!
 * Simulation Engine Core
 * Shared clock, frame logger, and context-switch machinery for all policies
 */

use crate::core::{QueueLevel, SimResult, SimulationError, Time};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub mod frame;
pub mod process;
pub mod timeline;

pub use frame::{Frame, FrameLog, Replay};
pub use process::{Process, ProcessId};
pub use timeline::{GanttEntry, Segment};

/// Complete output of one simulation run
///
/// Created fresh per run and replaced wholesale on the next; no
/// partial-result reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationResult {
    /// Processes in completion order, with completion times set
    pub completed: Vec<Process>,
    /// Final merged Gantt interval list
    pub gantt: Vec<GanttEntry>,
    /// Total elapsed simulated time
    pub total_time: Time,
    /// Full ordered frame log for stepwise replay
    pub frames: FrameLog,
}

/// Shared per-run state driven by a policy engine
///
/// Owns the working process set, the accumulating Gantt data, the simulated
/// clock, and the frame log. Policies advance it one unit at a time; all
/// run-length merging and context-switch insertion happens here.
pub(crate) struct Engine {
    pub processes: Vec<Process>,
    pub gantt: Vec<GanttEntry>,
    pub frames: FrameLog,
    pub now: Time,
    /// Identity of the last process that held the CPU; `None` after idle
    /// gaps and completions
    pub last_running: Option<ProcessId>,
    switch_delay: Time,
    completion_order: Vec<usize>,
}

impl Engine {
    pub fn new(processes: Vec<Process>, switch_delay: Time) -> Self {
        Self {
            processes,
            gantt: Vec::new(),
            frames: FrameLog::new(),
            now: 0,
            last_running: None,
            switch_delay,
            completion_order: Vec::new(),
        }
    }

    /// Append an immutable snapshot of the current state
    pub fn log_frame(&mut self, running: Option<&ProcessId>, explanation: impl Into<String>) {
        let explanation = explanation.into();
        trace!("t={} frame: {}", self.now, explanation);
        self.frames.push(Frame {
            time: self.now,
            processes: self.processes.clone(),
            gantt: self.gantt.clone(),
            running: running.cloned(),
            explanation,
        });
    }

    /// Execute one unit of `processes[idx]` starting at the current time
    ///
    /// Advances the clock by exactly 1 and extends the Gantt data through the
    /// single merge point.
    pub fn run_unit(&mut self, idx: usize, queue: Option<QueueLevel>) {
        let id = self.processes[idx].id.clone();
        let segment = match queue {
            Some(level) => Segment::process_at_level(id.clone(), level),
            None => Segment::process(id.clone()),
        };
        timeline::append_or_extend(&mut self.gantt, segment, self.now);
        self.processes[idx].run_unit(self.now);
        self.now += 1;
        self.last_running = Some(id);
    }

    /// Record one idle unit with its own frame
    ///
    /// Idle fast-forward is built from repeated calls, so stepwise playback
    /// stays unit-granular even across long gaps.
    pub fn idle_unit(&mut self, explanation: &str) {
        timeline::append_or_extend(&mut self.gantt, Segment::Idle, self.now);
        self.now += 1;
        self.log_frame(None, explanation);
        self.last_running = None;
    }

    /// Insert the context-switch delay when the running identity changes
    ///
    /// No-op when the delay is 0 or the CPU stays with the same process.
    /// A switch is charged when handing over from a different process, or
    /// when resuming after an idle gap (`last_running` is `None` past t=0).
    pub fn maybe_context_switch(&mut self, next: &ProcessId) {
        if self.switch_delay == 0 {
            return;
        }
        let explanation = match &self.last_running {
            Some(last) if last != next => {
                format!("Context switch from {} to {}.", last, next)
            }
            Some(_) => return,
            None if self.now > 0 => {
                format!("Starting execution of {} after idle time.", next)
            }
            None => return,
        };
        debug!("t={} context switch -> {}", self.now, next);
        for _ in 0..self.switch_delay {
            timeline::append_or_extend(&mut self.gantt, Segment::ContextSwitch, self.now);
            self.now += 1;
            self.log_frame(None, explanation.clone());
        }
    }

    /// Finalize completion of `processes[idx]` at the current time
    pub fn complete(&mut self, idx: usize, explanation: impl Into<String>) {
        self.processes[idx].complete_at(self.now);
        self.completion_order.push(idx);
        self.log_frame(None, explanation);
        self.last_running = None;
    }

    #[inline(always)]
    pub fn all_complete(&self) -> bool {
        self.completion_order.len() == self.processes.len()
    }

    /// Earliest arrival strictly after the current time among unfinished
    /// processes
    pub fn next_arrival(&self) -> Option<Time> {
        self.processes
            .iter()
            .filter(|p| p.remaining > 0 && p.arrival > self.now)
            .map(|p| p.arrival)
            .min()
    }

    /// Abort the run if an iteration neither advanced the clock nor finished
    /// the workload
    ///
    /// Unreachable given the policy contracts; it exists so a policy bug
    /// fails loudly instead of looping forever.
    pub fn ensure_progress(&self, time_before: Time) -> SimResult<()> {
        if self.now == time_before && !self.all_complete() {
            return Err(SimulationError::NoProgress {
                time: self.now,
                reason: "clock did not advance with unfinished processes".into(),
            });
        }
        Ok(())
    }

    /// Consume the engine into a finished result
    pub fn finish(self) -> SimulationResult {
        debug_assert!(self.all_complete());
        let completed = self
            .completion_order
            .iter()
            .map(|&idx| self.processes[idx].clone())
            .collect();
        SimulationResult {
            // Already merged by construction; re-merging is a fixed point.
            gantt: timeline::merge(&self.gantt),
            total_time: self.now,
            completed,
            frames: self.frames,
        }
    }
}
