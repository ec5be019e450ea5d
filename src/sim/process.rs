/*!
 * Process Record
 * Mutable per-process simulation state
 */

use crate::core::{InlineString, QueueLevel, SimResult, SimulationError, Time};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Process identity, unique within a run, compared lexicographically
pub type ProcessId = InlineString;

/// Per-process simulation state
///
/// Each policy engine owns a private working copy of the process set for the
/// duration of one run; the caller's input set is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub id: ProcessId,
    pub arrival: Time,
    pub burst: Time,
    /// CPU units still required; invariant: 0 <= remaining <= burst
    pub remaining: Time,
    /// Set once, when `remaining` reaches 0
    pub completion: Option<Time>,
    /// Set at most once, at the first unit this process ever runs
    pub first_execution: Option<Time>,
    /// MLFQ level, `None` before arrival admission (and for non-MLFQ policies)
    pub queue_level: Option<QueueLevel>,
    /// Units executed since the last MLFQ queue change
    pub time_in_queue: Time,
    /// Already placed into a ready structure (prevents double admission)
    #[serde(skip)]
    pub(crate) admitted: bool,
}

impl Process {
    /// Create a validated process record
    pub fn new(id: impl Into<ProcessId>, arrival: Time, burst: Time) -> SimResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(SimulationError::InvalidProcess {
                id,
                reason: "process id must not be empty".into(),
            });
        }
        if burst == 0 {
            return Err(SimulationError::InvalidProcess {
                id,
                reason: "burst time must be at least 1".into(),
            });
        }
        Ok(Self {
            id,
            arrival,
            burst,
            remaining: burst,
            completion: None,
            first_execution: None,
            queue_level: None,
            time_in_queue: 0,
            admitted: false,
        })
    }

    /// Has this process finished all its CPU work
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Arrived by `now` and still has work left
    #[inline(always)]
    pub fn is_ready(&self, now: Time) -> bool {
        self.arrival <= now && self.remaining > 0
    }

    /// Execute one unit starting at `now`
    ///
    /// Records the first-execution time on the first call and burns one unit
    /// of remaining burst.
    pub(crate) fn run_unit(&mut self, now: Time) {
        debug_assert!(self.remaining > 0, "ran a completed process");
        if self.first_execution.is_none() {
            self.first_execution = Some(now);
        }
        self.remaining -= 1;
    }

    /// Finalize completion at `now`
    pub(crate) fn complete_at(&mut self, now: Time) {
        debug_assert_eq!(self.remaining, 0);
        self.completion = Some(now);
    }

    /// Move to an MLFQ level, resetting the residency counter
    pub(crate) fn enter_level(&mut self, level: QueueLevel) {
        self.queue_level = Some(level);
        self.time_in_queue = 0;
    }

    /// Turnaround time, defined once the process completed
    pub fn turnaround(&self) -> Option<Time> {
        self.completion.map(|c| c - self.arrival)
    }

    /// Response time; 0 for a process that never ran (unreachable for a
    /// correctly terminating engine)
    pub fn response(&self) -> Time {
        self.first_execution
            .map_or(0, |first| first - self.arrival)
    }
}

/// Validate a process set before building any simulation state
///
/// Fails fast on duplicate ids; per-process field validation already happened
/// in [`Process::new`].
pub fn validate_process_set(processes: &[Process]) -> SimResult<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    for p in processes {
        if !seen.insert(p.id.clone()) {
            return Err(SimulationError::DuplicateProcess(p.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_burst() {
        let err = Process::new("P1", 0, 0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidProcess { .. }));
    }

    #[test]
    fn test_first_execution_set_once() {
        let mut p = Process::new("P1", 2, 3).unwrap();
        p.run_unit(5);
        p.run_unit(6);
        assert_eq!(p.first_execution, Some(5));
        assert_eq!(p.remaining, 1);
        assert_eq!(p.response(), 3);
    }

    #[test]
    fn test_turnaround_requires_completion() {
        let mut p = Process::new("P1", 1, 2).unwrap();
        assert_eq!(p.turnaround(), None);
        p.run_unit(1);
        p.run_unit(2);
        p.complete_at(3);
        assert_eq!(p.turnaround(), Some(2));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let set = vec![
            Process::new("P1", 0, 1).unwrap(),
            Process::new("P2", 0, 1).unwrap(),
            Process::new("P1", 3, 2).unwrap(),
        ];
        assert_eq!(
            validate_process_set(&set),
            Err(SimulationError::DuplicateProcess("P1".into()))
        );
    }
}
