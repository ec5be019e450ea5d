/*!
 * Scheduling Policies
 * Closed policy set dispatched to one engine per variant
 */

use crate::core::{SimResult, SimulationError, Time, MLFQ_LAST_LEVEL};
use crate::sim::process::validate_process_set;
use crate::sim::{Engine, Process, SimulationResult};
use log::info;
use serde::{Deserialize, Serialize};

mod fcfs;
mod mlfq;
mod rr;
mod sjf;
mod srtf;

/// Discipline of the lowest MLFQ level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "discipline", rename_all = "snake_case")]
pub enum Level3Discipline {
    /// Run to completion unless preempted by a higher level
    Fcfs,
    /// Round-robin with its own quantum
    RoundRobin { quantum: Time },
}

/// MLFQ parameters: per-level quanta plus the level-3 discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MlfqConfig {
    pub q0: Time,
    pub q1: Time,
    pub q2: Time,
    pub level3: Level3Discipline,
}

impl MlfqConfig {
    fn validate(&self) -> SimResult<()> {
        for (name, quantum) in [("q0", self.q0), ("q1", self.q1), ("q2", self.q2)] {
            if quantum == 0 {
                return Err(SimulationError::InvalidParameter(
                    format!("MLFQ quantum {} must be positive", name).into(),
                ));
            }
        }
        if let Level3Discipline::RoundRobin { quantum: 0 } = self.level3 {
            return Err(SimulationError::InvalidParameter(
                "MLFQ level-3 quantum must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Quantum granted to a slice at `level`; level 3 under FCFS runs the
    /// whole remaining burst
    pub(crate) fn quantum_for(&self, level: u8, remaining: Time) -> Time {
        match level {
            0 => self.q0,
            1 => self.q1,
            2 => self.q2,
            MLFQ_LAST_LEVEL => match self.level3 {
                Level3Discipline::RoundRobin { quantum } => quantum,
                Level3Discipline::Fcfs => remaining,
            },
            _ => unreachable!("MLFQ level out of range"),
        }
    }
}

/// Scheduling policy and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Shortest-job-first, non-preemptive
    Sjf,
    /// Shortest-remaining-time-first, preemptive
    Srtf,
    /// Round-robin with a fixed time quantum
    RoundRobin { quantum: Time },
    /// Multi-level feedback queue with four levels
    Mlfq(MlfqConfig),
}

impl Policy {
    /// Short name used in logs and frame narration
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::RoundRobin { .. } => "Round Robin",
            Self::Mlfq(_) => "MLFQ",
        }
    }

    /// Check policy parameters without touching any simulation state
    pub fn validate(&self) -> SimResult<()> {
        match self {
            Self::Fcfs | Self::Sjf | Self::Srtf => Ok(()),
            Self::RoundRobin { quantum } => {
                if *quantum == 0 {
                    return Err(SimulationError::InvalidParameter(
                        "Round Robin quantum must be positive".into(),
                    ));
                }
                Ok(())
            }
            Self::Mlfq(config) => config.validate(),
        }
    }
}

/// Run one complete simulation
///
/// Validates the inputs, hands a private working copy of the process set to
/// the selected policy engine, and runs it to termination. The caller's
/// process set is never mutated; each call produces a fresh, self-contained
/// result.
pub fn simulate(
    processes: &[Process],
    policy: &Policy,
    context_switch_delay: Time,
) -> SimResult<SimulationResult> {
    policy.validate()?;
    validate_process_set(processes)?;

    info!(
        "Starting {} simulation: {} processes, context switch delay {}",
        policy.name(),
        processes.len(),
        context_switch_delay
    );

    // Private working copy, reset to pre-run state even if the caller
    // passed processes from an earlier result.
    let mut working: Vec<Process> = processes.to_vec();
    for p in &mut working {
        p.remaining = p.burst;
        p.completion = None;
        p.first_execution = None;
        p.queue_level = None;
        p.time_in_queue = 0;
        p.admitted = false;
    }
    let engine = Engine::new(working, context_switch_delay);

    let result = match policy {
        Policy::Fcfs => fcfs::run(engine),
        Policy::Sjf => sjf::run(engine),
        Policy::Srtf => srtf::run(engine),
        Policy::RoundRobin { quantum } => rr::run(engine, *quantum),
        Policy::Mlfq(config) => mlfq::run(engine, config),
    }?;

    info!(
        "{} simulation finished at t={} with {} frames",
        policy.name(),
        result.total_time,
        result.frames.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantum_rejected() {
        assert!(matches!(
            Policy::RoundRobin { quantum: 0 }.validate(),
            Err(SimulationError::InvalidParameter(_))
        ));
        let config = MlfqConfig {
            q0: 2,
            q1: 0,
            q2: 8,
            level3: Level3Discipline::Fcfs,
        };
        assert!(Policy::Mlfq(config).validate().is_err());
    }

    #[test]
    fn test_level3_quantum_checked_only_under_rr() {
        let fcfs_tail = MlfqConfig {
            q0: 1,
            q1: 2,
            q2: 4,
            level3: Level3Discipline::Fcfs,
        };
        assert!(Policy::Mlfq(fcfs_tail).validate().is_ok());

        let rr_tail = MlfqConfig {
            level3: Level3Discipline::RoundRobin { quantum: 0 },
            ..fcfs_tail
        };
        assert!(Policy::Mlfq(rr_tail).validate().is_err());
    }

    #[test]
    fn test_input_set_is_never_mutated() {
        let input = vec![
            Process::new("P1", 0, 3).unwrap(),
            Process::new("P2", 1, 2).unwrap(),
        ];
        let before = input.clone();
        simulate(&input, &Policy::Fcfs, 1).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_fresh_result_per_run() {
        let input = vec![Process::new("P1", 0, 2).unwrap()];
        let first = simulate(&input, &Policy::Fcfs, 0).unwrap();
        let second = simulate(&input, &Policy::Fcfs, 0).unwrap();
        assert_eq!(first, second);
    }
}
