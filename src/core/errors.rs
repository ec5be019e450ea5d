/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::data_structures::InlineString;
use super::types::Time;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors with serialization support
///
/// Validation and configuration failures are raised before any simulation
/// state is created; an invariant violation aborts the run without returning
/// a partial result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Invalid process {id}: {reason}")]
    #[diagnostic(
        code(simulation::invalid_process),
        help("Arrival time must be non-negative and burst time must be at least 1.")
    )]
    InvalidProcess {
        id: InlineString,
        reason: InlineString,
    },

    #[error("Duplicate process id {0}")]
    #[diagnostic(
        code(simulation::duplicate_process),
        help("Process ids must be unique within one simulation run.")
    )]
    DuplicateProcess(InlineString),

    #[error("Invalid parameter: {0}")]
    #[diagnostic(
        code(simulation::invalid_parameter),
        help("Time quanta must be positive; the context-switch delay may be zero.")
    )]
    InvalidParameter(InlineString),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(simulation::configuration),
        help("Select a policy (fcfs, sjf, srtf, rr, mlfq) and supply its required parameters.")
    )]
    Configuration(InlineString),

    #[error("Scheduler made no progress at time {time}: {reason}")]
    #[diagnostic(
        code(simulation::no_progress),
        help("This indicates a policy engine bug; the run was aborted to avoid looping forever.")
    )]
    NoProgress { time: Time, reason: InlineString },
}

impl SimulationError {
    /// Whether this error was raised before any simulation state existed
    pub fn is_pre_run(&self) -> bool {
        !matches!(self, Self::NoProgress { .. })
    }
}
