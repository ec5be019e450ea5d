/*!
 * Core Types
 * Common types used across the simulator
 */

/// Simulated time in whole units since the start of a run
pub type Time = u64;

/// MLFQ priority level (0 = highest, 3 = lowest)
pub type QueueLevel = u8;

/// Number of MLFQ priority levels
pub const MLFQ_LEVELS: usize = 4;

/// Lowest-priority MLFQ level
pub const MLFQ_LAST_LEVEL: QueueLevel = (MLFQ_LEVELS - 1) as QueueLevel;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimulationError>;
