/*!
 * Scheduling Simulator Library
 * Deterministic CPU scheduling policies with replayable frame logs
 */

pub mod config;
pub mod core;
pub mod metrics;
pub mod policy;
pub mod sim;

// Re-exports
pub use crate::config::{MlfqRequest, ProcessRequest, SimulationRequest, SimulationSpec};
pub use crate::core::{InlineString, QueueLevel, SimResult, SimulationError, Time};
pub use crate::metrics::{finalize, MetricsSummary, ProcessMetrics};
pub use crate::policy::{simulate, Level3Discipline, MlfqConfig, Policy};
pub use crate::sim::{
    Frame, FrameLog, GanttEntry, Process, ProcessId, Replay, Segment, SimulationResult,
};
