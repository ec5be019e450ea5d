/*!
 * Core Module
 * Shared types, errors, and data structures
 */

pub mod data_structures;
pub mod errors;
pub mod types;

pub use data_structures::InlineString;
pub use errors::SimulationError;
pub use types::{QueueLevel, SimResult, Time, MLFQ_LAST_LEVEL, MLFQ_LEVELS};
