/*!
 * Timeline Accumulator
 * Builds and merges contiguous execution/idle/context-switch intervals
 */

use super::process::ProcessId;
use crate::core::{QueueLevel, Time};
use serde::{Deserialize, Serialize};

/// What occupied the CPU during an interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// A process executed, optionally tagged with its MLFQ level
    Process {
        id: ProcessId,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        queue: Option<QueueLevel>,
    },
    /// No process was ready
    Idle,
    /// The fixed context-switch delay
    ContextSwitch,
}

impl Segment {
    /// Shorthand for an untagged process segment
    pub fn process(id: impl Into<ProcessId>) -> Self {
        Self::Process {
            id: id.into(),
            queue: None,
        }
    }

    /// Shorthand for an MLFQ-tagged process segment
    pub fn process_at_level(id: impl Into<ProcessId>, level: QueueLevel) -> Self {
        Self::Process {
            id: id.into(),
            queue: Some(level),
        }
    }
}

/// One merged interval of the Gantt timeline
///
/// Entries are time-ordered and non-overlapping; contiguous entries with an
/// identical segment are merged, so the list is a minimal run-length
/// encoding. Downstream consumers rely on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GanttEntry {
    pub segment: Segment,
    pub start: Time,
    pub end: Time,
}

impl GanttEntry {
    #[inline(always)]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Append one unit at `start`, extending the last entry when it continues
/// the same segment
///
/// This is the single source of run-length merging; every policy and the
/// idle/context-switch paths go through it.
pub fn append_or_extend(gantt: &mut Vec<GanttEntry>, segment: Segment, start: Time) {
    if let Some(last) = gantt.last_mut() {
        if last.segment == segment && last.end == start {
            last.end += 1;
            return;
        }
    }
    gantt.push(GanttEntry {
        segment,
        start,
        end: start + 1,
    });
}

/// Coalesce adjacent entries with identical segments
///
/// Running this on an already-merged list is a no-op (fixed point).
pub fn merge(entries: &[GanttEntry]) -> Vec<GanttEntry> {
    let mut merged: Vec<GanttEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(last) = merged.last_mut() {
            if last.segment == entry.segment && last.end == entry.start {
                last.end = entry.end;
                continue;
            }
        }
        merged.push(entry.clone());
    }
    merged
}

/// Total time spent executing processes (excludes idle and context switches)
pub fn busy_time(gantt: &[GanttEntry]) -> Time {
    gantt
        .iter()
        .filter(|e| matches!(e.segment, Segment::Process { .. }))
        .map(GanttEntry::duration)
        .sum()
}
