/*!
 * Frame Log
 * Ordered, replayable snapshots of simulation state
 */

use super::process::{Process, ProcessId};
use super::timeline::GanttEntry;
use crate::core::Time;
use serde::{Deserialize, Serialize};

/// One immutable snapshot of the simulation
///
/// Frames hold deep copies: a later mutation of the live process set never
/// retroactively alters an already-logged frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Frame {
    pub time: Time,
    pub processes: Vec<Process>,
    pub gantt: Vec<GanttEntry>,
    pub running: Option<ProcessId>,
    pub explanation: String,
}

/// Append-only, ordered sequence of frames for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLog {
    frames: Vec<Frame>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Open a stepwise cursor over the completed log
    pub fn replay(&self) -> Replay<'_> {
        Replay {
            log: self,
            cursor: 0,
        }
    }
}

/// Pure, non-mutating cursor over a completed [`FrameLog`]
///
/// Navigation never re-enters the engine; the log is computed eagerly and in
/// full before any consumer inspects it.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    log: &'a FrameLog,
    cursor: usize,
}

impl<'a> Replay<'a> {
    /// Frame under the cursor
    pub fn current(&self) -> Option<&'a Frame> {
        self.log.get(self.cursor)
    }

    /// Step forward; stays on the last frame at the end
    pub fn next(&mut self) -> Option<&'a Frame> {
        if self.cursor + 1 < self.log.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Step backward; stays on the first frame at the start
    pub fn prev(&mut self) -> Option<&'a Frame> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Jump to an absolute frame index (clamped to the log)
    pub fn seek(&mut self, index: usize) -> Option<&'a Frame> {
        self.cursor = index.min(self.log.len().saturating_sub(1));
        self.current()
    }

    /// Jump to the final frame
    pub fn to_end(&mut self) -> Option<&'a Frame> {
        self.seek(self.log.len().saturating_sub(1))
    }

    #[inline(always)]
    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    #[inline(always)]
    pub fn at_end(&self) -> bool {
        self.log.is_empty() || self.cursor == self.log.len() - 1
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_times(times: &[Time]) -> FrameLog {
        let mut log = FrameLog::new();
        for &t in times {
            log.push(Frame {
                time: t,
                processes: Vec::new(),
                gantt: Vec::new(),
                running: None,
                explanation: format!("t={}", t),
            });
        }
        log
    }

    #[test]
    fn test_replay_clamps_at_both_ends() {
        let log = log_with_times(&[0, 1, 2]);
        let mut replay = log.replay();
        assert!(replay.at_start());
        assert_eq!(replay.prev().unwrap().time, 0);
        replay.next();
        replay.next();
        assert!(replay.at_end());
        assert_eq!(replay.next().unwrap().time, 2);
    }

    #[test]
    fn test_seek_and_to_end() {
        let log = log_with_times(&[0, 1, 2, 3]);
        let mut replay = log.replay();
        assert_eq!(replay.seek(2).unwrap().time, 2);
        assert_eq!(replay.seek(99).unwrap().time, 3);
        replay.seek(0);
        assert_eq!(replay.to_end().unwrap().time, 3);
    }

    #[test]
    fn test_empty_log_replay() {
        let log = FrameLog::new();
        let mut replay = log.replay();
        assert!(replay.current().is_none());
        assert!(replay.next().is_none());
        assert!(replay.at_end());
    }
}
