use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

use crate::core::state::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GanttSegment {
    pub process_id: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
}

impl GanttSegment {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl fmt::Display for GanttSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}: {} - {}", self.process_id, self.start, self.end)
    }
}

/// Ordered execution intervals of one run. Gaps between segments are idle time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GanttTrace {
    segments: Vec<GanttSegment>,
}

impl GanttTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: GanttSegment) {
        debug_assert!(
            segment.start < segment.end,
            "Empty segment {segment:?} pushed to trace"
        );
        debug_assert!(
            self.segments.last().is_none_or(|last| last.end <= segment.start),
            "Segment {segment:?} overlaps the previous one"
        );
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &GanttSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // End of the last segment, 0 for an empty trace
    pub fn makespan(&self) -> Ticks {
        self.segments.last().map_or(0, |s| s.end)
    }

    // Merges back-to-back segments of the same process
    pub fn coalesced(&self) -> GanttTrace {
        let mut segments: Vec<GanttSegment> = Vec::with_capacity(self.segments.len());
        for &segment in &self.segments {
            match segments.last_mut() {
                Some(last)
                    if last.process_id == segment.process_id && last.end == segment.start =>
                {
                    last.end = segment.end;
                }
                _ => segments.push(segment),
            }
        }
        GanttTrace { segments }
    }

    pub fn service_by_process(&self) -> FxHashMap<ProcessId, Ticks> {
        let mut service = FxHashMap::default();
        for segment in &self.segments {
            *service.entry(segment.process_id).or_insert(0) += segment.duration();
        }
        service
    }

    // `[start, end)` pairs up to the makespan
    pub fn idle_gaps(&self) -> Vec<(Ticks, Ticks)> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for segment in &self.segments {
            if segment.start > cursor {
                gaps.push((cursor, segment.start));
            }
            cursor = segment.end;
        }
        gaps
    }
}

impl<'a> IntoIterator for &'a GanttTrace {
    type Item = &'a GanttSegment;
    type IntoIter = std::slice::Iter<'a, GanttSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl FromIterator<GanttSegment> for GanttTrace {
    fn from_iter<I: IntoIterator<Item = GanttSegment>>(iter: I) -> Self {
        let mut trace = GanttTrace::new();
        for segment in iter {
            trace.push(segment);
        }
        trace
    }
}

impl fmt::Display for GanttTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            writeln!(f, "{segment}")?;
        }
        Ok(())
    }
}
