use log::trace;
use serde::Serialize;

use super::{event::SimEvent, state::SimCtx};
use crate::core::ProcessId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub steps: u64,
    pub idle_ticks: u64,
    pub dispatches: u64,
    // Dispatches that handed the CPU to a different process than the last one
    pub context_switches: u64,
}

#[derive(Debug, Default)]
pub struct Observer {
    stats: RunStats,
    last_dispatched: Option<ProcessId>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, ctx: &SimCtx, events: &[SimEvent]) {
        self.stats.steps += 1;

        for event in events {
            trace!("t={} {:?}", ctx.now, event);

            match *event {
                SimEvent::Idle { at, until } => self.stats.idle_ticks += until - at,
                SimEvent::Dispatched { process, .. } => {
                    self.stats.dispatches += 1;
                    if self.last_dispatched.is_some_and(|last| last != process) {
                        self.stats.context_switches += 1;
                    }
                    self.last_dispatched = Some(process);
                }
                SimEvent::Admitted { .. } | SimEvent::Completed { .. } => {}
            }
        }

        for process in &ctx.processes {
            debug_assert!(
                process.remaining <= process.burst,
                "Process {} has {} remaining out of a {} burst",
                process.id,
                process.remaining,
                process.burst
            );
            debug_assert_eq!(
                process.completed,
                process.remaining == 0,
                "Process {} completion flag out of sync with remaining burst",
                process.id
            );
        }

        if let [.., prev, last] = ctx.trace.segments() {
            debug_assert!(
                prev.end <= last.start,
                "Segments {prev:?} and {last:?} overlap"
            );
        }
        if let Some(last) = ctx.trace.segments().last() {
            debug_assert!(
                last.end <= ctx.now,
                "Segment {last:?} ends after the clock at t={}",
                ctx.now
            );
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}
