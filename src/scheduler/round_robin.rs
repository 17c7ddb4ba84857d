use std::{cmp, num::NonZeroU64};

use super::{Dispatch, ProcessIdx, Scheduler, SimCtx};
use crate::core::FifoQueue;

#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
    ready: FifoQueue,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self {
            quantum,
            ready: FifoQueue::new(),
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn enable(&mut self, _ctx: &SimCtx, process: ProcessIdx) {
        self.ready.push_back(process);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let process = self.ready.pop_front()?;
        let slice = cmp::min(self.quantum.get(), ctx.process(process).remaining);
        Some(Dispatch { process, slice })
    }

    fn stopping(&mut self, _ctx: &SimCtx, process: ProcessIdx, runnable: bool) {
        if runnable {
            self.ready.push_back(process);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Job;

    #[test]
    fn slice_is_capped_by_remaining_burst() {
        let jobs = [Job::new(1, 0, 5), Job::new(2, 0, 2)];
        let ctx = SimCtx::new(&jobs);
        let mut rr = RoundRobinScheduler::new(NonZeroU64::new(3).unwrap());
        rr.enable(&ctx, 0);
        rr.enable(&ctx, 1);

        assert_eq!(rr.dispatch(&ctx), Some(Dispatch { process: 0, slice: 3 }));
        assert_eq!(rr.dispatch(&ctx), Some(Dispatch { process: 1, slice: 2 }));
        assert_eq!(rr.dispatch(&ctx), None);
    }

    #[test]
    fn unfinished_process_goes_to_the_tail() {
        let jobs = [Job::new(1, 0, 5), Job::new(2, 0, 2)];
        let mut ctx = SimCtx::new(&jobs);
        let mut rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());
        rr.enable(&ctx, 0);
        rr.enable(&ctx, 1);

        let first = rr.dispatch(&ctx).unwrap();
        let finished = ctx.run_slice(first.process, first.slice);
        rr.stopping(&ctx, first.process, !finished);

        assert_eq!(rr.dispatch(&ctx).map(|d| d.process), Some(1));
        assert_eq!(rr.dispatch(&ctx).map(|d| d.process), Some(0));
    }
}
