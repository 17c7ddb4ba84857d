use super::{Dispatch, ProcessIdx, Scheduler, SimCtx};
use crate::core::{RankedQueue, Ticks};

// Keyed on remaining burst. The preemptive variant hands out one tick at a time
// and re-queues the process, so the choice is re-made every tick
#[derive(Debug)]
pub struct SjfScheduler {
    ready: RankedQueue<Ticks>,
    preemptive: bool,
}

impl SjfScheduler {
    pub fn non_preemptive() -> Self {
        Self {
            ready: RankedQueue::new(),
            preemptive: false,
        }
    }

    pub fn preemptive() -> Self {
        Self {
            ready: RankedQueue::new(),
            preemptive: true,
        }
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        if self.preemptive { "sjf-preemptive" } else { "sjf" }
    }

    fn enable(&mut self, ctx: &SimCtx, process: ProcessIdx) {
        self.ready.push(process, ctx.process(process).remaining);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let process = self.ready.pop()?;
        let slice = if self.preemptive {
            1
        } else {
            ctx.process(process).remaining
        };
        Some(Dispatch { process, slice })
    }

    fn stopping(&mut self, ctx: &SimCtx, process: ProcessIdx, runnable: bool) {
        if runnable {
            self.ready.push(process, ctx.process(process).remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Job;

    fn enabled(jobs: &[Job], mut sjf: SjfScheduler) -> (SimCtx, SjfScheduler) {
        let ctx = SimCtx::new(jobs);
        for process in 0..jobs.len() {
            sjf.enable(&ctx, process);
        }
        (ctx, sjf)
    }

    #[test]
    fn tie_goes_to_earlier_input_position() {
        let jobs = [Job::new(1, 0, 6), Job::new(2, 0, 3), Job::new(3, 0, 3)];
        let (ctx, mut sjf) = enabled(&jobs, SjfScheduler::non_preemptive());

        let first = sjf.dispatch(&ctx).unwrap();
        assert_eq!(first, Dispatch { process: 1, slice: 3 });
    }

    #[test]
    fn preemptive_grants_single_ticks_and_requeues() {
        let jobs = [Job::new(1, 0, 2)];
        let (mut ctx, mut sjf) = enabled(&jobs, SjfScheduler::preemptive());
        assert_eq!(sjf.name(), "sjf-preemptive");

        let dispatch = sjf.dispatch(&ctx).unwrap();
        assert_eq!(dispatch.slice, 1);
        let finished = ctx.run_slice(dispatch.process, dispatch.slice);
        sjf.stopping(&ctx, dispatch.process, !finished);

        assert!(!finished);
        assert_eq!(sjf.dispatch(&ctx), Some(Dispatch { process: 0, slice: 1 }));
    }
}
