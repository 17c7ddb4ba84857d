use super::{Dispatch, ProcessIdx, Scheduler, SimCtx};
use crate::core::{RankedQueue, Ticks};

#[derive(Debug, Default)]
pub struct FcfsScheduler {
    ready: RankedQueue<Ticks>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn enable(&mut self, ctx: &SimCtx, process: ProcessIdx) {
        self.ready.push(process, ctx.process(process).arrival);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let process = self.ready.pop()?;
        Some(Dispatch {
            process,
            slice: ctx.process(process).remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Job;

    #[test]
    fn earlier_arrival_wins_regardless_of_input_order() {
        let jobs = [Job::new(1, 4, 2), Job::new(2, 1, 3), Job::new(3, 1, 1)];
        let ctx = SimCtx::new(&jobs);
        let mut fcfs = FcfsScheduler::new();
        for process in 0..jobs.len() {
            fcfs.enable(&ctx, process);
        }

        let order: Vec<_> = std::iter::from_fn(|| fcfs.dispatch(&ctx))
            .map(|d| (d.process, d.slice))
            .collect();
        assert_eq!(order, vec![(1, 3), (2, 1), (0, 2)]);
    }
}
