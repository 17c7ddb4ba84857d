use super::{Dispatch, ProcessIdx, Scheduler, SimCtx};
use crate::core::{Priority, RankedQueue};

// Lower value runs first. Every process must carry a priority; `Algorithm::run`
// rejects batches that don't
#[derive(Debug, Default)]
pub struct PriorityScheduler {
    ready: RankedQueue<Priority>,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn enable(&mut self, ctx: &SimCtx, process: ProcessIdx) {
        let priority = ctx
            .process(process)
            .priority
            .expect("Priority run admitted a process without a priority");
        self.ready.push(process, priority);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let process = self.ready.pop()?;
        Some(Dispatch {
            process,
            slice: ctx.process(process).remaining,
        })
    }
}
