use super::{
    event::SimEvent,
    observer::{Observer, RunStats},
    state::{ProcessIdx, SimCtx, Ticks},
};
use crate::{
    scheduler::{Dispatch, Scheduler},
    sim::Job,
};

// One tick() is one decision point: either a whole slice runs, or the CPU
// idles until the next arrival.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub(crate) fn new(jobs: &[Job], scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(jobs),
            scheduler,
            observer: Observer::new(),
        }
    }

    // Make a newly arrived process visible to the policy
    pub fn wake_process(&mut self, process: ProcessIdx, events: &mut Vec<SimEvent>) {
        debug_assert!(
            self.ctx.process(process).is_available(self.ctx.now),
            "Process #{process} woken before its arrival"
        );
        self.scheduler.enable(&self.ctx, process);
        events.push(SimEvent::Admitted {
            process: self.ctx.process(process).id,
        });
    }

    // `next_arrival` is the earliest arrival not yet woken, if any
    pub fn tick(
        &mut self,
        mut events: Vec<SimEvent>,
        next_arrival: Option<Ticks>,
    ) -> Vec<SimEvent> {
        match self.scheduler.dispatch(&self.ctx) {
            Some(Dispatch { process, slice }) => {
                let start = self.ctx.now;
                let finished = self.ctx.run_slice(process, slice);
                let id = self.ctx.process(process).id;

                events.push(SimEvent::Dispatched {
                    process: id,
                    start,
                    end: self.ctx.now,
                });
                if finished {
                    events.push(SimEvent::Completed {
                        process: id,
                        at: self.ctx.now,
                    });
                }

                self.scheduler.stopping(&self.ctx, process, !finished);
            }
            None => {
                let at = self.ctx.now;
                // Nothing changes before the next arrival, so skip straight to it
                let until = next_arrival.filter(|&t| t > at).unwrap_or(at + 1);
                events.push(SimEvent::Idle { at, until });
                self.ctx.advance_time(until - at);
            }
        }

        self.observer.observe(&self.ctx, &events);
        events
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn stats(&self) -> RunStats {
        self.observer.stats()
    }
}
