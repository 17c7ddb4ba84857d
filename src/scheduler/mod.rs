pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::core::{
    Ticks,
    state::{ProcessIdx, SimCtx},
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub process: ProcessIdx,
    pub slice: Ticks,
}

// `enable` runs once per arrival, `dispatch` at every decision point and
// `stopping` after each slice
pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn enable(&mut self, ctx: &SimCtx, process: ProcessIdx);

    // None leaves the CPU idle for one tick
    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch>;

    fn stopping(&mut self, _ctx: &SimCtx, _process: ProcessIdx, _runnable: bool) {}
}
