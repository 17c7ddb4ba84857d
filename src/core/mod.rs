pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SimEvent;
pub use observer::{Observer, RunStats};
pub use state::{
    FifoQueue, Priority, Process, ProcessId, ProcessIdx, Rank, RankedQueue, SimCtx, Ticks,
};
