pub mod core;
pub mod error;
pub mod input;
pub mod scheduler;
pub mod sim;

pub use crate::core::{RunStats, SimEvent};
pub use error::{Error, Result};
pub use input::{RawInput, Request};
pub use scheduler::Scheduler;
pub use sim::{
    Algorithm, GanttSegment, GanttTrace, Job, Metrics, Outcome, Sim, TraceOptions, workload,
};
