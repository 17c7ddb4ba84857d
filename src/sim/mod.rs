pub mod driver;
pub mod job;
pub mod metrics;
pub mod trace;

pub use driver::{Algorithm, Outcome, Sim, TraceOptions};
pub use job::{Job, JobInstance, workload};
pub use metrics::{Averages, Metrics, ProcessMetrics};
pub use trace::{GanttSegment, GanttTrace};
