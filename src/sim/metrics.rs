use average::{Estimate, Mean};
use serde::Serialize;

use super::job::JobInstance;
use crate::core::state::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub process_id: ProcessId,
    pub completion_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
}

// Rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub waiting_time: f64,
    pub turnaround_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub processes: Vec<ProcessMetrics>,
    // None when there were no processes to average over
    pub averages: Option<Averages>,
}

impl Metrics {
    // Rows come back ordered by process id
    pub fn compute(completed: &[JobInstance]) -> Self {
        let mut processes: Vec<ProcessMetrics> = completed
            .iter()
            .map(|instance| {
                let job = &instance.job;
                debug_assert!(
                    instance.completion_time >= job.arrival_time + job.burst_time,
                    "Process {} completed at {} before it could have",
                    job.id,
                    instance.completion_time
                );
                let turnaround_time = instance.completion_time.saturating_sub(job.arrival_time);
                ProcessMetrics {
                    process_id: job.id,
                    completion_time: instance.completion_time,
                    waiting_time: turnaround_time.saturating_sub(job.burst_time),
                    turnaround_time,
                }
            })
            .collect();
        processes.sort_by_key(|m| m.process_id);

        let averages = (!processes.is_empty()).then(|| Averages {
            waiting_time: round2(avg(processes.iter().map(|m| m.waiting_time as f64))),
            turnaround_time: round2(avg(processes.iter().map(|m| m.turnaround_time as f64))),
        });

        Self {
            processes,
            averages,
        }
    }

    pub fn waiting_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|m| m.waiting_time).collect()
    }

    pub fn turnaround_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|m| m.turnaround_time).collect()
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
