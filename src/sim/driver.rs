use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU64};

use super::{
    job::{Job, JobInstance},
    metrics::Metrics,
    trace::GanttTrace,
};
use crate::{
    core::{RunStats, SimEvent, driver::SchedCore, state::ProcessIdx},
    error::{Error, Result},
    scheduler::{
        FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler,
    },
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub jobs: Vec<Job>,
    // Process indices ordered by (arrival, input position)
    arrival_order: Vec<ProcessIdx>,
    arrival_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    // Crate-only: `Algorithm::run` checks the policy's preconditions first
    pub(crate) fn new(jobs: &[Job], scheduler: S) -> Self {
        let mut arrival_order: Vec<ProcessIdx> = (0..jobs.len()).collect();
        arrival_order.sort_by_key(|&index| (jobs[index].arrival_time, index));

        Self {
            core: SchedCore::new(jobs, scheduler),
            jobs: jobs.to_vec(),
            arrival_order,
            arrival_cursor: 0,
        }
    }

    pub fn step(&mut self) -> Vec<SimEvent> {
        let events = self.handle_arrivals();
        let next_arrival = self
            .arrival_order
            .get(self.arrival_cursor)
            .map(|&index| self.jobs[index].arrival_time);
        self.core.tick(events, next_arrival)
    }

    fn handle_arrivals(&mut self) -> Vec<SimEvent> {
        let now = self.core.now();
        let jobs = &self.jobs;
        // This will be contiguous, since arrival_order is sorted
        let arrived = self.arrival_order[self.arrival_cursor..]
            .iter()
            .take_while(|&&index| jobs[index].arrival_time <= now)
            .count();

        let start = self.arrival_cursor;
        let mut batch = self.arrival_order[start..start + arrived].to_vec();
        self.arrival_cursor += arrived;
        // Everything admitted at one decision point enters in input order
        batch.sort_unstable();

        let mut events = Vec::with_capacity(batch.len());
        for index in batch {
            self.core.wake_process(index, &mut events);
        }
        events
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    pub fn run_to_completion(&mut self) {
        while !self.all_jobs_completed() {
            self.step();
        }
    }

    pub fn into_outcome(self) -> Outcome {
        debug_assert!(self.all_jobs_completed(), "Outcome taken before the run finished");

        let stats = self.core.stats();
        let ctx = self.core.ctx;
        let completed: Vec<JobInstance> = self
            .jobs
            .into_iter()
            .zip(&ctx.processes)
            .filter_map(|(job, process)| {
                process.completion_time.map(|completion_time| JobInstance {
                    job,
                    completion_time,
                })
            })
            .collect();

        Outcome {
            algorithm: self.core.scheduler.name(),
            metrics: Metrics::compute(&completed),
            trace: ctx.trace,
            stats,
        }
    }
}

fn simulate<S: Scheduler>(jobs: &[Job], scheduler: S) -> Outcome {
    debug!(
        "running {} over {} process(es)",
        scheduler.name(),
        jobs.len()
    );
    let mut sim = Sim::new(jobs, scheduler);
    sim.run_to_completion();
    let outcome = sim.into_outcome();
    debug!(
        "{} finished at t={} after {} dispatch(es), {} idle tick(s)",
        outcome.algorithm,
        outcome.trace.makespan(),
        outcome.stats.dispatches,
        outcome.stats.idle_ticks
    );
    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    SjfPreemptive,
    RoundRobin { quantum: i64 },
    Priority,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::SjfPreemptive => "sjf-preemptive",
            Algorithm::RoundRobin { .. } => "round-robin",
            Algorithm::Priority => "priority",
        }
    }

    pub fn run(&self, jobs: &[Job]) -> Result<Outcome> {
        let outcome = match *self {
            Algorithm::Fcfs => simulate(jobs, FcfsScheduler::new()),
            Algorithm::Sjf => simulate(jobs, SjfScheduler::non_preemptive()),
            Algorithm::SjfPreemptive => simulate(jobs, SjfScheduler::preemptive()),
            Algorithm::RoundRobin { quantum } => {
                let slice = u64::try_from(quantum)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .ok_or(Error::NonPositiveQuantum(quantum))?;
                simulate(jobs, RoundRobinScheduler::new(slice))
            }
            Algorithm::Priority => {
                if let Some(job) = jobs.iter().find(|job| job.priority.is_none()) {
                    return Err(Error::MissingPriority(job.id));
                }
                simulate(jobs, PriorityScheduler::new())
            }
        };
        Ok(outcome)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => write!(f, "round-robin (quantum {quantum})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceOptions {
    // Merge back-to-back segments of the same process
    pub coalesce: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub algorithm: &'static str,
    pub trace: GanttTrace,
    pub metrics: Metrics,
    pub stats: RunStats,
}

impl Outcome {
    pub fn with_options(mut self, options: TraceOptions) -> Self {
        if options.coalesce {
            self.trace = self.trace.coalesced();
        }
        self
    }
}
