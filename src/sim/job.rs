use serde::{Deserialize, Serialize};

use crate::core::state::{Priority, ProcessId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Job {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInstance {
    pub job: Job,
    pub completion_time: Ticks,
}

/// Builds a batch from parallel columns, numbering processes 1..=N in input order.
/// Extra entries in a longer column are ignored.
pub fn workload(arrivals: &[Ticks], bursts: &[Ticks], priorities: Option<&[Priority]>) -> Vec<Job> {
    arrivals
        .iter()
        .zip(bursts)
        .enumerate()
        .map(|(index, (&arrival, &burst))| {
            let job = Job::new(index as ProcessId + 1, arrival, burst);
            match priorities.and_then(|p| p.get(index)) {
                Some(&priority) => job.with_priority(priority),
                None => job,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_input_order() {
        let jobs = workload(&[3, 0], &[2, 7], Some(&[1, -4]));
        assert_eq!(
            jobs,
            vec![
                Job::new(1, 3, 2).with_priority(1),
                Job::new(2, 0, 7).with_priority(-4),
            ]
        );
    }

    #[test]
    fn priority_is_optional() {
        let jobs = workload(&[0], &[1], None);
        assert_eq!(jobs[0].priority, None);
    }
}
