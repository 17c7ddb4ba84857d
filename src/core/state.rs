use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

use crate::sim::{GanttSegment, GanttTrace, Job};

// Position of a process in the run's input order; doubles as the tie-break key
pub type ProcessIdx = usize;
pub type ProcessId = u64;
pub type Ticks = u64;
pub type Priority = i64;

// Only `remaining` and the completion fields change, and only in `SimCtx::run_slice`
#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub index: ProcessIdx,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Option<Priority>,
    pub remaining: Ticks,
    pub completed: bool,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn from_job(index: ProcessIdx, job: &Job) -> Self {
        Self {
            id: job.id,
            index,
            arrival: job.arrival_time,
            burst: job.burst_time,
            priority: job.priority,
            remaining: job.burst_time,
            completed: false,
            completion_time: None,
        }
    }

    pub fn is_available(&self, now: Ticks) -> bool {
        self.arrival <= now && !self.completed
    }
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Rank<K> {
    pub key: K,
    pub index: ProcessIdx,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.index.cmp(&self.index))
    }
}

// Pops the smallest (key, index)
#[derive(Debug)]
pub struct RankedQueue<K: Ord> {
    tasks: KeyedPriorityQueue<ProcessIdx, Rank<K>>,
}

impl<K: Ord> RankedQueue<K> {
    pub fn new() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, index: ProcessIdx, key: K) {
        let previous = self.tasks.push(index, Rank { key, index });
        debug_assert!(
            previous.is_none(),
            "Process #{index} already present in ready queue"
        );
    }

    pub fn pop(&mut self) -> Option<ProcessIdx> {
        self.tasks.pop().map(|t| t.0)
    }
}

impl<K: Ord> Default for RankedQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct FifoQueue {
    tasks: VecDeque<ProcessIdx>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, index: ProcessIdx) {
        debug_assert!(
            !self.tasks.contains(&index),
            "Process #{index} already present in ready queue"
        );
        self.tasks.push_back(index);
    }

    pub fn pop_front(&mut self) -> Option<ProcessIdx> {
        self.tasks.pop_front()
    }
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub trace: GanttTrace,

    // Decremented upon completion
    outstanding: usize,
}

impl SimCtx {
    pub fn new(jobs: &[Job]) -> Self {
        let processes: Vec<Process> = jobs
            .iter()
            .enumerate()
            .map(|(index, job)| Process::from_job(index, job))
            .collect();

        Self {
            now: 0,
            outstanding: processes.len(),
            processes,
            trace: GanttTrace::new(),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, index: ProcessIdx) -> &Process {
        &self.processes[index]
    }

    pub fn all_completed(&self) -> bool {
        self.outstanding == 0
    }

    // Returns true if the process finished
    pub fn run_slice(&mut self, index: ProcessIdx, slice: Ticks) -> bool {
        let start = self.now;
        let end = start + slice;

        let process = &mut self.processes[index];
        debug_assert!(
            process.is_available(start),
            "Process {} dispatched while unavailable at t={start}",
            process.id
        );
        debug_assert!(
            slice > 0 && slice <= process.remaining,
            "Slice {slice} out of range for process {} with {} remaining",
            process.id,
            process.remaining
        );

        process.remaining -= slice;
        let finished = process.remaining == 0;
        if finished {
            process.completed = true;
            process.completion_time = Some(end);
        }

        self.trace.push(GanttSegment {
            process_id: process.id,
            start,
            end,
        });
        self.now = end;

        if finished {
            self.outstanding -= 1;
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_queue_pops_smallest_key_then_earliest_index() {
        let mut queue = RankedQueue::new();
        queue.push(2, 4u64);
        queue.push(0, 7);
        queue.push(1, 4);
        queue.push(3, 1);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn ranked_queue_handles_negative_priorities() {
        let mut queue: RankedQueue<Priority> = RankedQueue::new();
        queue.push(0, 0);
        queue.push(1, -3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(0));
    }

    #[test]
    fn fifo_queue_keeps_insertion_order() {
        let mut queue = FifoQueue::new();
        queue.push_back(2);
        queue.push_back(0);
        assert_eq!(queue.pop_front(), Some(2));
        assert_eq!(queue.pop_front(), Some(0));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn run_slice_moves_clock_and_completes() {
        let jobs = [Job::new(1, 0, 3)];
        let mut ctx = SimCtx::new(&jobs);

        assert!(!ctx.run_slice(0, 2));
        assert_eq!(ctx.now, 2);
        assert_eq!(ctx.process(0).remaining, 1);
        assert!(!ctx.all_completed());

        assert!(ctx.run_slice(0, 1));
        assert_eq!(ctx.process(0).completion_time, Some(3));
        assert!(ctx.all_completed());
        assert_eq!(ctx.trace.len(), 2);
    }
}
