use serde::{Deserialize, Serialize};

use crate::{
    core::{ProcessId, Ticks},
    error::{Error, Result},
    sim::{Algorithm, Job, Outcome, TraceOptions, workload},
};

#[derive(Debug, Clone, Default)]
pub struct RawInput<'a> {
    // Falls back to the number of arrival times
    pub count: Option<usize>,
    pub arrivals: &'a str,
    pub bursts: &'a str,
    pub algorithm: &'a str,
    pub quantum: Option<&'a str>,
    pub priorities: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub jobs: Vec<Job>,
    #[serde(flatten)]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub options: TraceOptions,
}

impl Request {
    // Stops at the first problem found
    pub fn parse(raw: &RawInput<'_>) -> Result<Self> {
        let quantum = raw
            .quantum
            .map(|q| parse_number("quantum", q))
            .transpose()?;
        let algorithm = parse_algorithm(raw.algorithm, quantum)?;

        let arrivals = parse_list("arrival times", raw.arrivals)?;
        let bursts = parse_list("burst times", raw.bursts)?;
        let count = raw.count.unwrap_or(arrivals.len());

        let priorities = match algorithm {
            Algorithm::Priority => {
                let priorities = parse_list("priorities", raw.priorities.unwrap_or(""))?;
                check_len("priorities", count, priorities.len())?;
                Some(priorities)
            }
            _ => None,
        };
        check_len("arrival times", count, arrivals.len())?;
        check_len("burst times", count, bursts.len())?;

        let arrivals = arrivals
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Ticks::try_from(value).map_err(|_| Error::NegativeArrival {
                    process: process_id(index),
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let bursts = bursts
            .iter()
            .enumerate()
            .map(|(index, &value)| match Ticks::try_from(value) {
                Ok(burst) if burst > 0 => Ok(burst),
                _ => Err(Error::NonPositiveBurst {
                    process: process_id(index),
                    value,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            jobs: workload(&arrivals, &bursts, priorities.as_deref()),
            algorithm,
            options: TraceOptions::default(),
        })
    }

    // For requests that skipped `parse`, e.g. ones read from a file
    pub fn validate(&self) -> Result<()> {
        for (index, job) in self.jobs.iter().enumerate() {
            let expected = process_id(index);
            if job.id != expected {
                return Err(Error::UnexpectedProcessId {
                    expected,
                    found: job.id,
                });
            }
            if job.burst_time == 0 {
                return Err(Error::NonPositiveBurst {
                    process: job.id,
                    value: 0,
                });
            }
        }
        Ok(())
    }

    pub fn run(&self) -> Result<Outcome> {
        Ok(self.algorithm.run(&self.jobs)?.with_options(self.options))
    }
}

pub fn parse_algorithm(name: &str, quantum: Option<i64>) -> Result<Algorithm> {
    match name.trim() {
        "fcfs" => Ok(Algorithm::Fcfs),
        "sjf" => Ok(Algorithm::Sjf),
        "sjf-preemptive" => Ok(Algorithm::SjfPreemptive),
        "priority" => Ok(Algorithm::Priority),
        "round-robin" => match quantum {
            None => Err(Error::MissingQuantum),
            Some(quantum) if quantum <= 0 => Err(Error::NonPositiveQuantum(quantum)),
            Some(quantum) => Ok(Algorithm::RoundRobin { quantum }),
        },
        other => Err(Error::UnknownAlgorithm(other.to_owned())),
    }
}

// A blank field is an empty list
pub fn parse_list(field: &'static str, raw: &str) -> Result<Vec<i64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(|item| parse_number(field, item)).collect()
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| Error::InvalidNumber {
        field,
        value: trimmed.to_owned(),
    })
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

fn process_id(index: usize) -> ProcessId {
    index as ProcessId + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'a>(arrivals: &'a str, bursts: &'a str, algorithm: &'a str) -> RawInput<'a> {
        RawInput {
            arrivals,
            bursts,
            algorithm,
            ..RawInput::default()
        }
    }

    #[test]
    fn parses_lists_with_spaces() {
        assert_eq!(parse_list("bursts", " 5, 3 ,8"), Ok(vec![5, 3, 8]));
        assert_eq!(parse_list("bursts", "  "), Ok(vec![]));
    }

    #[test]
    fn rejects_non_numeric_entries() {
        assert_eq!(
            parse_list("arrival times", "0,x"),
            Err(Error::InvalidNumber {
                field: "arrival times",
                value: "x".to_owned()
            })
        );
    }

    #[test]
    fn builds_priority_request() {
        let request = Request::parse(&RawInput {
            priorities: Some("3,1,2"),
            ..raw("0,1,2", "5,3,8", "priority")
        })
        .unwrap();

        assert_eq!(request.algorithm, Algorithm::Priority);
        assert_eq!(request.jobs[1], Job::new(2, 1, 3).with_priority(1));
    }

    #[test]
    fn round_robin_quantum_is_checked_first() {
        let mut input = raw("0,1", "5", "round-robin");
        assert_eq!(Request::parse(&input), Err(Error::MissingQuantum));

        input.quantum = Some("0");
        assert_eq!(Request::parse(&input), Err(Error::NonPositiveQuantum(0)));
    }

    #[test]
    fn priority_count_must_match() {
        let input = RawInput {
            priorities: Some("1"),
            ..raw("0,1", "5,3", "priority")
        };
        assert_eq!(
            Request::parse(&input),
            Err(Error::LengthMismatch {
                field: "priorities",
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn explicit_count_must_match_lists() {
        let input = RawInput {
            count: Some(3),
            ..raw("0,1", "5,3", "fcfs")
        };
        assert_eq!(
            Request::parse(&input),
            Err(Error::LengthMismatch {
                field: "arrival times",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            Request::parse(&raw("0,-1", "5,3", "fcfs")),
            Err(Error::NegativeArrival { process: 2, value: -1 })
        );
        assert_eq!(
            Request::parse(&raw("0,1", "5,0", "sjf")),
            Err(Error::NonPositiveBurst { process: 2, value: 0 })
        );
    }

    #[test]
    fn deserialized_request_is_revalidated() {
        let request: Request = serde_json::from_str(
            r#"{
                "jobs": [
                    {"id": 1, "arrival_time": 0, "burst_time": 5},
                    {"id": 2, "arrival_time": 1, "burst_time": 0}
                ],
                "algorithm": "round-robin",
                "quantum": 4
            }"#,
        )
        .unwrap();

        assert_eq!(request.algorithm, Algorithm::RoundRobin { quantum: 4 });
        assert!(!request.options.coalesce);
        assert_eq!(
            request.validate(),
            Err(Error::NonPositiveBurst { process: 2, value: 0 })
        );
    }

    #[test]
    fn deserialized_ids_must_follow_input_order() {
        let request: Request = serde_json::from_str(
            r#"{
                "jobs": [
                    {"id": 1, "arrival_time": 0, "burst_time": 2},
                    {"id": 1, "arrival_time": 0, "burst_time": 3}
                ],
                "algorithm": "fcfs"
            }"#,
        )
        .unwrap();
        assert_eq!(
            request.validate(),
            Err(Error::UnexpectedProcessId {
                expected: 2,
                found: 1
            })
        );

        let mut request = request;
        request.jobs[0].id = 0;
        assert_eq!(
            request.validate(),
            Err(Error::UnexpectedProcessId {
                expected: 1,
                found: 0
            })
        );

        request.jobs[0].id = 1;
        request.jobs[1].id = 2;
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        assert_eq!(
            parse_algorithm("lottery", None),
            Err(Error::UnknownAlgorithm("lottery".to_owned()))
        );
    }

    #[test]
    fn empty_request_runs_to_an_empty_outcome() {
        let outcome = Request::parse(&raw("", "", "sjf")).unwrap().run().unwrap();
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.metrics.averages, None);
    }
}
