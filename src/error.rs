use std::fmt;

use crate::core::ProcessId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NonPositiveQuantum(i64),
    MissingPriority(ProcessId),
    MissingQuantum,
    UnknownAlgorithm(String),
    InvalidNumber {
        field: &'static str,
        value: String,
    },
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    NegativeArrival {
        process: ProcessId,
        value: i64,
    },
    NonPositiveBurst {
        process: ProcessId,
        value: i64,
    },
    // Ids must run 1..=N in input order
    UnexpectedProcessId {
        expected: ProcessId,
        found: ProcessId,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonPositiveQuantum(quantum) => {
                write!(f, "quantum must be a positive number of ticks, got {quantum}")
            }
            Error::MissingPriority(process) => write!(f, "process {process} has no priority"),
            Error::MissingQuantum => f.write_str("round-robin requires a quantum"),
            Error::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm `{name}` \
                 (expected fcfs, sjf, sjf-preemptive, round-robin or priority)"
            ),
            Error::InvalidNumber { field, value } => {
                write!(f, "`{value}` in {field} is not a valid integer")
            }
            Error::LengthMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "number of {field} ({found}) should match the number of processes ({expected})"
            ),
            Error::NegativeArrival { process, value } => {
                write!(f, "process {process} has negative arrival time {value}")
            }
            Error::NonPositiveBurst { process, value } => {
                write!(f, "process {process} needs a positive burst time, got {value}")
            }
            Error::UnexpectedProcessId { expected, found } => {
                write!(f, "expected process id {expected} at this position, got {found}")
            }
        }
    }
}

impl std::error::Error for Error {}
