use serde::Serialize;

use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    // Handed to the policy's ready queue
    Admitted {
        process: ProcessId,
    },
    Dispatched {
        process: ProcessId,
        start: Ticks,
        end: Ticks,
    },
    Completed {
        process: ProcessId,
        at: Ticks,
    },
    // Nothing runnable over [at, until)
    Idle {
        at: Ticks,
        until: Ticks,
    },
}
