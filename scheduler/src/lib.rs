//! A CPU scheduling simulation library.
//!
//! This library simulates scheduling policies over a fixed set of processes
//! and reports the execution timeline with per-process waiting and
//! turnaround times.
//!
//! Every entry point is a pure function: the same process set always
//! yields the same [`Schedule`].

mod error;
mod metrics;
mod policy;
mod process;
mod scheduler;
mod simulation;
mod timeline;

pub mod schedulers;

pub use crate::error::{Result, SchedulerError};
pub use crate::metrics::{Metrics, ProcessMetrics};
pub use crate::policy::{Policy, PolicyKind, Quantum, Schedule};
pub use crate::process::{Process, ProcessSet, RawProcess};
pub use crate::scheduler::{Pid, ProcessState, Scheduler, SchedulingDecision};
pub use crate::simulation::{simulate, Outcome, SimulationState};
pub use crate::timeline::{Segment, Timeline};

/// Validates caller-supplied processes into a [`ProcessSet`].
///
/// * `raw` - `(id, arrival_time, burst_time, priority)` entries, in the order
///           that decides every scheduling tie.
///
/// Fails with [`SchedulerError::InvalidProcess`] on an empty id, a negative
/// arrival time or a burst time below 1, with
/// [`SchedulerError::DuplicateIdentifier`] when two entries share an id and
/// with [`SchedulerError::EmptyProcessSet`] when there is nothing to schedule.
/// A set whose last arrival plus all burst times does not fit in a `u64`
/// is rejected with [`SchedulerError::InvalidProcess`].
pub fn validate<I, P>(raw: I) -> Result<ProcessSet>
where
    I: IntoIterator<Item = P>,
    P: Into<RawProcess>,
{
    ProcessSet::validate(raw)
}

/// First-Come-First-Served: processes run to completion in arrival order,
/// equal arrivals in input order.
pub fn run_fcfs(processes: &ProcessSet) -> Result<Schedule> {
    Policy::Fcfs.run(processes)
}

/// Non-preemptive Shortest-Job-First: whenever the CPU frees up, the arrived
/// process with the smallest burst time runs to completion.
pub fn run_sjf_nonpreemptive(processes: &ProcessSet) -> Result<Schedule> {
    Policy::SjfNonPreemptive.run(processes)
}

/// Shortest-Remaining-Time-First: at every time unit the arrived process with
/// the least remaining time runs, preempting the current one if needed.
pub fn run_srtf(processes: &ProcessSet) -> Result<Schedule> {
    Policy::Srtf.run(processes)
}

/// Non-preemptive priority: whenever the CPU frees up, the arrived process
/// with the lowest priority value runs to completion.
pub fn run_priority_nonpreemptive(processes: &ProcessSet) -> Result<Schedule> {
    Policy::PriorityNonPreemptive.run(processes)
}

/// Preemptive priority: at every time unit the arrived process with the
/// lowest priority value runs.
pub fn run_priority_preemptive(processes: &ProcessSet) -> Result<Schedule> {
    Policy::PriorityPreemptive.run(processes)
}

/// Round Robin over a FIFO ready queue.
///
/// * `quantum` - the maximum time a process runs before it goes back to the
///               end of the queue. Fails with [`SchedulerError::InvalidQuantum`]
///               when it is below 1.
pub fn run_round_robin(processes: &ProcessSet, quantum: i64) -> Result<Schedule> {
    Policy::RoundRobin {
        quantum: Quantum::new(quantum)?,
    }
    .run(processes)
}
