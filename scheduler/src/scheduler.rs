use std::fmt::{self, Display};
use std::num::NonZeroU64;

use serde::Serialize;

use crate::simulation::SimulationState;

/// The index of a process inside its [`ProcessSet`](crate::ProcessSet).
///
/// PIDs are assigned at validation time in input order, starting from 0.
/// They are only meaningful for the set that produced them.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub(crate) fn new(index: usize) -> Pid {
        Pid(index)
    }

    /// Position of the process in the input list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The action that a scheduler asks the simulation to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Run the process `pid` for at most `timeslice` time units.
    ///
    /// The simulation never runs a process past its remaining time.
    Run { pid: Pid, timeslice: NonZeroU64 },

    /// Nothing is ready, advance the clock without executing anything.
    Sleep(NonZeroU64),

    /// Unfinished processes exist, but none is ready and none will arrive.
    ///
    /// This cannot happen for a validated process set.
    Deadlock,

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingDecision::Run { pid, timeslice } => {
                write!(f, "Run {} for {} units", pid, timeslice)
            }
            SchedulingDecision::Sleep(amount) => {
                write!(f, "Idle for {} units", amount)
            }
            SchedulingDecision::Deadlock => {
                write!(f, "Deadlock, unfinished processes can never run")
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The trait that every scheduling policy engine implements.
///
/// The simulation driver owns the clock and the per-process state. It asks
/// the scheduler what to do next, executes the decision and reports back
/// through [`Scheduler::stop`] after every slice a process ran.
pub trait Scheduler {
    /// Returns the action that the simulation has to perform next.
    fn next(&mut self, clock: u64, state: &SimulationState<'_>) -> SchedulingDecision;

    /// The scheduler is informed that `pid` stopped running at `clock`.
    ///
    /// The state already reflects the slice that just ran.
    fn stop(&mut self, _pid: Pid, _clock: u64, _state: &SimulationState<'_>) {}

    /// Whether back-to-back slices of the same process are merged into
    /// one timeline segment.
    fn coalesce(&self) -> bool {
        false
    }
}

/// The simulation state of a single process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcessState {
    /// Time units still needed, in `[0, burst_time]`.
    pub remaining: u64,

    /// Set exactly once, when `remaining` reaches 0.
    pub completion: Option<u64>,
}

impl ProcessState {
    pub(crate) fn new(burst_time: u64) -> ProcessState {
        ProcessState {
            remaining: burst_time,
            completion: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.completion {
            Some(at) => write!(f, "DONE at {}", at),
            None => write!(f, "REMAINING {}", self.remaining),
        }
    }
}
