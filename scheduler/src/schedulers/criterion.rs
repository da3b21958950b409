use std::cmp::Ordering;

use crate::scheduler::Pid;
use crate::simulation::SimulationState;

/// The key a policy minimizes when it picks among ready processes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Earliest arrival time.
    Arrival,
    /// Shortest total burst time.
    Burst,
    /// Shortest remaining time.
    Remaining,
    /// Lowest priority value.
    Priority,
}

impl Criterion {
    pub fn compare(self, state: &SimulationState<'_>, a: Pid, b: Pid) -> Ordering {
        let (pa, pb) = (state.process(a), state.process(b));
        match self {
            Criterion::Arrival => pa.arrival_time().cmp(&pb.arrival_time()),
            Criterion::Burst => pa.burst_time().cmp(&pb.burst_time()),
            Criterion::Remaining => state.remaining(a).cmp(&state.remaining(b)),
            Criterion::Priority => pa.priority().cmp(&pb.priority()),
        }
    }

    /// The ready process with the smallest key at `clock`.
    ///
    /// Ties go to the process that comes first in the input list.
    pub fn select(self, state: &SimulationState<'_>, clock: u64) -> Option<Pid> {
        // min_by keeps the first of several equal elements
        state
            .ready(clock)
            .min_by(|&a, &b| self.compare(state, a, b))
    }
}
