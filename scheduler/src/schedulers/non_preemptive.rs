use std::num::NonZeroU64;

use crate::scheduler::{Scheduler, SchedulingDecision};
use crate::simulation::SimulationState;

use super::{idle, Criterion};

/// Runs the best ready process to completion, then decides again.
pub struct NonPreemptive {
    criterion: Criterion,
}

impl NonPreemptive {
    pub fn new(criterion: Criterion) -> Self {
        NonPreemptive { criterion }
    }
}

impl Scheduler for NonPreemptive {
    fn next(&mut self, clock: u64, state: &SimulationState<'_>) -> SchedulingDecision {
        let Some(pid) = self.criterion.select(state, clock) else {
            return idle(clock, state);
        };

        match NonZeroU64::new(state.remaining(pid)) {
            Some(timeslice) => SchedulingDecision::Run { pid, timeslice },
            None => SchedulingDecision::Deadlock,
        }
    }
}
