use std::num::NonZeroU64;

use crate::scheduler::{Scheduler, SchedulingDecision};
use crate::simulation::SimulationState;

use super::{idle, Criterion};

/// Re-evaluates the best ready process at every time unit.
///
/// Between two arrivals the winner cannot change: its key only shrinks
/// (remaining time) or stays put (priority) while the others wait. So the
/// winner is handed everything up to the next arrival in a single slice and
/// the timeline merges consecutive slices. The result is the same as
/// deciding again after every tick.
pub struct Preemptive {
    criterion: Criterion,
}

impl Preemptive {
    pub fn new(criterion: Criterion) -> Self {
        Preemptive { criterion }
    }
}

impl Scheduler for Preemptive {
    fn next(&mut self, clock: u64, state: &SimulationState<'_>) -> SchedulingDecision {
        let Some(pid) = self.criterion.select(state, clock) else {
            return idle(clock, state);
        };

        let until_arrival = state
            .next_arrival(clock)
            .map_or(u64::MAX, |arrival| arrival - clock);

        match NonZeroU64::new(state.remaining(pid).min(until_arrival)) {
            Some(timeslice) => SchedulingDecision::Run { pid, timeslice },
            None => SchedulingDecision::Deadlock,
        }
    }

    fn coalesce(&self) -> bool {
        true
    }
}
