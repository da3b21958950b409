//! The policy engines.
//!
//! FCFS, SJF and non-preemptive priority share [`NonPreemptive`];
//! SRTF and preemptive priority share [`Preemptive`]. Round robin keeps
//! its own queue discipline.

mod criterion;
pub use criterion::Criterion;

mod non_preemptive;
pub use non_preemptive::NonPreemptive;

mod preemptive;
pub use preemptive::Preemptive;

mod round_robin;
pub use round_robin::RoundRobin;

use std::num::NonZeroU64;

use crate::scheduler::SchedulingDecision;
use crate::simulation::SimulationState;

/// What to do when no process is ready at `clock`.
fn idle(clock: u64, state: &SimulationState<'_>) -> SchedulingDecision {
    if state.all_finished() {
        return SchedulingDecision::Done;
    }
    match state
        .next_arrival(clock)
        .and_then(|arrival| NonZeroU64::new(arrival - clock))
    {
        Some(amount) => SchedulingDecision::Sleep(amount),
        None => SchedulingDecision::Deadlock,
    }
}
