//! The clock-driven loop shared by every policy engine.

use tracing::{error, trace};

use crate::scheduler::{Pid, ProcessState, Scheduler, SchedulingDecision};
use crate::timeline::{Segment, Timeline};
use crate::{Process, ProcessSet};

/// Per-run mutable state, indexed by [`Pid`].
///
/// Created fresh for every policy invocation and owned by the driver;
/// schedulers only ever see it through a shared reference.
#[derive(Debug)]
pub struct SimulationState<'a> {
    processes: &'a ProcessSet,
    states: Vec<ProcessState>,
    finished: usize,
}

impl<'a> SimulationState<'a> {
    pub fn new(processes: &'a ProcessSet) -> Self {
        SimulationState {
            processes,
            states: processes
                .iter()
                .map(|process| ProcessState::new(process.burst_time()))
                .collect(),
            finished: 0,
        }
    }

    pub fn processes(&self) -> &'a ProcessSet {
        self.processes
    }

    pub fn process(&self, pid: Pid) -> &'a Process {
        &self.processes[pid]
    }

    pub fn state(&self, pid: Pid) -> &ProcessState {
        &self.states[pid.index()]
    }

    pub fn remaining(&self, pid: Pid) -> u64 {
        self.states[pid.index()].remaining
    }

    pub fn all_finished(&self) -> bool {
        self.finished == self.states.len()
    }

    /// Unfinished processes that have arrived by `clock`, in input order.
    pub fn ready(&self, clock: u64) -> impl Iterator<Item = Pid> + '_ {
        self.processes
            .iter()
            .filter(move |process| process.arrival_time() <= clock)
            .map(Process::pid)
            .filter(move |&pid| !self.states[pid.index()].is_finished())
    }

    /// The earliest arrival strictly after `clock` among unfinished processes.
    pub fn next_arrival(&self, clock: u64) -> Option<u64> {
        self.processes
            .iter()
            .filter(|process| !self.states[process.pid().index()].is_finished())
            .map(Process::arrival_time)
            .filter(|&arrival| arrival > clock)
            .min()
    }

    /// Completion times in input order; `None` for processes that never finished.
    pub fn completions(&self) -> Vec<Option<u64>> {
        self.states.iter().map(|state| state.completion).collect()
    }

    fn execute(&mut self, pid: Pid, amount: u64, end: u64) {
        let state = &mut self.states[pid.index()];
        debug_assert!(amount <= state.remaining);
        state.remaining -= amount;
        if state.remaining == 0 {
            debug_assert!(state.completion.is_none(), "{pid} completed twice");
            state.completion = Some(end);
            self.finished += 1;
        }
    }
}

/// The raw result of a simulation run, before metrics are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub timeline: Timeline,
    pub completions: Vec<Option<u64>>,
}

/// Runs `scheduler` over `processes` until it reports [`SchedulingDecision::Done`].
///
/// The clock starts at 0. A [`SchedulingDecision::Deadlock`] stops the run early;
/// the missing completion times are then caught by the aggregator.
pub fn simulate<S: Scheduler>(mut scheduler: S, processes: &ProcessSet) -> Outcome {
    let mut state = SimulationState::new(processes);
    let mut timeline = Timeline::new();
    let mut clock = 0;

    loop {
        let decision = scheduler.next(clock, &state);
        trace!(clock, %decision, "scheduling decision");

        match decision {
            SchedulingDecision::Run { pid, timeslice } => {
                let amount = timeslice.get().min(state.remaining(pid));
                if amount == 0 {
                    error!(clock, %pid, "scheduler picked a finished process");
                    break;
                }

                let end = clock + amount;
                state.execute(pid, amount, end);

                let segment = Segment::new(pid, clock, end);
                if scheduler.coalesce() {
                    timeline.extend_or_push(segment);
                } else {
                    timeline.push(segment);
                }

                clock = end;
                scheduler.stop(pid, clock, &state);
            }
            SchedulingDecision::Sleep(amount) => {
                clock += amount.get();
            }
            SchedulingDecision::Deadlock => {
                error!(clock, "no process is ready and none will arrive");
                break;
            }
            SchedulingDecision::Done => break,
        }
    }

    Outcome {
        timeline,
        completions: state.completions(),
    }
}
