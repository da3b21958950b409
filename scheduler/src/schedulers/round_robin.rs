use std::collections::VecDeque;

use crate::policy::Quantum;
use crate::scheduler::{Pid, Scheduler, SchedulingDecision};
use crate::simulation::SimulationState;

use super::idle;

/// Time-slicing over a FIFO ready queue.
///
/// Processes join the queue in input order once they have arrived. A process
/// whose slice expires goes to the back of the queue, behind every process
/// that arrived while it was running.
pub struct RoundRobin {
    ready_queue: VecDeque<Pid>,
    visited: Vec<bool>,
    quantum: Quantum,
}

impl RoundRobin {
    pub fn new(quantum: Quantum, processes: usize) -> Self {
        RoundRobin {
            ready_queue: VecDeque::with_capacity(processes),
            visited: vec![false; processes],
            quantum,
        }
    }

    fn admit(&mut self, clock: u64, state: &SimulationState<'_>) {
        for process in state.processes() {
            let seen = &mut self.visited[process.pid().index()];
            if !*seen && process.arrival_time() <= clock {
                *seen = true;
                self.ready_queue.push_back(process.pid());
            }
        }
    }
}

impl Scheduler for RoundRobin {
    fn next(&mut self, clock: u64, state: &SimulationState<'_>) -> SchedulingDecision {
        self.admit(clock, state);

        match self.ready_queue.pop_front() {
            Some(pid) => SchedulingDecision::Run {
                pid,
                timeslice: self.quantum.get(),
            },
            None => idle(clock, state),
        }
    }

    fn stop(&mut self, pid: Pid, clock: u64, state: &SimulationState<'_>) {
        // arrivals during the slice queue up before the preempted process
        self.admit(clock, state);
        if !state.state(pid).is_finished() {
            self.ready_queue.push_back(pid);
        }
    }
}
