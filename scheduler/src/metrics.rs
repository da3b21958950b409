use serde::Serialize;

use crate::scheduler::Pid;
use crate::{ProcessSet, Result, SchedulerError};

/// Timings of one process after a finished simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    #[serde(skip)]
    pub pid: Pid,
    pub id: String,
    pub completion_time: u64,
    /// `completion_time - arrival_time`
    pub turnaround_time: u64,
    /// `turnaround_time - burst_time`, the time spent ready but not running.
    pub waiting_time: u64,
}

/// Per-process waiting and turnaround times with their averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    processes: Vec<ProcessMetrics>,
    average_waiting: f64,
    average_turnaround: f64,
}

impl Metrics {
    /// Derives the metrics from the completion time of every process.
    ///
    /// * `processes` - the process set the simulation ran over.
    /// * `completions` - completion times indexed by [`Pid`].
    pub fn aggregate(processes: &ProcessSet, completions: &[Option<u64>]) -> Result<Metrics> {
        let mut rows = Vec::with_capacity(processes.len());

        for process in processes {
            let id = || process.id().to_string();
            let completion_time = completions
                .get(process.pid().index())
                .copied()
                .flatten()
                .ok_or_else(|| SchedulerError::IncompleteSimulation { id: id() })?;

            let turnaround_time = completion_time
                .checked_sub(process.arrival_time())
                .ok_or_else(|| SchedulerError::NegativeMetric { id: id() })?;
            let waiting_time = turnaround_time
                .checked_sub(process.burst_time())
                .ok_or_else(|| SchedulerError::NegativeMetric { id: id() })?;

            rows.push(ProcessMetrics {
                pid: process.pid(),
                id: id(),
                completion_time,
                turnaround_time,
                waiting_time,
            });
        }

        Ok(Metrics {
            average_waiting: mean(rows.iter().map(|row| row.waiting_time)),
            average_turnaround: mean(rows.iter().map(|row| row.turnaround_time)),
            processes: rows,
        })
    }

    /// Rows in input order.
    pub fn processes(&self) -> &[ProcessMetrics] {
        &self.processes
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.get(pid.index())
    }

    pub fn by_id(&self, id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|row| row.id == id)
    }

    pub fn average_waiting(&self) -> f64 {
        self.average_waiting
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average_turnaround
    }
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.map(u128::from).sum::<u128>() as f64 / count as f64
}
