use std::collections::HashSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scheduler::Pid;
use crate::{Result, SchedulerError};

/// A process as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProcess {
    pub id: String,
    pub arrival_time: i64,
    pub burst_time: i64,
    #[serde(default)]
    pub priority: i64,
}

impl RawProcess {
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64, priority: i64) -> Self {
        RawProcess {
            id: id.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }
}

impl<S: Into<String>> From<(S, i64, i64, i64)> for RawProcess {
    fn from((id, arrival_time, burst_time, priority): (S, i64, i64, i64)) -> Self {
        RawProcess::new(id, arrival_time, burst_time, priority)
    }
}

impl<S: Into<String>> From<(S, i64, i64)> for RawProcess {
    fn from((id, arrival_time, burst_time): (S, i64, i64)) -> Self {
        RawProcess::new(id, arrival_time, burst_time, 0)
    }
}

/// A validated process. Immutable for the whole simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    #[serde(skip)]
    pid: Pid,
    id: String,
    arrival_time: u64,
    burst_time: u64,
    priority: i64,
}

impl Process {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    /// Lower value means higher priority.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    fn validate(pid: Pid, raw: RawProcess) -> Result<Process> {
        let invalid = |reason| SchedulerError::InvalidProcess {
            id: raw.id.clone(),
            reason,
        };

        if raw.id.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        if raw.arrival_time < 0 {
            return Err(invalid("arrival time must be >= 0"));
        }
        if raw.burst_time <= 0 {
            return Err(invalid("burst time must be > 0"));
        }

        Ok(Process {
            pid,
            arrival_time: raw.arrival_time as u64,
            burst_time: raw.burst_time as u64,
            priority: raw.priority,
            id: raw.id,
        })
    }
}

/// An ordered, validated list of processes with unique identifiers.
///
/// The input order is kept: it decides every tie between policies' candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Validates the caller's processes and assigns their PIDs.
    ///
    /// Fails on the first invalid entry; nothing is renamed or dropped.
    pub fn validate<I, P>(raw: I) -> Result<ProcessSet>
    where
        I: IntoIterator<Item = P>,
        P: Into<RawProcess>,
    {
        let mut seen = HashSet::new();
        let mut processes = Vec::new();

        for (index, raw) in raw.into_iter().enumerate() {
            let process = Process::validate(Pid::new(index), raw.into())?;
            if !seen.insert(process.id.clone()) {
                return Err(SchedulerError::DuplicateIdentifier(process.id));
            }
            processes.push(process);
        }

        if processes.is_empty() {
            return Err(SchedulerError::EmptyProcessSet);
        }

        // no schedule runs past the last arrival plus all bursts
        let latest_arrival = processes.iter().map(Process::arrival_time).max().unwrap_or(0);
        let mut horizon = latest_arrival;
        for process in &processes {
            horizon = horizon.checked_add(process.burst_time).ok_or_else(|| {
                SchedulerError::InvalidProcess {
                    id: process.id.clone(),
                    reason: "schedule length overflows",
                }
            })?;
        }

        debug!(horizon, processes = processes.len(), "validated process set");
        Ok(ProcessSet { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid.index())
    }

    /// Looks a process up by its identifier.
    pub fn find(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|process| process.id == id)
    }

    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.processes.iter().map(Process::pid)
    }

    /// Sum of all burst times, the busy part of any schedule.
    pub fn total_burst(&self) -> u64 {
        self.processes.iter().map(Process::burst_time).sum()
    }
}

impl Index<Pid> for ProcessSet {
    type Output = Process;

    fn index(&self, pid: Pid) -> &Process {
        &self.processes[pid.index()]
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
