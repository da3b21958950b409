use std::fmt::{self, Display};
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::metrics::Metrics;
use crate::schedulers::{Criterion, NonPreemptive, Preemptive, RoundRobin};
use crate::simulation::simulate;
use crate::timeline::Timeline;
use crate::{ProcessSet, Result, Scheduler, SchedulerError};

/// The round robin time slice, at least one time unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    /// Fails with [`SchedulerError::InvalidQuantum`] when `quantum < 1`.
    ///
    /// No default or clamping happens here, callers decide that.
    pub fn new(quantum: i64) -> Result<Quantum> {
        u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Quantum)
            .ok_or(SchedulerError::InvalidQuantum(quantum))
    }

    pub fn get(self) -> NonZeroU64 {
        self.0
    }
}

impl Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduling policy without its parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    SjfNonPreemptive,
    Srtf,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Fcfs,
        PolicyKind::SjfNonPreemptive,
        PolicyKind::Srtf,
        PolicyKind::PriorityNonPreemptive,
        PolicyKind::PriorityPreemptive,
        PolicyKind::RoundRobin,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::SjfNonPreemptive => "sjf",
            Self::Srtf => "srtf",
            Self::PriorityNonPreemptive => "priority",
            Self::PriorityPreemptive => "priority-preemptive",
            Self::RoundRobin => "round-robin",
        }
    }

    /// Attaches the parameters. The quantum is only checked for round robin.
    pub fn with_quantum(self, quantum: i64) -> Result<Policy> {
        Ok(match self {
            Self::Fcfs => Policy::Fcfs,
            Self::SjfNonPreemptive => Policy::SjfNonPreemptive,
            Self::Srtf => Policy::Srtf,
            Self::PriorityNonPreemptive => Policy::PriorityNonPreemptive,
            Self::PriorityPreemptive => Policy::PriorityPreemptive,
            Self::RoundRobin => Policy::RoundRobin {
                quantum: Quantum::new(quantum)?,
            },
        })
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "sjf-np" | "sjf-nonpreemptive" => Ok(Self::SjfNonPreemptive),
            "srtf" | "sjf-preemptive" => Ok(Self::Srtf),
            "priority" | "priority-np" | "priority-nonpreemptive" => {
                Ok(Self::PriorityNonPreemptive)
            }
            "priority-preemptive" | "priority-p" => Ok(Self::PriorityPreemptive),
            "rr" | "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(format!(
                "invalid policy '{}'. Valid: fcfs, sjf, srtf, priority, priority-preemptive, rr",
                s
            )),
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parameterized scheduling policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Policy {
    Fcfs,
    SjfNonPreemptive,
    Srtf,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin { quantum: Quantum },
}

impl Policy {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Fcfs => PolicyKind::Fcfs,
            Policy::SjfNonPreemptive => PolicyKind::SjfNonPreemptive,
            Policy::Srtf => PolicyKind::Srtf,
            Policy::PriorityNonPreemptive => PolicyKind::PriorityNonPreemptive,
            Policy::PriorityPreemptive => PolicyKind::PriorityPreemptive,
            Policy::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    /// Simulates this policy over `processes`.
    pub fn run(&self, processes: &ProcessSet) -> Result<Schedule> {
        match *self {
            Policy::Fcfs => self.schedule(NonPreemptive::new(Criterion::Arrival), processes),
            Policy::SjfNonPreemptive => {
                self.schedule(NonPreemptive::new(Criterion::Burst), processes)
            }
            Policy::Srtf => self.schedule(Preemptive::new(Criterion::Remaining), processes),
            Policy::PriorityNonPreemptive => {
                self.schedule(NonPreemptive::new(Criterion::Priority), processes)
            }
            Policy::PriorityPreemptive => {
                self.schedule(Preemptive::new(Criterion::Priority), processes)
            }
            Policy::RoundRobin { quantum } => {
                self.schedule(RoundRobin::new(quantum, processes.len()), processes)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(policy = %self.kind(), processes = processes.len()))]
    fn schedule<S: Scheduler>(&self, scheduler: S, processes: &ProcessSet) -> Result<Schedule> {
        let outcome = simulate(scheduler, processes);
        let metrics = Metrics::aggregate(processes, &outcome.completions)?;

        debug!(
            segments = outcome.timeline.len(),
            makespan = outcome.timeline.end(),
            average_waiting = metrics.average_waiting(),
            "simulation finished"
        );

        Ok(Schedule {
            policy: *self,
            timeline: outcome.timeline,
            metrics,
        })
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "First-Come-First-Served"),
            Policy::SjfNonPreemptive => write!(f, "Shortest-Job-First (non-preemptive)"),
            Policy::Srtf => write!(f, "Shortest-Remaining-Time-First"),
            Policy::PriorityNonPreemptive => write!(f, "Priority (non-preemptive)"),
            Policy::PriorityPreemptive => write!(f, "Priority (preemptive)"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
        }
    }
}

/// The outcome of one policy run: the timeline and the derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub policy: Policy,
    pub timeline: Timeline,
    pub metrics: Metrics,
}
