//! A scheduling report library
//!
//! This is used for running policies from the [`scheduler`] crate and
//! presenting their results: a Gantt chart, a metrics table and averages.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use scheduler::{Metrics, Policy, ProcessSet, Result, Schedule};

mod gantt;

pub use gantt::{GanttChart, MAX_CHART_WIDTH};

/// Default number of characters drawn per time unit in the Gantt chart.
pub const DEFAULT_UNIT_WIDTH: usize = 2;

/// The result of running one policy, ready to be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The policy's timeline and metrics.
    pub schedule: Schedule,

    /// The processes the policy ran over.
    pub processes: ProcessSet,

    /// Characters per time unit in the Gantt chart.
    pub unit_width: usize,
}

impl Report {
    fn new(schedule: Schedule, processes: &ProcessSet, unit_width: usize) -> Report {
        Report {
            schedule,
            processes: processes.clone(),
            unit_width,
        }
    }

    pub fn policy(&self) -> Policy {
        self.schedule.policy
    }

    pub fn metrics(&self) -> &Metrics {
        &self.schedule.metrics
    }

    pub fn gantt(&self) -> GanttChart<'_> {
        GanttChart::new(&self.schedule.timeline, &self.processes, self.unit_width)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== {} =====", self.schedule.policy)?;
        writeln!(f, "{}", self.gantt())?;
        writeln!(
            f,
            "{:<10}{:>9}{:>7}{:>10}{:>12}{:>9}{:>12}",
            "Process", "Arrival", "Burst", "Priority", "Completion", "Waiting", "Turnaround"
        )?;
        for (process, row) in self.processes.iter().zip(self.metrics().processes()) {
            writeln!(
                f,
                "{:<10}{:>9}{:>7}{:>10}{:>12}{:>9}{:>12}",
                process.id(),
                process.arrival_time(),
                process.burst_time(),
                process.priority(),
                row.completion_time,
                row.waiting_time,
                row.turnaround_time
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.metrics().average_waiting())?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.metrics().average_turnaround())
    }
}

#[derive(Serialize)]
struct SegmentView<'a> {
    id: &'a str,
    start: u64,
    end: u64,
}

#[derive(Serialize)]
struct ReportView<'a> {
    title: String,
    policy: Policy,
    processes: &'a ProcessSet,
    timeline: Vec<SegmentView<'a>>,
    metrics: &'a Metrics,
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ReportView {
            title: self.schedule.policy.to_string(),
            policy: self.schedule.policy,
            processes: &self.processes,
            timeline: self
                .schedule
                .timeline
                .iter()
                .map(|segment| SegmentView {
                    id: self.processes[segment.pid].id(),
                    start: segment.start,
                    end: segment.end,
                })
                .collect(),
            metrics: &self.schedule.metrics,
        }
        .serialize(serializer)
    }
}

/// The policy runner.
#[derive(Debug, Clone)]
pub struct Processor {
    unit_width: usize,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new()
    }
}

impl Processor {
    pub fn new() -> Processor {
        Processor {
            unit_width: DEFAULT_UNIT_WIDTH,
        }
    }

    /// Sets how many characters a time unit takes in the Gantt chart.
    pub fn with_unit_width(mut self, unit_width: usize) -> Processor {
        self.unit_width = unit_width.max(1);
        self
    }

    /// Runs a single policy.
    ///
    /// * `policy` - the policy to simulate.
    /// * `processes` - the validated process set.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::{validate, Policy};
    ///
    /// let raw: [(&str, i64, i64, i64); 2] = [("P1", 0, 5, 0), ("P2", 1, 3, 0)];
    /// let processes = validate(raw).unwrap();
    /// let report = Processor::new().run(Policy::Fcfs, &processes).unwrap();
    ///
    /// println!("{}", report);
    /// ```
    pub fn run(&self, policy: Policy, processes: &ProcessSet) -> Result<Report> {
        debug!(%policy, processes = processes.len(), "running policy");
        let schedule = policy.run(processes)?;
        Ok(Report::new(schedule, processes, self.unit_width))
    }

    /// Runs every policy in `policies` over the same processes, in order.
    ///
    /// Stops at the first policy that fails.
    pub fn run_all(&self, policies: &[Policy], processes: &ProcessSet) -> Result<Vec<Report>> {
        let reports = policies
            .iter()
            .map(|&policy| self.run(policy, processes))
            .collect::<Result<Vec<_>>>()?;
        info!(policies = reports.len(), "all policies simulated");
        Ok(reports)
    }
}

/// Format the [`Processor`]'s reports to a [`String`].
///
/// * `reports` - the reports returned by the [`Processor`].
pub fn format_reports(reports: &[Report]) -> String {
    let mut s = String::new();
    for report in reports {
        // writing into a String cannot fail
        let _ = fmt::write(&mut s, format_args!("{}\n", report));
    }
    s
}

/// One line per policy with both averages, to compare policies.
pub fn format_summary(reports: &[Report]) -> String {
    let mut s = format!(
        "{:<38}{:>12}{:>16}\n",
        "Policy", "Avg Waiting", "Avg Turnaround"
    );
    for report in reports {
        s.push_str(&format!(
            "{:<38}{:>12.2}{:>16.2}\n",
            report.policy().to_string(),
            report.metrics().average_waiting(),
            report.metrics().average_turnaround()
        ));
    }
    s
}

/// Serializes the reports as a pretty-printed JSON array.
pub fn to_json(reports: &[Report]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scheduler::{validate, PolicyKind};

    fn processes() -> ProcessSet {
        let raw: [(&str, i64, i64, i64); 3] = [("P1", 0, 5, 2), ("P2", 1, 3, 1), ("P3", 2, 8, 3)];
        validate(raw).unwrap()
    }

    #[test]
    fn report_lists_processes_in_input_order() {
        let report = Processor::new().run(Policy::Fcfs, &processes()).unwrap();

        assert_eq!(
            report.to_string(),
            "===== First-Come-First-Served =====\n\
             |    P1    |  P2  |       P3       |\n\
             0          5      8                16\n\
             \n\
             Process     Arrival  Burst  Priority  Completion  Waiting  Turnaround\n\
             P1                0      5         2           5        0           5\n\
             P2                1      3         1           8        4           7\n\
             P3                2      8         3          16        6          14\n\
             \n\
             Average Waiting Time: 3.33\n\
             Average Turnaround Time: 8.67\n"
        );
    }

    #[test]
    fn summary_has_one_line_per_policy() {
        let policies: Vec<Policy> = PolicyKind::ALL
            .iter()
            .map(|kind| kind.with_quantum(2).unwrap())
            .collect();
        let reports = Processor::new().run_all(&policies, &processes()).unwrap();
        let summary = format_summary(&reports);

        assert_eq!(summary.lines().count(), 7);
        assert!(summary
            .lines()
            .nth(1)
            .unwrap()
            .starts_with("First-Come-First-Served"));
        assert!(summary.contains("Round Robin (quantum 2)"));
    }

    #[test]
    fn json_uses_process_ids() {
        let report = Processor::new()
            .run(PolicyKind::RoundRobin.with_quantum(3).unwrap(), &processes())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&[report]).unwrap()).unwrap();

        assert_eq!(json[0]["title"], "Round Robin (quantum 3)");
        assert_eq!(json[0]["timeline"][0]["id"], "P1");
        assert_eq!(json[0]["timeline"][0]["end"], 3);
        assert_eq!(json[0]["processes"][1]["burst_time"], 3);
    }

    #[test]
    fn errors_from_the_core_are_passed_through() {
        let policy = PolicyKind::RoundRobin.with_quantum(0);
        assert_eq!(policy, Err(scheduler::SchedulerError::InvalidQuantum(0)));
    }
}
