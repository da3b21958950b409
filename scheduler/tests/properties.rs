use std::collections::VecDeque;

use proptest::prelude::*;
use scheduler::{validate, PolicyKind, ProcessSet, RawProcess, Schedule};

/// `(arrival, burst, priority)` per process.
fn workloads() -> impl Strategy<Value = Vec<(u64, u64, i64)>> {
    prop::collection::vec((0u64..20, 1u64..10, -2i64..4), 1..8)
}

fn process_set(workload: &[(u64, u64, i64)]) -> ProcessSet {
    validate(workload.iter().enumerate().map(|(i, &(arrival, burst, priority))| {
        RawProcess::new(format!("P{}", i + 1), arrival as i64, burst as i64, priority)
    }))
    .unwrap()
}

type Segments = Vec<(usize, u64, u64)>;

fn segments(schedule: &Schedule) -> Segments {
    schedule
        .timeline
        .iter()
        .map(|segment| (segment.pid.index(), segment.start, segment.end))
        .collect()
}

fn completions(schedule: &Schedule) -> Vec<u64> {
    schedule
        .metrics
        .processes()
        .iter()
        .map(|row| row.completion_time)
        .collect()
}

/// One-decision-per-time-unit simulation, written as plainly as possible.
fn reference(kind: PolicyKind, quantum: u64, workload: &[(u64, u64, i64)]) -> (Segments, Vec<u64>) {
    let n = workload.len();
    let mut remaining: Vec<u64> = workload.iter().map(|p| p.1).collect();
    let mut completion = vec![0; n];
    let mut timeline: Segments = Vec::new();
    let mut time = 0;

    let first_min = |candidates: &[usize], key: &dyn Fn(usize) -> i64| -> usize {
        let mut best = candidates[0];
        for &i in &candidates[1..] {
            if key(i) < key(best) {
                best = i;
            }
        }
        best
    };

    match kind {
        PolicyKind::Fcfs | PolicyKind::SjfNonPreemptive | PolicyKind::PriorityNonPreemptive => {
            let mut done = vec![false; n];
            while done.iter().any(|d| !d) {
                let available: Vec<usize> =
                    (0..n).filter(|&i| workload[i].0 <= time && !done[i]).collect();
                if available.is_empty() {
                    time += 1;
                    continue;
                }
                let pick = first_min(&available, &|i| match kind {
                    PolicyKind::Fcfs => workload[i].0 as i64,
                    PolicyKind::SjfNonPreemptive => workload[i].1 as i64,
                    _ => workload[i].2,
                });
                timeline.push((pick, time, time + workload[pick].1));
                time += workload[pick].1;
                completion[pick] = time;
                done[pick] = true;
            }
        }
        PolicyKind::Srtf | PolicyKind::PriorityPreemptive => {
            let mut last = None;
            while remaining.iter().any(|&r| r > 0) {
                let available: Vec<usize> = (0..n)
                    .filter(|&i| workload[i].0 <= time && remaining[i] > 0)
                    .collect();
                if available.is_empty() {
                    time += 1;
                    last = None;
                    continue;
                }
                let current = remaining.clone();
                let pick = first_min(&available, &|i| match kind {
                    PolicyKind::Srtf => current[i] as i64,
                    _ => workload[i].2,
                });
                if last == Some(pick) {
                    if let Some(segment) = timeline.last_mut() {
                        segment.2 = time + 1;
                    }
                } else {
                    timeline.push((pick, time, time + 1));
                }
                remaining[pick] -= 1;
                if remaining[pick] == 0 {
                    completion[pick] = time + 1;
                }
                time += 1;
                last = Some(pick);
            }
        }
        PolicyKind::RoundRobin => {
            let mut queue = VecDeque::new();
            let mut visited = vec![false; n];
            let admit = |time: u64, queue: &mut VecDeque<usize>, visited: &mut Vec<bool>| {
                for i in 0..n {
                    if workload[i].0 <= time && !visited[i] {
                        queue.push_back(i);
                        visited[i] = true;
                    }
                }
            };
            loop {
                admit(time, &mut queue, &mut visited);
                let Some(current) = queue.pop_front() else {
                    if remaining.iter().all(|&r| r == 0) {
                        break;
                    }
                    time += 1;
                    continue;
                };
                let run = quantum.min(remaining[current]);
                timeline.push((current, time, time + run));
                time += run;
                remaining[current] -= run;
                if remaining[current] == 0 {
                    completion[current] = time;
                }
                admit(time, &mut queue, &mut visited);
                if remaining[current] > 0 {
                    queue.push_back(current);
                }
            }
        }
    }

    (timeline, completion)
}

fn run(kind: PolicyKind, quantum: u64, set: &ProcessSet) -> Schedule {
    kind.with_quantum(quantum as i64)
        .and_then(|policy| policy.run(set))
        .expect("a validated process set always schedules")
}

proptest! {
    #[test]
    fn matches_the_tick_by_tick_reference(workload in workloads(), quantum in 1u64..5) {
        let set = process_set(&workload);
        for kind in PolicyKind::ALL {
            let schedule = run(kind, quantum, &set);
            let (expected_timeline, expected_completions) = reference(kind, quantum, &workload);
            prop_assert_eq!(segments(&schedule), expected_timeline, "{}", kind);
            prop_assert_eq!(completions(&schedule), expected_completions, "{}", kind);
        }
    }

    #[test]
    fn every_process_runs_exactly_its_burst(workload in workloads(), quantum in 1u64..5) {
        let set = process_set(&workload);
        for kind in PolicyKind::ALL {
            let schedule = run(kind, quantum, &set);
            for process in &set {
                prop_assert_eq!(schedule.timeline.busy_time(process.pid()), process.burst_time());
            }
        }
    }

    #[test]
    fn segments_are_ordered_and_start_after_arrival(workload in workloads(), quantum in 1u64..5) {
        let set = process_set(&workload);
        for kind in PolicyKind::ALL {
            let schedule = run(kind, quantum, &set);
            let timeline = schedule.timeline.segments();
            for pair in timeline.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start, "{}: {:?}", kind, pair);
            }
            for segment in timeline {
                prop_assert!(segment.end > segment.start);
                prop_assert!(segment.start >= set[segment.pid].arrival_time());
            }
        }
    }

    #[test]
    fn metrics_are_consistent(workload in workloads(), quantum in 1u64..5) {
        let set = process_set(&workload);
        for kind in PolicyKind::ALL {
            let schedule = run(kind, quantum, &set);
            for (process, row) in set.iter().zip(schedule.metrics.processes()) {
                let last_end = schedule.timeline.of(process.pid()).last().map(|s| s.end);
                prop_assert_eq!(Some(row.completion_time), last_end);
                prop_assert_eq!(row.turnaround_time, row.completion_time - process.arrival_time());
                prop_assert_eq!(row.waiting_time + process.burst_time(), row.turnaround_time);
            }

            let n = set.len() as f64;
            let waiting: u64 = schedule.metrics.processes().iter().map(|r| r.waiting_time).sum();
            prop_assert!((schedule.metrics.average_waiting() - waiting as f64 / n).abs() < 1e-9);
        }
    }

    #[test]
    fn runs_are_idempotent(workload in workloads(), quantum in 1u64..5) {
        let set = process_set(&workload);
        for kind in PolicyKind::ALL {
            prop_assert_eq!(run(kind, quantum, &set), run(kind, quantum, &set));
        }
    }

    #[test]
    fn non_preemptive_policies_run_each_process_once(workload in workloads()) {
        let set = process_set(&workload);
        for kind in [PolicyKind::Fcfs, PolicyKind::SjfNonPreemptive, PolicyKind::PriorityNonPreemptive] {
            let schedule = run(kind, 1, &set);
            prop_assert_eq!(schedule.timeline.len(), set.len());
        }
    }
}
