use serde::Serialize;

use crate::scheduler::Pid;

/// A process ran without interruption during `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub pid: Pid,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn new(pid: Pid, start: u64, end: u64) -> Segment {
        debug_assert!(end > start, "segment of {pid} is empty: [{start}, {end})");
        Segment { pid, start, end }
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

/// The ordered execution record of one simulation run.
///
/// Segments are sorted by start time and never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline::default()
    }

    /// Appends a segment, even if it continues the previous one.
    pub fn push(&mut self, segment: Segment) {
        debug_assert!(
            self.end() <= segment.start,
            "segment starting at {} overlaps the timeline ending at {}",
            segment.start,
            self.end()
        );
        self.segments.push(segment);
    }

    /// Appends a segment, merging it into the last one when the same
    /// process keeps running with no gap.
    pub fn extend_or_push(&mut self, segment: Segment) {
        match self.segments.last_mut() {
            Some(last) if last.pid == segment.pid && last.end == segment.start => {
                last.end = segment.end;
            }
            _ => self.push(segment),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment, or 0 for an empty timeline.
    pub fn end(&self) -> u64 {
        self.segments.last().map_or(0, |segment| segment.end)
    }

    /// All segments of one process, in order.
    pub fn of(&self, pid: Pid) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |segment| segment.pid == pid)
    }

    /// Total time `pid` spent running.
    pub fn busy_time(&self, pid: Pid) -> u64 {
        self.of(pid).map(Segment::duration).sum()
    }

    /// Time the CPU spent with nothing to run, up to the end of the timeline.
    pub fn idle_time(&self) -> u64 {
        let busy: u64 = self.segments.iter().map(Segment::duration).sum();
        self.end() - busy
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
