use std::fmt::{self, Display};

use scheduler::{ProcessSet, Timeline};

/// Widest the time-proportional part of a chart gets, in characters.
///
/// Longer schedules are drawn with fewer than one character per time unit.
pub const MAX_CHART_WIDTH: usize = 160;

/// One column of the chart. Idle time has no label.
#[derive(Debug, Clone, PartialEq)]
struct Cell<'a> {
    label: Option<&'a str>,
    start: u64,
    end: u64,
}

/// A proportional text Gantt chart.
///
/// Each cell is `unit_width` characters per time unit wide, scaled down when
/// the whole schedule would exceed [`MAX_CHART_WIDTH`], but never narrower
/// than its label plus one space on each side. Idle stretches,
/// including the one before the first segment, are drawn with dashes.
///
/// ```text
/// |    P1    |  P2  |       P3       |
/// 0          5      8                16
/// ```
#[derive(Debug, Clone)]
pub struct GanttChart<'a> {
    cells: Vec<Cell<'a>>,
    /// Characters per time unit.
    scale: f64,
}

impl<'a> GanttChart<'a> {
    pub fn new(timeline: &Timeline, processes: &'a ProcessSet, unit_width: usize) -> Self {
        let mut cells = Vec::with_capacity(timeline.len());
        let mut clock = 0;

        for segment in timeline {
            if segment.start > clock {
                cells.push(Cell {
                    label: None,
                    start: clock,
                    end: segment.start,
                });
            }
            cells.push(Cell {
                label: Some(processes[segment.pid].id()),
                start: segment.start,
                end: segment.end,
            });
            clock = segment.end;
        }

        let unit_width = unit_width.max(1) as f64;
        let end = timeline.end() as f64;
        let scale = if end * unit_width > MAX_CHART_WIDTH as f64 {
            MAX_CHART_WIDTH as f64 / end
        } else {
            unit_width
        };

        GanttChart { cells, scale }
    }

    fn width(&self, cell: &Cell<'_>) -> usize {
        let label = cell.label.map_or(0, |label| label.chars().count());
        // float to int casts saturate
        let span = ((cell.end - cell.start) as f64 * self.scale).round() as usize;
        span.max(label + 2)
    }

    /// The row of labelled cells.
    pub fn bar(&self) -> String {
        let mut bar = String::from("|");
        for cell in &self.cells {
            let width = self.width(cell);
            match cell.label {
                Some(label) => bar.push_str(&format!("{:^width$}", label)),
                None => bar.push_str(&"-".repeat(width)),
            }
            bar.push('|');
        }
        bar
    }

    /// The boundary times, each printed under its `|`.
    pub fn axis(&self) -> String {
        let mut axis = String::new();
        let mut position = 0;

        place(&mut axis, position, self.cells.first().map_or(0, |cell| cell.start));
        for cell in &self.cells {
            position += self.width(cell) + 1;
            place(&mut axis, position, cell.end);
        }
        axis
    }
}

fn place(axis: &mut String, position: usize, time: u64) {
    let len = axis.chars().count();
    if len < position {
        axis.push_str(&" ".repeat(position - len));
    } else if len > 0 {
        axis.push(' ');
    }
    axis.push_str(&time.to_string());
}

impl Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.bar())?;
        writeln!(f, "{}", self.axis())
    }
}
