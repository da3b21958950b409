//! Process list loading and identifier normalization.
//!
//! The scheduler expects unique, non-empty identifiers and rejects anything
//! else. Renaming is a front end decision, so it happens here.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use scheduler::RawProcess;
use serde::Deserialize;
use tracing::{info, warn};

const DEFAULT_PRIORITY: f64 = 1.0;

/// One process as written in the input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub id: String,
    pub arrival_time: f64,
    pub burst_time: f64,
    #[serde(default = "default_priority")]
    pub priority: f64,
}

fn default_priority() -> f64 {
    DEFAULT_PRIORITY
}

/// Reads a process list, as JSON when the file ends in `.json` and as
/// whitespace separated text otherwise.
pub fn load(path: &Path) -> Result<Vec<RawProcess>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let rows = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))?
    } else {
        parse_text(&contents).with_context(|| format!("failed to parse {}", path.display()))?
    };

    info!(path = %path.display(), processes = rows.len(), "loaded process list");
    normalize(rows)
}

/// Parses `id arrival burst [priority]` lines. Blank lines and `#` comments
/// are skipped.
pub fn parse_text(contents: &str) -> Result<Vec<Row>> {
    let mut rows = Vec::new();

    for (number, line) in contents.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (id, arrival, burst, priority) = match fields.as_slice() {
            [id, arrival, burst] => (id, arrival, burst, None),
            [id, arrival, burst, priority] => (id, arrival, burst, Some(priority)),
            _ => bail!(
                "line {}: expected `id arrival burst [priority]`, got {} fields",
                number + 1,
                fields.len()
            ),
        };

        let field = |name: &str, value: &str| {
            value
                .parse::<f64>()
                .with_context(|| format!("line {}: {} {:?} is not a number", number + 1, name, value))
        };

        rows.push(Row {
            id: id.to_string(),
            arrival_time: field("arrival", arrival)?,
            burst_time: field("burst", burst)?,
            priority: match priority {
                Some(priority) => field("priority", priority)?,
                None => DEFAULT_PRIORITY,
            },
        });
    }

    Ok(rows)
}

/// Truncates the numbers and makes every identifier unique.
///
/// An empty id becomes `P<row>`; an id seen before becomes `<id>_<row>`,
/// with rows counted from 1.
pub fn normalize(rows: Vec<Row>) -> Result<Vec<RawProcess>> {
    let mut seen = HashSet::new();
    let mut processes = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let mut id = row.id.trim().to_string();
        if id.is_empty() {
            id = format!("P{}", index + 1);
        }
        if seen.contains(&id) {
            let renamed = format!("{}_{}", id, index + 1);
            warn!(%id, %renamed, "duplicate process id renamed");
            id = renamed;
        }
        seen.insert(id.clone());

        processes.push(RawProcess::new(
            id.clone(),
            truncate(&id, "arrival", row.arrival_time)?,
            truncate(&id, "burst", row.burst_time)?,
            truncate(&id, "priority", row.priority)?,
        ));
    }

    Ok(processes)
}

fn truncate(id: &str, name: &str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        bail!("process {}: {} {} is out of range", id, name, value);
    }
    Ok(value.trunc() as i64)
}
