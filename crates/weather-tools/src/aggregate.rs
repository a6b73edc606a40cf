//! Collapse fine-grained forecast samples into daily summaries.
//!
//! Samples are grouped by the date portion of their timestamp text, taken
//! verbatim with no timezone conversion. Groups keep the order in which their
//! day was first seen; they are never re-sorted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Length of the `YYYY-MM-DD` prefix of a provider timestamp.
const DAY_KEY_LEN: usize = 10;

/// One forecast data point.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// Provider timestamp text, e.g. `2024-05-01 12:00:00`.
    pub timestamp: String,
    pub temp: f64,
    /// Condition labels; only the first one represents the sample.
    pub labels: Vec<String>,
}

impl RawSample {
    pub fn new(timestamp: impl Into<String>, temp: f64, labels: Vec<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            temp,
            labels,
        }
    }

    /// Calendar-day key: the timestamp truncated to day granularity.
    pub fn day_key(&self) -> &str {
        self.timestamp
            .get(..DAY_KEY_LEN)
            .unwrap_or(&self.timestamp)
    }

    fn label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }
}

/// Aggregated record for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub summary: String,
}

struct DayGroup<'a> {
    temp_min: f64,
    temp_max: f64,
    labels: Vec<&'a str>,
}

/// Summarize `samples` into at most `days` daily records.
///
/// Returns fewer records when the samples cover fewer distinct days; nothing
/// is padded or synthesized. `days` of zero is treated as one.
pub fn aggregate_daily(samples: &[RawSample], days: usize) -> Vec<DailySummary> {
    let mut groups: IndexMap<&str, DayGroup<'_>> = IndexMap::new();

    for sample in samples {
        let group = groups.entry(sample.day_key()).or_insert_with(|| DayGroup {
            temp_min: sample.temp,
            temp_max: sample.temp,
            labels: Vec::new(),
        });
        group.temp_min = group.temp_min.min(sample.temp);
        group.temp_max = group.temp_max.max(sample.temp);
        group.labels.push(sample.label());
    }

    groups
        .into_iter()
        .take(days.max(1))
        .map(|(date, group)| DailySummary {
            date: date.to_string(),
            temp_min: group.temp_min,
            temp_max: group.temp_max,
            summary: mode_label(&group.labels).to_string(),
        })
        .collect()
}

/// Most frequent label. Among equally frequent labels, the one whose last
/// occurrence comes latest wins.
pub fn mode_label<'a>(labels: &[&'a str]) -> &'a str {
    // label -> (count, index of last occurrence)
    let mut tally: IndexMap<&'a str, (usize, usize)> = IndexMap::new();
    for (idx, label) in labels.iter().enumerate() {
        let entry = tally.entry(*label).or_insert((0, idx));
        entry.0 += 1;
        entry.1 = idx;
    }

    tally
        .into_iter()
        .max_by_key(|(_, (count, last))| (*count, *last))
        .map(|(label, _)| label)
        .unwrap_or("")
}
