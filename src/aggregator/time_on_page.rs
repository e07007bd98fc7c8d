//! Time-on-page aggregation and its reshapes.
//!
//! Per (user, page_type, day) the time on page is `max - min` of the
//! event timestamps. A user with a single event on a page that day
//! contributes zero, which is expected rather than an error.

use super::sessions::SessionIndex;
use super::stats::duration_seconds;
use crate::parser::schema::{PageDayDuration, PageDurationRank, PageSessionDuration};
use crate::parser::EventLog;
use crate::utils::error::PivotError;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Average per-user minutes for every (page_type, day)
///
/// **Public** - main entry point for time-on-page
///
/// # Algorithm
/// 1. Group by (user, page_type, day) and take `max - min` per group
/// 2. Sum those durations per (page_type, day)
/// 3. Divide by the number of distinct users in that (page_type, day)
///
/// # Returns
/// Long-format rows ordered by (page_type, day)
pub fn compute_avg_time_on_page(log: &EventLog) -> Vec<PageDayDuration> {
    let mut spans: HashMap<(&str, &str, NaiveDate), (NaiveDateTime, NaiveDateTime)> =
        HashMap::new();

    for event in log {
        let key = (event.user.as_str(), event.page_type.as_str(), event.event_day);
        spans
            .entry(key)
            .and_modify(|(min, max)| {
                if event.event_date < *min {
                    *min = event.event_date;
                }
                if event.event_date > *max {
                    *max = event.event_date;
                }
            })
            .or_insert((event.event_date, event.event_date));
    }

    // (page_type, day) -> (total seconds, distinct users)
    let mut totals: BTreeMap<(&str, NaiveDate), (f64, usize)> = BTreeMap::new();
    for ((_, page_type, day), (min, max)) in spans {
        let entry = totals.entry((page_type, day)).or_insert((0.0, 0));
        entry.0 += duration_seconds(max - min);
        entry.1 += 1;
    }

    debug!("Time on page computed for {} (page_type, day) pairs", totals.len());

    totals
        .into_iter()
        .map(|((page_type, day), (seconds, users))| PageDayDuration {
            page_type: page_type.to_string(),
            day,
            avg_minutes: seconds / users as f64 / 60.0,
        })
        .collect()
}

/// Merge rows sharing a (day, page_type) key by arithmetic mean
///
/// **Public** - run before `pivot_durations` when the input may repeat keys
///
/// Output is ordered by (day, page_type).
pub fn collapse_duplicates(rows: &[PageDayDuration]) -> Vec<PageDayDuration> {
    let mut groups: BTreeMap<(NaiveDate, &str), (f64, usize)> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry((row.day, row.page_type.as_str())).or_insert((0.0, 0));
        entry.0 += row.avg_minutes;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((day, page_type), (sum, n))| PageDayDuration {
            page_type: page_type.to_string(),
            day,
            avg_minutes: sum / n as f64,
        })
        .collect()
}

/// Wide day x page_type matrix of average minutes
#[derive(Debug, Clone, PartialEq)]
pub struct DurationPivot {
    /// Row labels, ascending
    pub days: Vec<NaiveDate>,

    /// Column labels, ascending
    pub page_types: Vec<String>,

    /// `values[day][page_type]`, `None` where the pair never occurred
    pub values: Vec<Vec<Option<f64>>>,
}

impl DurationPivot {
    pub fn get(&self, day: NaiveDate, page_type: &str) -> Option<f64> {
        let row = self.days.binary_search(&day).ok()?;
        let col = self.page_types.iter().position(|p| p == page_type)?;
        self.values[row][col]
    }

    /// Values of one column paired with their day, skipping gaps
    pub fn column(&self, page_type: &str) -> Vec<(NaiveDate, f64)> {
        let Some(col) = self.page_types.iter().position(|p| p == page_type) else {
            return Vec::new();
        };
        self.days
            .iter()
            .zip(&self.values)
            .filter_map(|(day, row)| row[col].map(|v| (*day, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Reshape long rows into a day x page_type pivot
///
/// **Public** - heatmap and trend consumers read the pivot
///
/// # Errors
/// * `PivotError::DuplicateKey` - two rows share (day, page_type);
///   use `collapse_duplicates` first
pub fn pivot_durations(rows: &[PageDayDuration]) -> Result<DurationPivot, PivotError> {
    let days: Vec<NaiveDate> = rows
        .iter()
        .map(|r| r.day)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let page_types: Vec<String> = rows
        .iter()
        .map(|r| r.page_type.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut values = vec![vec![None; page_types.len()]; days.len()];

    for row in rows {
        // Both lookups succeed: labels were collected from these rows
        let r = days.binary_search(&row.day).unwrap_or_default();
        let c = page_types.binary_search(&row.page_type).unwrap_or_default();

        if values[r][c].is_some() {
            return Err(PivotError::DuplicateKey {
                day: row.day,
                page_type: row.page_type.clone(),
            });
        }
        values[r][c] = Some(row.avg_minutes);
    }

    Ok(DurationPivot {
        days,
        page_types,
        values,
    })
}

/// Rank page types by their mean daily average duration
///
/// **Public** - descending; equal means keep page_type order
pub fn rank_pages_by_duration(rows: &[PageDayDuration]) -> Vec<PageDurationRank> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.page_type.as_str()).or_insert((0.0, 0));
        entry.0 += row.avg_minutes;
        entry.1 += 1;
    }

    let mut ranking: Vec<PageDurationRank> = groups
        .into_iter()
        .map(|(page_type, (sum, n))| PageDurationRank {
            page_type: page_type.to_string(),
            mean_minutes: sum / n as f64,
        })
        .collect();

    ranking.sort_by(|a, b| b.mean_minutes.total_cmp(&a.mean_minutes));
    ranking
}

/// Average session duration per page type
///
/// **Public** - each session's `max - min` in seconds is attached to every
/// one of its events, then averaged per page_type over those events
pub fn session_duration_by_page(index: &SessionIndex<'_>) -> Vec<PageSessionDuration> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for session in index.iter() {
        let seconds = duration_seconds(session.duration());
        for event in session.events() {
            let entry = groups.entry(event.page_type.as_str()).or_insert((0.0, 0));
            entry.0 += seconds;
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(page_type, (sum, n))| PageSessionDuration {
            page_type: page_type.to_string(),
            avg_session_seconds: sum / n as f64,
        })
        .collect()
}
