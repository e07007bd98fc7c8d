//! Exit rates per page type and per day.
//!
//! The exit rate divides a session count (sessions ending on the page) by
//! an event count (views of the page). That mix of units is deliberate and
//! must not be "corrected" here; see `ExitRate`.

use super::sessions::SessionIndex;
use super::stats::{percentage, FrequencyTable};
use crate::parser::schema::{DailyExitRate, ExitCount, ExitRate};
use crate::parser::EventLog;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Views per page type over the whole log
fn page_views(log: &EventLog) -> BTreeMap<&str, usize> {
    let mut views = BTreeMap::new();
    for event in log {
        *views.entry(event.page_type.as_str()).or_insert(0) += 1;
    }
    views
}

/// Calculate exit rate per page type
///
/// **Public** - main entry point for exit metrics
///
/// exit_rate(p) = 100 * sessions whose last event is on p / events on p.
/// Page types that are viewed but never exited from get 0.
/// Rows are ordered by page_type.
pub fn calculate_exit_rates(log: &EventLog, index: &SessionIndex<'_>) -> Vec<ExitRate> {
    let views = page_views(log);

    let mut exits: BTreeMap<&str, usize> = BTreeMap::new();
    for session in index.iter() {
        *exits.entry(session.last_event().page_type.as_str()).or_insert(0) += 1;
    }

    debug!("Exit counts: {:?}", exits);

    views
        .into_iter()
        .map(|(page_type, views)| {
            let exits = exits.get(page_type).copied().unwrap_or(0);
            ExitRate {
                page_type: page_type.to_string(),
                exits,
                views,
                exit_rate: percentage(exits, views),
            }
        })
        .collect()
}

/// Absolute exits per page type with its views, most frequent first
///
/// **Public** - the bar-chart view of exits
pub fn exit_distribution(log: &EventLog, index: &SessionIndex<'_>) -> Vec<ExitCount> {
    let views = page_views(log);

    index
        .iter()
        .map(|s| s.last_event().page_type.as_str())
        .collect::<FrequencyTable<_>>()
        .ranked()
        .into_iter()
        .map(|(page_type, exits)| ExitCount {
            page_type: page_type.to_string(),
            exits,
            views: views.get(page_type).copied().unwrap_or(0),
        })
        .collect()
}

/// Exit rate per (day, page_type)
///
/// **Public** - time series of exit rates
///
/// Each session's exit is its latest event; the exit is attributed to the
/// day of that event and divided by the page's views on the same day.
/// When several events share the latest timestamp, the one that comes last
/// in the input wins, matching `calculate_exit_rates`.
/// Rows are ordered by (day, page_type).
pub fn exit_rate_over_time(log: &EventLog, index: &SessionIndex<'_>) -> Vec<DailyExitRate> {
    let mut views: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for event in log {
        *views.entry((event.event_day, event.page_type.as_str())).or_insert(0) += 1;
    }

    let mut exits: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for session in index.iter() {
        let last = session.last_event();
        *exits.entry((last.event_day, last.page_type.as_str())).or_insert(0) += 1;
    }

    views
        .into_iter()
        .map(|((day, page_type), views)| {
            let exits = exits.get(&(day, page_type)).copied().unwrap_or(0);
            DailyExitRate {
                day,
                page_type: page_type.to_string(),
                exits,
                views,
                exit_rate: percentage(exits, views),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::sessions::build_session_index;
    use crate::parser::{parse_timestamp, Event};

    fn event(session: &str, ts: &str, page: &str) -> Event {
        Event::new("u", session, parse_timestamp(ts).unwrap(), page)
    }

    fn sample_log() -> EventLog {
        EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00", "listing_page"),
            event("s1", "2024-01-01 10:05:00", "product_page"),
            event("s2", "2024-01-01 11:00:00", "listing_page"),
            event("s3", "2024-01-02 09:00:00", "product_page"),
            event("s3", "2024-01-02 09:01:00", "listing_page"),
            event("s3", "2024-01-02 09:02:00", "product_page"),
        ])
    }

    #[test]
    fn test_exit_rates_mix_sessions_and_events() {
        let log = sample_log();
        let index = build_session_index(&log);
        let rates = calculate_exit_rates(&log, &index);

        assert_eq!(rates.len(), 2);
        // listing_page: 1 exit (s2) over 3 views
        assert_eq!(rates[0].page_type, "listing_page");
        assert_eq!(rates[0].exits, 1);
        assert_eq!(rates[0].views, 3);
        // product_page: 2 exits (s1, s3) over 3 views
        assert_eq!(rates[1].exits, 2);
        assert!(rates.iter().all(|r| {
            let rate = r.exit_rate.unwrap();
            (0.0..=100.0).contains(&rate)
        }));
    }

    #[test]
    fn test_page_without_exits_has_zero_rate() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00", "search_listing_page"),
            event("s1", "2024-01-01 10:01:00", "listing_page"),
        ]);
        let index = build_session_index(&log);
        let rates = calculate_exit_rates(&log, &index);

        let search = rates.iter().find(|r| r.page_type == "search_listing_page").unwrap();
        assert_eq!(search.exit_rate, Some(0.0));
    }

    #[test]
    fn test_exit_distribution_ranked() {
        let log = sample_log();
        let index = build_session_index(&log);
        let dist = exit_distribution(&log, &index);

        assert_eq!(dist[0].page_type, "product_page");
        assert_eq!(dist[0].exits, 2);
        assert_eq!(dist[0].views, 3);
        assert_eq!(dist[1].exits, 1);
    }

    #[test]
    fn test_exit_tie_goes_to_last_input_row() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00", "listing_page"),
            event("s1", "2024-01-01 10:05:00", "product_page"),
            event("s1", "2024-01-01 10:05:00", "order_page"),
        ]);
        let index = build_session_index(&log);
        let daily = exit_rate_over_time(&log, &index);

        let exits: Vec<(&str, usize)> = daily
            .iter()
            .map(|r| (r.page_type.as_str(), r.exits))
            .collect();
        assert_eq!(
            exits,
            vec![("listing_page", 0), ("order_page", 1), ("product_page", 0)]
        );
    }

    #[test]
    fn test_exit_rate_over_time_per_day() {
        let log = sample_log();
        let index = build_session_index(&log);
        let daily = exit_rate_over_time(&log, &index);

        let day1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let find = |d: NaiveDate, p: &str| {
            daily
                .iter()
                .find(|r| r.day == d && r.page_type == p)
                .unwrap()
        };
        assert_eq!(find(day1, "listing_page").exit_rate, Some(50.0));
        assert_eq!(find(day1, "product_page").exit_rate, Some(100.0));
        assert_eq!(find(day2, "listing_page").exit_rate, Some(0.0));
        assert_eq!(find(day2, "product_page").exit_rate, Some(50.0));
    }
}
