//! Bounce rates per page type, overall and per day.
//!
//! A session bounces when it holds exactly one event; the bounce is
//! attributed to that event's page type.

use super::sessions::SessionIndex;
use super::stats::percentage;
use crate::parser::schema::{BounceRate, DailyBounceRate};
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, HashSet};

/// Calculate bounce rate per page type
///
/// **Public** - main entry point for bounce metrics
///
/// bounce_rate(p) = 100 * bounced sessions on p / distinct sessions that
/// visited p. Rows are ordered by page_type.
pub fn calculate_bounce_rates(index: &SessionIndex<'_>) -> Vec<BounceRate> {
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for session in index.iter() {
        let pages: HashSet<&str> = session.events().iter().map(|e| e.page_type.as_str()).collect();
        for page in pages {
            totals.entry(page).or_insert((0, 0)).0 += 1;
        }
        if session.is_bounce() {
            totals
                .entry(session.first_event().page_type.as_str())
                .or_insert((0, 0))
                .1 += 1;
        }
    }

    debug!("{} of {} sessions bounced", index.bounce_count(), index.len());

    totals
        .into_iter()
        .map(|(page_type, (total_sessions, bounced_sessions))| BounceRate {
            page_type: page_type.to_string(),
            total_sessions,
            bounced_sessions,
            bounce_rate: percentage(bounced_sessions, total_sessions),
        })
        .collect()
}

/// Calculate bounce rate per (day, page_type)
///
/// **Public** - same ratio inside each calendar day; pairs with no bounces
/// report 0 bounced sessions. Rows are ordered by (day, page_type).
pub fn daily_bounce_rates(index: &SessionIndex<'_>) -> Vec<DailyBounceRate> {
    let mut totals: BTreeMap<(NaiveDate, &str), (usize, usize)> = BTreeMap::new();

    for session in index.iter() {
        let keys: HashSet<(NaiveDate, &str)> = session
            .events()
            .iter()
            .map(|e| (e.event_day, e.page_type.as_str()))
            .collect();
        for key in keys {
            totals.entry(key).or_insert((0, 0)).0 += 1;
        }
        if session.is_bounce() {
            let event = session.first_event();
            totals
                .entry((event.event_day, event.page_type.as_str()))
                .or_insert((0, 0))
                .1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|((day, page_type), (total_sessions, bounced_sessions))| DailyBounceRate {
            day,
            page_type: page_type.to_string(),
            total_sessions,
            bounced_sessions,
            bounce_rate: percentage(bounced_sessions, total_sessions),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::sessions::build_session_index;
    use crate::parser::{parse_timestamp, Event, EventLog};

    fn event(session: &str, ts: &str, page: &str) -> Event {
        Event::new("u", session, parse_timestamp(ts).unwrap(), page)
    }

    #[test]
    fn test_bounce_rates_per_page() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00", "listing_page"),
            event("s2", "2024-01-01 10:00:00", "listing_page"),
            event("s2", "2024-01-01 10:01:00", "listing_page"),
            event("s2", "2024-01-01 10:02:00", "product_page"),
            event("s3", "2024-01-01 11:00:00", "product_page"),
        ]);
        let index = build_session_index(&log);
        let rates = calculate_bounce_rates(&index);

        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].page_type, "listing_page");
        // s2 visits listing_page twice but counts once
        assert_eq!(rates[0].total_sessions, 2);
        assert_eq!(rates[0].bounced_sessions, 1);
        assert_eq!(rates[0].bounce_rate, Some(50.0));
        assert_eq!(rates[1].total_sessions, 2);
        assert_eq!(rates[1].bounced_sessions, 1);
    }

    #[test]
    fn test_single_event_session_counted_once() {
        let log = EventLog::new(vec![event("s1", "2024-01-01 10:00:00", "order_page")]);
        let index = build_session_index(&log);
        let rates = calculate_bounce_rates(&index);

        let bounced: usize = rates.iter().map(|r| r.bounced_sessions).sum();
        assert_eq!(bounced, 1);
        assert_eq!(rates[0].bounce_rate, Some(100.0));
    }

    #[test]
    fn test_daily_bounce_rates_fill_zero() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00", "listing_page"),
            event("s2", "2024-01-02 10:00:00", "listing_page"),
            event("s2", "2024-01-02 10:05:00", "product_page"),
        ]);
        let index = build_session_index(&log);
        let daily = daily_bounce_rates(&index);

        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(daily[0].bounce_rate, Some(100.0));
        assert_eq!(daily[1].bounced_sessions, 0);
        assert_eq!(daily[1].bounce_rate, Some(0.0));
        assert!(daily.iter().all(|r| r.total_sessions > 0));
    }
}
