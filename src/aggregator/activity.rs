//! Temporal and interaction patterns.
//!
//! Daily interaction counts, the day-of-week x hour heatmap, and the
//! products users last put in their cart before leaving.

use super::sessions::SessionIndex;
use super::stats::FrequencyTable;
use crate::parser::schema::{DailyCount, HeatmapCell, ProductCount};
use crate::parser::EventLog;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Events per calendar day
///
/// **Public** - fixed-width daily resample
///
/// With `event_type` set only matching events are counted. Days between
/// the first and last counted day with no events are reported as 0.
pub fn daily_interactions(log: &EventLog, event_type: Option<&str>) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for event in log {
        if event_type.map_or(true, |t| event.is(t)) {
            *counts.entry(event.event_day).or_insert(0) += 1;
        }
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| DailyCount {
            day,
            count: counts.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

/// Event counts per (day_of_week, hour)
///
/// **Public** - sparse: cells without events are not emitted.
/// Ordered by (day_of_week, hour).
pub fn interaction_heatmap(log: &EventLog) -> Vec<HeatmapCell> {
    let mut cells: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    for event in log {
        *cells.entry((event.day_of_week, event.hour)).or_insert(0) += 1;
    }

    cells
        .into_iter()
        .map(|((day_of_week, hour), count)| HeatmapCell {
            day_of_week,
            hour,
            count,
        })
        .collect()
}

/// Products of each session's last cart addition, most frequent first
///
/// **Public** - per session, the latest `add_to_cart_event` that carries a
/// product is kept; sessions without one are skipped
pub fn cart_products_before_exit(
    index: &SessionIndex<'_>,
    add_to_cart_event: &str,
    top_n: usize,
) -> Vec<ProductCount> {
    index
        .iter()
        .filter_map(|session| {
            session
                .events()
                .iter()
                .rev()
                .filter(|e| e.is(add_to_cart_event))
                .find_map(|e| e.product.as_deref())
        })
        .collect::<FrequencyTable<_>>()
        .top(top_n)
        .into_iter()
        .map(|(product, count)| ProductCount {
            product: product.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::sessions::build_session_index;
    use crate::parser::{parse_timestamp, Event};

    fn event(session: &str, ts: &str) -> Event {
        Event::new("u", session, parse_timestamp(ts).unwrap(), "product_page")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_daily_interactions_fills_gaps() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00"),
            event("s1", "2024-01-01 12:00:00"),
            event("s2", "2024-01-03 08:00:00"),
        ]);
        let daily = daily_interactions(&log, None);

        assert_eq!(
            daily,
            vec![
                DailyCount {
                    day: day(1),
                    count: 2,
                },
                DailyCount {
                    day: day(2),
                    count: 0,
                },
                DailyCount {
                    day: day(3),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_daily_interactions_filtered() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00"),
            event("s1", "2024-01-02 10:00:00").with_event_type("add_to_cart"),
        ]);

        let carts = daily_interactions(&log, Some("add_to_cart"));
        assert_eq!(
            carts,
            vec![DailyCount {
                day: day(2),
                count: 1,
            }]
        );

        assert!(daily_interactions(&log, Some("order")).is_empty());
    }

    #[test]
    fn test_interaction_heatmap_sparse() {
        // 2024-01-01 is a Monday, 2024-01-07 a Sunday
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:15:00"),
            event("s1", "2024-01-01 10:45:00"),
            event("s2", "2024-01-07 23:00:00"),
        ]);
        let cells = interaction_heatmap(&log);

        assert_eq!(
            cells,
            vec![
                HeatmapCell {
                    day_of_week: 0,
                    hour: 10,
                    count: 2,
                },
                HeatmapCell {
                    day_of_week: 6,
                    hour: 23,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_cart_products_before_exit() {
        let log = EventLog::new(vec![
            event("s1", "2024-01-01 10:00:00").with_event_type("add_to_cart").with_product("p1"),
            event("s1", "2024-01-01 10:05:00").with_event_type("add_to_cart").with_product("p2"),
            event("s2", "2024-01-01 11:00:00").with_event_type("add_to_cart").with_product("p2"),
            event("s3", "2024-01-01 12:00:00"),
        ]);
        let index = build_session_index(&log);
        let products = cart_products_before_exit(&index, "add_to_cart", 10);

        assert_eq!(
            products,
            vec![ProductCount {
                product: "p2".to_string(),
                count: 2,
            }]
        );
    }
}
