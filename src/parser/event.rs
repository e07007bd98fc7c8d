//! Event records and the immutable event log.
//!
//! Derived columns (`event_day`, `hour`, `day_of_week`) are computed once
//! when an event is built. Aggregators only ever borrow the log.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashSet;

/// One row of the clickstream: a single user interaction
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Zero-based position in the source table (stable tie-breaker)
    pub row: usize,

    pub user: String,
    pub session: String,
    pub event_date: NaiveDateTime,
    pub page_type: String,

    /// `None` for an ordinary page view
    pub event_type: Option<String>,

    /// Product identifier, present on cart-related events
    pub product: Option<String>,

    /// Calendar day of `event_date`
    pub event_day: NaiveDate,

    /// Hour of day, 0-23
    pub hour: u32,

    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
}

impl Event {
    /// Build a plain page-view event and derive its calendar columns
    pub fn new(
        user: impl Into<String>,
        session: impl Into<String>,
        event_date: NaiveDateTime,
        page_type: impl Into<String>,
    ) -> Self {
        Self {
            row: 0,
            user: user.into(),
            session: session.into(),
            event_date,
            page_type: page_type.into(),
            event_type: None,
            product: None,
            event_day: event_date.date(),
            hour: event_date.hour(),
            day_of_week: event_date.weekday().num_days_from_monday(),
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        let event_type = event_type.into();
        self.event_type = if event_type.is_empty() {
            None
        } else {
            Some(event_type)
        };
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        let product = product.into();
        self.product = if product.is_empty() { None } else { Some(product) };
        self
    }

    /// True if this event carries the given event type
    pub fn is(&self, event_type: &str) -> bool {
        self.event_type.as_deref() == Some(event_type)
    }
}

/// The in-memory event table shared by every aggregator
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Wrap events in input order, numbering their rows
    pub fn new(mut events: Vec<Event>) -> Self {
        for (row, event) in events.iter_mut().enumerate() {
            event.row = row;
        }
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn distinct_users(&self) -> usize {
        self.events
            .iter()
            .map(|e| e.user.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn distinct_sessions(&self) -> usize {
        self.events
            .iter()
            .map(|e| e.session.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// First and last calendar day present in the log
    pub fn day_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.events.iter().map(|e| e.event_day).min()?;
        let last = self.events.iter().map(|e| e.event_day).max()?;
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_timestamp;

    #[test]
    fn test_event_derives_calendar_columns() {
        // 2024-01-07 is a Sunday
        let event = Event::new("u1", "s1", parse_timestamp("2024-01-07 22:15:00").unwrap(), "listing_page");

        assert_eq!(event.event_day, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(event.hour, 22);
        assert_eq!(event.day_of_week, 6);
        assert!(event.event_type.is_none());
    }

    #[test]
    fn test_empty_event_type_is_page_view() {
        let event = Event::new("u1", "s1", parse_timestamp("2024-01-01 10:00:00").unwrap(), "listing_page")
            .with_event_type("")
            .with_product("");

        assert!(event.event_type.is_none());
        assert!(event.product.is_none());
    }

    #[test]
    fn test_log_numbers_rows_and_counts() {
        let ts = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let log = EventLog::new(vec![
            Event::new("u1", "s1", ts, "listing_page"),
            Event::new("u1", "s2", ts, "product_page"),
            Event::new("u2", "s3", ts, "listing_page"),
        ]);

        assert_eq!(log.len(), 3);
        assert_eq!(log.events()[2].row, 2);
        assert_eq!(log.distinct_users(), 2);
        assert_eq!(log.distinct_sessions(), 3);
    }
}
