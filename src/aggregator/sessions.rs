//! Session reconstruction.
//!
//! One grouped pass over the log builds every session with its events in
//! chronological order. Exits, bounces, journeys and loyalty all read from
//! this index instead of re-scanning the table.
//!
//! Order inside a session: ascending `event_date`, equal timestamps keep
//! input row order. The last event in that order is the session's exit.

use crate::parser::{Event, EventLog};
use log::debug;
use std::collections::HashMap;

/// All events sharing one session identifier
#[derive(Debug, Clone)]
pub struct Session<'a> {
    pub id: &'a str,
    pub user: &'a str,
    events: Vec<&'a Event>,
}

impl<'a> Session<'a> {
    /// Events in chronological order
    pub fn events(&self) -> &[&'a Event] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn first_event(&self) -> &'a Event {
        self.events[0]
    }

    pub fn last_event(&self) -> &'a Event {
        self.events[self.events.len() - 1]
    }

    /// `max(event_date) - min(event_date)`, never negative
    pub fn duration(&self) -> chrono::Duration {
        self.last_event().event_date - self.first_event().event_date
    }

    /// A bounce is a session with exactly one event
    pub fn is_bounce(&self) -> bool {
        self.events.len() == 1
    }

    /// Ordered page types visited in this session
    pub fn page_sequence(&self) -> Vec<&'a str> {
        self.events.iter().map(|e| e.page_type.as_str()).collect()
    }

    pub fn contains_event(&self, event_type: &str) -> bool {
        self.events.iter().any(|e| e.is(event_type))
    }
}

/// Sessions in order of first appearance in the log
#[derive(Debug, Clone)]
pub struct SessionIndex<'a> {
    sessions: Vec<Session<'a>>,
}

impl<'a> SessionIndex<'a> {
    pub fn sessions(&self) -> &[Session<'a>] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session<'a>> {
        self.sessions.iter()
    }

    pub fn bounce_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_bounce()).count()
    }
}

/// Group the log into sessions
///
/// **Public** - main entry point for session reconstruction
///
/// # Algorithm
/// 1. Walk events once, appending each to its session bucket
/// 2. Sort every bucket by (timestamp, input row)
pub fn build_session_index(log: &EventLog) -> SessionIndex<'_> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut sessions: Vec<Session<'_>> = Vec::new();

    for event in log {
        let pos = *positions.entry(event.session.as_str()).or_insert_with(|| {
            sessions.push(Session {
                id: event.session.as_str(),
                user: event.user.as_str(),
                events: Vec::new(),
            });
            sessions.len() - 1
        });
        sessions[pos].events.push(event);
    }

    for session in &mut sessions {
        session.events.sort_by_key(|e| (e.event_date, e.row));
    }

    debug!("Reconstructed {} sessions from {} events", sessions.len(), log.len());

    SessionIndex { sessions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_timestamp;

    fn event(user: &str, session: &str, ts: &str, page: &str) -> Event {
        Event::new(user, session, parse_timestamp(ts).unwrap(), page)
    }

    #[test]
    fn test_sessions_sorted_chronologically() {
        let log = EventLog::new(vec![
            event("u1", "s1", "2024-01-01 10:10:00", "order_page"),
            event("u1", "s1", "2024-01-01 10:00:00", "listing_page"),
            event("u2", "s2", "2024-01-01 09:00:00", "product_page"),
        ]);
        let index = build_session_index(&log);

        assert_eq!(index.len(), 2);
        let s1 = &index.sessions()[0];
        assert_eq!(s1.id, "s1");
        assert_eq!(s1.page_sequence(), vec!["listing_page", "order_page"]);
        assert_eq!(s1.last_event().page_type, "order_page");
        assert_eq!(s1.duration(), chrono::Duration::minutes(10));
        assert!(index.sessions()[1].is_bounce());
        assert_eq!(index.bounce_count(), 1);
    }

    #[test]
    fn test_equal_timestamps_keep_row_order() {
        let log = EventLog::new(vec![
            event("u1", "s1", "2024-01-01 10:00:00", "listing_page"),
            event("u1", "s1", "2024-01-01 10:00:00", "product_page"),
        ]);
        let index = build_session_index(&log);

        assert_eq!(index.sessions()[0].last_event().page_type, "product_page");
        assert_eq!(index.sessions()[0].duration(), chrono::Duration::zero());
    }

    #[test]
    fn test_interleaved_ties_ordered_by_time_then_row() {
        let log = EventLog::new(vec![
            event("u1", "s1", "2024-01-01 10:05:00", "product_page"),
            event("u1", "s1", "2024-01-01 10:00:00", "listing_page"),
            event("u1", "s1", "2024-01-01 10:05:00", "order_page"),
            event("u1", "s1", "2024-01-01 10:00:00", "search_listing_page"),
        ]);
        let index = build_session_index(&log);
        let session = &index.sessions()[0];

        let rows: Vec<usize> = session.events().iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![1, 3, 0, 2]);
        assert_eq!(session.last_event().page_type, "order_page");
    }

    #[test]
    fn test_contains_event() {
        let log = EventLog::new(vec![
            event("u1", "s1", "2024-01-01 10:00:00", "listing_page"),
            event("u1", "s1", "2024-01-01 10:01:00", "order_page").with_event_type("order"),
        ]);
        let index = build_session_index(&log);

        assert!(index.sessions()[0].contains_event("order"));
        assert!(!index.sessions()[0].contains_event("add_to_cart"));
    }
}
