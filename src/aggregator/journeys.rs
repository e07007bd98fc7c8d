//! Journey and purchase-path mining.
//!
//! A journey is the ordered list of page types of one session. Identical
//! lists count as the same journey. Both miners read the session index,
//! so the table is scanned once no matter how many metrics are built.

use super::sessions::SessionIndex;
use super::stats::FrequencyTable;
use crate::parser::schema::{JourneyCount, PathCount};
use crate::utils::config::PATH_DELIMITER;
use log::debug;

/// Every distinct journey with its session count, most frequent first
///
/// **Public** - counts always sum to the number of sessions
pub fn journey_frequencies(index: &SessionIndex<'_>) -> Vec<JourneyCount> {
    let table: FrequencyTable<Vec<&str>> = index.iter().map(|s| s.page_sequence()).collect();

    debug!("{} distinct journeys over {} sessions", table.len(), index.len());

    table
        .ranked()
        .into_iter()
        .map(into_journey_count)
        .collect()
}

/// The `top_n` most common journeys
///
/// **Public** - main entry point for journey mining; ties keep the order
/// in which journeys first appeared
pub fn common_journeys(index: &SessionIndex<'_>, top_n: usize) -> Vec<JourneyCount> {
    index
        .iter()
        .map(|s| s.page_sequence())
        .collect::<FrequencyTable<_>>()
        .top(top_n)
        .into_iter()
        .map(into_journey_count)
        .collect()
}

fn into_journey_count((journey, sessions): (Vec<&str>, usize)) -> JourneyCount {
    JourneyCount {
        journey: journey.into_iter().map(str::to_string).collect(),
        sessions,
    }
}

/// Render a journey as a single path string
pub fn journey_to_path(journey: &[impl AsRef<str>]) -> String {
    journey
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(PATH_DELIMITER)
}

/// The `top_n` most common paths among sessions that purchased
///
/// **Public** - sessions containing at least one `order_event` are kept;
/// each contributes its path string once. Sorted by count descending,
/// ties in first-appearance order.
pub fn purchase_paths(index: &SessionIndex<'_>, order_event: &str, top_n: usize) -> Vec<PathCount> {
    let table: FrequencyTable<String> = index
        .iter()
        .filter(|s| s.contains_event(order_event))
        .map(|s| journey_to_path(&s.page_sequence()))
        .collect();

    debug!("{} purchase sessions, {} distinct paths", table.total(), table.len());

    table
        .top(top_n)
        .into_iter()
        .map(|(path, count)| PathCount { path, count })
        .collect()
}
