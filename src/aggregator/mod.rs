//! Aggregation of the event log into funnel, engagement, exit and bounce metrics.
//!
//! This module transforms the event log into:
//! - Funnel stage counts and conversion
//! - Time-on-page tables, pivots and trend lines
//! - Exit and bounce rates
//! - Journeys, purchase paths and loyalty rankings
//! - Daily and hourly activity patterns
//!
//! Every aggregator borrows the same immutable `EventLog`; the ones that
//! need sessions share a single `SessionIndex`.

pub mod activity;
pub mod bounce;
pub mod exits;
pub mod funnel;
pub mod journeys;
pub mod loyalty;
pub mod sessions;
pub mod stats;
pub mod time_on_page;
pub mod trend;

// Re-export main types and functions
pub use activity::{cart_products_before_exit, daily_interactions, interaction_heatmap};
pub use bounce::{calculate_bounce_rates, daily_bounce_rates};
pub use exits::{calculate_exit_rates, exit_distribution, exit_rate_over_time};
pub use funnel::{calculate_funnel, FunnelStage};
pub use journeys::{common_journeys, journey_frequencies, purchase_paths};
pub use loyalty::rank_loyal_users;
pub use sessions::{build_session_index, Session, SessionIndex};
pub use time_on_page::{
    collapse_duplicates, compute_avg_time_on_page, pivot_durations, rank_pages_by_duration,
    session_duration_by_page, DurationPivot,
};
pub use trend::fit_duration_trends;
