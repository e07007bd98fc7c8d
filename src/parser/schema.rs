//! Output JSON schema definitions for analytics reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A percentage that is `None` when its denominator was zero
pub type Rate = Option<f64>;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Event log the report was computed from
    pub source: String,

    /// Timestamp when report was generated
    pub generated_at: String,

    pub overview: LogOverview,

    pub funnel: Vec<FunnelStageRow>,

    pub time_on_page: Vec<PageDayDuration>,
    pub page_duration_ranking: Vec<PageDurationRank>,
    pub session_duration_by_page: Vec<PageSessionDuration>,
    pub duration_trends: Vec<TrendLine>,

    pub exit_rates: Vec<ExitRate>,
    pub exit_distribution: Vec<ExitCount>,
    pub exit_rate_over_time: Vec<DailyExitRate>,

    pub bounce_rates: Vec<BounceRate>,
    pub daily_bounce_rates: Vec<DailyBounceRate>,

    pub top_journeys: Vec<JourneyCount>,
    pub purchase_paths: Vec<PathCount>,

    pub loyal_users: Vec<LoyalUser>,

    pub daily_interactions: Vec<DailyCount>,
    pub daily_add_to_cart: Vec<DailyCount>,
    pub interaction_heatmap: Vec<HeatmapCell>,
    pub cart_products_before_exit: Vec<ProductCount>,
}

/// Size of the analysed log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogOverview {
    pub events: usize,
    pub users: usize,
    pub sessions: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
}

/// One funnel stage with its conversion from the previous stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStageRow {
    pub stage: String,
    pub users: usize,

    /// Percent of the previous stage, 2 decimals; stage 0 is always 100
    pub conversion_rate: Rate,
}

/// Average time a user spent on a page type during one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDayDuration {
    pub page_type: String,
    pub day: NaiveDate,
    pub avg_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDurationRank {
    pub page_type: String,
    pub mean_minutes: f64,
}

/// Mean duration of the sessions that touched a page type, weighted by events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSessionDuration {
    pub page_type: String,
    pub avg_session_seconds: f64,
}

/// Illustrative polynomial fit of daily average duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub page_type: String,

    /// Day that maps to x = 0
    pub origin: NaiveDate,

    pub degree: usize,

    /// Lowest order first, in minutes per power of days since `origin`
    pub coefficients: Vec<f64>,

    pub fitted: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub minutes: f64,
}

/// Exit rate for a page type.
///
/// `exits` counts sessions while `views` counts events, so the ratio mixes
/// units. Kept as-is for comparability with existing dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRate {
    pub page_type: String,
    pub exits: usize,
    pub views: usize,
    pub exit_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitCount {
    pub page_type: String,
    pub exits: usize,
    pub views: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExitRate {
    pub day: NaiveDate,
    pub page_type: String,
    pub exits: usize,
    pub views: usize,
    pub exit_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceRate {
    pub page_type: String,
    pub total_sessions: usize,
    pub bounced_sessions: usize,
    pub bounce_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBounceRate {
    pub day: NaiveDate,
    pub page_type: String,
    pub total_sessions: usize,
    pub bounced_sessions: usize,
    pub bounce_rate: Rate,
}

/// A distinct ordered page sequence and how many sessions followed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyCount {
    pub journey: Vec<String>,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCount {
    pub path: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyalUser {
    pub user: String,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Events in one (day of week, hour) cell; 0 = Monday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub day_of_week: u32,
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCount {
    pub product: String,
    pub count: usize,
}
