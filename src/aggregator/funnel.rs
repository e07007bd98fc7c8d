//! Funnel stage counts and stage-to-stage conversion.
//!
//! Each stage is a distinct-user count over the full table. Stages are
//! evaluated independently: a user does not need to reach stage k to be
//! counted at stage k+1, so the funnel is not forced to be monotonic.

use super::stats::{percentage, round_to};
use crate::parser::schema::FunnelStageRow;
use crate::parser::{Event, EventLog, Rate};
use crate::utils::config::AnalyticsConfig;
use log::debug;
use std::collections::HashSet;

/// Ordered funnel stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStage {
    Visit,
    BrowseProducts,
    ViewProductDetails,
    AddToCart,
    Purchase,
}

impl FunnelStage {
    pub const ALL: [FunnelStage; 5] = [
        FunnelStage::Visit,
        FunnelStage::BrowseProducts,
        FunnelStage::ViewProductDetails,
        FunnelStage::AddToCart,
        FunnelStage::Purchase,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Visit => "Visit",
            FunnelStage::BrowseProducts => "Browse Products",
            FunnelStage::ViewProductDetails => "View Product Details",
            FunnelStage::AddToCart => "Add to Cart",
            FunnelStage::Purchase => "Purchase",
        }
    }

    /// Whether an event satisfies this stage's predicate
    pub fn matches(&self, event: &Event, config: &AnalyticsConfig) -> bool {
        match self {
            FunnelStage::Visit => true,
            FunnelStage::BrowseProducts => config.is_browse_page(&event.page_type),
            FunnelStage::ViewProductDetails => event.page_type == config.product_page,
            FunnelStage::AddToCart => event.is(&config.add_to_cart_event),
            FunnelStage::Purchase => event.is(&config.order_event),
        }
    }
}

/// Distinct users per stage, in stage order
///
/// **Public** - single pass over the log
pub fn count_stage_users(log: &EventLog, config: &AnalyticsConfig) -> [usize; 5] {
    let mut users: [HashSet<&str>; 5] = Default::default();

    for event in log {
        for (i, stage) in FunnelStage::ALL.iter().enumerate() {
            if stage.matches(event, config) {
                users[i].insert(event.user.as_str());
            }
        }
    }

    users.map(|set| set.len())
}

/// Conversion of each stage relative to the one before it
///
/// Stage 0 is fixed at 100. A stage following a zero-user stage has an
/// undefined rate (`None`). Values are rounded to 2 decimals.
pub fn conversion_rates(counts: &[usize]) -> Vec<Rate> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            if i == 0 {
                Some(100.0)
            } else {
                percentage(count, counts[i - 1]).map(|r| round_to(r, 2))
            }
        })
        .collect()
}

/// Calculate the funnel table
///
/// **Public** - main entry point for funnel metrics
///
/// # Returns
/// One row per stage: label, distinct users, conversion rate
pub fn calculate_funnel(log: &EventLog, config: &AnalyticsConfig) -> Vec<FunnelStageRow> {
    let counts = count_stage_users(log, config);
    let rates = conversion_rates(&counts);

    debug!("Funnel counts: {:?}", counts);

    FunnelStage::ALL
        .iter()
        .zip(counts.iter().zip(rates))
        .map(|(stage, (&users, conversion_rate))| FunnelStageRow {
            stage: stage.label().to_string(),
            users,
            conversion_rate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_timestamp;

    fn event(user: &str, page: &str, event_type: &str) -> Event {
        Event::new(user, format!("{}-s", user), parse_timestamp("2024-01-01 10:00:00").unwrap(), page)
            .with_event_type(event_type)
    }

    #[test]
    fn test_conversion_rates_basic() {
        let rates = conversion_rates(&[3, 2, 1]);
        assert_eq!(rates, vec![Some(100.0), Some(66.67), Some(50.0)]);
    }

    #[test]
    fn test_conversion_rates_round_exact_ties_to_even() {
        // 100 / 32 = 3.125 exactly
        assert_eq!(conversion_rates(&[32, 1]), vec![Some(100.0), Some(3.12)]);
    }

    #[test]
    fn test_conversion_rate_after_empty_stage_is_undefined() {
        let rates = conversion_rates(&[4, 0, 2]);
        assert_eq!(rates[1], Some(0.0));
        assert_eq!(rates[2], None);
    }

    #[test]
    fn test_stages_are_independent() {
        // u2 purchases without ever viewing a product page
        let log = EventLog::new(vec![
            event("u1", "product_page", ""),
            event("u2", "order_page", "order"),
        ]);
        let counts = count_stage_users(&log, &AnalyticsConfig::default());

        assert_eq!(counts, [2, 0, 1, 0, 1]);
    }

    #[test]
    fn test_calculate_funnel_labels_and_rates() {
        let log = EventLog::new(vec![
            event("u1", "listing_page", ""),
            event("u1", "product_page", "add_to_cart"),
            event("u2", "search_listing_page", ""),
        ]);
        let funnel = calculate_funnel(&log, &AnalyticsConfig::default());

        let labels: Vec<&str> = funnel.iter().map(|r| r.stage.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Visit", "Browse Products", "View Product Details", "Add to Cart", "Purchase"]
        );
        assert_eq!(funnel[0].conversion_rate, Some(100.0));
        assert_eq!(funnel[1].users, 2);
        assert_eq!(funnel[2].users, 1);
        assert_eq!(funnel[2].conversion_rate, Some(50.0));
        assert_eq!(funnel[4].users, 0);
        assert_eq!(funnel[4].conversion_rate, Some(0.0));
    }

    #[test]
    fn test_custom_browse_pages() {
        let config = AnalyticsConfig {
            browse_pages: vec!["catalog".to_string()],
            ..Default::default()
        };
        let log = EventLog::new(vec![
            event("u1", "catalog", ""),
            event("u2", "listing_page", ""),
        ]);

        assert_eq!(count_stage_users(&log, &config)[1], 1);
    }
}
