use anyhow::{Context, Result};
use std::path::PathBuf;
use crate::aggregator::journeys::journey_to_path;
use crate::charts::format_rate;
use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Not a valid report: {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        println!("⚠ Report schema v{} differs from current v{}", report.version, SCHEMA_VERSION);
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Generated: {}", report.generated_at);
    println!(
        "  Events: {} | Users: {} | Sessions: {}",
        report.overview.events, report.overview.users, report.overview.sessions
    );
    if let Some(last) = report.funnel.last() {
        println!("  {}: {} users ({})", last.stage, last.users, format_rate(last.conversion_rate));
    }
    println!("  Page Types: {}", report.exit_rates.len());
    if let Some(top) = report.top_journeys.first() {
        println!("  Top Journey: {} ({} sessions)", journey_to_path(&top.journey), top.sessions);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Funnel Lens Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string                 - Schema version (e.g., '1.0.0')");
        println!("  source: string                  - Event log the report was built from");
        println!("  generated_at: string            - RFC 3339 timestamp");
        println!("  overview: object                - events, users, sessions, first_day, last_day");
        println!("  funnel: array                   - stage, users, conversion_rate");
        println!("  time_on_page: array             - page_type, day, avg_minutes");
        println!("  page_duration_ranking: array    - page_type, mean_minutes");
        println!("  session_duration_by_page: array - page_type, avg_session_seconds");
        println!("  duration_trends: array          - page_type, origin, degree, coefficients, fitted");
        println!("  exit_rates: array               - page_type, exits, views, exit_rate");
        println!("  exit_distribution: array        - page_type, exits, views");
        println!("  exit_rate_over_time: array      - day, page_type, exits, views, exit_rate");
        println!("  bounce_rates: array             - page_type, total_sessions, bounced_sessions, bounce_rate");
        println!("  daily_bounce_rates: array       - day plus the bounce_rates fields");
        println!("  top_journeys: array             - journey (page list), sessions");
        println!("  purchase_paths: array           - path (\" -> \" joined), count");
        println!("  loyal_users: array              - user, sessions");
        println!("  daily_interactions: array       - day, count");
        println!("  daily_add_to_cart: array        - day, count");
        println!("  interaction_heatmap: array      - day_of_week (0 = Monday), hour, count");
        println!("  cart_products_before_exit: array - product, count");
        println!();
        println!("Rates are percentages rounded to 2 places; null means the denominator was zero.");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Funnel Lens v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Funnel, engagement, exit and bounce analytics for clickstream event logs.");
}
