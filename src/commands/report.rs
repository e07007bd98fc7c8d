//! Report command implementation.
//!
//! The report command:
//! 1. Loads and enriches the CSV event log
//! 2. Groups events into sessions
//! 3. Runs every aggregator into one report
//! 4. Writes the JSON report
//! 5. Renders and writes SVG charts (optional)

use super::models::ReportArgs;
use crate::aggregator::{
    build_session_index, calculate_bounce_rates, calculate_exit_rates, calculate_funnel,
    cart_products_before_exit, collapse_duplicates, common_journeys, compute_avg_time_on_page,
    daily_bounce_rates, daily_interactions, exit_distribution, exit_rate_over_time,
    fit_duration_trends, interaction_heatmap, pivot_durations, purchase_paths, rank_loyal_users,
    rank_pages_by_duration, session_duration_by_page,
};
use crate::charts::{generate_text_summary, render_report_figures};
use crate::output::{write_figures, write_report};
use crate::parser::schema::{AnalyticsReport, LogOverview};
use crate::parser::{load_event_log, EventLog};
use crate::utils::config::{AnalyticsConfig, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
///
/// # Returns
/// The report that was written, so callers can inspect it
///
/// # Errors
/// * Unreadable or malformed event log
/// * Chart rendering failures
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<AnalyticsReport> {
    let start_time = Instant::now();

    info!("Starting report for event log: {}", args.input.display());

    // Step 1: Load event log
    info!("Step 1/5: Loading event log...");
    let log = load_event_log(&args.input)
        .with_context(|| format!("Failed to load event log {}", args.input.display()))?;

    debug!(
        "Loaded {} events from {} users across {} sessions",
        log.len(),
        log.distinct_users(),
        log.distinct_sessions()
    );

    // Step 2 and 3: Sessions and aggregation
    let report = build_report(&log, &args.config, &args.input.display().to_string())?;

    // Step 4: Write JSON report
    info!("Step 4/5: Writing JSON report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output_json.display());

    // Step 5: Charts (if requested)
    if let Some(dir) = &args.charts_dir {
        info!("Step 5/5: Rendering charts...");
        let figures = render_report_figures(&report, &args.chart_config)
            .context("Failed to render charts")?;
        write_figures(&figures, dir).context("Failed to write chart SVGs")?;

        info!("✓ {} charts written to: {}", figures.len(), dir.display());
    } else {
        info!("Step 5/5: Skipping chart rendering (not requested)");
    }

    // Print text summary (if requested)
    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("CLICKSTREAM SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Source: {}", report.source);
        println!("\n{}", generate_text_summary(&report, 10));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Run every aggregator over an already-loaded log
///
/// **Public** - the I/O-free core of the report command
///
/// # Arguments
/// * `log` - Enriched event log
/// * `config` - Funnel labels and top-N sizes
/// * `source` - Label recorded as the report's source
pub fn build_report(
    log: &EventLog,
    config: &AnalyticsConfig,
    source: &str,
) -> Result<AnalyticsReport> {
    info!("Step 2/5: Grouping events into sessions...");
    let index = build_session_index(log);

    debug!("Built {} sessions ({} bounced)", index.len(), index.bounce_count());

    info!("Step 3/5: Aggregating metrics...");

    let funnel = calculate_funnel(log, config);
    for row in &funnel {
        debug!("  {}: {} users", row.stage, row.users);
    }

    let time_on_page = compute_avg_time_on_page(log);
    let pivot = pivot_durations(&collapse_duplicates(&time_on_page))
        .context("Failed to pivot time-on-page table")?;
    let duration_trends = fit_duration_trends(&pivot);

    let overview = {
        let (first_day, last_day) = match log.day_range() {
            Some((first, last)) => (Some(first), Some(last)),
            None => (None, None),
        };
        LogOverview {
            events: log.len(),
            users: log.distinct_users(),
            sessions: index.len(),
            first_day,
            last_day,
        }
    };

    Ok(AnalyticsReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        overview,
        funnel,
        page_duration_ranking: rank_pages_by_duration(&time_on_page),
        session_duration_by_page: session_duration_by_page(&index),
        duration_trends,
        time_on_page,
        exit_rates: calculate_exit_rates(log, &index),
        exit_distribution: exit_distribution(log, &index),
        exit_rate_over_time: exit_rate_over_time(log, &index),
        bounce_rates: calculate_bounce_rates(&index),
        daily_bounce_rates: daily_bounce_rates(&index),
        top_journeys: common_journeys(&index, config.top_journeys),
        purchase_paths: purchase_paths(&index, &config.order_event, config.top_paths),
        loyal_users: rank_loyal_users(&index, config.top_users),
        daily_interactions: daily_interactions(log, None),
        daily_add_to_cart: daily_interactions(log, Some(&config.add_to_cart_event)),
        interaction_heatmap: interaction_heatmap(log),
        cart_products_before_exit: cart_products_before_exit(
            &index,
            &config.add_to_cart_event,
            config.top_products,
        ),
    })
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input event log path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input event log not found: {}", args.input.display());
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.chart_config.width == 0 || args.chart_config.height == 0 {
        anyhow::bail!("Chart width and height must be greater than 0");
    }

    args.config.validate().context("Invalid analytics configuration")?;

    Ok(())
}
