//! Turn a finished report into its set of SVG figures.

use super::bar::{render_bar_chart, Bar};
use super::generator::ChartConfig;
use super::heatmap::{render_heatmap, HeatmapGrid};
use super::line::{render_line_chart, Series};
use crate::aggregator::{collapse_duplicates, journeys::journey_to_path, pivot_durations};
use crate::parser::schema::{AnalyticsReport, DailyCount};
use crate::parser::Rate;
use crate::utils::error::ChartError;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

/// A rendered chart and the file stem it should be saved under
#[derive(Debug, Clone)]
pub struct Figure {
    pub name: &'static str,
    pub svg: String,
}

/// Render every chart the report has data for
///
/// **Public** - sections with no data are skipped, not errors
pub fn render_report_figures(
    report: &AnalyticsReport,
    base: &ChartConfig,
) -> Result<Vec<Figure>, ChartError> {
    let mut figures = Vec::new();
    let titled = |title: &str| base.clone().with_title(title);

    let mut push = |name: &'static str, result: Result<String, ChartError>| match result {
        Ok(svg) => {
            figures.push(Figure { name, svg });
            Ok(())
        }
        Err(ChartError::EmptySeries(_)) => {
            debug!("Skipping chart '{}': no data", name);
            Ok(())
        }
        Err(e) => Err(e),
    };

    let funnel: Vec<Bar> = report
        .funnel
        .iter()
        .map(|r| Bar::new(&r.stage, r.users as f64))
        .collect();
    push("funnel", render_bar_chart(&funnel, &titled("User Funnel")))?;

    let ranking: Vec<Bar> = report
        .page_duration_ranking
        .iter()
        .map(|r| Bar::new(&r.page_type, r.mean_minutes))
        .collect();
    push(
        "page_duration_ranking",
        render_bar_chart(
            &ranking,
            &titled("Average Time Spent by Users on Each Page Type (minutes)"),
        ),
    )?;

    let pivot = pivot_durations(&collapse_duplicates(&report.time_on_page))?;
    push(
        "time_on_page_heatmap",
        render_heatmap(
            &HeatmapGrid::from_pivot(&pivot),
            &titled("Average Time Spent on Each Page Type per Day"),
            2,
        ),
    )?;

    let mut trend_series = Vec::new();
    for page_type in &pivot.page_types {
        trend_series.push(Series::new(page_type, pivot.column(page_type)));
    }
    for trend in &report.duration_trends {
        let points = trend.fitted.iter().map(|p| (p.day, p.minutes)).collect();
        trend_series.push(Series::new(format!("{} trend", trend.page_type), points).dashed());
    }
    push(
        "duration_trends",
        render_line_chart(
            &trend_series,
            &titled("Average Duration per Page Type by Date with Trendlines"),
            "Average Duration (minutes)",
        ),
    )?;

    let journeys: Vec<Bar> = report
        .top_journeys
        .iter()
        .map(|j| Bar::new(journey_to_path(&j.journey), j.sessions as f64))
        .collect();
    push("common_journeys", render_bar_chart(&journeys, &titled("Most Common User Journeys")))?;

    let exits: Vec<Bar> = report
        .exit_distribution
        .iter()
        .map(|e| Bar::new(&e.page_type, e.exits as f64))
        .collect();
    push("exit_distribution", render_bar_chart(&exits, &titled("Exit Pages Frequency")))?;

    let exit_series = series_by_page(
        report
            .exit_rate_over_time
            .iter()
            .map(|r| (r.page_type.as_str(), r.day, r.exit_rate)),
    );
    push(
        "exit_rate_over_time",
        render_line_chart(&exit_series, &titled("Exit Rate Over Time"), "Exit Rate (%)"),
    )?;

    let bounce_series = series_by_page(
        report
            .daily_bounce_rates
            .iter()
            .map(|r| (r.page_type.as_str(), r.day, r.bounce_rate)),
    );
    push(
        "daily_bounce_rates",
        render_line_chart(
            &bounce_series,
            &titled("Daily Bounce Rate Over Time by Page Type"),
            "Bounce Rate (%)",
        ),
    )?;

    let mut activity = vec![Series::new("all events", daily_points(&report.daily_interactions))];
    if !report.daily_add_to_cart.is_empty() {
        activity.push(Series::new("add_to_cart", daily_points(&report.daily_add_to_cart)));
    }
    push(
        "daily_interactions",
        render_line_chart(&activity, &titled("Daily Interactions"), "Number of Interactions"),
    )?;

    push(
        "interaction_heatmap",
        render_heatmap(
            &HeatmapGrid::from_hourly_cells(&report.interaction_heatmap),
            &titled("Interactions by Day of Week and Hour"),
            0,
        ),
    )?;

    let products: Vec<Bar> = report
        .cart_products_before_exit
        .iter()
        .map(|p| Bar::new(&p.product, p.count as f64))
        .collect();
    push(
        "cart_products_before_exit",
        render_bar_chart(&products, &titled("Top Products Added to Cart Before Exiting")),
    )?;

    info!("Rendered {} charts", figures.len());
    Ok(figures)
}

/// One series per page type, undefined rates left out
fn series_by_page<'a>(rows: impl Iterator<Item = (&'a str, NaiveDate, Rate)>) -> Vec<Series> {
    let mut grouped: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for (page_type, day, rate) in rows {
        let points = grouped.entry(page_type).or_default();
        if let Some(rate) = rate {
            points.push((day, rate));
        }
    }
    grouped
        .into_iter()
        .map(|(page_type, points)| Series::new(page_type, points))
        .collect()
}

fn daily_points(counts: &[DailyCount]) -> Vec<(NaiveDate, f64)> {
    counts.iter().map(|c| (c.day, c.count as f64)).collect()
}
