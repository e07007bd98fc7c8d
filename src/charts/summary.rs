//! Plain-text summary tables for the terminal.

use crate::aggregator::journeys::journey_to_path;
use crate::parser::schema::AnalyticsReport;
use crate::parser::Rate;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Format a rate as `12.34%`, or `n/a` when undefined
pub fn format_rate(rate: Rate) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r),
        None => "n/a".to_string(),
    }
}

fn truncate_left(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}

/// Create a text summary of the headline tables
///
/// **Public** - printed by `report --summary`
pub fn generate_text_summary(report: &AnalyticsReport, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  Events: {} | Users: {} | Sessions: {}",
        report.overview.events, report.overview.users, report.overview.sessions
    ));
    if let (Some(first), Some(last)) = (report.overview.first_day, report.overview.last_day) {
        lines.push(format!("  Period: {} .. {}", first, last));
    }

    lines.push(String::new());
    lines.push("  USER FUNNEL".to_string());
    lines.push(format!("  {}", RULE));
    lines.push(format!("  {:<28} {:>12} {:>16}", "Stage", "Users", "Conversion"));
    for row in &report.funnel {
        lines.push(format!(
            "  {:<28} {:>12} {:>16}",
            row.stage,
            row.users,
            format_rate(row.conversion_rate)
        ));
    }

    lines.push(String::new());
    lines.push("  EXIT & BOUNCE RATES".to_string());
    lines.push(format!("  {}", RULE));
    lines.push(format!(
        "  {:<28} {:>12} {:>16} {:>12} {:>12}",
        "Page Type", "Exits", "Exit Rate", "Bounces", "Bounce Rate"
    ));
    for exit in &report.exit_rates {
        let bounce = report.bounce_rates.iter().find(|b| b.page_type == exit.page_type);
        lines.push(format!(
            "  {:<28} {:>12} {:>16} {:>12} {:>12}",
            truncate_left(&exit.page_type, 28),
            exit.exits,
            format_rate(exit.exit_rate),
            bounce.map(|b| b.bounced_sessions.to_string()).unwrap_or_default(),
            bounce.map(|b| format_rate(b.bounce_rate)).unwrap_or_default()
        ));
    }

    lines.push(String::new());
    lines.push("  AVERAGE TIME ON PAGE (minutes, mean over days)".to_string());
    lines.push(format!("  {}", RULE));
    for rank in &report.page_duration_ranking {
        lines.push(format!("  {:<28} {:>12.2}", truncate_left(&rank.page_type, 28), rank.mean_minutes));
    }

    lines.push(String::new());
    lines.push("  TOP PURCHASE PATHS".to_string());
    lines.push(format!("  {}", RULE));
    for path in report.purchase_paths.iter().take(max_lines) {
        lines.push(format!("  {:>6}  {}", path.count, truncate_left(&path.path, 80)));
    }

    lines.push(String::new());
    lines.push("  MOST COMMON JOURNEYS".to_string());
    lines.push(format!("  {}", RULE));
    for journey in report.top_journeys.iter().take(max_lines) {
        lines.push(format!(
            "  {:>6}  {}",
            journey.sessions,
            truncate_left(&journey_to_path(&journey.journey), 80)
        ));
    }

    lines.push(String::new());
    lines.push("  MOST LOYAL USERS".to_string());
    lines.push(format!("  {}", RULE));
    for user in report.loyal_users.iter().take(max_lines) {
        lines.push(format!("  {:<40} {:>6} sessions", truncate_left(&user.user, 40), user.sessions));
    }

    if report.purchase_paths.len() > max_lines || report.loyal_users.len() > max_lines {
        lines.push(String::new());
        lines.push(format!("   (Showing top {} rows; see the JSON report for more)", max_lines));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(12.346)), "12.35%");
        assert_eq!(format_rate(Some(100.0)), "100.00%");
        assert_eq!(format_rate(None), "n/a");
    }

    #[test]
    fn test_truncate_left_keeps_tail() {
        assert_eq!(truncate_left("abc", 10), "abc");
        assert_eq!(truncate_left("listing_page -> order_page", 13), "...order_page");
    }
}
