//! Daily line charts with a legend.

use super::generator::{
    close_svg, escape, nice_ceiling, open_svg, series_color, ChartConfig, MARGIN_BOTTOM,
    MARGIN_RIGHT, MARGIN_TOP,
};
use crate::utils::error::ChartError;
use chrono::NaiveDate;
use log::debug;

const MARGIN_LEFT: f64 = 70.0;
const LEGEND_WIDTH: f64 = 190.0;

/// A named series of daily values
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub dashed: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Render series against a shared day axis
///
/// **Public** - x spans the earliest to the latest day over all series,
/// y starts at 0
///
/// # Errors
/// * `ChartError::EmptySeries` - no finite points in any series
pub fn render_line_chart(
    series: &[Series],
    config: &ChartConfig,
    y_label: &str,
) -> Result<String, ChartError> {
    let finite = || {
        series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(_, v)| v.is_finite())
    };

    let first = finite().map(|(d, _)| *d).min();
    let last = finite().map(|(d, _)| *d).max();
    let (Some(first), Some(last)) = (first, last) else {
        return Err(ChartError::EmptySeries(config.title.clone()));
    };
    let y_max = nice_ceiling(finite().map(|(_, v)| *v).fold(0.0, f64::max));

    let plot_width = (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT - LEGEND_WIDTH).max(10.0);
    let plot_height = (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(10.0);
    let span_days = (last - first).num_days().max(1) as f64;

    let x_of =
        |day: NaiveDate| MARGIN_LEFT + (day - first).num_days() as f64 / span_days * plot_width;
    let y_of = |value: f64| MARGIN_TOP + plot_height - value.max(0.0) / y_max * plot_height;

    let mut svg = String::new();
    open_svg(&mut svg, config);

    // Axes
    let bottom = MARGIN_TOP + plot_height;
    svg.push_str(&format!(
        r#"<path d="M{left},{top} L{left},{bottom} L{right},{bottom}" fill="none" stroke="black"/>"#,
        left = MARGIN_LEFT,
        top = MARGIN_TOP,
        bottom = bottom,
        right = MARGIN_LEFT + plot_width
    ));

    // Y ticks at quarters
    for i in 0..=4 {
        let value = y_max * i as f64 / 4.0;
        let y = y_of(value);
        svg.push_str(&format!(
            r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#ddd"/>"##,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_width,
            y
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{:.1}</text>"#,
            MARGIN_LEFT - 6.0,
            y,
            value
        ));
    }
    svg.push_str(&format!(
        r#"<text x="16" y="{:.2}" transform="rotate(-90 16 {:.2})" text-anchor="middle">{}</text>"#,
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0,
        escape(y_label)
    ));

    // X labels: at most ~10 evenly spaced days
    let step = ((span_days as usize) / 10).max(1);
    for day in first.iter_days().take_while(|d| *d <= last).step_by(step) {
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="10">{}</text>"#,
            x_of(day),
            bottom + 16.0,
            day.format("%m-%d")
        ));
    }

    for (i, s) in series.iter().enumerate() {
        let color = series_color(i);
        let coords: Vec<String> = s
            .points
            .iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(d, v)| format!("{:.2},{:.2}", x_of(*d), y_of(*v)))
            .collect();

        if !coords.is_empty() {
            let dash = if s.dashed { r#" stroke-dasharray="6 4""# } else { "" };
            svg.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"{}/>"#,
                coords.join(" "),
                color,
                dash
            ));
        }

        let legend_x = MARGIN_LEFT + plot_width + 20.0;
        let legend_y = MARGIN_TOP + 10.0 + i as f64 * 18.0;
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="12" height="12" fill="{}"/>"#,
            legend_x,
            legend_y - 10.0,
            color
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            legend_x + 18.0,
            legend_y,
            escape(&s.name)
        ));
    }

    close_svg(&mut svg);

    debug!("Line chart '{}' rendered ({} series)", config.title, series.len());
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_render_line_chart() {
        let series = vec![
            Series::new("listing_page", vec![(day(1), 2.0), (day(2), 3.0)]),
            Series::new("listing_page trend", vec![(day(1), 2.1), (day(2), 2.9)]).dashed(),
        ];
        let svg = render_line_chart(&series, &ChartConfig::new().with_title("Trends"), "Minutes").unwrap();

        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
        assert!(svg.contains(">listing_page trend<"));
        assert!(svg.contains(">Minutes<"));
    }

    #[test]
    fn test_non_finite_points_skipped() {
        let series = vec![Series::new("a", vec![(day(1), f64::NAN)])];
        assert!(render_line_chart(&series, &ChartConfig::new(), "").is_err());
    }

    #[test]
    fn test_single_day_series() {
        let series = vec![Series::new("a", vec![(day(3), 5.0)])];
        let svg = render_line_chart(&series, &ChartConfig::new(), "Count").unwrap();
        assert!(svg.contains("<polyline"));
    }
}
