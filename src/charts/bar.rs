//! Horizontal bar charts.

use super::generator::{
    close_svg, escape, open_svg, series_color, truncate, ChartConfig, MARGIN_BOTTOM, MARGIN_RIGHT,
    MARGIN_TOP,
};
use crate::utils::error::ChartError;
use log::debug;

const LABEL_WIDTH: f64 = 240.0;

/// One labelled bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Render bars top to bottom in the given order
///
/// **Public** - values are annotated at the end of each bar
///
/// # Errors
/// * `ChartError::EmptySeries` - no bars
pub fn render_bar_chart(bars: &[Bar], config: &ChartConfig) -> Result<String, ChartError> {
    if bars.is_empty() {
        return Err(ChartError::EmptySeries(config.title.clone()));
    }

    let plot_width = (config.width as f64 - LABEL_WIDTH - MARGIN_RIGHT - 60.0).max(10.0);
    let plot_height = (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(10.0);
    let slot = plot_height / bars.len() as f64;
    let bar_height = (slot * 0.7).max(1.0);

    let max_value = bars
        .iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let scale = if max_value > 0.0 { plot_width / max_value } else { 0.0 };

    let mut svg = String::new();
    open_svg(&mut svg, config);

    // Axis line
    svg.push_str(&format!(
        r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="black"/>"#,
        x = LABEL_WIDTH,
        y1 = MARGIN_TOP,
        y2 = MARGIN_TOP + plot_height
    ));

    for (i, bar) in bars.iter().enumerate() {
        let y = MARGIN_TOP + i as f64 * slot + (slot - bar_height) / 2.0;
        let value = if bar.value.is_finite() { bar.value.max(0.0) } else { 0.0 };
        let width = value * scale;

        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}: {}</title></rect>"#,
            LABEL_WIDTH,
            y,
            width,
            bar_height,
            series_color(0),
            escape(&bar.label),
            format_value(bar.value)
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
            LABEL_WIDTH - 6.0,
            y + bar_height / 2.0,
            escape(&truncate(&bar.label, 36))
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" dominant-baseline="middle">{}</text>"#,
            LABEL_WIDTH + width + 4.0,
            y + bar_height / 2.0,
            format_value(bar.value)
        ));
    }

    close_svg(&mut svg);

    debug!("Bar chart '{}' rendered ({} bars)", config.title, bars.len());
    Ok(svg)
}

/// Integers without decimals, everything else with two
fn format_value(value: f64) -> String {
    if !value.is_finite() {
        "n/a".to_string()
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar_chart() {
        let bars = vec![Bar::new("Visit", 3.0), Bar::new("Purchase", 1.0)];
        let svg = render_bar_chart(&bars, &ChartConfig::new().with_title("Funnel")).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">Funnel<"));
        assert!(svg.contains(">Visit<"));
        assert_eq!(svg.matches("<rect").count(), 3); // background + 2 bars
    }

    #[test]
    fn test_empty_bars_rejected() {
        let result = render_bar_chart(&[], &ChartConfig::new());
        assert!(matches!(result, Err(ChartError::EmptySeries(_))));
    }

    #[test]
    fn test_labels_are_escaped() {
        let bars = vec![Bar::new("a -> b", 2.0)];
        let svg = render_bar_chart(&bars, &ChartConfig::new()).unwrap();
        assert!(svg.contains("a -&gt; b"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.5), "2.50");
        assert_eq!(format_value(f64::NAN), "n/a");
    }
}
