//! Shared SVG plumbing for the chart renderers.
//!
//! Charts are written by hand as standalone SVG documents so no plotting
//! backend is needed.

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Clickstream Analytics".to_string(),
            width: 960,
            height: 540,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Space reserved around the plot area
pub(crate) const MARGIN_TOP: f64 = 50.0;
pub(crate) const MARGIN_BOTTOM: f64 = 60.0;
pub(crate) const MARGIN_RIGHT: f64 = 30.0;

const PALETTE: &[&str] = &[
    "rgb(31, 119, 180)",
    "rgb(255, 127, 14)",
    "rgb(44, 160, 44)",
    "rgb(214, 39, 40)",
    "rgb(148, 103, 189)",
    "rgb(140, 86, 75)",
    "rgb(227, 119, 194)",
    "rgb(127, 127, 127)",
];

/// Open the document and draw the title
pub(crate) fn open_svg(out: &mut String, config: &ChartConfig) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    out.push_str(r#"<style>text { font: 12px sans-serif; } .title { font-size: 16px; font-weight: bold; }</style>"#);
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    out.push_str(&format!(
        r#"<text x="{}" y="28" text-anchor="middle" class="title">{}</text>"#,
        config.width / 2,
        escape(&config.title)
    ));
}

pub(crate) fn close_svg(out: &mut String) {
    out.push_str("</svg>");
}

/// Escape text for use inside SVG markup
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cut a label to `max_chars`, adding an ellipsis
pub(crate) fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars || max_chars <= 3 {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

pub(crate) fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Sequential yellow-green-blue scale, `t` in [0, 1]
pub(crate) fn heat_color(t: f64) -> String {
    const STOPS: [(f64, f64, f64); 3] = [
        (255.0, 255.0, 204.0),
        (65.0, 182.0, 196.0),
        (37.0, 52.0, 148.0),
    ];

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let (from, to, local) = if t < 0.5 {
        (STOPS[0], STOPS[1], t * 2.0)
    } else {
        (STOPS[1], STOPS[2], (t - 0.5) * 2.0)
    };

    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    format!(
        "rgb({}, {}, {})",
        lerp(from.0, to.0),
        lerp(from.1, to.1),
        lerp(from.2, to.2)
    )
}

/// A "nice" axis maximum at or above `value`
pub(crate) fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s)
        .unwrap_or(10.0);
    step * magnitude
}
