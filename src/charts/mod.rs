//! Chart rendering to standalone SVG.
//!
//! This module converts aggregated tables into bar charts, heatmaps and
//! line charts, plus a plain-text summary for the terminal.

pub mod bar;
pub mod figures;
pub mod generator;
pub mod heatmap;
pub mod line;
pub mod summary;

// Re-export main types
pub use bar::{render_bar_chart, Bar};
pub use figures::{render_report_figures, Figure};
pub use generator::ChartConfig;
pub use heatmap::{render_heatmap, HeatmapGrid};
pub use line::{render_line_chart, Series};
pub use summary::{format_rate, generate_text_summary};
