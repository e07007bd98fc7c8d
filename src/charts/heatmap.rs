//! Annotated heatmaps.

use super::generator::{
    close_svg, escape, heat_color, open_svg, truncate, ChartConfig, MARGIN_BOTTOM, MARGIN_RIGHT,
    MARGIN_TOP,
};
use crate::aggregator::DurationPivot;
use crate::parser::schema::HeatmapCell;
use crate::utils::error::ChartError;
use log::debug;

const ROW_LABEL_WIDTH: f64 = 110.0;

pub const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Row x column matrix; `None` cells are drawn blank
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    /// Days as rows, page types as columns
    pub fn from_pivot(pivot: &DurationPivot) -> Self {
        Self {
            row_labels: pivot.days.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
            col_labels: pivot.page_types.clone(),
            cells: pivot.values.clone(),
        }
    }

    /// Days of week as rows, hours 0-23 as columns
    pub fn from_hourly_cells(cells: &[HeatmapCell]) -> Self {
        let mut grid = vec![vec![None; 24]; 7];
        for cell in cells {
            if let Some(slot) = grid
                .get_mut(cell.day_of_week as usize)
                .and_then(|row| row.get_mut(cell.hour as usize))
            {
                *slot = Some(cell.count as f64);
            }
        }

        Self {
            row_labels: DAY_LABELS.iter().map(|d| d.to_string()).collect(),
            col_labels: (0..24).map(|h| h.to_string()).collect(),
            cells: grid,
        }
    }

    fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.cells.iter().flatten().flatten().copied().filter(|v| v.is_finite());
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Render a grid with every present cell annotated
///
/// **Public** - `decimals` controls the annotation precision
///
/// # Errors
/// * `ChartError::EmptySeries` - grid has no values at all
pub fn render_heatmap(
    grid: &HeatmapGrid,
    config: &ChartConfig,
    decimals: usize,
) -> Result<String, ChartError> {
    let Some((lo, hi)) = grid.value_range() else {
        return Err(ChartError::EmptySeries(config.title.clone()));
    };

    let rows = grid.row_labels.len().max(1) as f64;
    let cols = grid.col_labels.len().max(1) as f64;
    let plot_width = (config.width as f64 - ROW_LABEL_WIDTH - MARGIN_RIGHT).max(10.0);
    let plot_height = (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(10.0);
    let cell_w = plot_width / cols;
    let cell_h = plot_height / rows;
    let span = hi - lo;

    let mut svg = String::new();
    open_svg(&mut svg, config);

    for (r, row) in grid.cells.iter().enumerate() {
        let y = MARGIN_TOP + r as f64 * cell_h;

        if let Some(label) = grid.row_labels.get(r) {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                ROW_LABEL_WIDTH - 6.0,
                y + cell_h / 2.0,
                escape(label)
            ));
        }

        for (c, cell) in row.iter().enumerate() {
            let Some(value) = cell else { continue };
            let x = ROW_LABEL_WIDTH + c as f64 * cell_w;
            let t = if span > 0.0 { (value - lo) / span } else { 0.5 };

            svg.push_str(&format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="white"/>"#,
                x,
                y,
                cell_w,
                cell_h,
                heat_color(t)
            ));
            if cell_w > 18.0 && cell_h > 12.0 {
                let ink = if t > 0.6 { "white" } else { "black" };
                svg.push_str(&format!(
                    r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" font-size="10" fill="{}">{:.*}</text>"#,
                    x + cell_w / 2.0,
                    y + cell_h / 2.0,
                    ink,
                    decimals,
                    value
                ));
            }
        }
    }

    let label_y = MARGIN_TOP + plot_height + 16.0;
    for (c, label) in grid.col_labels.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            ROW_LABEL_WIDTH + c as f64 * cell_w + cell_w / 2.0,
            label_y,
            escape(&truncate(label, ((cell_w / 7.0) as usize).max(4)))
        ));
    }

    close_svg(&mut svg);

    debug!(
        "Heatmap '{}' rendered ({}x{})",
        config.title,
        grid.row_labels.len(),
        grid.col_labels.len()
    );
    Ok(svg)
}
