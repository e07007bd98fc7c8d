//! Polynomial trend lines over the time-on-page pivot.
//!
//! Purely illustrative: nothing else consumes these fits.

use super::time_on_page::DurationPivot;
use crate::parser::schema::{TrendLine, TrendPoint};
use crate::utils::config::TREND_DEGREE;
use log::{debug, warn};

/// Fit one trend line per page type of the pivot
///
/// **Public** - main entry point for trend estimation
///
/// x is days since the pivot's first day. Page types with fewer points
/// than `TREND_DEGREE + 1` get a lower degree (`points - 1`).
pub fn fit_duration_trends(pivot: &DurationPivot) -> Vec<TrendLine> {
    let Some(&origin) = pivot.days.first() else {
        return Vec::new();
    };

    let mut lines = Vec::new();

    for page_type in &pivot.page_types {
        let points = pivot.column(page_type);
        if points.is_empty() {
            continue;
        }

        let xs: Vec<f64> = points.iter().map(|(d, _)| (*d - origin).num_days() as f64).collect();
        let ys: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        let degree = TREND_DEGREE.min(points.len() - 1);

        let Some(coefficients) = fit_polynomial(&xs, &ys, degree) else {
            warn!("Skipping trend for {}: singular fit", page_type);
            continue;
        };

        let fitted = pivot
            .days
            .iter()
            .map(|day| TrendPoint {
                day: *day,
                minutes: evaluate_polynomial(&coefficients, (*day - origin).num_days() as f64),
            })
            .collect();

        debug!("Trend for {}: degree {} over {} points", page_type, degree, points.len());

        lines.push(TrendLine {
            page_type: page_type.clone(),
            origin,
            degree,
            coefficients,
            fitted,
        });
    }

    lines
}

/// Least-squares polynomial fit
///
/// **Public** - returns coefficients lowest order first, or `None` if the
/// normal equations are singular (e.g. repeated x with too high a degree)
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    if xs.len() != ys.len() || xs.len() <= degree {
        return None;
    }

    // Scale x into [-1, 1] to keep the normal matrix well conditioned
    let scale = xs.iter().fold(0.0f64, |m, x| m.max(x.abs())).max(1.0);
    let n = degree + 1;

    let mut matrix = vec![vec![0.0; n + 1]; n];
    for (&x, &y) in xs.iter().zip(ys) {
        let t = x / scale;
        let powers: Vec<f64> = (0..2 * n).map(|k| t.powi(k as i32)).collect();
        for (i, row) in matrix.iter_mut().enumerate() {
            for j in 0..n {
                row[j] += powers[i + j];
            }
            row[n] += y * powers[i];
        }
    }

    let scaled = solve_linear_system(matrix)?;

    Some(
        scaled
            .iter()
            .enumerate()
            .map(|(k, c)| c / scale.powi(k as i32))
            .collect(),
    )
}

pub fn evaluate_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Gaussian elimination with partial pivoting on an augmented matrix
///
/// **Private** - internal solver
fn solve_linear_system(mut m: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let n = m.len();

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| m[row][k] * solution[k]).sum();
        solution[row] = (m[row][n] - tail) / m[row][row];
    }

    Some(solution)
}
