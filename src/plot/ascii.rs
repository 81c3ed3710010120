//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two views:
//! - measured vs fitted modulus, log-log (`o` points over a `-` curve)
//! - relative error vs frequency, semilog-x (`x` points, `=` threshold line)

use crate::domain::{CurveGrid, PointFit, PronySeries};
use crate::models::predict_series;

/// Render a log-log plot of the measured sweep over the fitted curve.
pub fn render_fit_plot(
    points: &[PointFit],
    series: &PronySeries,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (f_min, f_max) = frequency_range(points).unwrap_or((1e-3, 1e3));
    let curve = sample_curve(series, f_min, f_max, width);

    let mut values: Vec<f64> = points.iter().flat_map(|p| [p.measured, p.fitted]).collect();
    values.extend(curve.iter().map(|&(_, e)| e));
    let (e_min, e_max) = padded_log_range(&values).unwrap_or((0.1, 10.0));

    let mut grid = vec![vec![' '; width]; height];
    draw_log_curve(&mut grid, &curve, f_min, f_max, e_min, e_max);
    for p in points {
        let x = map_log_x(p.frequency_hz, f_min, f_max, width);
        let y = map_log_y(p.measured, e_min, e_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: f=[{f_min:.3e}, {f_max:.3e}] Hz | E=[{e_min:.2}, {e_max:.2}]\n"
    ));
    push_grid(&mut out, grid);
    out
}

/// Render a semilog-x plot of per-point relative error with the tolerance
/// threshold drawn as a horizontal line.
pub fn render_error_plot(
    points: &[PointFit],
    threshold_pct: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (f_min, f_max) = frequency_range(points).unwrap_or((1e-3, 1e3));
    let err_max = points
        .iter()
        .map(|p| p.rel_error_pct)
        .fold(threshold_pct.max(0.0), f64::max);
    let y_top = (err_max * 1.05).max(1e-9);

    let mut grid = vec![vec![' '; width]; height];

    // Threshold line first so the data points overwrite it.
    let ty = map_linear_y(threshold_pct, 0.0, y_top, height);
    for cell in &mut grid[ty] {
        *cell = '=';
    }

    for p in points {
        let x = map_log_x(p.frequency_hz, f_min, f_max, width);
        let y = map_linear_y(p.rel_error_pct, 0.0, y_top, height);
        grid[y][x] = 'x';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Error: f=[{f_min:.3e}, {f_max:.3e}] Hz | err=[0.00, {y_top:.2}]% | threshold (=) at {threshold_pct:.1}%\n"
    ));
    push_grid(&mut out, grid);
    out
}

/// Render a saved fitted curve (no measured overlay), log-log.
pub fn render_curve_plot(grid_data: &CurveGrid, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curve: Vec<(f64, f64)> = grid_data
        .frequency_hz
        .iter()
        .zip(&grid_data.modulus)
        .map(|(&f, &e)| (f, e))
        .collect();

    let freqs: Vec<f64> = curve.iter().map(|&(f, _)| f).collect();
    let values: Vec<f64> = curve.iter().map(|&(_, e)| e).collect();
    let (f_min, f_max) = min_max(&freqs).unwrap_or((1e-3, 1e3));
    let (e_min, e_max) = padded_log_range(&values).unwrap_or((0.1, 10.0));

    let mut grid = vec![vec![' '; width]; height];
    draw_log_curve(&mut grid, &curve, f_min, f_max, e_min, e_max);

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: f=[{f_min:.3e}, {f_max:.3e}] Hz | E=[{e_min:.2}, {e_max:.2}]\n"
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn frequency_range(points: &[PointFit]) -> Option<(f64, f64)> {
    let freqs: Vec<f64> = points.iter().map(|p| p.frequency_hz).collect();
    min_max(&freqs)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

/// Value range padded in log space (5% of the decade span, or half a decade
/// when the data is flat).
fn padded_log_range(values: &[f64]) -> Option<(f64, f64)> {
    let positive: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in &positive {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }

    let mut lo = min.log10();
    let mut hi = max.log10();
    if hi > lo {
        let pad = 0.05 * (hi - lo);
        lo -= pad;
        hi += pad;
    } else {
        lo -= 0.5;
        hi += 0.5;
    }
    Some((10f64.powf(lo), 10f64.powf(hi)))
}

fn sample_curve(series: &PronySeries, f_min: f64, f_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let l0 = f_min.log10();
    let l1 = f_max.log10();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let f = 10f64.powf(l0 + u * (l1 - l0));
        out.push((f, predict_series(series, f)));
    }
    out
}

fn map_log_x(f: f64, f_min: f64, f_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((f.log10() - f_min.log10()) / (f_max.log10() - f_min.log10())).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_log_y(e: f64, e_min: f64, e_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((e.log10() - e_min.log10()) / (e_max.log10() - e_min.log10())).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn map_linear_y(v: f64, v_min: f64, v_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_log_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    f_min: f64,
    f_max: f64,
    e_min: f64,
    e_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(f, e) in curve {
        let x = map_log_x(f, f_min, f_max, width);
        let y = map_log_y(e, e_min, e_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_points() -> Vec<PointFit> {
        vec![
            PointFit {
                frequency_hz: 1.0,
                measured: 100.0,
                fitted: 100.0,
                rel_error_pct: 0.0,
            },
            PointFit {
                frequency_hz: 100.0,
                measured: 100.0,
                fitted: 100.0,
                rel_error_pct: 0.0,
            },
        ]
    }

    fn flat_series() -> PronySeries {
        PronySeries {
            e_inf: 100.0,
            e_max: 100.0,
            e_zero: 100.0,
            terms: vec![],
        }
    }

    #[test]
    fn fit_plot_golden_snapshot_small() {
        let txt = render_fit_plot(&flat_points(), &flat_series(), 10, 5);
        let expected = concat!(
            "Plot: f=[1.000e0, 1.000e2] Hz | E=[31.62, 316.23]\n",
            "          \n",
            "          \n",
            "o--------o\n",
            "          \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn error_plot_draws_threshold_line() {
        let txt = render_error_plot(&flat_points(), 5.0, 12, 6);
        let lines: Vec<&str> = txt.lines().collect();
        assert!(lines[0].contains("threshold (=) at 5.0%"));
        assert_eq!(lines.len(), 7);
        // One full threshold row; data points sit on the bottom row.
        assert!(lines.iter().any(|l| l.chars().all(|c| c == '=') && !l.is_empty()));
        let bottom = lines[lines.len() - 1];
        assert_eq!(bottom.matches('x').count(), 2);
    }

    #[test]
    fn curve_plot_from_grid_is_monotone_descending_rows() {
        let grid = CurveGrid {
            frequency_hz: vec![0.01, 0.1, 1.0, 10.0, 100.0],
            modulus: vec![10.0, 20.0, 60.0, 90.0, 100.0],
        };
        let txt = render_curve_plot(&grid, 20, 8);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(txt.contains('-'));
        // Every row has the configured width.
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 20);
        }
    }

    #[test]
    fn all_rows_have_requested_width() {
        let txt = render_fit_plot(&flat_points(), &flat_series(), 30, 7);
        for line in txt.lines().skip(1) {
            assert_eq!(line.chars().count(), 30);
        }
    }
}
