//! SVG chart report adapter.
//!
//! Renders the strategy and buy-and-hold cumulative-return curves as a
//! two-line SVG chart with a shared scale.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::GoldcrossError;
use crate::domain::returns::CurvePoint;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;

pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(result: &BacktestResult) -> String {
        let strategy = &result.strategy_curve;
        let buy_hold = &result.buy_hold_curve;

        if strategy.is_empty() && buy_hold.is_empty() {
            return format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}">
  <text x="{x}" y="{y}" text-anchor="middle">No return data available.</text>
</svg>
"#,
                x = WIDTH / 2.0,
                y = HEIGHT / 2.0,
            );
        }

        let (min_v, max_v) = value_bounds(strategy, buy_hold);
        let first_date = strategy.first().or(buy_hold.first()).map(|p| p.date);
        let last_date = strategy.last().or(buy_hold.last()).map(|p| p.date);

        let strategy_points = polyline_points(strategy, min_v, max_v);
        let buy_hold_points = polyline_points(buy_hold, min_v, max_v);

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}">
  <rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>
  <line x1="{pad}" y1="{pad}" x2="{pad}" y2="{bottom}" stroke="black"/>
  <line x1="{pad}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="black"/>
  <text x="{pad}" y="{axis_label_y}" font-size="10">{start}</text>
  <text x="{right}" y="{axis_label_y}" font-size="10" text-anchor="end">{end}</text>
  <text x="{label_x}" y="{top_label_y}" font-size="10" text-anchor="end">{max:.3}</text>
  <text x="{label_x}" y="{bottom}" font-size="10" text-anchor="end">{min:.3}</text>
  <polyline fill="none" stroke="#1f77b4" stroke-width="1.5" points="{strategy_points}"/>
  <polyline fill="none" stroke="#ff7f0e" stroke-width="1.5" points="{buy_hold_points}"/>
  <text x="{legend_x}" y="{legend_y1}" font-size="11" fill="#1f77b4">Strategy Cumulative Return</text>
  <text x="{legend_x}" y="{legend_y2}" font-size="11" fill="#ff7f0e">Buy &amp; Hold Cumulative Return</text>
</svg>
"##,
            pad = PADDING,
            bottom = HEIGHT - PADDING,
            right = WIDTH - PADDING,
            axis_label_y = HEIGHT - PADDING + 14.0,
            label_x = PADDING - 4.0,
            top_label_y = PADDING + 4.0,
            start = first_date.map(|d| d.to_string()).unwrap_or_default(),
            end = last_date.map(|d| d.to_string()).unwrap_or_default(),
            max = max_v,
            min = min_v,
            legend_x = PADDING + 8.0,
            legend_y1 = PADDING + 14.0,
            legend_y2 = PADDING + 28.0,
        )
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for SvgChartAdapter {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), GoldcrossError> {
        fs::write(output_path, Self::render(result))?;
        Ok(())
    }
}

fn value_bounds(a: &[CurvePoint], b: &[CurvePoint]) -> (f64, f64) {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for point in a.iter().chain(b) {
        min_v = min_v.min(point.value);
        max_v = max_v.max(point.value);
    }
    (min_v, max_v)
}

fn polyline_points(curve: &[CurvePoint], min_v: f64, max_v: f64) -> String {
    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_v - min_v;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if curve.len() > 1 {
        plot_width / (curve.len() - 1) as f64
    } else {
        0.0
    };

    curve
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.value - min_v) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<String>>()
        .join(" ")
}
