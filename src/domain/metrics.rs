//! Summary statistics over a cumulative-return curve.
//!
//! The curve is a multiplier series (1.0 = breakeven), so the same routine
//! serves both the strategy curve and the buy-and-hold curve. Calls share no
//! state; the risk-free rate is percent per annum and is interpreted here
//! and nowhere else.

use super::returns::CurvePoint;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub max_drawdown_duration: i64,
}

impl Metrics {
    pub fn compute(curve: &[CurvePoint], risk_free_rate: f64) -> Self {
        let final_level = curve.last().map(|p| p.value).unwrap_or(1.0);
        let total_return = final_level - 1.0;

        let years = curve.len() as f64 / TRADING_DAYS_PER_YEAR;
        let annualized_return = if years > 0.0 && final_level > 0.0 {
            final_level.powf(1.0 / years) - 1.0
        } else {
            0.0
        };

        let daily_rf = risk_free_rate / 100.0 / TRADING_DAYS_PER_YEAR;
        let (volatility, sharpe_ratio) = compute_risk_adjusted(curve, daily_rf);
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(curve);

        Metrics {
            total_return,
            annualized_return,
            volatility,
            sharpe_ratio,
            max_drawdown,
            max_drawdown_duration,
        }
    }
}

fn compute_drawdown(curve: &[CurvePoint]) -> (f64, i64) {
    if curve.is_empty() {
        return (0.0, 0);
    }

    let mut peak = curve[0].value;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0i64;
    let mut current_dd_duration = 0i64;

    for point in curve {
        if point.value > peak {
            peak = point.value;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}

fn compute_risk_adjusted(curve: &[CurvePoint], daily_rf: f64) -> (f64, f64) {
    if curve.len() < 2 {
        return (0.0, 0.0);
    }

    let returns: Vec<f64> = curve
        .windows(2)
        .map(|w| {
            let prev = w[0].value;
            let curr = w[1].value;
            if prev > 0.0 { (curr - prev) / prev } else { 0.0 }
        })
        .collect();

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let volatility = stddev * TRADING_DAYS_PER_YEAR.sqrt();

    let sharpe = if stddev > 0.0 {
        ((mean - daily_rf) / stddev) * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    };

    (volatility, sharpe)
}
