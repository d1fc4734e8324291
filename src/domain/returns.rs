//! Daily and compounded cumulative returns over a value sequence.

use chrono::NaiveDate;

/// One day of a cumulative-return curve. `value` is a multiplier on the
/// first day's level, so 1.0 means breakeven since the window start.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Simple day-over-day returns. The first day has no prior value and is
/// reported as 0 so downstream compounding starts at parity.
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i == 0 { 0.0 } else { v / values[i - 1] - 1.0 })
        .collect()
}

/// Compounded product of (1 + daily return); `result[0]` is always 1.0.
pub fn cumulative_returns(values: &[f64]) -> Vec<f64> {
    let mut acc = 1.0;
    daily_returns(values)
        .into_iter()
        .map(|r| {
            acc *= 1.0 + r;
            acc
        })
        .collect()
}

/// Pair a cumulative-return series with its date axis.
pub fn cumulative_curve(dates: &[NaiveDate], values: &[f64]) -> Vec<CurvePoint> {
    dates
        .iter()
        .zip(cumulative_returns(values))
        .map(|(&date, value)| CurvePoint { date, value })
        .collect()
}
