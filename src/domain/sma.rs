//! Simple Moving Average over close prices.
//!
//! O(n) sliding window implementation.
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Warmup: first (n-1) bars are invalid.

use chrono::NaiveDate;

use super::bar::Bar;

#[derive(Debug, Clone)]
pub struct SmaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SmaSeries {
    pub period: usize,
    pub values: Vec<SmaPoint>,
}

pub fn calculate_sma(bars: &[Bar], period: usize) -> SmaSeries {
    if period == 0 || bars.is_empty() {
        return SmaSeries {
            period,
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut window_sum: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.close;
        if i >= period {
            window_sum -= bars[i - period].close;
        }

        let valid = i >= period - 1;
        let sma = if valid { window_sum / period as f64 } else { 0.0 };

        values.push(SmaPoint {
            date: bar.date,
            valid,
            value: sma,
        });
    }

    SmaSeries { period, values }
}
