//! Backtest configuration and pipeline orchestration.

use chrono::NaiveDate;

use super::account::{simulate, AccountState};
use super::bar::{validate_bars, Bar};
use super::error::GoldcrossError;
use super::returns::{cumulative_curve, CurvePoint};
use super::signal::{generate_signals, Signal};

pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 20;
pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;
/// Percent per annum; interpreted only by the metrics routine.
pub const DEFAULT_RISK_FREE_RATE: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub short_window: usize,
    pub long_window: usize,
    pub initial_cash: f64,
    pub risk_free_rate: f64,
}

/// Everything a reporting consumer needs: the signal and account sequences
/// plus both cumulative-return curves on the bar series' date axis.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub signals: Vec<Signal>,
    pub states: Vec<AccountState>,
    pub strategy_curve: Vec<CurvePoint>,
    pub buy_hold_curve: Vec<CurvePoint>,
}

/// Run the full pipeline over an already-windowed bar series:
/// validation → signals → simulation → return curves.
pub fn run_backtest(
    bars: &[Bar],
    config: &BacktestConfig,
) -> Result<BacktestResult, GoldcrossError> {
    if config.short_window == 0 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be at least 1".to_string(),
        });
    }
    if config.short_window >= config.long_window {
        return Err(GoldcrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be less than long_window".to_string(),
        });
    }
    if config.initial_cash <= 0.0 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }

    validate_bars(bars)?;

    let signals = generate_signals(bars, config.short_window, config.long_window);
    let states = simulate(bars, &signals, config.initial_cash)?;

    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
    let portfolio_values: Vec<f64> = states.iter().map(|s| s.portfolio_value).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let strategy_curve = cumulative_curve(&dates, &portfolio_values);
    let buy_hold_curve = cumulative_curve(&dates, &closes);

    Ok(BacktestResult {
        signals,
        states,
        strategy_curve,
        buy_hold_curve,
    })
}
