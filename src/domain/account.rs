//! Account-state simulation: signal series in, day-by-day cash/shares out.
//!
//! The simulation is a left fold: each day's state is a pure function of the
//! previous state, that day's signal, and that day's bar. Entries and exits
//! fill at the day's open (the signal was fixed at the prior close); the
//! close is used only to mark the account to market. Sizing is all-in or
//! all-out, fractional shares allowed.

use chrono::NaiveDate;

use super::bar::Bar;
use super::error::GoldcrossError;
use super::signal::Signal;

/// One day's account snapshot. Exactly one of cash/shares is positive after
/// any trade; both stay as-is on hold/stay days.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub date: NaiveDate,
    pub cash: f64,
    pub shares: f64,
    pub portfolio_value: f64,
}

/// Compute day i's state from day i-1's.
///
/// | signal | prior shares | action |
/// |--------|--------------|--------|
/// | Long   | 0            | buy all-in at open |
/// | Long   | > 0          | hold |
/// | Flat/Undefined | > 0  | sell all-out at open |
/// | Flat/Undefined | 0    | stay flat |
pub fn transition(prev: &AccountState, signal: Signal, bar: &Bar) -> AccountState {
    let (cash, shares) = match (signal, prev.shares > 0.0) {
        (Signal::Long, false) => (0.0, prev.cash / bar.open),
        (Signal::Long, true) => (prev.cash, prev.shares),
        (_, true) => (prev.shares * bar.open, 0.0),
        (_, false) => (prev.cash, 0.0),
    };

    AccountState {
        date: bar.date,
        cash,
        shares,
        portfolio_value: cash + shares * bar.close,
    }
}

/// Run the full simulation.
///
/// Day 0 is seeded with `initial_cash` and zero shares; no trade can happen
/// before day 1 because the lagged signal is Undefined there. The final day
/// is not force-liquidated: an open position stays open, marked at the last
/// close. Empty input produces an empty output.
pub fn simulate(
    bars: &[Bar],
    signals: &[Signal],
    initial_cash: f64,
) -> Result<Vec<AccountState>, GoldcrossError> {
    if signals.len() != bars.len() {
        return Err(GoldcrossError::SeriesMismatch {
            bars: bars.len(),
            signals: signals.len(),
        });
    }
    if bars.is_empty() {
        return Ok(Vec::new());
    }
    if initial_cash <= 0.0 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }

    for (i, bar) in bars.iter().enumerate() {
        if bar.open <= 0.0 {
            return Err(GoldcrossError::NonPositivePrice {
                field: "open",
                value: bar.open,
                index: i,
                date: bar.date,
            });
        }
        if bar.close <= 0.0 {
            return Err(GoldcrossError::NonPositivePrice {
                field: "close",
                value: bar.close,
                index: i,
                date: bar.date,
            });
        }
    }

    let mut states = Vec::with_capacity(bars.len());
    states.push(AccountState {
        date: bars[0].date,
        cash: initial_cash,
        shares: 0.0,
        portfolio_value: initial_cash,
    });

    for i in 1..bars.len() {
        let next = transition(&states[i - 1], signals[i], &bars[i]);
        states.push(next);
    }

    Ok(states)
}
