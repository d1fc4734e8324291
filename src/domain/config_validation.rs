//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use chrono::NaiveDate;

use super::backtest::{
    DEFAULT_INITIAL_CASH, DEFAULT_LONG_WINDOW, DEFAULT_RISK_FREE_RATE, DEFAULT_SHORT_WINDOW,
};
use super::error::GoldcrossError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    validate_initial_cash(config)?;
    validate_risk_free_rate(config)?;
    validate_dates(config)?;
    validate_exchange(config)?;
    validate_code(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    let short = config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64);
    let long = config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64);

    if short < 1 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be at least 1".to_string(),
        });
    }
    if long <= short {
        return Err(GoldcrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_window".to_string(),
            reason: "long_window must be greater than short_window".to_string(),
        });
    }
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    let value = config.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH);
    if value <= 0.0 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    let value = config.get_double("backtest", "risk_free_rate", DEFAULT_RISK_FREE_RATE);
    if value < 0.0 {
        return Err(GoldcrossError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "risk_free_rate".to_string(),
            reason: "risk_free_rate must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(GoldcrossError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, GoldcrossError> {
    match value {
        None => Err(GoldcrossError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| GoldcrossError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_exchange(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    match config.get_string("backtest", "exchange") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(GoldcrossError::ConfigMissing {
            section: "backtest".to_string(),
            key: "exchange".to_string(),
        }),
    }
}

fn validate_code(config: &dyn ConfigPort) -> Result<(), GoldcrossError> {
    match config.get_string("backtest", "code") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(GoldcrossError::ConfigMissing {
            section: "backtest".to_string(),
            key: "code".to_string(),
        }),
    }
}
