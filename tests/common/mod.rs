#![allow(dead_code)]

use chrono::NaiveDate;
use goldcross::domain::backtest::BacktestConfig;
pub use goldcross::domain::bar::Bar;
use goldcross::domain::error::GoldcrossError;
use goldcross::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        code: &str,
        _exchange: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<Bar>, GoldcrossError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(GoldcrossError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(code).cloned().unwrap_or_default())
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, GoldcrossError> {
        Ok(self.data.keys().cloned().collect())
    }

    fn get_data_range(
        &self,
        code: &str,
        _exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GoldcrossError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(GoldcrossError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn make_bar(date: &str, open: f64, close: f64) -> Bar {
    Bar {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open,
        close,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: date(2022, 1, 1),
        end_date: date(2024, 6, 20),
        short_window: 5,
        long_window: 20,
        initial_cash: 100_000.0,
        risk_free_rate: 4.0,
    }
}

/// Bars rising by one each day; open == previous close, so the first trade
/// on a run like this fills one step below the day's close.
pub fn generate_trending_bars(start_date: &str, count: usize, start_price: f64) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| Bar {
            date: start + chrono::Duration::days(i as i64),
            open: start_price + i as f64 - 1.0,
            close: start_price + i as f64,
        })
        .collect()
}

/// Write a CSV fixture in the adapter's `{CODE}_{EXCHANGE}.csv` layout.
pub fn write_csv_fixture(dir: &std::path::Path, code: &str, exchange: &str, bars: &[Bar]) {
    let mut content = String::from("date,open,close\n");
    for bar in bars {
        content.push_str(&format!("{},{},{}\n", bar.date, bar.open, bar.close));
    }
    std::fs::write(dir.join(format!("{}_{}.csv", code, exchange)), content).unwrap();
}
