//! Market-data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::GoldcrossError;
use chrono::NaiveDate;

/// External provider of daily bars for a single instrument, keyed by code,
/// exchange, and date range. Implementations return a date-sorted series;
/// the domain validates it before computing anything.
pub trait DataPort {
    fn fetch_bars(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, GoldcrossError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, GoldcrossError>;

    fn get_data_range(
        &self,
        code: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, GoldcrossError>;
}
