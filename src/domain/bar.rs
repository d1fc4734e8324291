//! Daily price bar representation and series validation.

use chrono::NaiveDate;

use super::error::GoldcrossError;

/// One day's open/close price record.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// Check the whole series before any computation runs.
///
/// Rejects an empty series, non-positive prices, duplicate dates, and
/// out-of-order dates. A bad bar cannot be skipped: cash/shares carry-forward
/// would silently corrupt every later day, so the run aborts with the
/// offending index and date. Missing calendar days (holidays) are fine.
pub fn validate_bars(bars: &[Bar]) -> Result<(), GoldcrossError> {
    if bars.is_empty() {
        return Err(GoldcrossError::EmptySeries);
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
        if i > 0 {
            let prev = bars[i - 1].date;
            if bar.date == prev {
                return Err(GoldcrossError::DuplicateDate {
                    index: i,
                    date: bar.date,
                });
            }
            if bar.date < prev {
                return Err(GoldcrossError::OutOfOrderDate {
                    index: i,
                    date: bar.date,
                    prev,
                });
            }
        }
    }

    Ok(())
}
