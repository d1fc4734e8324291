//! Crossover signal generation.
//!
//! The raw direction on day i compares the two moving averages computed
//! through day i's close. The decision is only known at that close, so the
//! signal the simulator reads on day i is the direction of day i-1, so trades
//! execute at the next open, never on same-day information.

use super::bar::Bar;
use super::sma::calculate_sma;

/// Directional decision applied to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Long,
    Flat,
    /// Either average is still warming up, or there is no prior day to lag from.
    Undefined,
}

/// Produce the lagged signal series, one entry per bar.
///
/// Direction is Long only on a strict `short > long` comparison; an exact tie
/// resolves to Flat. Fewer bars than `long_window` is not an error and simply
/// yields Undefined throughout.
pub fn generate_signals(bars: &[Bar], short_window: usize, long_window: usize) -> Vec<Signal> {
    if bars.is_empty() {
        return Vec::new();
    }

    let short = calculate_sma(bars, short_window);
    let long = calculate_sma(bars, long_window);

    let direction: Vec<Signal> = bars
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let s = &short.values[i];
            let l = &long.values[i];
            if !s.valid || !l.valid {
                Signal::Undefined
            } else if s.value > l.value {
                Signal::Long
            } else {
                Signal::Flat
            }
        })
        .collect();

    // Shift by one day: signal[0] has no prior direction.
    let mut signals = Vec::with_capacity(bars.len());
    signals.push(Signal::Undefined);
    signals.extend_from_slice(&direction[..bars.len() - 1]);
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: close,
                close,
            })
            .collect()
    }

    #[test]
    fn signals_align_with_bars() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let signals = generate_signals(&bars, 2, 3);
        assert_eq!(signals.len(), bars.len());
    }

    #[test]
    fn first_signal_is_undefined() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let signals = generate_signals(&bars, 1, 2);
        assert_eq!(signals[0], Signal::Undefined);
    }

    #[test]
    fn warmup_is_undefined() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let signals = generate_signals(&bars, 2, 4);

        // direction is undefined through day 2 (long SMA warms up at day 3),
        // and the lag pushes that one day further.
        assert_eq!(signals[0], Signal::Undefined);
        assert_eq!(signals[1], Signal::Undefined);
        assert_eq!(signals[2], Signal::Undefined);
        assert_eq!(signals[3], Signal::Undefined);
        assert_ne!(signals[4], Signal::Undefined);
    }

    #[test]
    fn rising_prices_go_long_after_lag() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let signals = generate_signals(&bars, 1, 2);

        // short SMA leads on a rising series from day 1; lagged onto day 2.
        assert_eq!(signals[2], Signal::Long);
        assert_eq!(signals[3], Signal::Long);
        assert_eq!(signals[4], Signal::Long);
    }

    #[test]
    fn exact_tie_is_flat() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let signals = generate_signals(&bars, 1, 2);

        // both averages equal 100 once warm; strict > never fires.
        assert_eq!(signals[2], Signal::Flat);
        assert_eq!(signals[3], Signal::Flat);
    }

    #[test]
    fn lagged_crossover_three_bars() {
        // closes 10, 12, 11 with windows 1/2:
        // short = [10, 12, 11], long = [-, 11, 11]
        // direction = [Undefined, Long, Flat] -> lagged [Undefined, Undefined, Long]
        let bars = vec![
            Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                open: 10.0,
                close: 10.0,
            },
            Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                open: 11.0,
                close: 12.0,
            },
            Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                open: 13.0,
                close: 11.0,
            },
        ];
        let signals = generate_signals(&bars, 1, 2);

        assert_eq!(signals, vec![Signal::Undefined, Signal::Undefined, Signal::Long]);
    }

    #[test]
    fn short_series_is_all_undefined() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let signals = generate_signals(&bars, 5, 20);

        assert!(signals.iter().all(|&s| s == Signal::Undefined));
    }

    #[test]
    fn empty_bars_empty_signals() {
        let signals = generate_signals(&[], 5, 20);
        assert!(signals.is_empty());
    }
}
