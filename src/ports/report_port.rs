//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::GoldcrossError;

/// Port for rendering a backtest result. Consumers read the two
/// cumulative-return curves and the date axis; how they draw or format them
/// is entirely their own business.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), GoldcrossError>;
}
