//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::backtest::{
    run_backtest, BacktestConfig, DEFAULT_INITIAL_CASH, DEFAULT_LONG_WINDOW,
    DEFAULT_RISK_FREE_RATE, DEFAULT_SHORT_WINDOW,
};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::error::GoldcrossError;
use crate::domain::metrics::Metrics;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "goldcross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a crossover backtest against buy-and-hold
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Chart output path (default: chart.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List available symbols on an exchange
    ListSymbols {
        #[arg(long)]
        exchange: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for a symbol
    Info {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            code,
            exchange,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(
                    &config,
                    output.as_ref(),
                    code.as_deref(),
                    exchange.as_deref(),
                )
            }
        }
        Command::ListSymbols { exchange, config } => run_list_symbols(&exchange, &config),
        Command::Info {
            code,
            exchange,
            config,
        } => run_info(code.as_deref(), exchange.as_deref(), &config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GoldcrossError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, GoldcrossError> {
    let start_str = adapter
        .get_string("backtest", "start_date")
        .ok_or_else(|| GoldcrossError::ConfigMissing {
            section: "backtest".into(),
            key: "start_date".into(),
        })?;
    let end_str = adapter.get_string("backtest", "end_date").ok_or_else(|| {
        GoldcrossError::ConfigMissing {
            section: "backtest".into(),
            key: "end_date".into(),
        }
    })?;

    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        GoldcrossError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;
    let end_date = NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
        GoldcrossError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    Ok(BacktestConfig {
        start_date,
        end_date,
        short_window: adapter.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64)
            as usize,
        long_window: adapter.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64)
            as usize,
        initial_cash: adapter.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH),
        risk_free_rate: adapter.get_double("backtest", "risk_free_rate", DEFAULT_RISK_FREE_RATE),
    })
}

pub fn build_data_port(adapter: &dyn ConfigPort) -> Result<CsvAdapter, GoldcrossError> {
    let dir = adapter
        .get_string("data", "dir")
        .ok_or_else(|| GoldcrossError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(dir)))
}

pub fn resolve_code(code_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    if let Some(c) = code_override {
        return Some(c.to_uppercase());
    }

    config
        .get_string("backtest", "code")
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
}

pub fn resolve_exchange(
    exchange_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Option<String> {
    if let Some(e) = exchange_override {
        return Some(e.to_string());
    }

    config
        .get_string("backtest", "exchange")
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

fn run_backtest_command(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    code_override: Option<&str>,
    exchange_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build BacktestConfig
    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Resolve code and exchange
    let code = match resolve_code(code_override, &adapter) {
        Some(c) => c,
        None => {
            eprintln!("error: no code configured");
            return ExitCode::from(2);
        }
    };
    let exchange = match resolve_exchange(exchange_override, &adapter) {
        Some(e) => e,
        None => {
            eprintln!("error: exchange is required");
            return ExitCode::from(2);
        }
    };

    // Stage 5: Data port
    let data_port = match build_data_port(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    run_backtest_pipeline(&data_port, &bt_config, &code, &exchange, output_path)
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    bt_config: &BacktestConfig,
    code: &str,
    exchange: &str,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 6: Fetch bars
    let bars = match data_port.fetch_bars(code, exchange, bt_config.start_date, bt_config.end_date)
    {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if bars.is_empty() {
        let err = GoldcrossError::NoData {
            code: code.to_string(),
            exchange: exchange.to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!(
        "Running backtest: {}.{}, {} bars, SMA({})/SMA({}), {} to {}",
        code,
        exchange,
        bars.len(),
        bt_config.short_window,
        bt_config.long_window,
        bt_config.start_date,
        bt_config.end_date,
    );

    // Stage 7: Run the pipeline
    let result = match run_backtest(&bars, bt_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 8: Metrics for both curves
    let strategy_metrics = Metrics::compute(&result.strategy_curve, bt_config.risk_free_rate);
    let buy_hold_metrics = Metrics::compute(&result.buy_hold_curve, bt_config.risk_free_rate);

    print_metrics("Strategy", &strategy_metrics);
    print_metrics("Buy & Hold", &buy_hold_metrics);

    // Stage 9: Write chart
    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("chart.svg"));

    let reporter = SvgChartAdapter::new();
    match reporter.write(&result, &output) {
        Ok(()) => {
            eprintln!("\nChart written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write chart: {e}");
            (&e).into()
        }
    }
}

fn print_metrics(label: &str, metrics: &Metrics) {
    eprintln!("\n=== {label} ===");
    eprintln!("Total Return:       {:.2}%", metrics.total_return * 100.0);
    eprintln!("Annualized:         {:.2}%", metrics.annualized_return * 100.0);
    eprintln!("Volatility:         {:.2}%", metrics.volatility * 100.0);
    eprintln!("Sharpe Ratio:       {:.2}", metrics.sharpe_ratio);
    eprintln!("Max Drawdown:       -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Drawdown Duration:  {} days", metrics.max_drawdown_duration);
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nStrategy:");
    eprintln!(
        "  long when SMA({}) > SMA({}), executed at the next open",
        bt_config.short_window, bt_config.long_window
    );
    eprintln!("  initial cash: {:.2}", bt_config.initial_cash);
    eprintln!("  risk-free rate: {}% p.a.", bt_config.risk_free_rate);

    eprintln!("\nUniverse:");
    eprintln!(
        "  exchange: {}",
        resolve_exchange(None, &adapter).unwrap_or_default()
    );
    eprintln!(
        "  code: {}",
        resolve_code(None, &adapter).unwrap_or_default()
    );

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_list_symbols(exchange: &str, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match build_data_port(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols(exchange) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found for exchange {}", exchange);
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(code: Option<&str>, exchange: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let code = match resolve_code(code, &config) {
        Some(c) => c,
        None => {
            eprintln!("error: code is required (use --code or set in config)");
            return ExitCode::from(2);
        }
    };
    let exchange = match resolve_exchange(exchange, &config) {
        Some(e) => e,
        None => {
            eprintln!("error: exchange is required (use --exchange or set in config)");
            return ExitCode::from(2);
        }
    };

    let adapter = match build_data_port(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match adapter.get_data_range(&code, &exchange) {
        Ok(Some((min_date, max_date, count))) => {
            println!("{}.{}: {} bars, {} to {}", code, exchange, count, min_date, max_date);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}.{}: no data found", code, exchange);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error querying {}.{}: {}", code, exchange, e);
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}
