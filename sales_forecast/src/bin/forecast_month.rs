use clap::Parser;
use sales_forecast::config::ForecastConfig;
use sales_forecast::data::{DataLoader, HistorySource};
use sales_forecast::logging::init_tracing;
use sales_forecast::metrics::ForecastAccuracy;
use sales_forecast::service::ForecastService;
use sales_forecast::{ForecastError, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Forecast every day of the month following YEAR-MONTH
#[derive(Debug, Parser)]
#[command(name = "forecast-month", version)]
struct Args {
    /// Year of the history month
    year: i32,

    /// History month, 1-12
    month: u32,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model artifact, overrides `[model] path`
    #[arg(long)]
    model: Option<PathBuf>,

    /// Invoice CSV, overrides `[data] invoices_csv`
    #[arg(long)]
    invoices: Option<PathBuf>,

    /// Invoice CSV with realised sales for the forecast month
    #[arg(long)]
    actuals: Option<PathBuf>,

    /// Per-forecast budget in milliseconds, overrides `[engine] timeout_ms`
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("forecast-month: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("forecast-month: {}", err);
        return ExitCode::FAILURE;
    }

    match run(&args, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!(error = %err, "forecast-month failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<ForecastConfig> {
    let mut config = match &args.config {
        Some(path) => ForecastConfig::load(path)?,
        None => ForecastConfig::default(),
    };

    if let Some(model) = &args.model {
        config.model.path = model.clone();
    }
    if let Some(invoices) = &args.invoices {
        config.data.invoices_csv = Some(invoices.clone());
    }
    if args.timeout_ms.is_some() {
        config.engine.timeout_ms = args.timeout_ms;
    }

    Ok(config)
}

/// Returns whether the forecast succeeded
fn run(args: &Args, config: &ForecastConfig) -> Result<bool> {
    let invoices = config.data.invoices_csv.as_ref().ok_or_else(|| {
        ForecastError::ConfigError("no invoice CSV configured (use --invoices)".to_string())
    })?;

    let ledger = DataLoader::from_csv(invoices)?;
    info!(invoices = ledger.len(), path = %invoices.display(), "ledger loaded");

    let service = ForecastService::from_artifact(ledger, &config.model.path, config.engine.settings());
    let response = service.respond(args.year, args.month);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        return Ok(false);
    }

    if let (Some(actuals), Some(year), Some(month)) = (&args.actuals, response.year, response.month)
    {
        let realised = DataLoader::from_csv(actuals)?.daily_totals(year, month)?;
        let forecast = sales_forecast::MonthlyForecast {
            year,
            month,
            predictions: response.predictions.clone(),
        };
        eprint!("{}", ForecastAccuracy::evaluate(&forecast, &realised)?);
    }

    Ok(true)
}
