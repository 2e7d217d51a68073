use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::data::{Invoice, InvoiceLedger};
use sales_forecast::engine::EngineSettings;
use sales_forecast::predictor::FnPredictor;
use sales_forecast::{FeatureRow, ForecastError, ForecastService};
use serde_json::Value;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Two invoices a day for every day of January 2023
fn january_ledger() -> InvoiceLedger {
    let invoices: Vec<Invoice> = (1..=31)
        .flat_map(|d| {
            let day = NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
            vec![
                Invoice::new(format!("A{:02}", d), day, 400.0 + d as f64),
                Invoice::new(format!("B{:02}", d), day, 600.0),
            ]
        })
        .collect();
    InvoiceLedger::from_invoices(&invoices).unwrap()
}

const MEAN_MODEL: &str = r#"{
    "version": "test",
    "features": ["dayofweek", "month", "day", "lag1", "rolling_mean7", "rolling_std7"],
    "model": {
        "kind": "linear",
        "intercept": 0.0,
        "weights": { "dayofweek": 0.0, "month": 0.0, "day": 0.0, "lag1": 0.0, "rolling_mean7": 1.0, "rolling_std7": 0.0 }
    }
}"#;

#[test]
fn test_forecast_response_shape() {
    let mut artifact = NamedTempFile::new().unwrap();
    write!(artifact, "{}", MEAN_MODEL).unwrap();

    let service = ForecastService::from_artifact(january_ledger(), artifact.path(), EngineSettings::default());
    assert!(service.model_ready());

    let response = service.respond(2023, 1);
    assert_eq!(response.status, 200);
    assert!(response.is_success());

    let json: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(json["year"], 2023);
    assert_eq!(json["month"], 2);
    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 28);
    assert_eq!(predictions[0]["date"], "2023-02-01");
    assert_eq!(predictions[27]["date"], "2023-02-28");
    assert!(predictions[0]["predicted_amount"].is_f64());
    assert!(json.get("error").is_none());
}

#[test]
fn test_missing_model_reports_unavailable_with_no_predictions() {
    let service = ForecastService::from_artifact(
        january_ledger(),
        "/nonexistent/sales_model.json",
        EngineSettings::default(),
    );
    assert!(!service.model_ready());

    assert!(matches!(
        service.forecast(2023, 1),
        Err(ForecastError::ModelUnavailable(_))
    ));

    let response = service.respond(2023, 1);
    assert_eq!(response.status, 500);
    assert!(response.predictions.is_empty());

    let error = response.error.unwrap();
    assert_eq!(error.code, "MODEL_UNAVAILABLE");
    assert!(!error.message.contains("nonexistent"));
}

#[test]
fn test_data_errors_win_over_missing_model() {
    let service = ForecastService::from_artifact(
        january_ledger(),
        "/nonexistent/sales_model.json",
        EngineSettings::default(),
    );

    let response = service.respond(2023, 6);
    assert_eq!(response.status, 404);
    assert_eq!(response.error.unwrap().code, "DATA_NOT_FOUND");
}

#[test]
fn test_insufficient_history_is_bad_request() {
    let invoices: Vec<Invoice> = (1..=10)
        .map(|d| Invoice::new(format!("F{}", d), NaiveDate::from_ymd_opt(2023, 3, d).unwrap(), 10.0))
        .collect();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let predictor = FnPredictor::new("counting", move |_: &FeatureRow| {
        counter.fetch_add(1, Ordering::SeqCst);
        1.0
    });
    let service = ForecastService::new(InvoiceLedger::from_invoices(&invoices).unwrap(), Arc::new(predictor));

    let response = service.respond(2023, 3);
    assert_eq!(response.status, 400);
    assert!(response.predictions.is_empty());
    let error = response.error.unwrap();
    assert_eq!(error.code, "INSUFFICIENT_HISTORY");
    assert!(error.message.contains("14"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_month_is_bad_request() {
    let service = ForecastService::new(
        january_ledger(),
        Arc::new(FnPredictor::new("lag", |row: &FeatureRow| row.lag1)),
    );

    let response = service.respond(2023, 13);
    assert_eq!(response.status, 400);
    assert_eq!(response.error.unwrap().code, "INVALID_PARAMETER");
}

#[test]
fn test_aggregated_history_feeds_recursion() {
    let service = ForecastService::new(
        january_ledger(),
        Arc::new(FnPredictor::new("lag", |row: &FeatureRow| row.lag1)),
    );

    let forecast = service.forecast(2023, 1).unwrap();
    // 2023-01-31 totals 431 + 600
    assert!(forecast.predictions.iter().all(|p| p.predicted_amount == 1031.0));
}
