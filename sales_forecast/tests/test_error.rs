use chrono::NaiveDate;
use rstest::rstest;
use sales_forecast::error::MIN_FEATURE_ROWS;
use sales_forecast::ForecastError;
use sales_math::MathError;
use std::io;

fn jan(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
}

#[rstest]
#[case(ForecastError::DataNotFound { year: 2023, month: 1 }, 404, "DATA_NOT_FOUND")]
#[case(ForecastError::InsufficientHistory { usable: 3, required: MIN_FEATURE_ROWS }, 400, "INSUFFICIENT_HISTORY")]
#[case(ForecastError::InvalidParameter("month".to_string()), 400, "INVALID_PARAMETER")]
#[case(ForecastError::ModelUnavailable("gone".to_string()), 500, "MODEL_UNAVAILABLE")]
#[case(ForecastError::Prediction("nan".to_string()), 500, "PREDICTION_FAILED")]
#[case(ForecastError::Timeout { elapsed_ms: 10 }, 500, "TIMEOUT")]
#[case(ForecastError::OutOfOrder { last: jan(2), attempted: jan(1) }, 500, "INTERNAL_ERROR")]
fn test_status_mapping(#[case] error: ForecastError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(error.status(), status);
    assert_eq!(error.code(), code);
}

#[test]
fn test_public_messages_hide_internals() {
    let error = ForecastError::ModelUnavailable("cannot read artifact /srv/models/x.json".to_string());
    assert!(format!("{}", error).contains("/srv/models/x.json"));
    assert!(!error.public_message().contains("/srv"));

    let error = ForecastError::from(io::Error::new(io::ErrorKind::PermissionDenied, "/etc/secret"));
    assert_eq!(error.public_message(), "Internal forecasting error");

    let error = ForecastError::InsufficientHistory {
        usable: 4,
        required: MIN_FEATURE_ROWS,
    };
    assert!(error.public_message().contains("minimum 14"));
}

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    assert!(matches!(ForecastError::from(io_error), ForecastError::IoError(_)));

    let math_error = MathError::InsufficientData("window".to_string());
    assert!(matches!(ForecastError::from(math_error), ForecastError::Math(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(ForecastError::from(json_error), ForecastError::Json(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::OutOfOrder {
        last: jan(5),
        attempted: jan(5),
    };
    assert_eq!(
        error.to_string(),
        "Out-of-order record: 2023-01-05 does not follow 2023-01-05"
    );

    let error = ForecastError::DataNotFound { year: 2023, month: 3 };
    assert_eq!(error.to_string(), "No sales found for 2023-03");
}
