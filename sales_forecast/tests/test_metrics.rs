use approx::assert_relative_eq;
use chrono::NaiveDate;
use sales_forecast::engine::{ForecastPoint, MonthlyForecast};
use sales_forecast::metrics::ForecastAccuracy;
use sales_forecast::SalesRecord;

fn feb(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, d).unwrap()
}

#[test]
fn test_accuracy_on_matching_days() {
    let forecast = MonthlyForecast {
        year: 2023,
        month: 2,
        predictions: vec![
            ForecastPoint::new(feb(1), 110.0),
            ForecastPoint::new(feb(2), 90.0),
            ForecastPoint::new(feb(3), 100.0),
        ],
    };
    // No actual for Feb 3
    let actual = vec![
        SalesRecord::new(feb(1), 100.0),
        SalesRecord::new(feb(2), 100.0),
    ];

    let accuracy = ForecastAccuracy::evaluate(&forecast, &actual).unwrap();
    assert_eq!(accuracy.days, 2);
    assert_relative_eq!(accuracy.mae, 10.0);
    assert_relative_eq!(accuracy.mse, 100.0);
    assert_relative_eq!(accuracy.rmse, 10.0);
    assert_relative_eq!(accuracy.mape, 10.0);

    let report = accuracy.to_string();
    assert!(report.contains("MAE:   10.0000"));
}

#[test]
fn test_zero_actuals_skip_mape() {
    let accuracy = ForecastAccuracy::from_pairs(&[(0.0, 0.0), (5.0, 0.0)]).unwrap();

    assert_eq!(accuracy.mape, 0.0);
    assert_relative_eq!(accuracy.smape, 100.0);
}

#[test]
fn test_no_overlap_is_an_error() {
    let forecast = MonthlyForecast {
        year: 2023,
        month: 2,
        predictions: vec![ForecastPoint::new(feb(1), 1.0)],
    };

    assert!(ForecastAccuracy::evaluate(&forecast, &[]).is_err());
}
