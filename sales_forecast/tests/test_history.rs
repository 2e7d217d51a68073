use chrono::NaiveDate;
use sales_forecast::{ForecastError, HistoryBuffer, SalesRecord};

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
}

#[test]
fn test_append_extends_forward() {
    let mut buffer = HistoryBuffer::new();
    buffer.append(SalesRecord::new(jan(1), 100.0)).unwrap();
    buffer.append(SalesRecord::new(jan(3), 120.0)).unwrap();

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.last().unwrap().date, jan(3));
    assert_eq!(buffer.amounts().collect::<Vec<_>>(), vec![100.0, 120.0]);
}

#[test]
fn test_append_rejects_earlier_date() {
    let mut buffer = HistoryBuffer::new();
    buffer.append(SalesRecord::new(jan(5), 100.0)).unwrap();

    match buffer.append(SalesRecord::new(jan(4), 50.0)) {
        Err(ForecastError::OutOfOrder { last, attempted }) => {
            assert_eq!(last, jan(5));
            assert_eq!(attempted, jan(4));
        }
        other => panic!("Expected OutOfOrder, got {:?}", other),
    }
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_from_records_rejects_duplicates() {
    let result = HistoryBuffer::from_records(vec![
        SalesRecord::new(jan(1), 1.0),
        SalesRecord::new(jan(2), 2.0),
        SalesRecord::new(jan(2), 3.0),
    ]);

    assert!(matches!(result, Err(ForecastError::OutOfOrder { .. })));
}

#[test]
fn test_append_rejects_non_finite_amount() {
    let mut buffer = HistoryBuffer::new();
    let result = buffer.append(SalesRecord::new(jan(1), f64::NAN));

    assert!(matches!(result, Err(ForecastError::DataError(_))));
    assert!(buffer.is_empty());
}

#[test]
fn test_tail_returns_latest_amounts_in_order() {
    let buffer =
        HistoryBuffer::from_records((1..=10).map(|d| SalesRecord::new(jan(d), d as f64))).unwrap();

    assert_eq!(buffer.tail(7), vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    assert_eq!(buffer.tail(20).len(), 10);
}
