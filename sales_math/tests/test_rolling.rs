use approx::assert_relative_eq;
use rstest::rstest;
use sales_math::{MathError, RollingWindow, WindowStats};

#[test]
fn test_sample_standard_deviation() {
    // Sample (n - 1) deviation of 2, 4, 4, 4, 5, 5, 7, 9 is sqrt(32 / 7)
    let stats = WindowStats::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

    assert_relative_eq!(stats.mean, 5.0);
    assert_relative_eq!(stats.std_dev, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_constant_window_has_zero_deviation() {
    let stats = WindowStats::of(&[250.0; 7]).unwrap();

    assert_relative_eq!(stats.mean, 250.0);
    assert_eq!(stats.std_dev, 0.0);
}

#[rstest]
#[case(&[])]
#[case(&[1.0])]
fn test_too_few_values(#[case] values: &[f64]) {
    assert!(matches!(
        WindowStats::of(values),
        Err(MathError::InsufficientData(_))
    ));
}

#[test]
fn test_non_finite_values_rejected() {
    assert!(matches!(
        WindowStats::of(&[1.0, f64::NAN, 3.0]),
        Err(MathError::InvalidInput(_))
    ));

    let mut window = RollingWindow::new(7).unwrap();
    assert!(window.push(f64::INFINITY).is_err());
    assert!(window.is_empty());
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_invalid_period(#[case] period: usize) {
    assert!(RollingWindow::new(period).is_err());
}

#[test]
fn test_rolling_matches_slice_statistics() {
    let series: Vec<f64> = (1..=20).map(|i| (i * i) as f64).collect();
    let mut window = RollingWindow::new(7).unwrap();
    assert_eq!(window.period(), 7);

    for (i, &value) in series.iter().enumerate() {
        window.push(value).unwrap();
        if i >= 6 {
            let rolling = window.stats().unwrap();
            let direct = WindowStats::of(&series[i - 6..=i]).unwrap();
            assert_relative_eq!(rolling.mean, direct.mean, epsilon = 1e-9);
            assert_relative_eq!(rolling.std_dev, direct.std_dev, epsilon = 1e-9);
        } else {
            assert!(window.stats().is_err());
        }
    }
}
