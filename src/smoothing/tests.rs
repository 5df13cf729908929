use super::*;

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < tol, "index {}: {} vs {}", i, a, e);
    }
}

#[test]
fn test_centre_weights_match_tabulated_coefficients() {
    // Savitzky & Golay (1964), quadratic, 5 points: [-3, 12, 17, 12, -3] / 35
    let filter = SavitzkyGolay::quadratic(5).unwrap();
    let expected: Vec<f64> = [-3.0, 12.0, 17.0, 12.0, -3.0].iter().map(|c| c / 35.0).collect();
    assert_close(filter.centre_weights(), &expected, 1e-12);

    // 7 points: [-2, 3, 6, 7, 6, 3, -2] / 21
    let filter = SavitzkyGolay::quadratic(7).unwrap();
    let expected: Vec<f64> = [-2.0, 3.0, 6.0, 7.0, 6.0, 3.0, -2.0].iter().map(|c| c / 21.0).collect();
    assert_close(filter.centre_weights(), &expected, 1e-12);
}

#[test]
fn test_edge_weights_match_tabulated_coefficients() {
    // Unit impulses read out one column of the edge weights at a time
    let filter = SavitzkyGolay::quadratic(5).unwrap();
    let responses: Vec<Vec<f64>> = (0..5)
        .map(|j| {
            let mut impulse = vec![0.0; 5];
            impulse[j] = 1.0;
            filter.apply(&impulse).unwrap()
        })
        .collect();
    let at_position = |p: usize| -> Vec<f64> { responses.iter().map(|r| r[p]).collect() };

    let first: Vec<f64> = [31.0, 9.0, -3.0, -5.0, 3.0].iter().map(|c| c / 35.0).collect();
    let second: Vec<f64> = [9.0, 13.0, 12.0, 6.0, -5.0].iter().map(|c| c / 35.0).collect();
    assert_close(&at_position(0), &first, 1e-12);
    assert_close(&at_position(1), &second, 1e-12);

    let mut last = first.clone();
    last.reverse();
    assert_close(&at_position(4), &last, 1e-12);
}

#[test]
fn test_long_window_keeps_one_weight_row() {
    let window = 20_001;
    let filter = SavitzkyGolay::quadratic(window).unwrap();
    assert_eq!(filter.centre_weights().len(), window);

    let data: Vec<f64> = (0..window + 500)
        .map(|i| {
            let x = i as f64 / 1000.0;
            2.0 * x * x - x + 4.0
        })
        .collect();
    let smoothed = filter.apply(&data).unwrap();

    assert_eq!(smoothed.len(), data.len());
    for i in [0, 1, 250, window / 2, data.len() - 1] {
        assert!(
            (smoothed[i] - data[i]).abs() < 1e-6 * data[i].abs().max(1.0),
            "index {}: {} vs {}",
            i,
            smoothed[i],
            data[i]
        );
    }
}

#[test]
fn test_quadratic_signal_is_preserved_including_edges() {
    let data: Vec<f64> = (0..20).map(|i| {
        let x = i as f64;
        0.5 * x * x - 3.0 * x + 7.0
    }).collect();

    for window in [5, 7, 11, 19] {
        let smoothed = SavitzkyGolay::quadratic(window).unwrap().apply(&data).unwrap();
        assert_close(&smoothed, &data, 1e-8);
    }
}

#[test]
fn test_small_windows_are_identity() {
    let data = vec![3.0, -1.0, 4.0, 1.0, -5.0, 9.0];

    let one = SavitzkyGolay::quadratic(1).unwrap();
    assert_eq!(one.order(), 0);
    assert_close(&one.apply(&data).unwrap(), &data, 1e-12);

    let three = SavitzkyGolay::quadratic(3).unwrap();
    assert_close(&three.apply(&data).unwrap(), &data, 1e-10);
}

#[test]
fn test_noise_is_reduced() {
    let data: Vec<f64> = (0..50)
        .map(|i| 10.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let smoothed = SavitzkyGolay::quadratic(9).unwrap().apply(&data).unwrap();

    let spread = |v: &[f64]| {
        let max = v.iter().cloned().fold(f64::MIN, f64::max);
        let min = v.iter().cloned().fold(f64::MAX, f64::min);
        max - min
    };
    assert!(spread(&smoothed[4..46]) < spread(&data) / 4.0);
}

#[test]
fn test_filter_rejects_even_and_zero_windows() {
    assert_eq!(SavitzkyGolay::quadratic(4), Err(SmoothingError::InvalidWindow(4)));
    assert_eq!(SavitzkyGolay::quadratic(0), Err(SmoothingError::InvalidWindow(0)));
}

#[test]
fn test_filter_rejects_short_input() {
    let filter = SavitzkyGolay::quadratic(5).unwrap();
    assert_eq!(
        filter.apply(&[1.0, 2.0, 3.0]),
        Err(SmoothingError::WindowTooLong { window: 5, len: 3 })
    );
}

#[test]
fn test_zero_window_copies_values() {
    let data = vec![1.0, 5.0, 2.0, 8.0];
    let smoothed = smooth_channel(Channel::Voltage, &data, 0);

    assert_eq!(smoothed.values, data);
    assert_eq!(smoothed.outcome, SmoothingOutcome::Disabled);
    assert!(!smoothed.outcome.is_degraded());
}

#[test]
fn test_even_window_degrades_to_copy() {
    let data = vec![1.0, 5.0, 2.0, 8.0, 3.0, 7.0];
    let smoothed = smooth_channel(Channel::Current, &data, 4);

    assert_eq!(smoothed.values, data);
    assert_eq!(smoothed.outcome, SmoothingOutcome::InvalidWindow { window: 4 });
    assert!(smoothed.outcome.is_degraded());
}

#[test]
fn test_long_window_degrades_to_copy() {
    let data = vec![1.0, 5.0, 2.0];
    let smoothed = smooth_channel(Channel::Brightness, &data, 101);

    assert_eq!(smoothed.values, data);
    assert_eq!(
        smoothed.outcome,
        SmoothingOutcome::WindowTooLong { window: 101, len: 3 }
    );
}

#[test]
fn test_smoothing_is_deterministic() {
    let data: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64).collect();
    let a = smooth_channel(Channel::Brightness, &data, 7);
    let b = smooth_channel(Channel::Brightness, &data, 7);

    assert_eq!(a, b);
    assert!(a.outcome.is_applied());
}

#[test]
fn test_gapped_smoothing_keeps_gaps() {
    let values = vec![None, Some(1.0), Some(4.0), Some(9.0), Some(16.0), Some(25.0)];
    let (smoothed, outcome) = smooth_gapped(Channel::BrightnessDerivative, &values, 5);

    assert_eq!(outcome, SmoothingOutcome::Applied { window: 5 });
    assert_eq!(smoothed.len(), values.len());
    assert!(smoothed[0].is_none());
    // a parabola survives quadratic smoothing
    for (s, v) in smoothed.iter().zip(&values).skip(1) {
        assert!((s.unwrap() - v.unwrap()).abs() < 1e-9);
    }
}

#[test]
fn test_channel_columns() {
    assert_eq!(Channel::Current.column(), "Current(mA)");
    assert_eq!(Channel::Current.smoothed_column(), "Current(mA)_smooth");
    assert_eq!(Channel::BrightnessDerivative.to_string(), "Brightness Derivative");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Window 0 is the identity
        #[test]
        fn prop_zero_window_is_identity(values in prop::collection::vec(-1e6f64..1e6, 0..200)) {
            let smoothed = smooth_channel(Channel::Voltage, &values, 0);
            prop_assert_eq!(smoothed.values, values);
        }

        /// Any window keeps the number of samples
        #[test]
        fn prop_length_preserved(
            values in prop::collection::vec(-1e3f64..1e3, 0..120),
            window in 0usize..60,
        ) {
            let smoothed = smooth_channel(Channel::Brightness, &values, window);
            prop_assert_eq!(smoothed.values.len(), values.len());
        }

        /// Constant input stays constant
        #[test]
        fn prop_constant_preserved(level in -1e3f64..1e3, len in 1usize..80, half in 0usize..10) {
            let window = 2 * half + 1;
            let values = vec![level; len];
            let smoothed = smooth_channel(Channel::Current, &values, window);
            for v in smoothed.values {
                prop_assert!((v - level).abs() < 1e-6);
            }
        }
    }
}
