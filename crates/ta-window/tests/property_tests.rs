//! Property-based tests using proptest.
//!
//! These verify properties that must hold for all valid inputs: lookback
//! monotonicity, output range arithmetic, in-place equivalence and agreement
//! of the rolling kernels with direct window computations.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

mod common;

use proptest::prelude::*;

use common::approx_eq;
use ta_window::indicators::*;
use ta_window::IndexRange;

// ==================== Test Data Generators ====================

/// Generate a random price series (all positive values)
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Generate a series together with a valid closed range inside it
fn arb_series_and_range() -> impl Strategy<Value = (Vec<f64>, usize, usize)> {
    arb_price_series(1, 120).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 0..len)
            .prop_flat_map(move |(data, start)| (Just(data), Just(start), start..len))
    })
}

const MA_TYPES: [MaType; 8] = [
    MaType::Sma,
    MaType::Ema,
    MaType::Wma,
    MaType::Dema,
    MaType::Tema,
    MaType::Trima,
    MaType::Kama,
    MaType::T3,
];

fn naive_window<F: Fn(&[f64]) -> f64>(data: &[f64], period: usize, idx: usize, f: F) -> f64 {
    f(&data[idx + 1 - period..=idx])
}

// ==================== Lookback Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Lookback never decreases as the period grows
    #[test]
    fn prop_lookback_monotonic(period in 2usize..200) {
        let next = period + 1;
        prop_assert!(sma_lookback(period) <= sma_lookback(next));
        prop_assert!(wma_lookback(period) <= wma_lookback(next));
        prop_assert!(trima_lookback(period) <= trima_lookback(next));
        prop_assert!(ema_lookback(period) <= ema_lookback(next));
        prop_assert!(dema_lookback(period) <= dema_lookback(next));
        prop_assert!(tema_lookback(period) <= tema_lookback(next));
        prop_assert!(t3_lookback(period, 0.7) <= t3_lookback(next, 0.7));
        prop_assert!(kama_lookback(period) <= kama_lookback(next));
        prop_assert!(rsi_lookback(period) <= rsi_lookback(next));
        prop_assert!(max_lookback(period) <= max_lookback(next));
        prop_assert!(linearreg_lookback(period) <= linearreg_lookback(next));
        prop_assert!(correl_lookback(period) <= correl_lookback(next));
        prop_assert!(var_lookback(period) <= var_lookback(next));
    }

    /// Composite lookbacks are built from their parts
    #[test]
    fn prop_composite_lookbacks(period in 2usize..200) {
        let ema = ema_lookback(period).unwrap();
        prop_assert_eq!(dema_lookback(period), Some(2 * ema));
        prop_assert_eq!(tema_lookback(period), Some(3 * ema));
        prop_assert_eq!(t3_lookback(period, 0.0), Some(6 * (period - 1)));
        let bands = BollingerBands::new().period(period).ma_type(MaType::Wma);
        prop_assert_eq!(bbands_lookback(&bands), wma_lookback(period));
    }
}

// ==================== Range Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// A non-empty output starts at max(start, lookback) and ends at the requested end
    #[test]
    fn prop_output_range_consistent((data, start, end) in arb_series_and_range(), period in 2usize..=12) {
        let lookback = wma_lookback(period).unwrap();
        let mut out = vec![f64::NAN; data.len()];
        let range = wma_into(start..=end, &data, period, &mut out).unwrap();

        if start.max(lookback) > end {
            prop_assert!(range.is_empty());
            prop_assert!(out.iter().all(|v| v.is_nan()));
        } else {
            prop_assert_eq!(range.begin(), start.max(lookback));
            prop_assert_eq!(range.end(), Some(end));
            prop_assert!(out[..range.len()].iter().all(|v| v.is_finite()));
            prop_assert!(out[range.len()..].iter().all(|v| v.is_nan()));
        }
    }

    /// Any range past the data is rejected with nothing written
    #[test]
    fn prop_out_of_range_rejected(data in arb_price_series(1, 50), extra in 0usize..10) {
        let mut out = vec![0.0; data.len()];
        let end = data.len() + extra;
        let result = sma_into(0..=end, &data, 2, &mut out);
        prop_assert!(result.is_err());
        prop_assert!(out.iter().all(|&v| v == 0.0));
    }
}

// ==================== In-place Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// In-place results are bit-identical to split-buffer results
    #[test]
    fn prop_in_place_bit_identical(
        (data, start, end) in arb_series_and_range(),
        period in 2usize..=10,
        pick in 0usize..19,
    ) {
        let range = IndexRange::new(start, end);
        let mut split = vec![0.0; data.len()];
        let mut buffer = data.clone();
        let ma_type = MA_TYPES[period % MA_TYPES.len()];

        let (expected, actual) = match pick {
            0 => (sma_into(range, &data, period, &mut split), sma_in_place(range, &mut buffer, period)),
            1 => (wma_into(range, &data, period, &mut split), wma_in_place(range, &mut buffer, period)),
            2 => (trima_into(range, &data, period, &mut split), trima_in_place(range, &mut buffer, period)),
            3 => (ema_into(range, &data, period, &mut split), ema_in_place(range, &mut buffer, period)),
            4 => (tema_into(range, &data, period, &mut split), tema_in_place(range, &mut buffer, period)),
            5 => (kama_into(range, &data, period, &mut split), kama_in_place(range, &mut buffer, period)),
            6 => (rsi_into(range, &data, period, &mut split), rsi_in_place(range, &mut buffer, period)),
            7 => (max_into(range, &data, period, &mut split), max_in_place(range, &mut buffer, period)),
            8 => (min_into(range, &data, period, &mut split), min_in_place(range, &mut buffer, period)),
            9 => (midpoint_into(range, &data, period, &mut split), midpoint_in_place(range, &mut buffer, period)),
            10 => (tsf_into(range, &data, period, &mut split), tsf_in_place(range, &mut buffer, period)),
            11 => (
                stddev_into(range, &data, period, 2.0, &mut split),
                stddev_in_place(range, &mut buffer, period, 2.0),
            ),
            12 => (dema_into(range, &data, period, &mut split), dema_in_place(range, &mut buffer, period)),
            13 => (
                t3_into(range, &data, period, 0.7, &mut split),
                t3_in_place(range, &mut buffer, period, 0.7),
            ),
            14 => (var_into(range, &data, period, &mut split), var_in_place(range, &mut buffer, period)),
            15 => (
                linearreg_into(range, &data, period, &mut split),
                linearreg_in_place(range, &mut buffer, period),
            ),
            16 => (sum_into(range, &data, period, &mut split), sum_in_place(range, &mut buffer, period)),
            17 => (
                transform_into(range, &data, MathTransform::Sqrt, &mut split),
                transform_in_place(range, &mut buffer, MathTransform::Sqrt),
            ),
            _ => (
                ma_into(range, &data, period, ma_type, &mut split),
                ma_in_place(range, &mut buffer, period, ma_type),
            ),
        };

        let expected = expected.unwrap();
        prop_assert_eq!(actual.unwrap(), expected);
        for (a, b) in buffer[..expected.len()].iter().zip(&split[..expected.len()]) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

// ==================== Rolling vs Naive Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rolling sums agree with direct window sums
    #[test]
    fn prop_sma_wma_match_naive(data in arb_price_series(2, 120), period in 2usize..=15) {
        prop_assume!(data.len() >= period);
        let mut sma = vec![0.0; data.len()];
        let mut wma = vec![0.0; data.len()];
        let range = sma_into(.., &data, period, &mut sma).unwrap();
        wma_into(.., &data, period, &mut wma).unwrap();

        let divisor = (period * (period + 1) / 2) as f64;
        for (offset, idx) in range.indices().enumerate() {
            let mean = naive_window(&data, period, idx, |w| w.iter().sum::<f64>() / w.len() as f64);
            let weighted = naive_window(&data, period, idx, |w| {
                w.iter().enumerate().map(|(i, v)| (i + 1) as f64 * v).sum::<f64>() / divisor
            });
            prop_assert!(approx_eq(sma[offset], mean, 1e-7));
            prop_assert!(approx_eq(wma[offset], weighted, 1e-7));
        }
    }

    /// Rolling extrema agree with direct scans, ties resolved to the latest index
    #[test]
    fn prop_extrema_match_naive(
        data in prop::collection::vec(0u8..6, 2..80),
        period in 2usize..=10,
    ) {
        let data: Vec<f64> = data.into_iter().map(f64::from).collect();
        prop_assume!(data.len() >= period);
        let mut min_idx = vec![0usize; data.len()];
        let mut max_idx = vec![0usize; data.len()];
        let range = min_max_index_into(.., &data, period, &mut min_idx, &mut max_idx).unwrap();

        for (offset, idx) in range.indices().enumerate() {
            let window = idx + 1 - period..=idx;
            let lo = window.clone().rev().min_by(|a, b| data[*a].total_cmp(&data[*b])).unwrap();
            // max_by keeps the last of equal maxima, min_by the first of equal minima
            let hi = window.max_by(|a, b| data[*a].total_cmp(&data[*b])).unwrap();
            prop_assert_eq!(data[min_idx[offset]], data[lo]);
            prop_assert_eq!(min_idx[offset], lo);
            prop_assert_eq!(max_idx[offset], hi);
        }
    }

    /// Variance from running sums agrees with the two-pass formula
    #[test]
    fn prop_var_matches_two_pass(data in arb_price_series(2, 100), period in 1usize..=12) {
        prop_assume!(data.len() >= period);
        let mut out = vec![0.0; data.len()];
        let range = var_into(.., &data, period, &mut out).unwrap();
        for (offset, idx) in range.indices().enumerate() {
            let expected = naive_window(&data, period, idx, |w| {
                let n = w.len() as f64;
                let mean = w.iter().sum::<f64>() / n;
                w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
            });
            prop_assert!((out[offset] - expected).abs() < 1e-6 * expected.max(1.0));
        }
    }

    /// RSI stays within [0, 100] and never produces NaN
    #[test]
    fn prop_rsi_bounded(data in arb_price_series(3, 100), period in 2usize..=14) {
        let mut out = vec![0.0; data.len()];
        let range = rsi_into(.., &data, period, &mut out).unwrap();
        for v in &out[..range.len()] {
            prop_assert!((0.0..=100.0).contains(v), "RSI {} out of bounds", v);
        }
    }

    /// Williams %R stays within [-100, 0]
    #[test]
    fn prop_willr_bounded(
        bars in prop::collection::vec((1.0..1000.0_f64, 0.0..0.1_f64, 0.0..0.1_f64, 0.0..1.0_f64), 2..80),
        period in 2usize..=14,
    ) {
        let high: Vec<f64> = bars.iter().map(|(b, h, _, _)| b * (1.0 + h)).collect();
        let low: Vec<f64> = bars.iter().map(|(b, _, l, _)| b * (1.0 - l)).collect();
        let close: Vec<f64> = bars
            .iter()
            .zip(high.iter().zip(&low))
            .map(|((_, _, _, t), (h, l))| l + t * (h - l))
            .collect();
        let mut out = vec![0.0; high.len()];
        let range = willr_into(.., &high, &low, &close, period, &mut out).unwrap();
        for v in &out[..range.len()] {
            prop_assert!((-100.0..=0.0).contains(v), "WILLR {} out of bounds", v);
        }
    }

    /// Bollinger bands are ordered upper >= middle >= lower
    #[test]
    fn prop_bollinger_band_order(data in arb_price_series(25, 100), period in 2usize..=20) {
        let bands = BollingerBands::new().period(period);
        let len = data.len();
        let (mut upper, mut middle, mut lower) = (vec![0.0; len], vec![0.0; len], vec![0.0; len]);
        let range = bbands_into(.., &data, &bands, &mut upper, &mut middle, &mut lower).unwrap();
        for i in 0..range.len() {
            prop_assert!(upper[i] >= middle[i]);
            prop_assert!(middle[i] >= lower[i]);
        }
    }
}
