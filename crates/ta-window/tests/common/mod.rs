//! Shared test utilities for ta-window integration tests.

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Element-wise [`approx_eq`] over two slices of equal length.
#[allow(dead_code)]
pub fn slices_approx_eq(a: &[f64], b: &[f64], eps: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y, eps))
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Deterministic price-like series.
#[allow(dead_code)]
pub fn wave(len: usize) -> Vec<f64> {
    let mut price = 100.0;
    (0..len)
        .map(|i| {
            price += (i as f64 * 0.1).sin() * 2.0 + (i as f64 * 0.03).cos() * 1.5;
            price.max(10.0)
        })
        .collect()
}

/// Deterministic high/low/close bars around [`wave`].
#[allow(dead_code)]
pub fn bars(len: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = wave(len);
    let high = close
        .iter()
        .enumerate()
        .map(|(i, c)| c + 1.0 + (i as f64 * 0.07).sin().abs())
        .collect();
    let low = close
        .iter()
        .enumerate()
        .map(|(i, c)| c - 1.0 - (i as f64 * 0.05).cos().abs())
        .collect();
    (high, low, close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(1.0, f64::NAN, EPSILON));
        assert!(approx_eq(1.0, 1.0 + 1e-12, EPSILON));
    }
}
