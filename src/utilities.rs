// Utility functions for tabulated data

/// Find the interval `i` with `x[i] <= x_new < x[i + 1]` by bisection.
/// `x` must be sorted and hold at least two points, with `x[0] < x_new < x[n-1]`.
fn bracket(x: &[f64], x_new: f64) -> usize {
    let mut low = 0usize;
    let mut high = x.len() - 1;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if x[mid] <= x_new {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

/// Linear interpolation on a linear scale.
///
/// Outside the tabulated range the first or last value is returned.
pub fn interpolate_linear(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    if x.len() == 1 || x_new <= x[0] {
        return y[0];
    }
    if x_new >= x[x.len() - 1] {
        return y[y.len() - 1];
    }
    let idx = bracket(x, x_new);
    let (x1, x2) = (x[idx], x[idx + 1]);
    let (y1, y2) = (y[idx], y[idx + 1]);
    y1 + (x_new - x1) * (y2 - y1) / (x2 - x1)
}

/// Like [`interpolate_linear`] but zero outside the tabulated range.
///
/// Used for cross-sections, which vanish below their threshold.
pub fn interpolate_linear_or_zero(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x.is_empty() || x_new < x[0] || x_new > x[x.len() - 1] {
        return 0.0;
    }
    interpolate_linear(x, y, x_new)
}

/// Index of the first entry of a non-decreasing cumulative distribution that
/// is not smaller than `r`.
///
/// Values at or below the first entry give 0 and values at or above the last
/// entry give the last index, so round-off at either end never produces an
/// out-of-range level.
pub fn sample_cumulative(cumulative: &[f64], r: f64) -> usize {
    let n = cumulative.len();
    if n == 0 || r <= cumulative[0] {
        return 0;
    }
    if r >= cumulative[n - 1] {
        return n - 1;
    }
    cumulative.partition_point(|&c| c < r)
}
