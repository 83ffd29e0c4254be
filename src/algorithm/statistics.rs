//! Descriptive statistics over plain `f64` slices

/// Quantile `q` (in `[0, 1]`) with linear interpolation between closest ranks
///
/// Uses position `q * (n - 1)` in the sorted values. NaN entries are skipped;
/// returns `None` when no other value is left.
#[must_use]
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.iter().copied().filter(|v| !v.is_nan()).collect::<Vec<_>>();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    // exact rank: interpolating would turn inf - inf into NaN
    if lower == upper || fraction == 0.0 {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Pearson correlation coefficient of two equally long samples
///
/// NaN when fewer than two observations are given or either sample has zero
/// variance.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
