//! Statistical helper functions for the naiad recharge engine.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator. Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Ordinary least-squares line `y = intercept + slope * x`.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite. Returns
/// `None` if fewer than 2 finite pairs remain or if `x` has no spread
/// (zero denominator).
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        sum_xy += dx * (yi - my);
        sum_xx += dx * dx;
    }

    if sum_xx < 1e-12 {
        return None;
    }

    let slope = sum_xy / sum_xx;
    let intercept = my - slope * mx;
    Some((intercept, slope))
}

/// Coefficient of determination between observed and predicted values.
///
/// Computed as `1 - SS_res / SS_tot`. Filters to indices where both values
/// are finite. Returns `None` if fewer than 2 finite pairs remain. A constant
/// observed series scores 1.0 when predictions match it and 0.0 otherwise.
/// Can be negative when predictions are worse than the observed mean.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = observed
        .iter()
        .zip(predicted.iter())
        .filter(|(o, p)| o.is_finite() && p.is_finite())
        .map(|(o, p)| (*o, *p))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_obs: f64 = pairs.iter().map(|(o, _)| o).sum::<f64>() / n;

    let ss_res: f64 = pairs.iter().map(|&(o, p)| (o - p) * (o - p)).sum();
    let ss_tot: f64 = pairs
        .iter()
        .map(|&(o, _)| (o - mean_obs) * (o - mean_obs))
        .sum();

    if ss_tot < 1e-12 {
        return Some(if ss_res < 1e-12 { 1.0 } else { 0.0 });
    }

    Some(1.0 - ss_res / ss_tot)
}

/// Coefficient of variation: `sd / |mean|`.
///
/// Returns `None` if fewer than 2 elements or if the mean is within 1e-12
/// of zero.
pub fn coefficient_of_variation(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data);
    if m.abs() < 1e-12 {
        return None;
    }
    Some(sd(data) / m.abs())
}
