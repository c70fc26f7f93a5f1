//! Small dense normal-equations solver for polynomial fits.
//!
//! Degrees are capped at 4, so the largest system is 5x5; a hand-rolled
//! Gaussian elimination keeps the array stack out of the dependency tree.

/// Least-squares polynomial coefficients (ascending order) of the given
/// degree, or `None` if there are too few points or the normal equations are
/// singular.
pub(crate) fn fit_polynomial(points: &[(f64, f64)], degree: usize) -> Option<Vec<f64>> {
    let m = degree + 1;
    if points.len() < m {
        return None;
    }

    // Normal equations: A[i][j] = sum t^(i+j), b[i] = sum t^i * y.
    let mut a = vec![vec![0.0f64; m]; m];
    let mut b = vec![0.0f64; m];
    let mut powers = vec![0.0f64; 2 * m - 1];
    for &(t, y) in points {
        powers[0] = 1.0;
        for k in 1..2 * m - 1 {
            powers[k] = powers[k - 1] * t;
        }
        for i in 0..m {
            for j in 0..m {
                a[i][j] += powers[i + j];
            }
            b[i] += powers[i] * y;
        }
    }

    solve(&mut a, &mut b)
}

/// Gaussian elimination with partial pivoting. Returns `None` on a
/// (numerically) singular system.
fn solve(a: &mut [Vec<f64>], b: &mut [f64]) -> Option<Vec<f64>> {
    let m = b.len();
    for col in 0..m {
        // Pivot: largest absolute value in this column at or below the
        // diagonal.
        let mut pivot = col;
        for row in col + 1..m {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..m {
            let factor = a[row][col] / a[col][col];
            for k in col..m {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = vec![0.0f64; m];
    for col in (0..m).rev() {
        let mut sum = b[col];
        for k in col + 1..m {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_quadratic() {
        // y = 2 - 0.5t + 0.25t^2
        let points: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let t = i as f64;
                (t, 2.0 - 0.5 * t + 0.25 * t * t)
            })
            .collect();
        let coeffs = fit_polynomial(&points, 2).unwrap();
        assert_relative_eq!(coeffs[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(coeffs[1], -0.5, epsilon = 1e-9);
        assert_relative_eq!(coeffs[2], 0.25, epsilon = 1e-9);
    }

    #[test]
    fn recovers_exact_cubic() {
        // y = 1 + t - 0.1t^2 + 0.01t^3
        let points: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let t = i as f64;
                (t, 1.0 + t - 0.1 * t * t + 0.01 * t * t * t)
            })
            .collect();
        let coeffs = fit_polynomial(&points, 3).unwrap();
        assert_relative_eq!(coeffs[0], 1.0, epsilon = 1e-7);
        assert_relative_eq!(coeffs[1], 1.0, epsilon = 1e-7);
        assert_relative_eq!(coeffs[2], -0.1, epsilon = 1e-7);
        assert_relative_eq!(coeffs[3], 0.01, epsilon = 1e-8);
    }

    #[test]
    fn too_few_points_is_none() {
        let points = [(0.0, 1.0), (1.0, 2.0)];
        assert!(fit_polynomial(&points, 2).is_none());
    }

    #[test]
    fn constant_t_is_singular() {
        let points = [(2.0, 1.0), (2.0, 2.0), (2.0, 3.0), (2.0, 4.0)];
        assert!(fit_polynomial(&points, 2).is_none());
    }
}
