//! Bounded root finding, 1-D maximisation and quadrature used by the solver fallbacks.

use crate::PerformanceError;

pub(crate) const MAX_ITERATIONS: usize = 200;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Bisection on `[low, high]`, which must bracket a sign change of `f`.
pub(crate) fn bisect<F>(
    mut f: F,
    low: f64,
    high: f64,
    tolerance: f64,
) -> Result<f64, PerformanceError>
where
    F: FnMut(f64) -> Result<f64, PerformanceError>,
{
    let (mut a, mut b) = (low, high);
    let mut fa = f(a)?;
    let fb = f(b)?;
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(PerformanceError::NoEquilibrium(format!(
            "no sign change on [{low:.3}, {high:.3}]"
        )));
    }
    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (a + b);
        if (b - a).abs() <= tolerance {
            return Ok(mid);
        }
        let fm = f(mid)?;
        if fm == 0.0 {
            return Ok(mid);
        }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Err(PerformanceError::Convergence {
        method: "bisection",
        iterations: MAX_ITERATIONS,
    })
}

/// Golden-section search for the maximum of a unimodal `f` on `[low, high]`.
///
/// Returns the abscissa and the value there.
pub(crate) fn golden_section_max<F>(
    mut f: F,
    low: f64,
    high: f64,
    tolerance: f64,
) -> Result<(f64, f64), PerformanceError>
where
    F: FnMut(f64) -> Result<f64, PerformanceError>,
{
    let (mut a, mut b) = (low, high);
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = f(c)?;
    let mut fd = f(d)?;
    for _ in 0..MAX_ITERATIONS {
        if (b - a).abs() <= tolerance {
            let x = 0.5 * (a + b);
            return Ok((x, f(x)?));
        }
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = f(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = f(d)?;
        }
    }
    Err(PerformanceError::Convergence {
        method: "golden-section search",
        iterations: MAX_ITERATIONS,
    })
}

/// Composite Simpson rule with `intervals` (rounded up to even) sub-intervals.
pub(crate) fn simpson<F>(
    mut f: F,
    a: f64,
    b: f64,
    intervals: usize,
) -> Result<f64, PerformanceError>
where
    F: FnMut(f64) -> Result<f64, PerformanceError>,
{
    let n = even(intervals);
    let h = (b - a) / n as f64;
    let mut sum = f(a)? + f(b)?;
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + h * i as f64)?;
    }
    Ok(sum * h / 3.0)
}

/// Running Simpson integral of equally spaced `values`, reported at every even node.
///
/// `values.len()` must be odd; the result has `(len + 1) / 2` entries starting at 0.
pub(crate) fn cumulative_simpson(values: &[f64], step: f64) -> Vec<f64> {
    let mut totals = Vec::with_capacity(values.len() / 2 + 1);
    let mut total = 0.0;
    totals.push(total);
    for pair in values.windows(3).step_by(2) {
        total += step / 3.0 * (pair[0] + 4.0 * pair[1] + pair[2]);
        totals.push(total);
    }
    totals
}

pub(crate) fn even(intervals: usize) -> usize {
    let n = intervals.max(2);
    n + n % 2
}
