//! Statistical helper functions for the bayspar calibration engine.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
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

/// How a quantile falls between two order statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Take the order statistic whose rank is closest to `p * (n - 1)`,
    /// rounding exact halves to the even rank (numpy's `"nearest"`).
    #[default]
    Nearest,
    /// Linear interpolation between neighbouring order statistics
    /// (R type 7, numpy's `"linear"`).
    Linear,
}

/// Linear-interpolation quantile (R's default type 7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Nearest-rank quantile with half-to-even tie breaking.
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_nearest(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_nearest: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let idx = (h.round_ties_even() as usize).min(n - 1);
    sorted[idx]
}

/// Quantile `p` (in `[0, 1]`) of pre-sorted data using `method`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile(sorted: &[f64], p: f64, method: Interpolation) -> f64 {
    match method {
        Interpolation::Nearest => quantile_nearest(sorted, p),
        Interpolation::Linear => quantile_type7(sorted, p),
    }
}

/// Returns a sorted copy of `data`. NaNs compare equal and keep their place.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}
