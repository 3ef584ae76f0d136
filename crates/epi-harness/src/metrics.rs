//! Summary statistics over Monte Carlo trials.
//!
//! Degenerate inputs produce `NaN` rather than panicking, so a report whose
//! every trial was filtered out still prints.

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Share of `true` entries; `NaN` for an empty slice.
pub fn proportion(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return f64::NAN;
    }
    flags.iter().filter(|&&f| f).count() as f64 / flags.len() as f64
}

/// `1 - treated / baseline`: the fraction of `baseline` removed by the
/// intervention.  `NaN` exactly when `baseline == 0`.
pub fn relative_reduction(treated: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return f64::NAN;
    }
    1.0 - treated / baseline
}
