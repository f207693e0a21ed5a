use crate::CoreError;

/// Floating point type used throughout the engine.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Reject zero, negative and NaN values.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NonPositive { what, value: v })
    }
}

/// `count` evenly spaced values from `lower` to `upper`, endpoints exact.
pub fn linspace(lower: Real, upper: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let last = count - 1;
            let step = (upper - lower) / last as Real;
            (0..count)
                .map(|i| if i == last { upper } else { lower + step * i as Real })
                .collect()
        }
    }
}
