//! Fiddle-value arithmetic.
//!
//! An external optimizer drives every tunable parameter on `[0, 1]`. The
//! generated `fix_fiddle_value` arms call these functions with the literal
//! bounds taken from the catalog to map a normalized value back into the
//! parameter's natural units.
//!
//! Normalized inputs are clamped to `[0, 1]` and NaN maps to `0`. Both range
//! mappings hit their bounds exactly at `0` and `1` and never overshoot `end`.

/// Clamp a normalized value into `[0, 1]`.
pub fn clamp_unit(normalized: f64) -> f64 {
    if normalized.is_nan() {
        0.0
    } else {
        normalized.clamp(0.0, 1.0)
    }
}

/// `start + (end - start) * normalized`.
pub fn real_range(start: f64, end: f64, normalized: f64) -> f64 {
    let t = clamp_unit(normalized);
    if t >= 1.0 {
        return end;
    }
    let value = start + (end - start) * t;
    if end >= start {
        value.min(end)
    } else {
        value.max(end)
    }
}

/// Integer range: the real mapping truncated toward zero.
pub fn integer_range(start: i32, end: i32, normalized: f64) -> f64 {
    real_range(f64::from(start), f64::from(end), normalized).trunc()
}

/// Enumerated list: `floor(normalized * len)` clamped to the last index.
///
/// Returns `0.0` for an empty list; the generator never emits one.
pub fn integer_list(values: &[i32], normalized: f64) -> f64 {
    let Some(last) = values.len().checked_sub(1) else {
        return 0.0;
    };
    let index = (clamp_unit(normalized) * values.len() as f64).floor() as usize;
    f64::from(values[index.min(last)])
}

/// First element of a full-series result, or `0.0` when it is missing or not
/// finite. Later elements are never consulted.
pub fn first_or_zero(values: &[f64]) -> f64 {
    match values.first() {
        Some(v) if v.is_finite() => *v,
        _ => 0.0,
    }
}
