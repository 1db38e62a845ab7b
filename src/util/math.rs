//! Numeric helpers shared by the decoding stages.

/// Returns the index and value of the largest element.
///
/// Ties resolve to the first occurrence. Returns `None` for an empty slice.
/// A leading `NaN` is never displaced, so the caller's threshold comparison
/// rejects it.
pub(crate) fn argmax_first(values: &[f32]) -> Option<(usize, f32)> {
    let (first, rest) = values.split_first()?;
    let mut best_idx = 0usize;
    let mut best = *first;
    for (offset, &value) in rest.iter().enumerate() {
        if value > best {
            best = value;
            best_idx = offset + 1;
        }
    }
    Some((best_idx, best))
}

/// Returns true when `value` is finite and inside `[0, 1]`.
pub(crate) fn is_unit_interval(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
