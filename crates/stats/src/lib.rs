//! Statistical helper functions for the flowcast forecast engine.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Returns a copy of `data` sorted ascending under a total order.
///
/// NaN values compare equal to everything and end up in unspecified
/// positions; callers are expected to have filtered them already.
pub fn sorted_ascending(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    sort_ascending(&mut out);
    out
}

/// Sorts a slice ascending in place under a total order.
pub fn sort_ascending(data: &mut [f64]) {
    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}
