//! Comparisons against an optional upper bound
//!
//! A range without an upper bound stores `None` as its max. These helpers give
//! that absent side the meaning "greater than every version" so range code
//! never needs a sentinel value.

use std::cmp::Ordering;

/// Compare `value` to an optional upper bound, `None` being unbounded.
pub fn cmp_bound<V: Ord>(value: &V, bound: Option<&V>) -> Ordering {
    match bound {
        Some(bound) => value.cmp(bound),
        None => Ordering::Less,
    }
}

pub fn lt_bound<V: Ord>(value: &V, bound: Option<&V>) -> bool {
    cmp_bound(value, bound) == Ordering::Less
}

pub fn le_bound<V: Ord>(value: &V, bound: Option<&V>) -> bool {
    cmp_bound(value, bound) != Ordering::Greater
}

/// Lesser of two optional upper bounds.
///
/// Unbounded only when both sides are.
pub fn min_bound<'a, V: Ord>(a: Option<&'a V>, b: Option<&'a V>) -> Option<&'a V> {
    match (a, b) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) => Some(a.min(b)),
    }
}
