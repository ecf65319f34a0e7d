use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Float64
///
/// Total-ordered wrapper around `f64` so floating-point values can carry
/// `Eq`/`Ord` value semantics. Ordering and equality follow
/// `f64::total_cmp`, which keeps NaN handling deterministic.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the wrapped primitive.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Float64> for f64 {
    fn from(value: Float64) -> Self {
        value.get()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order_handles_nan_and_zero() {
        assert_eq!(Float64::new(0.0), Float64::new(0.0));
        assert!(Float64::new(-0.0) < Float64::new(0.0));
        assert_eq!(Float64::new(f64::NAN), Float64::new(f64::NAN));
        assert!(Float64::new(1.5) < Float64::new(2.0));
    }
}
