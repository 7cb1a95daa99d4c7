//! Temperature readings and sensor targets

use std::fmt;

/// Logical sensor a reading is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorTarget {
    Cpu,
    Battery,
}

impl SensorTarget {
    pub const ALL: [SensorTarget; 2] = [SensorTarget::Cpu, SensorTarget::Battery];
}

impl fmt::Display for SensorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorTarget::Cpu => write!(f, "cpu"),
            SensorTarget::Battery => write!(f, "battery"),
        }
    }
}

/// A temperature in degrees Celsius, or the NaN sentinel when unavailable.
///
/// Constructed only through [`Reading::from_celsius`] or
/// [`Reading::UNAVAILABLE`], so a held value is always either strictly
/// positive and finite, or the sentinel.
#[derive(Debug, Clone, Copy)]
pub struct Reading(f32);

impl Reading {
    pub const UNAVAILABLE: Reading = Reading(f32::NAN);

    /// Wrap a raw Celsius value; non-positive and non-finite values become
    /// the sentinel.
    pub fn from_celsius(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            Reading(value)
        } else {
            Reading::UNAVAILABLE
        }
    }

    pub fn is_available(&self) -> bool {
        !self.0.is_nan()
    }

    pub fn celsius(&self) -> Option<f32> {
        self.is_available().then_some(self.0)
    }

    /// Raw value, NaN when unavailable
    pub fn raw(&self) -> f32 {
        self.0
    }
}

impl Default for Reading {
    fn default() -> Self {
        Reading::UNAVAILABLE
    }
}

impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        match (self.celsius(), other.celsius()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_become_sentinel() {
        assert!(!Reading::from_celsius(0.0).is_available());
        assert!(!Reading::from_celsius(-4.5).is_available());
        assert!(!Reading::from_celsius(f32::INFINITY).is_available());
        assert!(!Reading::from_celsius(f32::NAN).is_available());
    }

    #[test]
    fn positive_values_are_kept() {
        let reading = Reading::from_celsius(36.5);
        assert_eq!(reading.celsius(), Some(36.5));
        assert_eq!(reading.raw(), 36.5);
    }

    #[test]
    fn sentinels_compare_equal() {
        assert_eq!(Reading::UNAVAILABLE, Reading::default());
        assert_ne!(Reading::UNAVAILABLE, Reading::from_celsius(1.0));
        assert!(Reading::UNAVAILABLE.raw().is_nan());
    }
}
