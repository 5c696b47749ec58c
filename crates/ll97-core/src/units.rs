//! Unit-safe quantities for emissions accounting.
//!
//! Emissions, floor area and money all travel as `f64` in the payloads, which
//! makes it easy to add an area to a limit or multiply a penalty twice. The
//! newtypes here keep those apart at compile time.
//!
//! All types are `#[repr(transparent)]` and serialize as bare JSON numbers.
//!
//! ```
//! use ll97_core::units::{SquareFeet, Tco2e};
//!
//! let area = SquareFeet(10_000.0);
//! let limit = area.times_intensity(0.01);
//! assert_eq!(limit, Tco2e(100.0));
//!
//! let penalty = Tco2e(0.4).times_rate(268.0);
//! assert!((penalty.value() - 107.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Zero quantity
            pub const ZERO: Self = Self(0.0);

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            /// True when strictly greater than zero
            #[inline]
            pub fn is_positive(self) -> bool {
                self.0 > 0.0
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Greenhouse gas emissions in metric tons of CO2 equivalent per year.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Tco2e(pub f64);

impl_unit_ops!(Tco2e, "tCO2e");

/// Gross floor area in square feet.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareFeet(pub f64);

impl_unit_ops!(SquareFeet, "sq ft");

/// Money in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Dollars(pub f64);

impl_unit_ops!(Dollars, "USD");

impl SquareFeet {
    /// Emissions allowed for this area at `intensity` tCO2e per square foot.
    #[inline]
    pub fn times_intensity(self, intensity: f64) -> Tco2e {
        Tco2e(self.0 * intensity)
    }
}

impl Tco2e {
    /// Monetary charge for this quantity at `rate` dollars per tCO2e.
    #[inline]
    pub fn times_rate(self, rate: f64) -> Dollars {
        Dollars(self.0 * rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emissions_arithmetic() {
        let a = Tco2e(10.0);
        let b = Tco2e(4.0);

        assert_eq!((a + b).value(), 14.0);
        assert_eq!((a - b).value(), 6.0);
        assert_eq!(b.max(a), a);
    }

    #[test]
    fn test_sum() {
        let total: Tco2e = [Tco2e(1.0), Tco2e(2.5), Tco2e(0.5)].iter().sum();
        assert_eq!(total, Tco2e(4.0));

        let areas: SquareFeet = vec![SquareFeet(100.0), SquareFeet(50.0)].into_iter().sum();
        assert_eq!(areas, SquareFeet(150.0));
    }

    #[test]
    fn test_cross_unit_products() {
        assert_eq!(SquareFeet(2_000.0).times_intensity(0.005), Tco2e(10.0));
        assert_eq!(Tco2e(2.0).times_rate(268.0), Dollars(536.0));
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Tco2e(1.5)).unwrap();
        assert_eq!(json, "1.5");
        let back: SquareFeet = serde_json::from_str("250").unwrap();
        assert_eq!(back, SquareFeet(250.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tco2e(0.5).to_string(), "0.50 tCO2e");
        assert_eq!(Dollars(107.2).to_string(), "107.20 USD");
        assert_eq!(SquareFeet(10_000.0).to_string(), "10000.00 sq ft");
    }
}
