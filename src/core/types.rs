/*!
 * Core Types
 * Common types used across the simulator
 */

use super::data_structures::InlineString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Simulated time, in whole milliseconds since the start of a run
pub type Tick = u64;

/// Process name (`P0`, `P1`, ...)
pub type ProcessName = InlineString;

/// Fixed-point decimal with exactly two fractional digits
///
/// Stored as hundredths so averages can be produced in exact integer
/// arithmetic and printed without float formatting surprises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Centi(u64);

impl Centi {
    pub const ZERO: Centi = Centi(0);

    /// Create from a raw number of hundredths
    #[inline]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Centi(hundredths)
    }

    /// Divide `numerator` by `denominator`, rounded to two decimals
    ///
    /// Ties round half to even (`0.125` → `0.12`, `0.135` → `0.14`).
    /// A zero denominator yields [`Centi::ZERO`].
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Centi::ZERO;
        }

        let scaled = u128::from(numerator) * 100;
        let denominator = u128::from(denominator);
        let mut quotient = scaled / denominator;
        let twice_remainder = (scaled % denominator) * 2;

        if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1)
        {
            quotient += 1;
        }

        Centi(u64::try_from(quotient).unwrap_or(u64::MAX))
    }

    /// Raw number of hundredths
    #[inline]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Lossy conversion for reporting
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Centi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Centi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Centi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative decimal, got {}",
                value
            )));
        }
        Ok(Centi((value * 100.0).round() as u64))
    }
}
