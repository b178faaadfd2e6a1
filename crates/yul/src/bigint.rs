use evmc_primitives::U256;
use std::fmt;

/// An arbitrary-precision integer literal, as it appears in Yul source:
/// a sign and a 256-bit magnitude.
///
/// Yul itself has no negative literals; the printer rewrites a negative
/// [`BigInt`] as `sub(0, |n|)` rather than emitting a `-` sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigInt {
    negative: bool,
    magnitude: U256,
}

impl BigInt {
    /// A literal zero.
    pub const ZERO: Self = Self { negative: false, magnitude: U256::ZERO };

    /// Builds a literal from its sign and magnitude. `negative` is ignored
    /// when `magnitude` is zero, since there is no negative zero.
    pub fn new(magnitude: U256, negative: bool) -> Self {
        Self { negative: negative && !magnitude.is_zero(), magnitude }
    }

    /// True if this literal is negative.
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// The literal's unsigned magnitude.
    pub const fn magnitude(&self) -> U256 {
        self.magnitude
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self { negative: false, magnitude: U256::from(value) }
    }
}

impl From<i128> for BigInt {
    fn from(value: i128) -> Self {
        if value < 0 {
            Self::new(U256::from(value.unsigned_abs()), true)
        } else {
            Self::new(U256::from(value as u128), false)
        }
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_normalizes_to_positive() {
        let z = BigInt::new(U256::ZERO, true);
        assert!(!z.is_negative());
    }

    #[test]
    fn from_i128_round_trips_sign() {
        assert!(BigInt::from(-5i128).is_negative());
        assert!(!BigInt::from(5i128).is_negative());
    }
}
