// ============================================================================
// RAY Fixed-Point
// Unsigned 27-decimal fixed-point over 256-bit integers
// ============================================================================

use super::errors::{RateError, RateResult};
use primitive_types::U256;
use std::fmt;

/// 10^27, the fixed-point unity.
pub const RAY: U256 = U256([0x9fd0_803c_e800_0000, 0x033b_2e3c, 0, 0]);

/// RAY / 2, added before rescaling for round half-up.
pub(crate) const HALF_RAY: U256 = U256([0x4fe8_401e_7400_0000, 0x019d_971e, 0, 0]);

/// Number of decimal places carried by a [`Ray`].
pub const RAY_DECIMALS: u32 = 27;

/// Per-second compounding multiplier with 27 decimal places.
///
/// Internally stores `value × 10^27` as a U256. `Ray::ONE` means no
/// compounding; every rate read back from a packed table is `>= Ray::ONE`.
///
/// # Example
/// ```
/// use rate_conv::numeric::Ray;
///
/// let one_pct: Ray = "1.000000000315522921573372069".parse().unwrap();
/// assert_eq!(one_pct.delta().unwrap().low_u64(), 315_522_921_573_372_069);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Ray(U256);

impl Ray {
    /// The scale factor (10^27)
    pub const SCALE: U256 = RAY;

    /// Zero value
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One (1.0), i.e. a 0% rate
    pub const ONE: Self = Self(RAY);

    /// Maximum representable value
    pub const MAX: Self = Self(U256::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation (already scaled by 10^27).
    #[inline]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Rebuild a rate from its stored delta above unity.
    #[inline]
    pub fn from_delta(delta: u64) -> Self {
        // RAY + u64::MAX is far below 2^256
        Self(RAY + U256::from(delta))
    }

    /// Parse a raw scaled integer such as `1000000000315522921573372069`.
    ///
    /// # Errors
    /// Returns `InvalidInput` on non-digits and `ArithmeticOverflow` if the
    /// value does not fit in 256 bits.
    pub fn parse_raw(s: &str) -> RateResult<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RateError::InvalidInput);
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| RateError::ArithmeticOverflow)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn raw_value(self) -> U256 {
        self.0
    }

    /// Get the integer part (truncated).
    #[inline]
    pub fn integer_part(self) -> U256 {
        self.0 / RAY
    }

    /// Get the fractional part, scaled by 10^27.
    #[inline]
    pub fn fractional_part(self) -> U256 {
        self.0 % RAY
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// `self - RAY`, the quantity a packed table stores.
    ///
    /// # Errors
    /// Returns `BelowUnity` if the rate is smaller than one.
    #[inline]
    pub fn delta(self) -> RateResult<U256> {
        self.0.checked_sub(RAY).ok_or(RateError::BelowUnity)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> RateResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(RateError::ArithmeticOverflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `BelowUnity` when `rhs > self`.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> RateResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(RateError::BelowUnity)
    }

    /// Fixed-point multiplication with round half-up: `(a * b + RAY/2) / RAY`.
    ///
    /// The raw product must be recoverable, i.e. `(a * b) / b == a` on the
    /// wrapped 256-bit product, and adding the rounding half must not wrap.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if either check fails.
    #[inline]
    pub fn checked_rmul(self, rhs: Self) -> RateResult<Self> {
        let (product, _) = self.0.overflowing_mul(rhs.0);
        if !rhs.0.is_zero() && product / rhs.0 != self.0 {
            return Err(RateError::ArithmeticOverflow);
        }

        let (rounded, wrapped) = product.overflowing_add(HALF_RAY);
        if wrapped {
            return Err(RateError::ArithmeticOverflow);
        }

        Ok(Self(rounded / RAY))
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// Intended for display and logging only.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the raw value exceeds Decimal's 96-bit mantissa.
    pub fn to_decimal(self) -> RateResult<rust_decimal::Decimal> {
        if self.0.bits() > 96 {
            return Err(RateError::PrecisionLoss);
        }
        rust_decimal::Decimal::try_from_i128_with_scale(self.0.low_u128() as i128, RAY_DECIMALS)
            .map_err(|_| RateError::PrecisionLoss)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ray({}, raw={})", self, self.0)
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0>width$}",
            self.integer_part(),
            self.fractional_part().to_string(),
            width = RAY_DECIMALS as usize
        )
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Ray {
    type Err = RateError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "1" -> 1.000000000000000000000000000
    /// - "1.05" -> 1.050000000000000000000000000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RateError::InvalidInput);
        }

        let (int_str, frac_str) = match s.split_once('.') {
            Some((int_str, frac_str)) => (int_str, frac_str),
            None => (s, ""),
        };

        if frac_str.len() > RAY_DECIMALS as usize {
            return Err(RateError::PrecisionLoss);
        }

        let int_val = if int_str.is_empty() {
            U256::zero()
        } else {
            Self::parse_raw(int_str)?.0
        };

        let frac_val = if frac_str.is_empty() {
            U256::zero()
        } else {
            let padded = format!("{:0<width$}", frac_str, width = RAY_DECIMALS as usize);
            Self::parse_raw(&padded)?.0
        };

        int_val
            .checked_mul(RAY)
            .and_then(|scaled| scaled.checked_add(frac_val))
            .map(Self)
            .ok_or(RateError::ArithmeticOverflow)
    }
}

// ============================================================================
// Tests
// ============================================================================
