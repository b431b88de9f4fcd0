// ============================================================================
// Rate Converter
// Public bps <-> per-second rate conversions
// ============================================================================

use crate::interfaces::RateSource;
use crate::numeric::{rpow, Bps, RateError, RateResult, Ray, HALF_RAY, RAY};
use crate::table::{PackedBlob, PackedRateStore};
use primitive_types::U256;
use std::sync::Arc;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Basis points in 100%.
pub const BPS_SCALE: u64 = 10_000;

/// Yearly bps implied by a per-second rate, rounded half-up.
///
/// The result is 256 bits wide and not bounded by any table's MAX.
///
/// # Errors
/// - `ArithmeticOverflow` if the exponentiation or the scaling overflows
/// - `BelowUnity` if the yearly rate is below one
pub fn rate_to_bps(rate: Ray) -> RateResult<U256> {
    yearly_to_bps(rpow(rate, SECONDS_PER_YEAR)?)
}

/// `((yearly - RAY) * BPS_SCALE + RAY/2) / RAY`.
pub fn yearly_to_bps(yearly: Ray) -> RateResult<U256> {
    let delta = yearly.delta()?;

    let scaled = delta
        .checked_mul(U256::from(BPS_SCALE))
        .and_then(|scaled| scaled.checked_add(HALF_RAY))
        .ok_or(RateError::ArithmeticOverflow)?;
    Ok(scaled / RAY)
}

/// Bidirectional converter: table-backed bps -> rate, computed rate -> bps.
///
/// `Send + Sync`; the underlying source is immutable and shared by `Arc`.
///
/// # Example
/// ```
/// use rate_conv::prelude::*;
///
/// let blob = TablePacker::new()
///     .pack([(0, Ray::ONE), (1, Ray::from_delta(3_170_820_659_990_705))])
///     .unwrap();
/// let conv = RateConverter::from_blob(blob);
///
/// let rate = conv.turn(1).unwrap();
/// assert_eq!(conv.rtob(rate).unwrap().low_u64(), 1);
/// assert!(conv.turn(2).is_err());
/// ```
#[derive(Clone)]
pub struct RateConverter {
    source: Arc<dyn RateSource>,
}

impl RateConverter {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self { source }
    }

    /// Converter over a packed table.
    pub fn from_blob(blob: PackedBlob) -> Self {
        Self::new(Arc::new(PackedRateStore::new(blob)))
    }

    /// Largest bps accepted by [`RateConverter::bps_to_rate`].
    #[inline]
    pub fn max(&self) -> Bps {
        self.source.max_bps()
    }

    #[inline]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Per-second rate for a yearly bps.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `bps > MAX`.
    #[inline]
    pub fn bps_to_rate(&self, bps: Bps) -> RateResult<Ray> {
        self.source.rate_for(bps)
    }

    /// Yearly bps for a per-second rate, see [`rate_to_bps`].
    #[inline]
    pub fn rate_to_bps(&self, rate: Ray) -> RateResult<U256> {
        rate_to_bps(rate)
    }

    /// Alias of [`RateConverter::bps_to_rate`] under the generated contract's name.
    #[inline]
    pub fn turn(&self, bps: Bps) -> RateResult<Ray> {
        self.bps_to_rate(bps)
    }

    /// Alias of [`RateConverter::rate_to_bps`] under the generated contract's name.
    #[inline]
    pub fn rtob(&self, rate: Ray) -> RateResult<U256> {
        self.rate_to_bps(rate)
    }
}

impl std::fmt::Debug for RateConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateConverter")
            .field("source", &self.source.name())
            .field("max", &self.max())
            .finish()
    }
}
