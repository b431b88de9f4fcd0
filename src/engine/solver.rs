// ============================================================================
// Rate Solver
// Per-second rate for a yearly bps by bisection over rpow
// ============================================================================

use super::converter::{BPS_SCALE, SECONDS_PER_YEAR};
use crate::domain::RateMapping;
use crate::interfaces::RateSource;
use crate::numeric::{rpow, Bps, RateError, RateResult, Ray, RAY};
use primitive_types::U256;
use tracing::debug;

/// Computes per-second rates live instead of reading a table.
///
/// For a bps the solved rate `r` is the value in `[RAY, RAY + 2^64)` whose
/// `rpow(r, SECONDS_PER_YEAR)` lands closest to `1 + bps / 10_000`, so a
/// solved table stays packable and round-trips through `rate_to_bps`.
#[derive(Debug, Clone, Copy)]
pub struct RateSolver {
    max_bps: Bps,
}

impl RateSolver {
    pub fn new(max_bps: Bps) -> Self {
        Self { max_bps }
    }

    /// Per-second rate for `bps`.
    ///
    /// # Errors
    /// Returns `EncodingOverflow` if the rate would need a delta of 2^64 or
    /// more (roughly 7,891 bps and above).
    pub fn per_second_rate(bps: Bps) -> RateResult<Ray> {
        let target = U256::from(bps)
            .checked_mul(RAY)
            .map(|scaled| RAY + scaled / BPS_SCALE)
            .ok_or(RateError::ArithmeticOverflow)?;
        let yearly = |rate: U256| rpow(Ray::from_raw(rate), SECONDS_PER_YEAR).map(Ray::raw_value);

        let mut lo = RAY;
        let mut hi = RAY + U256::from(u64::MAX);
        if yearly(hi)? < target {
            return Err(RateError::EncodingOverflow { bps });
        }

        // smallest rate whose yearly power reaches the target
        let mut steps = 0u32;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if yearly(mid)? < target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
            steps += 1;
        }

        if lo > RAY {
            let above = yearly(lo)? - target;
            let below = target - yearly(lo - 1)?;
            if below < above {
                lo = lo - 1;
            }
        }

        debug!(bps, steps, rate = %lo, "solved per-second rate");
        Ok(Ray::from_raw(lo))
    }

    /// Dense mapping for `0..=max_bps`.
    pub fn mapping(&self) -> RateResult<RateMapping> {
        (0..=self.max_bps)
            .map(|bps| Self::per_second_rate(bps).map(|rate| (bps, rate)))
            .collect()
    }
}

impl RateSource for RateSolver {
    fn rate_for(&self, bps: Bps) -> RateResult<Ray> {
        if bps > self.max_bps {
            return Err(RateError::OutOfRange {
                bps,
                max: self.max_bps,
            });
        }
        Self::per_second_rate(bps)
    }

    fn max_bps(&self) -> Bps {
        self.max_bps
    }

    fn name(&self) -> &str {
        "Solver"
    }
}
