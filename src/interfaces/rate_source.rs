// ============================================================================
// Rate Source Interface
// Defines the contract for anything that yields a per-second rate for a bps
// ============================================================================

use crate::numeric::{Bps, RateResult, Ray};

/// Strategy interface for bps -> per-second rate
/// Implementations: PackedRateStore (table read), RateSolver (live bisection)
pub trait RateSource: Send + Sync {
    /// Per-second rate for `bps`
    ///
    /// # Errors
    /// `OutOfRange` when `bps > self.max_bps()`
    fn rate_for(&self, bps: Bps) -> RateResult<Ray>;

    /// Largest bps this source serves
    fn max_bps(&self) -> Bps;

    /// Get the source name for logging
    fn name(&self) -> &str;
}
