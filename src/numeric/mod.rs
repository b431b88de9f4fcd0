// ============================================================================
// Numeric Module
// RAY fixed-point arithmetic for per-second compounding rates
// ============================================================================
//
// This module provides:
// - Ray: unsigned fixed-point with 27 decimals over U256
// - rpow: exponentiation by squaring with per-step overflow checks
// - RateError: error types shared by the whole crate
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Round half-up at every rescaling step

mod errors;
mod ray;
mod rpow;

pub use errors::{Bps, RateError, RateResult};
pub(crate) use ray::HALF_RAY;
pub use ray::{Ray, RAY, RAY_DECIMALS};
pub use rpow::rpow;
