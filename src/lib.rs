// ============================================================================
// Rate Conversion Library
// Yearly basis points <-> per-second RAY rates with a packed lookup table
// ============================================================================

//! # Rate Conv
//!
//! Converts between a yearly rate in basis points (10,000 = 100%) and the
//! per-second compounding multiplier in RAY fixed-point (10^27 = 1.0).
//!
//! ## Features
//!
//! - **Exact fixed-point exponentiation** with per-step overflow checks and
//!   round half-up
//! - **Packed lookup table**: one 8-byte delta per bps, four per 32-byte word
//! - **O(1) bps → rate** reads, live **rate → bps** computation
//! - **Artifact emitter** producing an on-chain converter contract
//!
//! ## Example
//!
//! ```rust
//! use rate_conv::prelude::*;
//!
//! // Offline: solve and pack a table for 0..=100 bps
//! let blob = build_from_solver(100).unwrap();
//! assert_eq!(blob.len(), 26 * 32);
//!
//! // Runtime: read it back
//! let conv = RateConverter::from_blob(blob);
//! let one_pct = conv.bps_to_rate(100).unwrap();
//! assert_eq!(one_pct.to_string(), "1.000000000315522921573372069");
//! assert_eq!(conv.rate_to_bps(one_pct).unwrap().low_u64(), 100);
//! assert!(conv.bps_to_rate(101).is_err());
//! ```

pub mod artifact;
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod table;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{GeneratorConfig, RateMapping};
    pub use crate::engine::{
        build_from_config, build_from_solver, build_from_text, converter_from_config, render_from_config,
        rate_to_bps, RateConverter, RateSolver, BPS_SCALE, SECONDS_PER_YEAR,
    };
    pub use crate::interfaces::RateSource;
    pub use crate::numeric::{rpow, Bps, RateError, RateResult, Ray, RAY};
    pub use crate::table::{PackedBlob, PackedRateStore, TablePacker};
}
