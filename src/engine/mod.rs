// ============================================================================
// Engine Module
// Contains the conversion logic built on top of the packed table
// ============================================================================

mod converter;
mod solver;

pub mod factory;

pub use converter::{rate_to_bps, yearly_to_bps, RateConverter, BPS_SCALE, SECONDS_PER_YEAR};
pub use factory::{
    build_from_config, build_from_solver, build_from_text, converter_from_config, render_from_config,
};
pub use solver::RateSolver;
