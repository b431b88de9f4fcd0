// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod rate_source;

pub use rate_source::RateSource;
