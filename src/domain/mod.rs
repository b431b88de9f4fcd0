// ============================================================================
// Domain Models Module
// Source rate mappings and generator configuration
// ============================================================================

pub mod config;
pub mod mapping;

pub use config::GeneratorConfig;
pub use mapping::RateMapping;
