// ============================================================================
// Generator Configuration
// Where the rate mapping comes from and how it is packed
// ============================================================================

use crate::numeric::{Bps, RateError, RateResult};
use crate::table::MAX_ENTRIES;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default location of the source rate mapping.
pub const DEFAULT_INPUT_PATH: &str = "data/RatesMapping.sol";

/// Default largest bps included in the table (50% per year).
pub const DEFAULT_MAX_BPS: Bps = 5000;

/// Environment variable overriding [`GeneratorConfig::input_path`].
pub const ENV_INPUT_PATH: &str = "RATES_MAPPING_PATH";

/// Environment variable overriding [`GeneratorConfig::max_bps`].
pub const ENV_MAX_BPS: &str = "RATES_MAX_BPS";

/// Configuration for building a packed rate table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Path of the `rates[<bps>] = <rate>;` mapping file
    pub input_path: PathBuf,

    /// Entries above this bps are dropped while parsing
    pub max_bps: Bps,

    /// Zero-fill missing bps values instead of failing
    pub allow_gaps: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            max_bps: DEFAULT_MAX_BPS,
            allow_gaps: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration reading from `input_path`
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Builder method: Set the largest bps to include
    pub fn with_max_bps(mut self, max_bps: Bps) -> Self {
        self.max_bps = max_bps;
        self
    }

    /// Builder method: Allow gaps in the mapping
    pub fn with_allow_gaps(mut self, allow: bool) -> Self {
        self.allow_gaps = allow;
        self
    }

    /// Defaults overridden by `RATES_MAPPING_PATH` and `RATES_MAX_BPS`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `RATES_MAX_BPS` is not an integer.
    pub fn from_env() -> RateResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> RateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_INPUT_PATH) {
            config.input_path = PathBuf::from(path);
        }

        if let Some(max_bps) = lookup(ENV_MAX_BPS) {
            config.max_bps = max_bps.trim().parse().map_err(|_| {
                RateError::InvalidConfig(format!("{} must be an integer, got {:?}", ENV_MAX_BPS, max_bps))
            })?;
        }

        Ok(config)
    }

    /// Load from a JSON document; missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> RateResult<Self> {
        serde_json::from_str(json).map_err(|e| RateError::InvalidConfig(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_path.as_os_str().is_empty() {
            return Err("Input path cannot be empty".to_string());
        }

        if self.max_bps >= MAX_ENTRIES {
            return Err(format!("Max bps must be below {}", MAX_ENTRIES));
        }

        Ok(())
    }
}
