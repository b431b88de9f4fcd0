// ============================================================================
// Table Factory
// Builds packed tables and converters from configuration
// ============================================================================

use crate::artifact;
use crate::domain::{GeneratorConfig, RateMapping};
use crate::engine::{RateConverter, RateSolver};
use crate::numeric::{Bps, RateError, RateResult};
use crate::table::{PackedBlob, PackedRateStore, TablePacker};
use std::fs;
use tracing::info;

// ============================================================================
// Factory Functions
// ============================================================================

/// Reads, parses and packs the mapping named by `config`.
///
/// # Arguments
/// * `config` - Generator configuration
///
/// # Returns
/// * `RateResult<PackedBlob>` - The packed table, or the first failure
///
/// # Example
/// ```no_run
/// use rate_conv::domain::GeneratorConfig;
/// use rate_conv::engine::factory::build_from_config;
///
/// let blob = build_from_config(&GeneratorConfig::default()).unwrap();
/// println!("MAX = {}", blob.max());
/// ```
pub fn build_from_config(config: &GeneratorConfig) -> RateResult<PackedBlob> {
    // Validate configuration first
    config.validate().map_err(RateError::InvalidConfig)?;

    let path = config.input_path.display().to_string();
    let text = fs::read_to_string(&config.input_path).map_err(|e| RateError::Io {
        path: path.clone(),
        message: e.to_string(),
    })?;

    info!(path = %path, max_bps = config.max_bps, "building rate table");
    build_from_text(&text, config)
}

/// Parses and packs mapping text already in memory.
pub fn build_from_text(text: &str, config: &GeneratorConfig) -> RateResult<PackedBlob> {
    let mapping = RateMapping::parse(text, config.max_bps)?;
    pack_mapping(&mapping, config.allow_gaps)
}

/// Packs a validated mapping.
pub fn pack_mapping(mapping: &RateMapping, allow_gaps: bool) -> RateResult<PackedBlob> {
    TablePacker::new().allow_gaps(allow_gaps).pack(mapping.iter())
}

/// Solves and packs a dense table for `0..=max_bps` without any input file.
pub fn build_from_solver(max_bps: Bps) -> RateResult<PackedBlob> {
    let mapping = RateSolver::new(max_bps).mapping()?;
    pack_mapping(&mapping, false)
}

/// Creates a table-backed converter from configuration
pub fn converter_from_config(config: &GeneratorConfig) -> RateResult<RateConverter> {
    build_from_config(config).map(RateConverter::from_blob)
}

/// Builds the table named by `config` and renders the converter contract.
///
/// This is the whole generator run; no source is produced on error.
pub fn render_from_config(config: &GeneratorConfig) -> RateResult<String> {
    let blob = build_from_config(config)?;

    // table rates stay below RAY + 2^64, well inside Decimal's mantissa
    let top = PackedRateStore::new(blob.clone())
        .bps_to_rate(blob.max())?
        .to_decimal()?;
    info!(max = blob.max(), top_rate = %top, bytes = blob.len(), "generated table");

    Ok(artifact::render(&blob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Ray;

    const TEXT: &str = "\
rates[0] = 1000000000000000000000000000;
rates[1] = 1000000000003170820659990705;
rates[2] = 1000000000006341324285480112;
rates[3] = 1000000000009511510939859272;
rates[4] = 1000000000012681380686500227;
";

    #[test]
    fn test_build_from_text() {
        let blob = build_from_text(TEXT, &GeneratorConfig::default()).unwrap();
        assert_eq!(blob.max(), 4);
        assert_eq!(blob.len(), 64);
    }

    #[test]
    fn test_build_from_text_respects_max_bps() {
        let config = GeneratorConfig::default().with_max_bps(3);
        let blob = build_from_text(TEXT, &config).unwrap();
        assert_eq!(blob.max(), 3);
        assert_eq!(blob.len(), 32);
    }

    #[test]
    fn test_build_from_text_gap_policy() {
        let text = "rates[0] = 1000000000000000000000000000;\nrates[2] = 1000000000000000000000000005;";
        let strict = GeneratorConfig::default();
        assert_eq!(
            build_from_text(text, &strict),
            Err(RateError::MissingEntry { bps: 1 })
        );

        let lenient = GeneratorConfig::default().with_allow_gaps(true);
        let blob = build_from_text(text, &lenient).unwrap();
        let conv = RateConverter::from_blob(blob);
        assert_eq!(conv.turn(1).unwrap(), Ray::ONE);
        assert_eq!(conv.turn(2).unwrap(), Ray::from_delta(5));
    }

    #[test]
    fn test_build_from_config_missing_file() {
        let config = GeneratorConfig::new("does/not/exist.sol");
        assert!(matches!(
            build_from_config(&config),
            Err(RateError::Io { .. })
        ));
    }

    #[test]
    fn test_build_from_config_invalid() {
        let config = GeneratorConfig::new("");
        assert!(matches!(
            build_from_config(&config),
            Err(RateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_build_from_config_fixture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/RatesMapping.sol");
        let conv = converter_from_config(&GeneratorConfig::new(path)).unwrap();
        assert_eq!(conv.max(), 400);
    }

    fn write_input(name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rate_conv_{}_{}.sol",
            name,
            std::process::id()
        ));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_render_from_config_fixture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/RatesMapping.sol");
        let source = render_from_config(&GeneratorConfig::new(path)).unwrap();
        assert!(source.contains("uint256 constant public MAX = 400;"));
        assert!(source.contains("Total size = 401 * 8 = 3208 bytes"));
    }

    #[test]
    fn test_render_from_config_malformed_line() {
        let path = write_input("malformed", "rates[0] = 1000000000000000000000000000;\nrates[1] = abc;\n");
        let result = render_from_config(&GeneratorConfig::new(&path));
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(RateError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_render_from_config_wide_delta() {
        // RAY + 2^64
        let path = write_input(
            "wide",
            "rates[0] = 1000000000000000000000000000;\nrates[1] = 1000000018446744073709551616;\n",
        );
        let result = render_from_config(&GeneratorConfig::new(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(result, Err(RateError::EncodingOverflow { bps: 1 }));
    }

    #[test]
    fn test_build_from_solver_matches_text() {
        let solved = build_from_solver(4).unwrap();
        let parsed = build_from_text(TEXT, &GeneratorConfig::default()).unwrap();
        assert_eq!(solved, parsed);
    }
}
