// ============================================================================
// Compact Rates Generator
// Reads the rate mapping, packs it and prints the converter contract source
// ============================================================================
//
// Usage: generate_compact_rates > Conv.sol
//
// Environment:
// - RATES_MAPPING_PATH: mapping file (default data/RatesMapping.sol)
// - RATES_MAX_BPS: largest bps to include (default 5000)

use rate_conv::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match GeneratorConfig::from_env().and_then(|config| render_from_config(&config)) {
        Ok(source) => {
            println!("{}", source);
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}
