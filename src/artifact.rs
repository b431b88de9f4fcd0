// ============================================================================
// Artifact Emitter
// Renders a packed table as the source of an on-chain converter contract
// ============================================================================

use crate::table::{PackedBlob, FIELD_BYTES};

const TEMPLATE: &str = r#"pragma solidity ^0.8.24;

/**
 * @title Yearly Basis Points to per second RAY rate converter
 * @notice Converts between yearly basis points and per second RAY rates in both directions.
 */
contract Conv {
    uint256 constant public MAX = @MAX@;
    uint256 constant internal RAY = 10**27;
    uint256 constant internal BPS = 10_000;

    /// @dev One 8-byte delta above RAY per bps, @ENTRIES@ rates
    /// @dev Four rates per 32-byte storage word
    /// @dev Total size = @ENTRIES@ * 8 = @BYTES@ bytes
    bytes internal RATES = hex"@RATES@";

    /// @notice Per second rate for a yearly basis points value
    /// @param bps Yearly basis points, at most MAX
    /// @return rate Per second rate in RAY
    function turn(uint256 bps) external view returns (uint256 rate) {
        require(bps <= MAX);

        assembly {
            let offset := mul(bps, 8)
            let wordPos := div(offset, 32)
            let bytePos := mod(offset, 32)

            let dataSlot := keccak256(RATES.slot, 0x20)
            let value := sload(add(dataSlot, wordPos))
            let shifted := shr(mul(sub(24, bytePos), 8), value)

            rate := add(and(shifted, 0xFFFFFFFFFFFFFFFF), RAY)
        }
    }

    /// @notice Yearly basis points for a per second rate
    /// @param ray Per second rate in RAY
    /// @return bps Yearly basis points, rounded half up
    function rtob(uint256 ray) external pure returns (uint256 bps) {
        uint256 yearlyRate = _rpow(ray, 365 days);
        return ((yearlyRate - RAY) * BPS + RAY / 2) / RAY;
    }

    /// @notice x^n by squaring, x in RAY, n an integer
    function _rpow(uint256 x, uint256 n) internal pure returns (uint256 z) {
        assembly {
            switch x
            case 0 {
                switch n
                case 0 { z := RAY }
                default { z := 0 }
            }
            default {
                switch mod(n, 2)
                case 0 { z := RAY }
                default { z := x }
                let half := div(RAY, 2)
                for { n := div(n, 2) } n { n := div(n, 2) } {
                    let xx := mul(x, x)
                    if iszero(eq(div(xx, x), x)) { revert(0, 0) }
                    let xxRound := add(xx, half)
                    if lt(xxRound, xx) { revert(0, 0) }
                    x := div(xxRound, RAY)
                    if mod(n, 2) {
                        let zx := mul(z, x)
                        if and(iszero(iszero(x)), iszero(eq(div(zx, x), z))) { revert(0, 0) }
                        let zxRound := add(zx, half)
                        if lt(zxRound, zx) { revert(0, 0) }
                        z := div(zxRound, RAY)
                    }
                }
            }
        }
    }
}
"#;

/// Contract source embedding `blob` as the `RATES` constant.
///
/// `MAX` is the blob's largest bps; the documented size counts logical
/// entries, not the zero padding of the last word.
pub fn render(blob: &PackedBlob) -> String {
    let entries = blob.entry_count();
    TEMPLATE
        .replace("@MAX@", &blob.max().to_string())
        .replace("@ENTRIES@", &entries.to_string())
        .replace("@BYTES@", &(entries * FIELD_BYTES as u64).to_string())
        .replace("@RATES@", &blob.to_hex())
}

/// Recover the blob from source produced by [`render`].
///
/// Returns `None` if `MAX` or the `RATES` literal cannot be found or the
/// literal's length does not match `MAX`.
pub fn extract(source: &str) -> Option<PackedBlob> {
    let max = source
        .split_once("uint256 constant public MAX = ")?
        .1
        .split_once(';')?
        .0
        .trim()
        .parse()
        .ok()?;
    let hex = source.split_once("RATES = hex\"")?.1.split_once('"')?.0;
    PackedBlob::from_hex(hex, max).ok()
}
