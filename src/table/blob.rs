// ============================================================================
// Packed Blob
// Immutable byte image of a rate table
// ============================================================================

use super::layout::{words_for, WORD_BYTES};
use crate::numeric::{Bps, RateError, RateResult};
use std::sync::Arc;

/// Immutable packed rate table.
///
/// The bytes form consecutive 32-byte words, each holding four big-endian
/// u64 deltas above RAY. Field `i` belongs to bps `i`; unused trailing fields
/// are zero. Cloning shares the same bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct PackedBlob {
    bytes: Arc<[u8]>,
    max: Bps,
}

impl PackedBlob {
    /// Wrap bytes produced by the packer. `bytes.len()` is already a whole
    /// number of words covering `max + 1` fields.
    pub(crate) fn from_packed(bytes: Vec<u8>, max: Bps) -> Self {
        Self {
            bytes: bytes.into(),
            max,
        }
    }

    /// Load a blob produced elsewhere, e.g. decoded from a generated artifact.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless `bytes` is exactly the number of words
    /// needed for fields `0..=max`.
    pub fn from_bytes(bytes: &[u8], max: Bps) -> RateResult<Self> {
        let entries = usize::try_from(max)
            .ok()
            .and_then(|max| max.checked_add(1))
            .ok_or(RateError::InvalidInput)?;
        if bytes.len() != words_for(entries) * WORD_BYTES {
            return Err(RateError::InvalidInput);
        }
        Ok(Self {
            bytes: bytes.into(),
            max,
        })
    }

    /// Parse the lowercase or uppercase hex form produced by [`PackedBlob::to_hex`].
    ///
    /// # Errors
    /// Returns `InvalidInput` on any non-hex character, an odd digit count or
    /// a length that does not match `max`.
    pub fn from_hex(digits: &str, max: Bps) -> RateResult<Self> {
        let bytes = hex::decode(digits.trim()).map_err(|_| RateError::InvalidInput)?;
        Self::from_bytes(&bytes, max)
    }

    /// Largest bps stored in the table.
    #[inline]
    pub fn max(&self) -> Bps {
        self.max
    }

    /// Number of logical entries, `MAX + 1`.
    #[inline]
    pub fn entry_count(&self) -> u64 {
        self.max + 1
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.bytes.len() / WORD_BYTES
    }

    /// Word number `index`, if present.
    #[inline]
    pub fn word(&self, index: usize) -> Option<&[u8; WORD_BYTES]> {
        let start = index.checked_mul(WORD_BYTES)?;
        self.bytes
            .get(start..start.checked_add(WORD_BYTES)?)
            .and_then(|word| word.try_into().ok())
    }

    /// Lowercase hex, two characters per byte, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl std::fmt::Debug for PackedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedBlob")
            .field("max", &self.max)
            .field("words", &self.word_count())
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_checks_length() {
        let blob = PackedBlob::from_bytes(&[0u8; 64], 5).unwrap();
        assert_eq!(blob.word_count(), 2);
        assert_eq!(blob.entry_count(), 6);

        assert_eq!(
            PackedBlob::from_bytes(&[0u8; 64], 8),
            Err(RateError::InvalidInput)
        );
        assert_eq!(
            PackedBlob::from_bytes(&[0u8; 31], 0),
            Err(RateError::InvalidInput)
        );
    }

    #[test]
    fn test_word_access() {
        let mut bytes = vec![0u8; 64];
        bytes[32] = 0xab;
        let blob = PackedBlob::from_bytes(&bytes, 7).unwrap();

        assert_eq!(blob.word(1).unwrap()[0], 0xab);
        assert!(blob.word(2).is_none());
        assert!(blob.word(usize::MAX).is_none());
    }

    #[test]
    fn test_hex_round_trip() {
        let mut bytes = vec![0u8; 32];
        bytes[7] = 0x05;
        bytes[31] = 0xff;
        let blob = PackedBlob::from_bytes(&bytes, 3).unwrap();

        let hex = blob.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("0000000000000005"));
        assert!(hex.ends_with("ff"));

        assert_eq!(PackedBlob::from_hex(&hex, 3).unwrap(), blob);
        assert_eq!(
            PackedBlob::from_hex("0g", 0),
            Err(RateError::InvalidInput)
        );
    }

    #[test]
    fn test_from_hex_rejects_malformed_digits() {
        let valid = "00".repeat(32);
        assert!(PackedBlob::from_hex(&valid, 3).is_ok());

        for bad in ["+1", "-1", " 1", "0x", "g0"] {
            let hex = "00".repeat(31) + bad;
            assert_eq!(
                PackedBlob::from_hex(&hex, 3),
                Err(RateError::InvalidInput),
                "accepted {:?}",
                bad
            );
        }
        assert_eq!(
            PackedBlob::from_hex(&"0".repeat(63), 3),
            Err(RateError::InvalidInput)
        );
    }

    #[test]
    fn test_clone_shares_bytes() {
        let blob = PackedBlob::from_bytes(&[0u8; 32], 0).unwrap();
        let copy = blob.clone();
        assert!(std::ptr::eq(blob.as_bytes(), copy.as_bytes()));
    }
}
