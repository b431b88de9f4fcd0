// ============================================================================
// Table Packer
// Serializes an ordered bps -> rate mapping into a packed blob
// ============================================================================

use super::blob::PackedBlob;
use super::layout::{words_for, FIELDS_PER_WORD, FIELD_BYTES, WORD_BYTES};
use crate::numeric::{Bps, RateError, RateResult, Ray};
use tracing::{debug, info, warn};

/// Largest number of fields a single table may hold.
pub const MAX_ENTRIES: u64 = 1 << 20;

/// Builds a [`PackedBlob`] from `(bps, rate)` entries.
///
/// Field `i` of the blob holds the delta of bps `i`, so the table is dense
/// over `[0, MAX]` where `MAX` is the last entry's bps. By default a missing
/// bps is an error; with [`TablePacker::allow_gaps`] the missing fields are
/// zero-filled and read back as RAY.
///
/// # Example
/// ```
/// use rate_conv::numeric::Ray;
/// use rate_conv::table::TablePacker;
///
/// let blob = TablePacker::new()
///     .pack([(0, Ray::ONE), (1, Ray::from_delta(3_170_820_659_990_705))])
///     .unwrap();
/// assert_eq!(blob.len(), 32);
/// assert_eq!(blob.max(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePacker {
    allow_gaps: bool,
}

impl TablePacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: zero-fill bps values that have no entry
    pub fn allow_gaps(mut self, allow: bool) -> Self {
        self.allow_gaps = allow;
        self
    }

    /// Pack entries ascending by bps.
    ///
    /// Either the whole table is produced or nothing is.
    ///
    /// # Errors
    /// - `EmptyTable` if there are no entries
    /// - `Unsorted` if bps values are not strictly ascending
    /// - `MissingEntry` on a gap while gaps are not allowed
    /// - `OutOfRange` if a bps is at or beyond [`MAX_ENTRIES`]
    /// - `BelowUnity` if a rate is below RAY
    /// - `EncodingOverflow` if `rate - RAY` does not fit in 64 bits
    pub fn pack<I>(&self, entries: I) -> RateResult<PackedBlob>
    where
        I: IntoIterator<Item = (Bps, Ray)>,
    {
        let mut deltas: Vec<u64> = Vec::new();
        let mut previous: Option<Bps> = None;

        for (bps, rate) in entries {
            if let Some(previous) = previous {
                if bps <= previous {
                    return Err(RateError::Unsorted {
                        previous,
                        found: bps,
                    });
                }
            }
            if bps >= MAX_ENTRIES {
                return Err(RateError::OutOfRange {
                    bps,
                    max: MAX_ENTRIES - 1,
                });
            }

            let expected = deltas.len() as Bps;
            if bps != expected {
                if !self.allow_gaps {
                    return Err(RateError::MissingEntry { bps: expected });
                }
                warn!(from = expected, to = bps - 1, "zero-filling missing rates");
                deltas.resize(bps as usize, 0);
            }

            deltas.push(Self::encode_delta(bps, rate)?);
            previous = Some(bps);
        }

        let max = previous.ok_or(RateError::EmptyTable)?;
        let bytes = Self::serialize(&deltas);

        info!(
            entries = deltas.len(),
            words = bytes.len() / WORD_BYTES,
            max,
            "packed rate table"
        );
        Ok(PackedBlob::from_packed(bytes, max))
    }

    /// `rate - RAY` as a u64 field.
    fn encode_delta(bps: Bps, rate: Ray) -> RateResult<u64> {
        let delta = rate.delta()?;
        if delta.bits() > 64 {
            debug!(bps, %delta, "delta does not fit 64 bits");
            return Err(RateError::EncodingOverflow { bps });
        }
        Ok(delta.low_u64())
    }

    /// Four big-endian fields per word, last word zero-padded.
    fn serialize(deltas: &[u64]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(words_for(deltas.len()) * WORD_BYTES);
        for group in deltas.chunks(FIELDS_PER_WORD) {
            let mut word = [0u8; WORD_BYTES];
            for (field, delta) in word.chunks_exact_mut(FIELD_BYTES).zip(group) {
                field.copy_from_slice(&delta.to_be_bytes());
            }
            bytes.extend_from_slice(&word);
        }
        bytes
    }
}
