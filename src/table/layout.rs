// ============================================================================
// Packed Table Layout
// Field and word geometry of the packed rate blob
// ============================================================================

use crate::numeric::Bps;

/// Bytes per stored delta (one big-endian u64).
pub const FIELD_BYTES: usize = 8;

/// Bytes per storage word.
pub const WORD_BYTES: usize = 32;

/// Deltas held by one word.
pub const FIELDS_PER_WORD: usize = WORD_BYTES / FIELD_BYTES;

/// Location of one bps field inside the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index of the 32-byte word
    pub word: usize,
    /// Byte offset of the field inside that word (0, 8, 16 or 24)
    pub byte_in_word: usize,
}

impl Slot {
    /// Address of `bps`: `offset = bps * 8`, `word = offset / 32`,
    /// `byte_in_word = offset % 32`.
    ///
    /// Returns `None` if the byte offset does not fit in `usize`.
    #[inline]
    pub fn for_bps(bps: Bps) -> Option<Self> {
        let offset = usize::try_from(bps).ok()?.checked_mul(FIELD_BYTES)?;
        Some(Self {
            word: offset / WORD_BYTES,
            byte_in_word: offset % WORD_BYTES,
        })
    }

    /// Right shift that brings this field to the low 64 bits of its word
    /// read as a big-endian 256-bit integer.
    #[inline]
    pub const fn shift_bits(self) -> usize {
        (WORD_BYTES - FIELD_BYTES - self.byte_in_word) * 8
    }
}

/// Number of words needed for `entries` fields.
#[inline]
pub const fn words_for(entries: usize) -> usize {
    entries.div_ceil(FIELDS_PER_WORD)
}
