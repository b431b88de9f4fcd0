// ============================================================================
// Table Module
// Compact binary lookup table of per-second rates
// ============================================================================
//
// Layout: one big-endian u64 delta (rate - RAY) per bps, four per 32-byte
// word, last word zero-padded. Field index equals bps.

pub mod layout;

mod blob;
mod packer;
mod store;

pub use blob::PackedBlob;
pub use layout::{Slot, FIELDS_PER_WORD, FIELD_BYTES, WORD_BYTES};
pub use packer::{TablePacker, MAX_ENTRIES};
pub use store::{lookup, PackedRateStore};
