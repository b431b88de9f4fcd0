// ============================================================================
// Packed Rate Store
// O(1) bps -> rate reads from a packed blob
// ============================================================================

use super::blob::PackedBlob;
use super::layout::Slot;
use crate::interfaces::RateSource;
use crate::numeric::{Bps, RateError, RateResult, Ray};
use primitive_types::U256;

/// Read the rate for `bps` out of `blob`, rejecting anything above `max`.
///
/// The containing word is loaded as a big-endian 256-bit integer, shifted so
/// the field sits in the low 64 bits, masked, and offset by RAY.
///
/// # Errors
/// Returns `OutOfRange` if `bps > max` or the blob has no word for `bps`.
pub fn lookup(blob: &PackedBlob, bps: Bps, max: Bps) -> RateResult<Ray> {
    if bps > max {
        return Err(RateError::OutOfRange { bps, max });
    }

    let slot = Slot::for_bps(bps).ok_or(RateError::OutOfRange { bps, max })?;
    let word = blob.word(slot.word).ok_or(RateError::OutOfRange {
        bps,
        max: blob.max(),
    })?;

    let value = U256::from_big_endian(word);
    let delta = (value >> slot.shift_bits()) & U256::from(u64::MAX);

    Ok(Ray::from_delta(delta.low_u64()))
}

/// Owns a packed blob and serves lookups bounded by the blob's own MAX.
///
/// Read-only after construction; share it across threads freely.
#[derive(Debug, Clone)]
pub struct PackedRateStore {
    blob: PackedBlob,
}

impl PackedRateStore {
    pub fn new(blob: PackedBlob) -> Self {
        Self { blob }
    }

    #[inline]
    pub fn blob(&self) -> &PackedBlob {
        &self.blob
    }

    /// Largest supported bps.
    #[inline]
    pub fn max(&self) -> Bps {
        self.blob.max()
    }

    /// Rate for `bps`, failing with `OutOfRange` above [`PackedRateStore::max`].
    #[inline]
    pub fn bps_to_rate(&self, bps: Bps) -> RateResult<Ray> {
        lookup(&self.blob, bps, self.blob.max())
    }
}

impl RateSource for PackedRateStore {
    fn rate_for(&self, bps: Bps) -> RateResult<Ray> {
        self.bps_to_rate(bps)
    }

    fn max_bps(&self) -> Bps {
        self.max()
    }

    fn name(&self) -> &str {
        "PackedTable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TablePacker;
    use proptest::prelude::*;

    fn store(deltas: &[u64]) -> PackedRateStore {
        let entries = deltas
            .iter()
            .enumerate()
            .map(|(bps, &delta)| (bps as Bps, Ray::from_delta(delta)));
        PackedRateStore::new(TablePacker::new().pack(entries).unwrap())
    }

    #[test]
    fn test_lookup_each_field_position() {
        let store = store(&[10, 11, 12, 13, 14]);
        for bps in 0..5 {
            assert_eq!(
                store.bps_to_rate(bps).unwrap(),
                Ray::from_delta(10 + bps)
            );
        }
    }

    #[test]
    fn test_lookup_out_of_range() {
        let store = store(&[10, 11, 12, 13, 14]);
        // field 5 exists as padding but is past MAX
        assert_eq!(
            store.bps_to_rate(5),
            Err(RateError::OutOfRange { bps: 5, max: 4 })
        );
        assert_eq!(
            store.bps_to_rate(u64::MAX),
            Err(RateError::OutOfRange {
                bps: u64::MAX,
                max: 4
            })
        );
    }

    #[test]
    fn test_lookup_padding_reads_unity() {
        let store = store(&[10]);
        // caller-supplied max may reach into the zero padding of the last word
        assert_eq!(lookup(store.blob(), 3, 3).unwrap(), Ray::ONE);
    }

    #[test]
    fn test_lookup_max_beyond_blob() {
        let store = store(&[10]);
        assert_eq!(
            lookup(store.blob(), 4, 100),
            Err(RateError::OutOfRange { bps: 4, max: 0 })
        );
    }

    #[test]
    fn test_lookup_full_width_delta() {
        let store = store(&[u64::MAX, 0, u64::MAX, 1]);
        assert_eq!(store.bps_to_rate(0).unwrap(), Ray::from_delta(u64::MAX));
        assert_eq!(store.bps_to_rate(1).unwrap(), Ray::ONE);
        assert_eq!(store.bps_to_rate(2).unwrap(), Ray::from_delta(u64::MAX));
        assert_eq!(store.bps_to_rate(3).unwrap(), Ray::from_delta(1));
    }

    #[test]
    fn test_rate_source_impl() {
        let store = store(&[1, 2]);
        let source: &dyn RateSource = &store;
        assert_eq!(source.max_bps(), 1);
        assert_eq!(source.rate_for(1).unwrap(), Ray::from_delta(2));
        assert_eq!(source.name(), "PackedTable");
    }

    proptest! {
        #[test]
        fn prop_lookup_returns_packed_rate(deltas in prop::collection::vec(any::<u64>(), 1..64)) {
            let store = store(&deltas);
            for (bps, &delta) in deltas.iter().enumerate() {
                prop_assert_eq!(store.bps_to_rate(bps as Bps).unwrap(), Ray::from_delta(delta));
            }
            prop_assert!(store.bps_to_rate(deltas.len() as Bps).is_err());
        }
    }
}
