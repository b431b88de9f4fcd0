// ============================================================================
// Rate Mapping
// Ordered bps -> per-second rate entries, parsed from `rates[<bps>] = <rate>;`
// ============================================================================

use crate::numeric::{Bps, RateError, RateResult, Ray};
use std::collections::BTreeMap;
use tracing::debug;

const ENTRY_OPEN: &str = "rates[";
const ENTRY_ASSIGN: &str = "] =";

/// Source mapping for a rate table, ascending by bps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateMapping {
    rates: BTreeMap<Bps, Ray>,
}

impl RateMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every `rates[<bps>] = <rate>;` line with `bps <= max_bps`.
    ///
    /// Lines without the `rates[` / `] =` markers are ignored, so a whole
    /// Solidity mock contract can be fed in. A repeated bps keeps the last
    /// value.
    ///
    /// # Errors
    /// Returns `Parse` with the 1-based line number on a malformed entry.
    ///
    /// # Example
    /// ```
    /// use rate_conv::domain::RateMapping;
    ///
    /// let text = "rates[0] = 1000000000000000000000000000;\n\
    ///             rates[1] = 1000000000003170820659990705;\n\
    ///             rates[2] = 1000000000006341324285480112;";
    /// let mapping = RateMapping::parse(text, 1).unwrap();
    /// assert_eq!(mapping.len(), 2);
    /// ```
    pub fn parse(text: &str, max_bps: Bps) -> RateResult<Self> {
        let mut mapping = Self::new();
        let mut skipped = 0usize;

        for (index, line) in text.lines().enumerate() {
            let parse_error = || RateError::Parse {
                line: index + 1,
                content: line.trim().to_string(),
            };

            let Some((bps, rate)) = split_entry(line) else {
                continue;
            };

            let bps: Bps = bps.trim().parse().map_err(|_| parse_error())?;
            if bps > max_bps {
                skipped += 1;
                continue;
            }

            let rate = rate.trim().trim_end_matches(';').trim_end();
            let rate = Ray::parse_raw(rate).map_err(|_| parse_error())?;
            mapping.insert(bps, rate);
        }

        debug!(
            entries = mapping.len(),
            skipped,
            max_bps,
            "parsed rate mapping"
        );
        Ok(mapping)
    }

    /// Insert or replace the rate for `bps`, returning the previous one.
    pub fn insert(&mut self, bps: Bps, rate: Ray) -> Option<Ray> {
        self.rates.insert(bps, rate)
    }

    pub fn get(&self, bps: Bps) -> Option<Ray> {
        self.rates.get(&bps).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Largest bps present.
    pub fn max_bps(&self) -> Option<Bps> {
        self.rates.keys().next_back().copied()
    }

    /// True when the keys are exactly `0..=max_bps`.
    pub fn is_dense(&self) -> bool {
        match self.max_bps() {
            Some(max) => max + 1 == self.rates.len() as Bps,
            None => true,
        }
    }

    /// Entries ascending by bps.
    pub fn iter(&self) -> impl Iterator<Item = (Bps, Ray)> + '_ {
        self.rates.iter().map(|(&bps, &rate)| (bps, rate))
    }
}

impl FromIterator<(Bps, Ray)> for RateMapping {
    fn from_iter<I: IntoIterator<Item = (Bps, Ray)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Split `... rates[<bps>] = <rate> ...` into its two raw parts.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    if !line.contains(ENTRY_ASSIGN) {
        return None;
    }
    let start = line.find(ENTRY_OPEN)? + ENTRY_OPEN.len();
    line[start..].split_once(ENTRY_ASSIGN)
}
