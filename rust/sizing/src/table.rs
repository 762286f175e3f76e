// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Piecewise lookup tables.
//!
//! A [`LookupTable`] maps strictly increasing numeric keys to values and
//! supports four lookup flavours:
//!
//! | Lookup | Picks | Below first key | Above last key |
//! |---|---|---|---|
//! | exact | the entry whose key equals x | `None` | `None` |
//! | floor | greatest key ≤ x | `None` | per [`Overflow`] |
//! | ceiling | smallest key ≥ x | first value | last value |
//! | interpolated | linear between bracketing keys | `None` | last value |

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Floor-lookup behaviour for inputs beyond the last key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Out of range.
    #[default]
    Reject,
    /// The last entry covers everything above it.
    Saturate,
    /// The last entry covers inputs up to and including this limit.
    UpTo(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDef<V> {
    entries: Vec<(f64, V)>,
    #[serde(default)]
    overflow: Overflow,
}

/// Validated mapping from increasing numeric keys to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableDef<V>", into = "TableDef<V>")]
#[serde(bound(
    serialize = "V: Serialize + Clone",
    deserialize = "V: Deserialize<'de>"
))]
pub struct LookupTable<V> {
    entries: Vec<(f64, V)>,
    overflow: Overflow,
}

impl<V> LookupTable<V> {
    /// Creates a table, rejecting empty, non-finite or unsorted keys.
    pub fn new(entries: Vec<(f64, V)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyTable);
        }
        for (index, (key, _)) in entries.iter().enumerate() {
            if !key.is_finite() {
                return Err(Error::NonFiniteKey { index });
            }
            if index > 0 && entries[index - 1].0 >= *key {
                return Err(Error::UnsortedKeys { index });
            }
        }
        Ok(Self {
            entries,
            overflow: Overflow::Reject,
        })
    }

    /// Sets how floor lookups treat inputs beyond the last key.
    pub fn with_overflow(mut self, overflow: Overflow) -> Result<Self> {
        if let Overflow::UpTo(limit) = overflow {
            let last_key = self.last_key();
            if limit.is_nan() || limit < last_key {
                return Err(Error::InvalidUpperLimit { limit, last_key });
            }
        }
        self.overflow = overflow;
        Ok(self)
    }

    /// Builds a table from entries already known to be valid.
    pub(crate) fn from_sorted(entries: Vec<(f64, V)>, overflow: Overflow) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries, overflow }
    }

    pub fn entries(&self) -> &[(f64, V)] {
        &self.entries
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_key(&self) -> f64 {
        self.entries.first().map_or(f64::NAN, |(k, _)| *k)
    }

    pub fn last_key(&self) -> f64 {
        self.entries.last().map_or(f64::NAN, |(k, _)| *k)
    }

    /// Number of entries with key ≤ x.
    fn rank(&self, x: f64) -> usize {
        self.entries.partition_point(|(k, _)| *k <= x)
    }
}

impl<V: Copy> LookupTable<V> {
    /// Value stored under exactly this key.
    pub fn lookup_exact(&self, x: f64) -> Option<V> {
        self.entries
            .binary_search_by(|(k, _)| k.total_cmp(&x))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Value of the greatest key ≤ x.
    pub fn lookup_floor(&self, x: f64) -> Option<V> {
        if x.is_nan() {
            return None;
        }
        let rank = self.rank(x);
        let (last_key, last_value) = *self.entries.last()?;
        if rank == 0 {
            return None;
        }
        if rank < self.entries.len() || x == last_key {
            return Some(self.entries[rank - 1].1);
        }
        match self.overflow {
            Overflow::Reject => None,
            Overflow::Saturate => Some(last_value),
            Overflow::UpTo(limit) => (x <= limit).then_some(last_value),
        }
    }

    /// Value of the smallest key ≥ x, saturating at the last entry.
    ///
    /// Non-finite input has no ceiling.
    pub fn lookup_ceiling(&self, x: f64) -> Option<V> {
        if !x.is_finite() {
            return None;
        }
        let index = self.entries.partition_point(|(k, _)| *k < x);
        self.entries
            .get(index)
            .or_else(|| self.entries.last())
            .map(|(_, v)| *v)
    }
}

impl<V: Copy + Into<f64>> LookupTable<V> {
    /// Linear interpolation between the two keys bracketing x.
    ///
    /// At or beyond the last key the last value is returned unmodified.
    pub fn lookup_interpolated(&self, x: f64) -> Option<f64> {
        if x.is_nan() || x < self.first_key() {
            return None;
        }
        let rank = self.rank(x);
        if rank >= self.entries.len() {
            return self.entries.last().map(|(_, v)| (*v).into());
        }
        let (k0, v0) = self.entries[rank - 1];
        let (k1, v1) = self.entries[rank];
        let (v0, v1): (f64, f64) = (v0.into(), v1.into());
        let ratio = (x - k0) / (k1 - k0);
        Some(v0 + ratio * (v1 - v0))
    }
}

impl<V> TryFrom<TableDef<V>> for LookupTable<V> {
    type Error = Error;

    fn try_from(def: TableDef<V>) -> Result<Self> {
        Self::new(def.entries)?.with_overflow(def.overflow)
    }
}

impl<V> From<LookupTable<V>> for TableDef<V> {
    fn from(table: LookupTable<V>) -> Self {
        Self {
            entries: table.entries,
            overflow: table.overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn capacity() -> LookupTable<u32> {
        LookupTable::new(vec![
            (1.0, 15),
            (2.6, 20),
            (4.9, 25),
            (9.2, 32),
            (14.5, 40),
        ])
        .unwrap()
    }

    #[test]
    fn ceiling_selects_next_size_up() {
        let t = capacity();
        assert_eq!(t.lookup_ceiling(9.2), Some(32));
        assert_eq!(t.lookup_ceiling(9.3), Some(40));
        assert_eq!(t.lookup_ceiling(0.1), Some(15));
        assert_eq!(t.lookup_ceiling(500.0), Some(40));
        assert_eq!(t.lookup_ceiling(f64::NAN), None);
        assert_eq!(t.lookup_ceiling(f64::INFINITY), None);
        assert_eq!(t.lookup_ceiling(f64::NEG_INFINITY), None);
    }

    #[test]
    fn ceiling_is_idempotent_on_keys() {
        let t = capacity();
        for &(key, value) in t.entries() {
            assert_eq!(t.lookup_ceiling(key), Some(value));
            assert_eq!(t.lookup_exact(key), Some(value));
        }
    }

    #[test]
    fn exact_requires_a_matching_key() {
        let t = capacity();
        assert_eq!(t.lookup_exact(4.9), Some(25));
        assert_eq!(t.lookup_exact(5.0), None);
        assert_eq!(t.lookup_exact(f64::NAN), None);
    }

    #[test]
    fn floor_respects_overflow() {
        let t = capacity();
        assert_eq!(t.lookup_floor(0.5), None);
        assert_eq!(t.lookup_floor(1.0), Some(15));
        assert_eq!(t.lookup_floor(9.19), Some(25));
        assert_eq!(t.lookup_floor(14.5), Some(40));
        assert_eq!(t.lookup_floor(14.6), None);

        let capped = capacity().with_overflow(Overflow::UpTo(20.0)).unwrap();
        assert_eq!(capped.lookup_floor(20.0), Some(40));
        assert_eq!(capped.lookup_floor(20.1), None);

        let open = capacity().with_overflow(Overflow::Saturate).unwrap();
        assert_eq!(open.lookup_floor(1e9), Some(40));
        assert_eq!(open.lookup_floor(f64::INFINITY), Some(40));
    }

    #[test]
    fn interpolation_is_linear_and_clamped_above() {
        let t = LookupTable::new(vec![(86.1, 50u32), (158.1, 65)]).unwrap();
        assert_relative_eq!(t.lookup_interpolated(120.0).unwrap(), 57.0625, epsilon = 1e-9);
        assert_eq!(t.lookup_interpolated(86.0), None);
        assert_eq!(t.lookup_interpolated(158.1), Some(65.0));
        assert_eq!(t.lookup_interpolated(1000.0), Some(65.0));
    }

    #[test]
    fn interpolation_is_continuous_at_keys() {
        let t = capacity();
        let h = 1e-9;
        for window in t.entries().windows(3) {
            let (key, value) = window[1];
            let at = t.lookup_interpolated(key).unwrap();
            assert_eq!(at, value as f64);
            assert_relative_eq!(t.lookup_interpolated(key - h).unwrap(), at, epsilon = 1e-6);
            assert_relative_eq!(t.lookup_interpolated(key + h).unwrap(), at, epsilon = 1e-6);
        }
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(matches!(LookupTable::<u32>::new(vec![]), Err(Error::EmptyTable)));
        assert!(matches!(
            LookupTable::new(vec![(1.0, 1u32), (1.0, 2)]),
            Err(Error::UnsortedKeys { index: 1 })
        ));
        assert!(matches!(
            LookupTable::new(vec![(f64::INFINITY, 1u32)]),
            Err(Error::NonFiniteKey { index: 0 })
        ));
        assert!(matches!(
            capacity().with_overflow(Overflow::UpTo(3.0)),
            Err(Error::InvalidUpperLimit { .. })
        ));
    }

    #[test]
    fn deserializes_with_validation() {
        let json = r#"{"entries": [[0.0, 15], [8.4, 20]], "overflow": {"up_to": 17.1}}"#;
        let t: LookupTable<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(t.overflow(), Overflow::UpTo(17.1));
        assert_eq!(t.lookup_floor(17.0), Some(20));

        let plain: LookupTable<u32> = serde_json::from_str(r#"{"entries": [[1.0, 15]]}"#).unwrap();
        assert_eq!(plain.overflow(), Overflow::Reject);

        let unsorted = r#"{"entries": [[2.0, 15], [1.0, 20]]}"#;
        assert!(serde_json::from_str::<LookupTable<u32>>(unsorted).is_err());

        let back = serde_json::to_string(&capacity()).unwrap();
        assert_eq!(serde_json::from_str::<LookupTable<u32>>(&back).unwrap(), capacity());
    }
}
