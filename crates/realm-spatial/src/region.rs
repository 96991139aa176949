//! Sorted sets of zones.

use smallvec::SmallVec;

use crate::ZoneId;

/// An ordered, duplicate-free set of zones selected by a query.
///
/// An empty region is used by cursors as "every zone on the map".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    zones: SmallVec<[ZoneId; 16]>,
}

impl Region {
    /// Empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone, keeping the set sorted. No-op if already present.
    pub fn insert(&mut self, zone: ZoneId) {
        if let Err(at) = self.zones.binary_search(&zone) {
            self.zones.insert(at, zone);
        }
    }

    /// Merge another region into this one.
    ///
    /// Both operands are treated as plain sets here; an empty `other` adds
    /// nothing.
    pub fn union_with(&mut self, other: &Region) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.zones.clone_from(&other.zones);
            return;
        }

        let mut merged = SmallVec::with_capacity(self.zones.len() + other.zones.len());
        let (mut i, mut j) = (0, 0);
        while i < self.zones.len() && j < other.zones.len() {
            let (x, y) = (self.zones[i], other.zones[j]);
            if x <= y {
                merged.push(x);
                i += 1;
                if x == y {
                    j += 1;
                }
            } else {
                merged.push(y);
                j += 1;
            }
        }
        merged.extend_from_slice(&self.zones[i..]);
        merged.extend_from_slice(&other.zones[j..]);
        self.zones = merged;
    }

    /// Whether a zone is in the region.
    #[must_use]
    pub fn contains(&self, zone: ZoneId) -> bool {
        self.zones.binary_search(&zone).is_ok()
    }

    /// Zone at a position in sorted order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ZoneId> {
        self.zones.get(index).copied()
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Remove every zone.
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Zones in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[ZoneId] {
        &self.zones
    }

    /// Zones in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.iter().copied()
    }
}

impl FromIterator<ZoneId> for Region {
    fn from_iter<I: IntoIterator<Item = ZoneId>>(iter: I) -> Self {
        let mut region = Self::new();
        for zone in iter {
            region.insert(zone);
        }
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(ids: &[u32]) -> Region {
        ids.iter().map(|&id| ZoneId(id)).collect()
    }

    #[test]
    fn test_insert_sorted_no_duplicates() {
        let mut r = Region::new();
        for id in [5, 1, 3, 5, 1, 9] {
            r.insert(ZoneId(id));
        }

        assert_eq!(r.as_slice(), &[ZoneId(1), ZoneId(3), ZoneId(5), ZoneId(9)]);
        assert!(r.contains(ZoneId(3)));
        assert!(!r.contains(ZoneId(4)));
    }

    #[test]
    fn test_union() {
        let mut r = region(&[1, 4, 7]);
        r.union_with(&region(&[0, 4, 8, 9]));
        assert_eq!(r, region(&[0, 1, 4, 7, 8, 9]));

        let mut empty = Region::new();
        empty.union_with(&region(&[2, 3]));
        assert_eq!(empty, region(&[2, 3]));

        let mut r = region(&[2]);
        r.union_with(&Region::new());
        assert_eq!(r, region(&[2]));
    }
}
