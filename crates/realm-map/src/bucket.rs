//! Public ID buckets.

use realm_thing::ThingId;

/// Number of IDs in one bucket.
pub const BUCKET_SIZE: usize = 256;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = BUCKET_SIZE / WORD_BITS;

/// A block of 256 public IDs with its own free bitmap.
///
/// A set bit in the bitmap marks a free slot.
#[derive(Clone)]
pub struct IdBucket {
    bitmap: [u64; WORDS],
    free: u16,
    /// Slot probed first on the next allocation.
    next: u8,
    things: [Option<ThingId>; BUCKET_SIZE],
}

impl Default for IdBucket {
    fn default() -> Self {
        Self::new()
    }
}

impl IdBucket {
    /// Bucket with every slot free.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bitmap: [u64::MAX; WORDS],
            free: BUCKET_SIZE as u16,
            next: 0,
            things: [None; BUCKET_SIZE],
        }
    }

    /// Take a free slot for `thing`.
    ///
    /// Probes the slot after the previous allocation first, so successive
    /// allocations tend to get adjacent IDs. Otherwise scans the bitmap a
    /// word at a time starting from the hint's word and takes the lowest
    /// free slot of the first word with one.
    pub fn allocate(&mut self, thing: ThingId) -> Option<u8> {
        if self.free == 0 {
            return None;
        }

        let slot = if self.is_free(self.next) {
            self.next
        } else {
            let start = self.next as usize / WORD_BITS;
            (0..WORDS)
                .map(|i| (start + i) % WORDS)
                .find_map(|word| {
                    let bits = self.bitmap[word];
                    (bits != 0).then(|| (word * WORD_BITS + bits.trailing_zeros() as usize) as u8)
                })?
        };

        self.bitmap[slot as usize / WORD_BITS] &= !Self::mask(slot);
        self.free -= 1;
        self.next = slot.wrapping_add(1);
        self.things[slot as usize] = Some(thing);
        Some(slot)
    }

    /// Release a slot.
    ///
    /// Releasing a slot that is already free is a caller bug; it trips a
    /// debug assertion and is otherwise ignored.
    pub fn deallocate(&mut self, slot: u8) {
        debug_assert!(!self.is_free(slot), "slot {slot} released twice");
        if self.is_free(slot) {
            tracing::error!("slot {slot} released twice");
            return;
        }

        self.bitmap[slot as usize / WORD_BITS] |= Self::mask(slot);
        self.free += 1;
        self.things[slot as usize] = None;
    }

    /// Whether a slot is free.
    #[must_use]
    pub const fn is_free(&self, slot: u8) -> bool {
        self.bitmap[slot as usize / WORD_BITS] & Self::mask(slot) != 0
    }

    /// Thing holding a slot.
    #[must_use]
    pub const fn thing(&self, slot: u8) -> Option<ThingId> {
        self.things[slot as usize]
    }

    /// Number of free slots.
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.free as usize
    }

    /// Whether every slot is taken.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.free == 0
    }

    /// Raw free bitmap, one bit per slot.
    #[must_use]
    pub const fn bitmap(&self) -> &[u64; WORDS] {
        &self.bitmap
    }

    const fn mask(slot: u8) -> u64 {
        1 << (slot as usize % WORD_BITS)
    }
}

impl std::fmt::Debug for IdBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdBucket")
            .field("free", &self.free)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use realm_thing::Generation;

    use super::*;

    fn id(index: u32) -> ThingId {
        ThingId::new(index, Generation::new())
    }

    #[test]
    fn test_sequential_allocation() {
        let mut bucket = IdBucket::new();

        for expected in 0..=255u8 {
            assert_eq!(bucket.allocate(id(expected.into())), Some(expected));
        }
        assert!(bucket.is_full());
        assert_eq!(bucket.allocate(id(999)), None);
    }

    #[test]
    fn test_release_and_reuse() {
        let mut bucket = IdBucket::new();
        for i in 0..256 {
            bucket.allocate(id(i));
        }

        bucket.deallocate(100);
        assert_eq!(bucket.free_count(), 1);
        assert!(bucket.thing(100).is_none());

        // Hint wrapped to 0, which is taken: the scan finds 100
        assert_eq!(bucket.allocate(id(1000)), Some(100));
        assert_eq!(bucket.thing(100), Some(id(1000)));
    }

    #[test]
    fn test_hint_probed_first() {
        let mut bucket = IdBucket::new();
        for i in 0..10 {
            bucket.allocate(id(i));
        }

        // 3 is lower, but the hint (10) is free and wins
        bucket.deallocate(3);
        assert_eq!(bucket.allocate(id(50)), Some(10));
        assert_eq!(bucket.allocate(id(51)), Some(11));
    }

    #[test]
    fn test_scan_starts_at_hint_word() {
        let mut bucket = IdBucket::new();
        for i in 0..=255 {
            bucket.allocate(id(i));
        }
        // Park the hint in the last word, on a taken slot
        bucket.deallocate(240);
        assert_eq!(bucket.allocate(id(300)), Some(240));

        // 5 is lower, but the scan starts in the hint's word
        bucket.deallocate(5);
        bucket.deallocate(250);
        assert_eq!(bucket.allocate(id(301)), Some(250));
        assert_eq!(bucket.allocate(id(302)), Some(5));
    }

    #[test]
    fn test_allocate_release_restores_bitmap() {
        let mut bucket = IdBucket::new();
        for i in 0..37 {
            bucket.allocate(id(i));
        }
        bucket.deallocate(12);
        let before = *bucket.bitmap();

        let slot = bucket.allocate(id(77)).unwrap();
        assert_ne!(*bucket.bitmap(), before);
        bucket.deallocate(slot);

        assert_eq!(*bucket.bitmap(), before);
        assert_eq!(bucket.free_count(), 256 - 36);
    }
}
