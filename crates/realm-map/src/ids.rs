//! Public ID allocation across buckets.

use realm_thing::{PublicId, ThingId};

use crate::bucket::IdBucket;

/// Maximum number of buckets on one map.
pub const MAX_BUCKETS: usize = 256;

/// Hands out public IDs for the movable things of one map.
///
/// Buckets are created lazily and strictly in index order: bucket `n` only
/// exists once bucket `n - 1` exists and was found full.
#[derive(Debug, Default)]
pub struct IdAllocator {
    buckets: Vec<IdBucket>,
    /// Bucket that served the previous allocation.
    last_bucket: usize,
}

impl IdAllocator {
    /// Allocator with no bucket yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: Vec::new(),
            last_bucket: 0,
        }
    }

    /// Allocate an ID for `thing`.
    ///
    /// Returns `None` once all 65536 IDs are in use.
    pub fn allocate(&mut self, thing: ThingId) -> Option<PublicId> {
        if let Some(slot) = self
            .buckets
            .get_mut(self.last_bucket)
            .and_then(|bucket| bucket.allocate(thing))
        {
            return Some(PublicId::new(self.last_bucket as u8, slot));
        }

        for index in 0..MAX_BUCKETS {
            if index == self.buckets.len() {
                tracing::debug!("creating id bucket {index}");
                self.buckets.push(IdBucket::new());
            }
            if let Some(slot) = self.buckets[index].allocate(thing) {
                self.last_bucket = index;
                return Some(PublicId::new(index as u8, slot));
            }
        }

        None
    }

    /// Release an ID. Releasing an ID that is not allocated is a caller bug.
    pub fn deallocate(&mut self, id: PublicId) {
        let bucket = self.buckets.get_mut(id.bucket() as usize);
        debug_assert!(bucket.is_some(), "{id:?} released from a bucket never created");
        match bucket {
            Some(bucket) => bucket.deallocate(id.slot()),
            None => tracing::error!("{id:?} released from a bucket never created"),
        }
    }

    /// Thing currently holding an ID.
    #[must_use]
    pub fn resolve(&self, id: PublicId) -> Option<ThingId> {
        self.buckets.get(id.bucket() as usize)?.thing(id.slot())
    }

    /// Whether a public ID is handed out.
    #[must_use]
    pub fn is_allocated(&self, id: PublicId) -> bool {
        self.buckets
            .get(id.bucket() as usize)
            .is_some_and(|bucket| !bucket.is_free(id.slot()))
    }

    /// Number of IDs currently in use.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| crate::bucket::BUCKET_SIZE - bucket.free_count())
            .sum()
    }

    /// Number of buckets created so far.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket by index, if created.
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<&IdBucket> {
        self.buckets.get(index)
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
    fn test_first_bucket_then_second() {
        let mut ids = IdAllocator::new();

        let allocated: Vec<_> = (0..300).map(|i| ids.allocate(id(i)).unwrap()).collect();

        for (i, public) in allocated.iter().enumerate().take(256) {
            assert_eq!(public.bucket(), 0);
            assert_eq!(public.get() as usize, i);
        }
        assert_eq!(allocated[256].get(), 256);
        assert_eq!(ids.bucket_count(), 2);
        assert_eq!(ids.allocated(), 300);
    }

    #[test]
    fn test_released_id_reused_before_new_bucket() {
        let mut ids = IdAllocator::new();
        for i in 0..300 {
            ids.allocate(id(i));
        }
        ids.deallocate(PublicId::from_raw(100));

        // Fill what is left of bucket 1, then the freed ID comes back
        // instead of a third bucket being created
        let mut next = ids.allocate(id(1000)).unwrap();
        let mut n = 1001;
        while next.bucket() == 1 {
            next = ids.allocate(id(n)).unwrap();
            n += 1;
        }
        assert_eq!(next.get(), 100);
        assert_eq!(ids.bucket_count(), 2);
    }

    #[test]
    fn test_last_bucket_preferred() {
        let mut ids = IdAllocator::new();
        for i in 0..256 {
            ids.allocate(id(i));
        }
        ids.deallocate(PublicId::from_raw(100));
        assert_eq!(ids.allocate(id(500)), Some(PublicId::from_raw(100)));
        assert_eq!(ids.bucket_count(), 1);
    }

    #[test]
    fn test_exhaustion() {
        let mut ids = IdAllocator::new();
        for i in 0..65536 {
            assert!(ids.allocate(id(i)).is_some());
        }
        assert_eq!(ids.bucket_count(), MAX_BUCKETS);
        assert_eq!(ids.allocate(id(70000)), None);

        ids.deallocate(PublicId::from_raw(40000));
        assert_eq!(ids.allocate(id(70001)), Some(PublicId::from_raw(40000)));
    }

    #[test]
    fn test_resolve() {
        let mut ids = IdAllocator::new();
        let public = ids.allocate(id(42)).unwrap();

        assert_eq!(ids.resolve(public), Some(id(42)));
        assert!(ids.is_allocated(public));
        assert_eq!(ids.resolve(PublicId::from_raw(0x0500)), None);

        ids.deallocate(public);
        assert_eq!(ids.resolve(public), None);
        assert!(!ids.is_allocated(public));
    }
}
