//! Lazy cursors over the zones of a region.
//!
//! Cursors are single-pass: once exhausted they stay exhausted. They borrow
//! the [`ZoneGrid`], so the borrow checker rejects any insert, remove or
//! update on the map while a cursor is alive.

use std::iter::FusedIterator;

use realm_thing::ThingId;

use crate::{Region, Segment, Zone, ZoneGrid, ZoneId};

/// Walks the zones of a region in order.
///
/// An empty region walks every zone of the grid in row-major order.
#[derive(Debug)]
pub struct ZoneIter<'a> {
    grid: &'a ZoneGrid,
    region: Region,
    pos: usize,
}

impl<'a> ZoneIter<'a> {
    /// Cursor over the zones of `region`.
    #[must_use]
    pub fn new(grid: &'a ZoneGrid, region: Region) -> Self {
        Self {
            grid,
            region,
            pos: 0,
        }
    }

    /// Cursor over every zone of the grid.
    #[must_use]
    pub fn whole_map(grid: &'a ZoneGrid) -> Self {
        Self::new(grid, Region::new())
    }

    /// Zone under the cursor, or `None` once exhausted.
    #[must_use]
    pub fn current_id(&self) -> Option<ZoneId> {
        if self.region.is_empty() {
            (self.pos < self.grid.len()).then(|| ZoneId(self.pos as u32))
        } else {
            self.region.get(self.pos)
        }
    }

    /// Zone the cursor is on, if not exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&'a Zone> {
        let grid = self.grid;
        self.current_id().map(|id| grid.zone(id))
    }

    /// Region this cursor walks (empty for the whole map).
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Narrow to characters.
    #[must_use]
    pub fn characters(self) -> ThingIter<'a> {
        ThingIter::new(self, Segment::Characters)
    }

    /// Narrow to movable things (characters, monsters, NPCs).
    #[must_use]
    pub fn moving(self) -> ThingIter<'a> {
        ThingIter::new(self, Segment::Moving)
    }

    /// Narrow to fixed things.
    #[must_use]
    pub fn fixed(self) -> ThingIter<'a> {
        ThingIter::new(self, Segment::Fixed)
    }

    /// Every thing in the walked zones.
    #[must_use]
    pub fn things(self) -> ThingIter<'a> {
        ThingIter::new(self, Segment::All)
    }
}

impl<'a> Iterator for ZoneIter<'a> {
    type Item = &'a Zone;

    fn next(&mut self) -> Option<Self::Item> {
        let zone = self.current()?;
        self.pos += 1;
        Some(zone)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = if self.region.is_empty() {
            self.grid.len()
        } else {
            self.region.len()
        };
        let left = total.saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ZoneIter<'_> {}

impl FusedIterator for ZoneIter<'_> {}

/// Walks the things of one segment across the zones of a region.
///
/// Zones whose segment is empty are skipped using the zone's running
/// counts, without looking at their elements.
#[derive(Debug)]
pub struct ThingIter<'a> {
    zones: ZoneIter<'a>,
    segment: Segment,
    current: &'a [ThingId],
    pos: usize,
}

impl<'a> ThingIter<'a> {
    /// Cursor over one segment of the given zones.
    #[must_use]
    pub fn new(zones: ZoneIter<'a>, segment: Segment) -> Self {
        Self {
            zones,
            segment,
            current: &[],
            pos: 0,
        }
    }

    /// Segment this cursor yields.
    #[must_use]
    pub const fn segment(&self) -> Segment {
        self.segment
    }
}

impl Iterator for ThingIter<'_> {
    type Item = ThingId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&thing) = self.current.get(self.pos) {
                self.pos += 1;
                return Some(thing);
            }
            let zone = self.zones.next()?;
            self.current = zone.segment(self.segment);
            self.pos = 0;
        }
    }
}

impl FusedIterator for ThingIter<'_> {}
