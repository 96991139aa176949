//! Grid zones holding thing handles grouped by category.

use realm_thing::{ThingId, ThingKind};

use crate::Region;

/// Index of a zone in its grid (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

impl ZoneId {
    /// Create a zone ID from grid coordinates.
    #[must_use]
    pub const fn from_coords(x: u32, y: u32, grid_width: u32) -> Self {
        Self(y * grid_width + x)
    }

    /// Grid X coordinate.
    #[must_use]
    pub const fn x(self, grid_width: u32) -> u32 {
        self.0 % grid_width
    }

    /// Grid Y coordinate.
    #[must_use]
    pub const fn y(self, grid_width: u32) -> u32 {
        self.0 / grid_width
    }
}

/// Part of a zone a traversal is interested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Characters only.
    Characters,
    /// Every movable thing: characters, monsters and NPCs.
    Moving,
    /// Fixed things only.
    Fixed,
    /// Everything in the zone.
    All,
}

/// One grid cell.
///
/// `things` is split in three contiguous segments:
/// `[0, n_characters)` characters, `[n_characters, n_moving)` other movable
/// things, `[n_moving, len)` fixed things. Order inside a segment is not
/// stable across removals.
#[derive(Debug, Default)]
pub struct Zone {
    things: Vec<ThingId>,
    n_characters: usize,
    n_moving: usize,
    /// Zones that things leaving this zone moved into during the current tick.
    destinations: Region,
}

impl Zone {
    /// Empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a thing to the segment of its kind.
    ///
    /// Nothing is shifted: the element at each segment boundary the new thing
    /// has to cross is moved to the end of its own segment instead.
    pub fn insert(&mut self, thing: ThingId, kind: ThingKind) {
        self.things.push(thing);
        let last = self.things.len() - 1;

        match kind {
            ThingKind::Character => {
                // First fixed thing to the tail, first monster to the end of
                // the moving segment.
                self.things.swap(self.n_moving, last);
                self.things.swap(self.n_characters, self.n_moving);
                self.n_characters += 1;
                self.n_moving += 1;
            }
            ThingKind::Monster | ThingKind::Npc => {
                self.things.swap(self.n_moving, last);
                self.n_moving += 1;
            }
            ThingKind::Fixed => {}
        }
    }

    /// Remove a thing from the segment of its kind.
    ///
    /// Returns `false` if the thing is not in this zone, which means the
    /// caller broke the insert/remove pairing.
    pub fn remove(&mut self, thing: ThingId, kind: ThingKind) -> bool {
        let range = match kind {
            ThingKind::Character => 0..self.n_characters,
            ThingKind::Monster | ThingKind::Npc => self.n_characters..self.n_moving,
            ThingKind::Fixed => self.n_moving..self.things.len(),
        };

        let offset = self.things[range.clone()].iter().position(|&t| t == thing);
        debug_assert!(offset.is_some(), "{thing:?} ({kind:?}) is not in this zone");
        let Some(offset) = offset else {
            tracing::error!("{thing:?} ({kind:?}) is not in the zone it was recorded in");
            return false;
        };

        // Walk the hole to the tail, one segment boundary at a time.
        let mut pos = range.start + offset;
        if pos < self.n_characters {
            self.things.swap(pos, self.n_characters - 1);
            pos = self.n_characters - 1;
            self.n_characters -= 1;
        }
        if pos < self.n_moving {
            self.things.swap(pos, self.n_moving - 1);
            pos = self.n_moving - 1;
            self.n_moving -= 1;
        }
        self.things.swap_remove(pos);
        true
    }

    /// Things of one segment.
    #[must_use]
    pub fn segment(&self, segment: Segment) -> &[ThingId] {
        match segment {
            Segment::Characters => &self.things[..self.n_characters],
            Segment::Moving => &self.things[..self.n_moving],
            Segment::Fixed => &self.things[self.n_moving..],
            Segment::All => &self.things,
        }
    }

    /// All things: characters, then other movables, then fixed.
    #[must_use]
    pub fn things(&self) -> &[ThingId] {
        &self.things
    }

    /// Number of characters.
    #[must_use]
    pub const fn character_count(&self) -> usize {
        self.n_characters
    }

    /// Number of movable things, characters included.
    #[must_use]
    pub const fn moving_count(&self) -> usize {
        self.n_moving
    }

    /// Number of fixed things.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.things.len() - self.n_moving
    }

    /// Number of things in the zone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.things.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Whether a thing sits in this zone.
    #[must_use]
    pub fn contains(&self, thing: ThingId) -> bool {
        self.things.contains(&thing)
    }

    /// Zones things left into from here this tick.
    #[must_use]
    pub const fn destinations(&self) -> &Region {
        &self.destinations
    }

    /// Record that a thing left this zone for `zone` during this tick.
    pub fn add_destination(&mut self, zone: ZoneId) {
        self.destinations.insert(zone);
    }

    pub fn clear_destinations(&mut self) {
        self.destinations.clear();
    }
}
