//! Thing records and the identifiers attached to them.

use std::fmt;

use crate::Point;

/// Identifier of a loaded map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

/// Per-map handle of a movable thing.
///
/// The high byte is the bucket index, the low byte the slot inside the
/// bucket. A public ID is unique among the movable things currently on one
/// map and is handed out again as soon as it is released.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicId(u16);

impl PublicId {
    /// ID of `slot` in `bucket`.
    #[must_use]
    pub const fn new(bucket: u8, slot: u8) -> Self {
        Self(((bucket as u16) << 8) | slot as u16)
    }

    /// ID from its wire value.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw 16-bit value as sent over the wire.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Bucket index, the high byte.
    #[must_use]
    pub const fn bucket(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Slot within the bucket, the low byte.
    #[must_use]
    pub const fn slot(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Debug for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicId({}:{})", self.bucket(), self.slot())
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a thing.
///
/// Zones keep their things grouped by category, so the kind decides which
/// segment of a zone a thing lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThingKind {
    /// A player character.
    Character,
    /// A monster.
    Monster,
    /// A non-player character.
    Npc,
    /// Anything that never moves (dropped items, effects, ...).
    Fixed,
}

impl ThingKind {
    /// Movable things can change position between ticks and hold a public ID.
    #[must_use]
    pub const fn is_movable(self) -> bool {
        !matches!(self, Self::Fixed)
    }
}

/// A placeable object.
#[derive(Clone, Debug)]
pub struct Thing {
    kind: ThingKind,
    visible: bool,
    position: Point,
    /// Position at the start of the current tick.
    old_position: Point,
    map: Option<MapId>,
    public_id: Option<PublicId>,
}

impl Thing {
    /// Create a visible thing standing still at `position`.
    #[must_use]
    pub const fn new(kind: ThingKind, position: Point) -> Self {
        Self {
            kind,
            visible: true,
            position,
            old_position: position,
            map: None,
            public_id: None,
        }
    }

    /// Create a thing that is tracked by a map but never placed in a zone
    /// (triggers, spawn areas, scripts).
    #[must_use]
    pub const fn invisible(kind: ThingKind, position: Point) -> Self {
        Self {
            visible: false,
            ..Self::new(kind, position)
        }
    }

    /// Kind of thing.
    #[must_use]
    pub const fn kind(&self) -> ThingKind {
        self.kind
    }

    /// Invisible things are tracked but never placed in a zone.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn is_movable(&self) -> bool {
        self.kind.is_movable()
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Position at the start of the current tick.
    ///
    /// Fixed things always report their current position.
    #[must_use]
    pub const fn old_position(&self) -> Point {
        if self.kind.is_movable() {
            self.old_position
        } else {
            self.position
        }
    }

    /// Whether the thing moved since the start of the tick.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.old_position() != self.position
    }

    /// Move the thing.
    ///
    /// Fixed things keep both positions in sync, they are never relocated
    /// between zones.
    pub fn set_position(&mut self, position: Point) {
        if !self.kind.is_movable() {
            debug_assert!(self.map.is_none(), "fixed thing moved while on a map");
            self.old_position = position;
        }
        self.position = position;
    }

    /// Start a new tick: the current position becomes the old position.
    pub fn commit_position(&mut self) {
        self.old_position = self.position;
    }

    /// Map this thing currently resides on.
    #[must_use]
    pub const fn map(&self) -> Option<MapId> {
        self.map
    }

    /// Public ID on the current map, if movable and visible.
    #[must_use]
    pub const fn public_id(&self) -> Option<PublicId> {
        self.public_id
    }

    /// Record the map this thing was inserted into.
    ///
    /// Called by the map on insertion. The tick history restarts at the
    /// current position.
    pub fn attach(&mut self, map: MapId, public_id: Option<PublicId>) {
        self.commit_position();
        self.map = Some(map);
        self.public_id = public_id;
    }

    /// Clear the map back-reference and public ID.
    ///
    /// Called by the map on removal.
    pub fn detach(&mut self) {
        self.map = None;
        self.public_id = None;
    }
}
