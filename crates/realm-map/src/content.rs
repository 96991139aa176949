//! Spatial state of one map: zone grid, public IDs and thing registry.

use hashbrown::HashMap;
use realm_spatial::{ZoneGrid, ZoneId};
use realm_thing::{Point, PublicId, ThingArena, ThingId, ThingKind};

use crate::{MapConfig, ids::IdAllocator};

/// Registry record of a thing on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub thing: ThingId,
    pub kind: ThingKind,
    /// Zone the thing currently sits in; `None` for invisible things.
    pub zone: Option<ZoneId>,
    pub public_id: Option<PublicId>,
}

/// Everything a map tracks about the things on it.
#[derive(Debug)]
pub struct MapContent {
    grid: ZoneGrid,
    ids: IdAllocator,
    /// Every thing on the map, visible or not. Order is not meaningful.
    registry: Vec<Entry>,
    /// Position of each thing in `registry`.
    index: HashMap<ThingId, usize>,
}

impl MapContent {
    /// Empty content sized for a map.
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            grid: ZoneGrid::new(config.width, config.height, config.zone_size),
            ids: IdAllocator::new(),
            registry: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Zones of the map.
    #[must_use]
    pub const fn grid(&self) -> &ZoneGrid {
        &self.grid
    }

    /// Public ID allocator of the map.
    #[must_use]
    pub const fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Reserve a public ID for a movable thing.
    pub fn allocate(&mut self, thing: ThingId) -> Option<PublicId> {
        self.ids.allocate(thing)
    }

    /// Add a thing to the registry.
    ///
    /// With a position, the thing is also placed in the zone covering it.
    pub fn register(
        &mut self,
        thing: ThingId,
        kind: ThingKind,
        position: Option<Point>,
        public_id: Option<PublicId>,
    ) {
        debug_assert!(!self.index.contains_key(&thing), "{thing:?} registered twice");

        let zone = position.map(|p| self.grid.zone_at(p));
        if let Some(zone) = zone {
            self.grid.zone_mut(zone).insert(thing, kind);
        }

        self.index.insert(thing, self.registry.len());
        self.registry.push(Entry {
            thing,
            kind,
            zone,
            public_id,
        });
    }

    /// Remove a thing from its zone, release its public ID and drop it from
    /// the registry.
    ///
    /// The last registry entry takes the freed position.
    pub fn unregister(&mut self, thing: ThingId) -> Option<Entry> {
        let at = self.index.remove(&thing)?;
        let entry = self.registry.swap_remove(at);
        if let Some(moved) = self.registry.get(at) {
            self.index.insert(moved.thing, at);
        }

        if let Some(zone) = entry.zone {
            self.grid.zone_mut(zone).remove(thing, entry.kind);
        }
        if let Some(public_id) = entry.public_id {
            self.ids.deallocate(public_id);
        }
        Some(entry)
    }

    /// Registry record of a thing.
    #[must_use]
    pub fn entry(&self, thing: ThingId) -> Option<&Entry> {
        self.index.get(&thing).map(|&at| &self.registry[at])
    }

    /// All registry records.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.registry
    }

    /// Move every visible movable thing that changed zone since the start of
    /// the tick, recording each crossing in the departure zone's
    /// destinations.
    ///
    /// Destinations of the previous tick are cleared first. Returns the
    /// number of zone changes.
    pub fn update(&mut self, things: &ThingArena) -> usize {
        self.grid.clear_destinations();

        let mut crossings = 0;
        for entry in &mut self.registry {
            let Some(src) = entry.zone else { continue };
            if !entry.kind.is_movable() {
                continue;
            }
            let Some(thing) = things.get(entry.thing) else {
                tracing::warn!("{:?} is registered but no longer alive", entry.thing);
                continue;
            };
            if !thing.has_moved() {
                continue;
            }
            debug_assert_eq!(
                src,
                self.grid.zone_at(thing.old_position()),
                "{:?} recorded in a zone other than its start-of-tick one",
                entry.thing
            );

            let dst = self.grid.zone_at(thing.position());
            if src == dst {
                continue;
            }

            // A thing missing from its recorded zone is left where it is.
            let zone = self.grid.zone_mut(src);
            if !zone.remove(entry.thing, entry.kind) {
                continue;
            }
            zone.add_destination(dst);
            tracing::trace!(
                "{:?} crossed {src:?} -> {dst:?} ({} -> {})",
                entry.thing,
                thing.old_position(),
                thing.position()
            );
            self.grid.zone_mut(dst).insert(entry.thing, entry.kind);
            entry.zone = Some(dst);
            crossings += 1;
        }
        crossings
    }

    /// Number of things on the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
