//! Per-map facade used by the rest of the server.

use realm_spatial::{Region, ZoneGrid, ZoneIter};
use realm_thing::{MapId, Point, PublicId, Rectangle, Thing, ThingArena, ThingId};

use crate::{MapConfig, MapError, MapResult, content::MapContent};

/// A loaded map and everything standing on it.
///
/// # Tick protocol
///
/// 1. Things start the tick with [`Thing::commit_position`] and move.
/// 2. [`MapComposite::update`] runs once, after all moves.
/// 3. Proximity queries for the tick are issued.
///
/// Cursors returned by the queries borrow the map, so they must be dropped
/// before the next insert, remove or update.
#[derive(Debug)]
pub struct MapComposite {
    id: MapId,
    name: String,
    config: MapConfig,
    content: MapContent,
}

impl MapComposite {
    /// Build an empty map. The config is expected to have passed
    /// [`MapConfig::validate`].
    #[must_use]
    pub fn new(id: MapId, name: impl Into<String>, config: &MapConfig) -> Self {
        Self {
            id,
            name: name.into(),
            config: config.clone(),
            content: MapContent::new(config),
        }
    }

    /// Identifier the map was loaded under.
    #[must_use]
    pub const fn id(&self) -> MapId {
        self.id
    }

    /// Human-readable map name, used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Config the map was built from.
    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Zones, public IDs and registry.
    #[must_use]
    pub const fn content(&self) -> &MapContent {
        &self.content
    }

    /// Zone grid of the map.
    #[must_use]
    pub const fn grid(&self) -> &ZoneGrid {
        self.content.grid()
    }

    /// Put a thing on the map.
    ///
    /// Visible movable things get a public ID first; when none is left the
    /// thing is not placed anywhere and [`MapError::IdsExhausted`] is
    /// returned. Invisible things are only registered, never placed in a
    /// zone.
    pub fn insert(&mut self, things: &mut ThingArena, id: ThingId) -> MapResult<Option<PublicId>> {
        let thing = things.get_mut(id).ok_or(MapError::UnknownThing(id))?;
        if let Some(map) = thing.map() {
            return Err(MapError::AlreadyOnMap { thing: id, map });
        }

        let public_id = if thing.is_visible() && thing.is_movable() {
            let Some(public_id) = self.content.allocate(id) else {
                tracing::warn!("{}: no public id left for {id:?}", self.name);
                return Err(MapError::IdsExhausted { map: self.id });
            };
            Some(public_id)
        } else {
            None
        };

        let position = thing.is_visible().then(|| thing.position());
        self.content.register(id, thing.kind(), position, public_id);
        thing.attach(self.id, public_id);
        Ok(public_id)
    }

    /// Take a thing off the map, releasing its zone slot and public ID.
    ///
    /// Works from the registry record, so a thing that moved since the last
    /// update or whose handle went stale is still cleaned up.
    pub fn remove(&mut self, things: &mut ThingArena, id: ThingId) -> MapResult<()> {
        self.content.unregister(id).ok_or(MapError::NotOnMap {
            thing: id,
            map: self.id,
        })?;

        match things.get_mut(id) {
            Some(thing) => thing.detach(),
            None => tracing::warn!("{}: removed stale {id:?}", self.name),
        }
        Ok(())
    }

    /// Per-tick zone bookkeeping. Returns the number of zone changes.
    pub fn update(&mut self, things: &ThingArena) -> usize {
        let crossings = self.content.update(things);
        if crossings > 0 {
            tracing::debug!("{}: {crossings} zone crossings", self.name);
        }
        crossings
    }

    /// Remove every thing from the map, clearing their back-references.
    ///
    /// Zones and public IDs are dropped wholesale rather than released one
    /// by one. Returns the handles that were on the map.
    pub fn clear(&mut self, things: &mut ThingArena) -> Vec<ThingId> {
        let ids: Vec<_> = self.content.entries().iter().map(|e| e.thing).collect();
        for &id in &ids {
            if let Some(thing) = things.get_mut(id) {
                thing.detach();
            }
        }
        self.content = MapContent::new(&self.config);
        ids
    }

    /// Zones around a point, within `radius` pixels on each axis.
    #[must_use]
    pub fn around_point(&self, center: Point, radius: u32) -> ZoneIter<'_> {
        let mut region = Region::new();
        self.grid().fill_region(&mut region, center, radius);
        ZoneIter::new(self.grid(), region)
    }

    /// Zones around a thing's current position.
    #[must_use]
    pub fn around_thing(&self, thing: &Thing, radius: u32) -> ZoneIter<'_> {
        self.around_point(thing.position(), radius)
    }

    /// Zones overlapping a rectangle.
    #[must_use]
    pub fn inside_rectangle(&self, rect: &Rectangle) -> ZoneIter<'_> {
        let mut region = Region::new();
        self.grid().fill_region_rect(&mut region, rect);
        ZoneIter::new(self.grid(), region)
    }

    /// Zones a moving thing may have gained sight of this tick.
    ///
    /// Covers the area around the start-of-tick position, every zone things
    /// left into from that area during this tick, and the area around the
    /// current position. This over-selects, but catches a thing that crossed
    /// a zone border this tick in the opposite direction. It is not proven
    /// complete for things crossing more than one border in a tick.
    #[must_use]
    pub fn around_moving(&self, thing: &Thing, radius: u32) -> ZoneIter<'_> {
        let grid = self.grid();

        let mut before = Region::new();
        grid.fill_region(&mut before, thing.old_position(), radius);

        let mut region = before.clone();
        for zone in before.iter() {
            region.union_with(grid.zone(zone).destinations());
        }

        grid.fill_region(&mut region, thing.position(), radius);
        ZoneIter::new(grid, region)
    }

    /// Every zone of the map.
    #[must_use]
    pub fn whole_map(&self) -> ZoneIter<'_> {
        ZoneIter::whole_map(self.grid())
    }

    /// Every thing on the map, visible or not, in no particular order.
    pub fn everything(&self) -> impl Iterator<Item = ThingId> + '_ {
        self.content.entries().iter().map(|e| e.thing)
    }

    /// Thing holding a public ID on this map.
    #[must_use]
    pub fn thing_by_public_id(&self, id: PublicId) -> Option<ThingId> {
        self.content.ids().resolve(id)
    }

    /// Whether a thing is on this map, visible or not.
    #[must_use]
    pub fn contains(&self, id: ThingId) -> bool {
        self.content.entry(id).is_some()
    }

    /// Number of things on the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
