//! Registry of loaded maps.

use hashbrown::HashMap;
use realm_thing::{MapId, ThingArena};

use crate::{MapComposite, MapConfig, MapError, MapResult};

/// Owns every loaded map.
///
/// Spatial state is built when a map loads and dropped when it unloads;
/// maps never share zones, buckets or things.
#[derive(Debug, Default)]
pub struct MapManager {
    maps: HashMap<MapId, MapComposite>,
}

impl MapManager {
    /// Manager with no map loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a map.
    pub fn load(
        &mut self,
        id: MapId,
        name: impl Into<String>,
        config: &MapConfig,
    ) -> MapResult<&mut MapComposite> {
        config.validate()?;
        if self.maps.contains_key(&id) {
            return Err(MapError::MapAlreadyLoaded(id));
        }

        let map = MapComposite::new(id, name, config);
        tracing::debug!(
            "loaded {id} ({}): {}x{} zones of {}px",
            map.name(),
            map.grid().width(),
            map.grid().height(),
            config.zone_size
        );
        Ok(self.maps.entry(id).or_insert(map))
    }

    /// Unload a map, detaching every thing still on it.
    pub fn unload(&mut self, id: MapId, things: &mut ThingArena) -> MapResult<MapComposite> {
        let mut map = self.maps.remove(&id).ok_or(MapError::MapNotLoaded(id))?;
        let detached = map.clear(things);
        tracing::debug!("unloaded {id} ({}), detached {} things", map.name(), detached.len());
        Ok(map)
    }

    /// Loaded map by ID.
    #[must_use]
    pub fn get(&self, id: MapId) -> Option<&MapComposite> {
        self.maps.get(&id)
    }

    /// Loaded map by ID, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: MapId) -> Option<&mut MapComposite> {
        self.maps.get_mut(&id)
    }

    /// Run the per-tick update of every loaded map.
    ///
    /// Returns the total number of zone changes.
    pub fn update_all(&mut self, things: &ThingArena) -> usize {
        self.maps.values_mut().map(|map| map.update(things)).sum()
    }

    /// Every loaded map, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &MapComposite> {
        self.maps.values()
    }

    /// Number of loaded maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
