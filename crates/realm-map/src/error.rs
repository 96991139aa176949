//! Map error types.

use realm_thing::{MapId, ThingId};
use thiserror::Error;

/// Map error type.
#[derive(Debug, Error)]
pub enum MapError {
    /// Every public ID of the map is in use. Recoverable: the caller decides
    /// whether to reject, queue or retry the insertion.
    #[error("no public id left on {map}")]
    IdsExhausted { map: MapId },

    /// Handle does not resolve in the thing arena.
    #[error("unknown thing: {0:?}")]
    UnknownThing(ThingId),

    /// Thing is already inserted into a map.
    #[error("{thing:?} is already on {map}")]
    AlreadyOnMap { thing: ThingId, map: MapId },

    /// Thing is not registered on this map.
    #[error("{thing:?} is not on {map}")]
    NotOnMap { thing: ThingId, map: MapId },

    #[error("map not loaded: {0}")]
    MapNotLoaded(MapId),

    #[error("map already loaded: {0}")]
    MapAlreadyLoaded(MapId),

    #[error("invalid map config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse map config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;
