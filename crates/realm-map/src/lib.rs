//! Map content tracking.
//!
//! Tracks every thing present on a map, keeps visible things sorted into a
//! grid of zones for proximity queries, and hands out reusable 16-bit public
//! IDs to movable things.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  MapManager                                                         │
//! │    - MapId -> MapComposite                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  MapComposite                                                       │
//! │    - insert / remove / update / queries                             │
//! │    - MapContent: ZoneGrid + IdAllocator + registry                  │
//! └─────────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  IdAllocator                                                        │
//! │    - up to 256 IdBuckets of 256 slots, created in order             │
//! │    - public id = bucket << 8 | slot                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut things = ThingArena::new();
//! let mut maps = MapManager::new();
//! let map = maps.load(MapId(1), "town", &MapConfig::from_tiles(100, 100))?;
//!
//! let hero = things.spawn(Thing::new(ThingKind::Character, Point::new(40, 40)));
//! map.insert(&mut things, hero)?;
//!
//! // Each tick: commit positions, move, update, then query
//! map.update(&things);
//! for other in map.around_moving(things.get(hero).unwrap(), 300).moving() {
//!     // ...
//! }
//! ```

pub mod bucket;
mod composite;
mod config;
mod content;
mod error;
pub mod ids;
mod manager;

pub use bucket::{BUCKET_SIZE, IdBucket};
pub use composite::MapComposite;
pub use config::{MAX_ZONES, MapConfig, TILE_SIZE};
pub use content::{Entry, MapContent};
pub use error::{MapError, MapResult};
pub use ids::{IdAllocator, MAX_BUCKETS};
pub use manager::MapManager;
