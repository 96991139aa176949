//! Zone Partitioning
//!
//! Divides a map into a grid of square zones. Each zone keeps handles of the
//! things standing in it, grouped by category, so proximity queries only have
//! to visit the few zones around a point instead of the whole map.
//!
//! # Layout
//!
//! ```text
//!        zone.things
//! ┌────────────┬──────────────────┬─────────────┐
//! │ characters │ monsters & NPCs  │    fixed    │
//! └────────────┴──────────────────┴─────────────┘
//! 0       n_characters        n_moving        len
//! ```
//!
//! Queries build a [`Region`] (sorted zone set) and walk it with a
//! [`ZoneIter`], optionally narrowed to one segment with a [`ThingIter`].
//! Cursors borrow the grid, so the map cannot be mutated while one is alive.

pub mod grid;
pub mod iter;
pub mod region;
pub mod zone;

pub use grid::{DEFAULT_ZONE_SIZE, ZoneGrid};
pub use iter::{ThingIter, ZoneIter};
pub use region::Region;
pub use zone::{Segment, Zone, ZoneId};
