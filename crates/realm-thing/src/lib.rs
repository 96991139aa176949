//! Things placed on a map.
//!
//! A thing is any placeable object: characters, monsters, NPCs and fixed
//! objects such as dropped items. Things are owned by a [`ThingArena`] that
//! lives outside of any map; maps only hold [`ThingId`] handles and resolve
//! them through the arena on every access, so a map never keeps a dangling
//! reference to a thing that was despawned.
//!
//! # Key Concepts
//!
//! - **ThingId**: generational handle into the arena
//! - **ThingKind**: category tag, decides movability and zone segment
//! - **MapId**: back-reference to the map a thing currently resides on
//! - **PublicId**: compact per-map handle of a movable thing, used on the wire

mod arena;
mod geometry;
mod thing;

pub use arena::{Generation, ThingArena, ThingId};
pub use geometry::{Point, Rectangle};
pub use thing::{MapId, PublicId, Thing, ThingKind};
