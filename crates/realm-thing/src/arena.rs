//! Thing storage with generational handles.
//!
//! Handles use a generational index so slots can be reused while stale
//! handles held by maps or scripts are detected instead of aliasing a new
//! thing.

use std::fmt;

use crate::Thing;

/// Generation counter to detect stale thing handles.
/// Incremented each time a slot is recycled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u32);

impl Generation {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Handle of a thing in a [`ThingArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThingId {
    index: u32,
    generation: Generation,
}

impl ThingId {
    /// Handle from its parts.
    #[must_use]
    pub const fn new(index: u32, generation: Generation) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when the handle was issued.
    #[must_use]
    pub const fn generation(self) -> Generation {
        self.generation
    }
}

impl fmt::Debug for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thing({}v{})", self.index, self.generation.0)
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation.0)
    }
}

struct Slot {
    generation: Generation,
    thing: Option<Thing>,
}

/// Owner of every thing in the game world.
///
/// Maintains a free list of recycled slots; the generation of a slot is
/// bumped on despawn so old handles stop resolving.
#[derive(Default)]
pub struct ThingArena {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    alive_count: u32,
}

impl ThingArena {
    /// Empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            alive_count: 0,
        }
    }

    /// Empty arena with room for `capacity` things.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity / 4),
            alive_count: 0,
        }
    }

    /// Store a thing and return its handle.
    pub fn spawn(&mut self, thing: Thing) -> ThingId {
        self.alive_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.thing = Some(thing);
            ThingId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            let generation = Generation::new();
            self.slots.push(Slot {
                generation,
                thing: Some(thing),
            });
            ThingId::new(index, generation)
        }
    }

    /// Remove a thing, making its slot available for reuse.
    ///
    /// The thing should have been removed from its map first; a thing that
    /// still carries a map back-reference leaves a stale entry in that map's
    /// registry until the map removes it.
    pub fn despawn(&mut self, id: ThingId) -> Option<Thing> {
        let slot = self.slot_mut(id)?;
        let thing = slot.thing.take()?;
        slot.generation = slot.generation.next();

        if let Some(map) = thing.map() {
            tracing::warn!("{id:?} despawned while still on {map}");
        }

        self.free_list.push(id.index());
        self.alive_count -= 1;
        Some(thing)
    }

    /// Thing behind a handle, if still alive.
    #[must_use]
    pub fn get(&self, id: ThingId) -> Option<&Thing> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation == id.generation() {
            slot.thing.as_ref()
        } else {
            None
        }
    }

    /// Thing behind a handle, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: ThingId) -> Option<&mut Thing> {
        self.slot_mut(id)?.thing.as_mut()
    }

    /// Whether a handle still points at a live thing.
    #[must_use]
    pub fn is_alive(&self, id: ThingId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live things.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.alive_count as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    /// Iterate over all live things.
    pub fn iter(&self) -> impl Iterator<Item = (ThingId, &Thing)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let thing = slot.thing.as_ref()?;
            Some((ThingId::new(index as u32, slot.generation), thing))
        })
    }

    /// Iterate mutably over all live things.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ThingId, &mut Thing)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            let thing = slot.thing.as_mut()?;
            Some((ThingId::new(index as u32, generation), thing))
        })
    }

    fn slot_mut(&mut self, id: ThingId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        (slot.generation == id.generation()).then_some(slot)
    }
}
