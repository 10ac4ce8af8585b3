//! Collision Registry
//!
//! Flat, ordered collection of bounding boxes with linear-scan queries.
//!
//! Boxes live in a generation-checked slot arena. A [`BoxHandle`] stays valid
//! until its own box is removed; removing other boxes never shifts it, and a
//! stale handle resolves to nothing instead of aliasing a newer box.
//!
//! Registration order is kept separately and is the tie-break for every
//! "first match" query. All queries are read-only and O(n).

use serde::{Serialize, Deserialize};
use tracing::trace;

use crate::game::bbox::BoundingBox;

/// Stable handle to a registered box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoxHandle {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entry: Option<BoundingBox>,
}

/// Ordered registry of bounding boxes.
#[derive(Clone, Debug, Default)]
pub struct CollisionRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<BoxHandle>,
}

impl CollisionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a box at the end of the query order.
    pub fn add(&mut self, bbox: BoundingBox) -> BoxHandle {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(bbox);
                BoxHandle { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, entry: Some(bbox) });
                BoxHandle { index, generation: 0 }
            }
        };

        self.order.push(handle);
        handle
    }

    /// Remove a box. Unknown or stale handles are a no-op.
    pub fn remove(&mut self, handle: BoxHandle) -> Option<BoundingBox> {
        let slot = match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation && slot.entry.is_some() => slot,
            _ => {
                trace!("remove: no box for {:?}", handle);
                return None;
            }
        };

        let removed = slot.entry.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.order.retain(|h| *h != handle);
        removed
    }

    /// Remove the first registered box with this id. Unknown ids are a no-op.
    pub fn remove_by_id(&mut self, id: &str) -> Option<BoundingBox> {
        match self.handle_of(id) {
            Some(handle) => self.remove(handle),
            None => {
                trace!("remove_by_id: no box with id {:?}", id);
                None
            }
        }
    }

    /// Look up a box.
    pub fn get(&self, handle: BoxHandle) -> Option<&BoundingBox> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    /// Look up a box mutably.
    pub fn get_mut(&mut self, handle: BoxHandle) -> Option<&mut BoundingBox> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Is this handle still live?
    pub fn contains(&self, handle: BoxHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Handle of the first registered box with this id.
    pub fn handle_of(&self, id: &str) -> Option<BoxHandle> {
        self.iter()
            .find(|(_, bbox)| bbox.id() == id)
            .map(|(handle, _)| handle)
    }

    /// First registered box with this id.
    pub fn get_by_id(&self, id: &str) -> Option<&BoundingBox> {
        self.iter().find(|(_, bbox)| bbox.id() == id).map(|(_, bbox)| bbox)
    }

    /// Move a box. Returns false for unknown handles.
    pub fn set_position(&mut self, handle: BoxHandle, x: i32, y: i32) -> bool {
        match self.get_mut(handle) {
            Some(bbox) => {
                bbox.update_position(x, y);
                true
            }
            None => false,
        }
    }

    /// Activate or deactivate a box. Returns false for unknown handles.
    pub fn set_active(&mut self, handle: BoxHandle, active: bool) -> bool {
        match self.get_mut(handle) {
            Some(bbox) => {
                bbox.set_active(active);
                true
            }
            None => false,
        }
    }

    /// First other box overlapping the registered box `handle`.
    ///
    /// Self-exclusion is by identity: a distinct box with identical
    /// geometry still counts.
    pub fn first_collision(&self, handle: BoxHandle) -> Option<BoxHandle> {
        let probe = self.get(handle)?;
        self.overlapping(probe, Some(handle)).next()
    }

    /// Every other box overlapping the registered box `handle`, in registration order.
    pub fn all_collisions(&self, handle: BoxHandle) -> Vec<BoxHandle> {
        match self.get(handle) {
            Some(probe) => self.overlapping(probe, Some(handle)).collect(),
            None => Vec::new(),
        }
    }

    /// First box overlapping an unregistered probe.
    pub fn first_collision_with(&self, probe: &BoundingBox) -> Option<BoxHandle> {
        self.overlapping(probe, None).next()
    }

    /// Every box overlapping an unregistered probe, in registration order.
    pub fn all_collisions_with(&self, probe: &BoundingBox) -> Vec<BoxHandle> {
        self.overlapping(probe, None).collect()
    }

    /// First active box containing the point (inclusive edges).
    pub fn first_point_hit(&self, x: i32, y: i32) -> Option<BoxHandle> {
        self.iter()
            .find(|(_, bbox)| bbox.contains_point(x, y))
            .map(|(handle, _)| handle)
    }

    /// Boxes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxHandle, &BoundingBox)> + '_ {
        self.order
            .iter()
            .filter_map(move |handle| self.get(*handle).map(|bbox| (*handle, bbox)))
    }

    /// Ids of the given handles, skipping stale ones.
    pub fn ids_of(&self, handles: &[BoxHandle]) -> Vec<String> {
        handles
            .iter()
            .filter_map(|h| self.get(*h))
            .map(|bbox| bbox.id().to_string())
            .collect()
    }

    /// Number of registered boxes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every box. All outstanding handles go stale.
    pub fn clear(&mut self) {
        for handle in std::mem::take(&mut self.order) {
            let slot = &mut self.slots[handle.index as usize];
            slot.entry = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(handle.index);
        }
    }

    fn overlapping<'a>(
        &'a self,
        probe: &'a BoundingBox,
        exclude: Option<BoxHandle>,
    ) -> impl Iterator<Item = BoxHandle> + 'a {
        self.iter()
            .filter(move |(handle, _)| Some(*handle) != exclude)
            .filter(move |(_, other)| probe.collides_with(other))
            .map(|(handle, _)| handle)
    }
}
