use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use abysspath_common::EntityId;
use glam::Vec2;

use crate::entity::{is_abyss_category, EntitySighting, TrackedEntity};

/// Tracked entities sorted by descending id, taken once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawOrder {
    entities: Vec<TrackedEntity>,
}

impl DrawOrder {
    /// Sort an arbitrary set of entities into draw order.
    pub fn from_entities(mut entities: Vec<TrackedEntity>) -> Self {
        entities.sort_by(|a, b| b.id.cmp(&a.id));
        Self { entities }
    }

    pub fn as_slice(&self) -> &[TrackedEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }
}

/// The set of abyss entities in the current area.
///
/// All methods take `&self`; the set sits behind a mutex so the host can
/// deliver removals from its own thread while a frame is being built.
#[derive(Debug, Default)]
pub struct EntityTracker {
    entities: Mutex<BTreeMap<EntityId, TrackedEntity>>,
}

impl EntityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // Plain data; a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<EntityId, TrackedEntity>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track a newly seen entity if it is part of an abyss path.
    ///
    /// Returns whether the entity is now tracked. Seeing a tracked id again
    /// replaces its data.
    pub fn on_entity_seen(&self, sighting: EntitySighting) -> bool {
        if !is_abyss_category(&sighting.category) {
            tracing::trace!(id = %sighting.id, category = %sighting.category, "ignoring entity");
            return false;
        }
        tracing::debug!(
            id = %sighting.id,
            category = %sighting.category,
            grid = ?sighting.grid,
            "tracking abyss entity"
        );
        self.lock().insert(sighting.id, sighting.into());
        true
    }

    /// Stop tracking an entity. Returns the entity if it was tracked.
    pub fn on_entity_removed(&self, id: EntityId) -> Option<TrackedEntity> {
        let removed = self.lock().remove(&id);
        if removed.is_some() {
            tracing::debug!(%id, "abyss entity removed");
        }
        removed
    }

    /// Drop everything; ids do not carry over between areas.
    pub fn on_area_changed(&self) {
        let mut entities = self.lock();
        tracing::debug!(cleared = entities.len(), "area changed, clearing tracked entities");
        entities.clear();
    }

    /// Record a grid position the host resolved after first sighting.
    pub fn update_position(&self, id: EntityId, grid: Vec2) -> bool {
        match self.lock().get_mut(&id) {
            Some(entity) => {
                entity.grid = grid;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.lock().contains_key(&id)
    }

    #[cfg(test)]
    fn get(&self, id: EntityId) -> Option<TrackedEntity> {
        self.lock().get(&id).cloned()
    }

    /// Copy of the tracked entities, in ascending id order.
    pub fn snapshot(&self) -> Vec<TrackedEntity> {
        self.lock().values().cloned().collect()
    }

    /// Consistent draw order for this frame. The lock is released before sorting.
    pub fn draw_order(&self) -> DrawOrder {
        DrawOrder::from_entities(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn node(id: u64, x: f32, y: f32) -> EntitySighting {
        EntitySighting::new(
            id,
            "Metadata/MiscellaneousObjects/Abyss/AbyssNodeSmall",
            Vec2::new(x, y),
        )
    }

    #[test]
    fn tracker_starts_empty() {
        let t = EntityTracker::new();
        assert!(t.is_empty());
        assert!(t.draw_order().is_empty());
    }

    #[test]
    fn seen_abyss_entity_is_tracked() {
        let t = EntityTracker::new();
        assert!(t.on_entity_seen(node(5, 1.0, 1.0)));
        assert_eq!(t.len(), 1);
        assert!(t.contains(EntityId(5)));
    }

    #[test]
    fn unrelated_and_mini_entities_are_ignored() {
        let t = EntityTracker::new();
        assert!(!t.on_entity_seen(EntitySighting::new(
            1,
            "Metadata/Monsters/Zombie",
            Vec2::ONE
        )));
        assert!(!t.on_entity_seen(EntitySighting::new(
            2,
            "Metadata/MiscellaneousObjects/Abyss/AbyssNodeMini",
            Vec2::ONE
        )));
        assert!(t.is_empty());
    }

    #[test]
    fn seeing_same_id_twice_keeps_one_entry() {
        let t = EntityTracker::new();
        t.on_entity_seen(node(3, 1.0, 1.0));
        t.on_entity_seen(node(3, 9.0, 9.0));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(EntityId(3)).unwrap().grid, Vec2::new(9.0, 9.0));
    }

    #[test]
    fn add_then_remove_round_trip() {
        let t = EntityTracker::new();
        t.on_entity_seen(node(1, 1.0, 1.0));
        let before = t.len();

        t.on_entity_seen(node(2, 2.0, 2.0));
        let removed = t.on_entity_removed(EntityId(2));
        assert_eq!(removed.map(|e| e.id), Some(EntityId(2)));

        assert_eq!(t.len(), before);
        assert!(!t.draw_order().contains(EntityId(2)));
    }

    #[test]
    fn removing_unknown_id_is_noop() {
        let t = EntityTracker::new();
        t.on_entity_seen(node(1, 1.0, 1.0));
        assert!(t.on_entity_removed(EntityId(99)).is_none());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn area_change_clears_everything() {
        let t = EntityTracker::new();
        for id in 0..10 {
            t.on_entity_seen(node(id, id as f32, 0.0));
        }
        t.on_area_changed();
        assert!(t.is_empty());
        assert!(t.draw_order().is_empty());
    }

    #[test]
    fn draw_order_is_descending_by_id() {
        let t = EntityTracker::new();
        for id in [4, 17, 2, 9] {
            t.on_entity_seen(node(id, 1.0, 1.0));
        }
        let order = t.draw_order();
        assert_eq!(
            order.ids(),
            vec![EntityId(17), EntityId(9), EntityId(4), EntityId(2)]
        );
    }

    #[test]
    fn draw_order_is_permutation_of_tracked_set() {
        let t = EntityTracker::new();
        for id in 0..25 {
            t.on_entity_seen(node(id * 7 % 25, 1.0, 1.0));
        }
        t.on_entity_removed(EntityId(3));
        let mut ids = t.draw_order().ids();
        ids.sort();
        let tracked: Vec<EntityId> = t.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, tracked);
    }

    #[test]
    fn update_position_only_touches_tracked() {
        let t = EntityTracker::new();
        t.on_entity_seen(node(1, 0.0, 0.0));
        assert!(t.update_position(EntityId(1), Vec2::new(4.0, 5.0)));
        assert!(!t.update_position(EntityId(2), Vec2::new(4.0, 5.0)));
        assert_eq!(t.get(EntityId(1)).unwrap().grid, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn removal_from_another_thread() {
        let t = Arc::new(EntityTracker::new());
        for id in 0..200 {
            t.on_entity_seen(node(id, 1.0 + id as f32, 1.0));
        }

        let remover = {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                for id in (0..200).step_by(2) {
                    t.on_entity_removed(EntityId(id));
                }
            })
        };

        // Draw orders taken mid-removal are still sorted and duplicate-free.
        for _ in 0..50 {
            let ids = t.draw_order().ids();
            assert!(ids.windows(2).all(|w| w[0] > w[1]));
        }

        remover.join().unwrap();
        assert_eq!(t.len(), 100);
        assert!(t.draw_order().ids().iter().all(|id| id.0 % 2 == 1));
    }
}
