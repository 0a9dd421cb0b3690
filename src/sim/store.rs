//! Entity store
//!
//! Owns every live entity. Ids are handed out in increasing order and never
//! reused, so iterating the map walks entities in creation order.

use std::collections::BTreeMap;

use glam::Vec2;
use thiserror::Error;

use super::entity::{Entity, EntityId, EntityKind, Sprite};

/// Store lookup failures. Both indicate a broken invariant, not a game event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entity {0} not found")]
    NotFound(EntityId),
    #[error("expected exactly one {kind:?} entity, found {found}")]
    AmbiguousSingleton { kind: EntityKind, found: usize },
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create an entity at rest and return its id
    pub fn create(&mut self, kind: EntityKind, pos: Vec2, radius: f32, sprite: Sprite) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities
            .insert(id, Entity::new(id, kind, pos, radius, sprite));
        id
    }

    pub fn get(&self, id: EntityId) -> Result<&Entity, StoreError> {
        self.entities.get(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity, StoreError> {
        self.entities.get_mut(&id).ok_or(StoreError::NotFound(id))
    }

    /// Id of the single entity of `kind` (used for the player and the fan)
    pub fn singleton_id(&self, kind: EntityKind) -> Result<EntityId, StoreError> {
        let mut matches = self.entities.values().filter(|e| e.kind == kind);
        match (matches.next(), matches.next()) {
            (Some(entity), None) => Ok(entity.id),
            _ => Err(StoreError::AmbiguousSingleton {
                kind,
                found: self.count(kind),
            }),
        }
    }

    pub fn get_by_type(&self, kind: EntityKind) -> Result<&Entity, StoreError> {
        let id = self.singleton_id(kind)?;
        self.get(id)
    }

    pub fn get_by_type_mut(&mut self, kind: EntityKind) -> Result<&mut Entity, StoreError> {
        let id = self.singleton_id(kind)?;
        self.get_mut(id)
    }

    /// Snapshot of ids currently tagged `kind`, in creation order.
    ///
    /// Passes iterate the snapshot, so re-tagging or destroying entries
    /// mid-pass never disturbs the walk.
    pub fn collect_ids(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub fn destroy(&mut self, id: EntityId) -> Result<Entity, StoreError> {
        self.entities.remove(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}
