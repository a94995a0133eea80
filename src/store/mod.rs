use std::collections::BTreeMap;

use log::debug;

use crate::error::StoreError;
use crate::model::{EntityKind, NamedEntity};

/// Identifier assigned by the object store when an entity is inserted.
pub type EntityId = i64;

/// The external object store the engine stores entities in and checks
/// duplicates against.
///
/// The engine only needs lookup by id, lookup by name within a type, a full
/// scan of a type (for back-reference collections), insert, update and
/// delete. The store is expected to serialize its own writes; the engine is
/// single-threaded per import.
pub trait ObjectStore {
    fn find_by_id(&self, id: EntityId) -> Option<NamedEntity>;

    /// All stored entities of `kind` whose name matches exactly. Names are
    /// not necessarily unique, so this can return more than one.
    fn find_by_name(&self, kind: EntityKind, name: &str) -> Vec<(EntityId, NamedEntity)>;

    /// All stored entities of `kind`, in insertion order.
    fn find_all(&self, kind: EntityKind) -> Vec<(EntityId, NamedEntity)>;

    fn insert(&mut self, entity: NamedEntity) -> Result<EntityId, StoreError>;

    fn update(&mut self, id: EntityId, entity: NamedEntity) -> Result<(), StoreError>;

    fn delete(&mut self, id: EntityId) -> Result<(), StoreError>;
}

/// In-memory object store used by the CLI and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: BTreeMap<EntityId, NamedEntity>,
    next_id: EntityId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All stored entities in id order, for dumps and assertions.
    pub fn entities(&self) -> Vec<&NamedEntity> {
        self.entities.values().collect()
    }
}

impl ObjectStore for MemoryStore {
    fn find_by_id(&self, id: EntityId) -> Option<NamedEntity> {
        self.entities.get(&id).cloned()
    }

    fn find_by_name(&self, kind: EntityKind, name: &str) -> Vec<(EntityId, NamedEntity)> {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind() == kind && e.name() == name)
            .map(|(id, e)| (*id, e.clone()))
            .collect()
    }

    fn find_all(&self, kind: EntityKind) -> Vec<(EntityId, NamedEntity)> {
        self.entities
            .iter()
            .filter(|(_, e)| e.kind() == kind)
            .map(|(id, e)| (*id, e.clone()))
            .collect()
    }

    fn insert(&mut self, mut entity: NamedEntity) -> Result<EntityId, StoreError> {
        self.next_id += 1;
        let id = self.next_id;
        entity.set_id(id);
        debug!("Storing {:?} \"{}\" as id {}", entity.kind(), entity.name(), id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    fn update(&mut self, id: EntityId, entity: NamedEntity) -> Result<(), StoreError> {
        if !self.entities.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    fn delete(&mut self, id: EntityId) -> Result<(), StoreError> {
        debug!("Deleting entity id {}", id);
        self.entities
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
