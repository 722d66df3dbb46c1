//! Collection stores
//!
//! Each entity kind gets an ordered, in-memory list that lives only as long
//! as the session owning it. A `Persistence` collaborator can be injected;
//! the default one keeps nothing.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::{Entity, EntityId, EntityKind};

/// Backend a store mirrors its mutations into
///
/// Failures are logged and never undo the in-memory change.
pub trait Persistence: Send {
    fn load(&mut self) -> Result<Vec<Entity>>;
    fn save(&mut self, entity: &Entity) -> Result<()>;
    fn delete_by_id(&mut self, id: &EntityId) -> Result<()>;
}

/// Keeps nothing: the collection is gone with the session
#[derive(Debug, Default)]
pub struct Volatile;

impl Persistence for Volatile {
    fn load(&mut self) -> Result<Vec<Entity>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _entity: &Entity) -> Result<()> {
        Ok(())
    }

    fn delete_by_id(&mut self, _id: &EntityId) -> Result<()> {
        Ok(())
    }
}

/// Ordered collection of one entity kind, in insertion order
pub struct CollectionStore {
    kind: EntityKind,
    entities: Vec<Entity>,
    persistence: Box<dyn Persistence>,
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("kind", &self.kind)
            .field("entities", &self.entities)
            .finish()
    }
}

impl CollectionStore {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entities: Vec::new(),
            persistence: Box::new(Volatile),
        }
    }

    /// Create a store seeded from `persistence`, mirroring later mutations into it
    pub fn with_persistence(kind: EntityKind, mut persistence: Box<dyn Persistence>) -> Result<Self> {
        let mut store = Self {
            kind,
            entities: Vec::new(),
            persistence: Box::new(Volatile),
        };
        for entity in persistence.load()? {
            store.add(entity);
        }
        store.persistence = persistence;
        Ok(store)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Append an entity; an id already present is rejected
    pub fn add(&mut self, entity: Entity) -> bool {
        if self.contains(&entity.id) {
            warn!(kind = %self.kind, id = %entity.id, "rejected entity with duplicate id");
            return false;
        }
        if let Err(e) = self.persistence.save(&entity) {
            warn!(kind = %self.kind, id = %entity.id, error = %e, "persistence save failed");
        }
        debug!(kind = %self.kind, id = %entity.id, "added entity");
        self.entities.push(entity);
        true
    }

    /// Overwrite the entity with `id`, keeping its position and id
    ///
    /// Returns false (and changes nothing) when no such entity exists.
    pub fn replace(&mut self, id: &EntityId, mut entity: Entity) -> bool {
        let Some(slot) = self.entities.iter_mut().find(|e| &e.id == id) else {
            debug!(kind = %self.kind, %id, "replace skipped, id not found");
            return false;
        };
        entity.id = id.clone();
        if let Err(e) = self.persistence.save(&entity) {
            warn!(kind = %self.kind, %id, error = %e, "persistence save failed");
        }
        *slot = entity;
        debug!(kind = %self.kind, %id, "replaced entity");
        true
    }

    /// Delete the entity with `id`; returns false when it was not present
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|e| &e.id == id) else {
            debug!(kind = %self.kind, %id, "remove skipped, id not found");
            return false;
        };
        self.entities.remove(index);
        if let Err(e) = self.persistence.delete_by_id(id) {
            warn!(kind = %self.kind, %id, error = %e, "persistence delete failed");
        }
        debug!(kind = %self.kind, %id, "removed entity");
        true
    }

    /// All entities in insertion order; clone the iterator to walk it again
    pub fn list(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// The stores of one user session, one per entity kind
#[derive(Debug)]
pub struct Session {
    started_at: DateTime<Utc>,
    stores: BTreeMap<EntityKind, CollectionStore>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let stores = EntityKind::ALL
            .iter()
            .map(|&kind| (kind, CollectionStore::new(kind)))
            .collect();
        Self {
            started_at: Utc::now(),
            stores,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn store(&self, kind: EntityKind) -> &CollectionStore {
        &self.stores[&kind]
    }

    pub fn store_mut(&mut self, kind: EntityKind) -> &mut CollectionStore {
        self.stores
            .entry(kind)
            .or_insert_with(|| CollectionStore::new(kind))
    }

    /// Swap in a store, e.g. one backed by a persistence collaborator
    pub fn install(&mut self, store: CollectionStore) {
        self.stores.insert(store.kind(), store);
    }

    /// Drop every entity of every kind
    pub fn clear(&mut self) {
        for kind in EntityKind::ALL {
            self.stores.insert(kind, CollectionStore::new(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn book(title: &str) -> Entity {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), FieldValue::Text(title.to_string()));
        Entity::new(EntityKind::Book, fields)
    }

    #[test]
    fn test_list_preserves_insertion_order_and_restarts() {
        let mut store = CollectionStore::new(EntityKind::Book);
        store.add(book("A"));
        store.add(book("B"));
        store.add(book("C"));

        let iter = store.list();
        let first: Vec<_> = iter.clone().map(|e| e.text("title")).collect();
        let second: Vec<_> = iter.map(|e| e.text("title")).collect();
        assert_eq!(first, vec!["A", "B", "C"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = CollectionStore::new(EntityKind::Book);
        let entity = book("A");
        assert!(store.add(entity.clone()));
        assert!(!store.add(entity));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = CollectionStore::new(EntityKind::Book);
        let a = book("A");
        let b = book("B");
        let id = a.id.clone();
        store.add(a);
        store.add(b);

        assert!(store.replace(&id, book("A2")));
        let titles: Vec<_> = store.list().map(|e| e.text("title")).collect();
        assert_eq!(titles, vec!["A2", "B"]);
        assert_eq!(store.list().next().map(|e| &e.id), Some(&id));
    }

    #[test]
    fn test_session_clear() {
        let mut session = Session::new();
        session.store_mut(EntityKind::Book).add(book("A"));
        assert_eq!(session.store(EntityKind::Book).len(), 1);
        session.clear();
        assert!(session.store(EntityKind::Book).is_empty());
        assert!(session.store(EntityKind::CartItem).is_empty());
    }
}
