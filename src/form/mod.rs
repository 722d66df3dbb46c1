//! Form controller
//!
//! Owns the raw input of one form, which fields the user has left, and
//! whether the form is creating a new entity or editing an existing one.
//! Errors are always recomputed from the current values; they are only
//! shown for touched fields.

use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::models::{Entity, EntityId, EntityKind};
use crate::schema::EntitySchema;
use crate::store::CollectionStore;
use crate::validation::{self, FormValues, Record, ValidationErrors};

/// What a successful submit did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(EntityId),
    Updated(EntityId),
    /// The entity being edited had been deleted in the meantime
    Vanished(EntityId),
    /// The store already held an entity with this id; nothing was added
    Duplicate(EntityId),
}

/// Input state for one schema
#[derive(Debug, Clone)]
pub struct FormController {
    schema: &'static EntitySchema,
    values: FormValues,
    touched: BTreeSet<String>,
    editing: Option<EntityId>,
}

impl FormController {
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            values: validation::defaults(schema),
            touched: BTreeSet::new(),
            editing: None,
        }
    }

    pub fn for_kind(kind: EntityKind) -> Self {
        Self::new(EntitySchema::for_kind(kind))
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn mark_touched(&mut self, name: &str) {
        self.touched.insert(name.to_string());
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn touch_all(&mut self) {
        self.touched
            .extend(self.schema.fields.iter().map(|f| f.name.to_string()));
    }

    /// Current first-violation message for every invalid field
    pub fn errors(&self) -> ValidationErrors {
        validation::errors(self.schema, &self.values)
    }

    /// The error to display next to `name`, if it has been touched
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if !self.is_touched(name) {
            return None;
        }
        self.errors().get(name).map(str::to_string)
    }

    /// Load an entity into the form and switch to edit mode
    ///
    /// List values are joined with newlines into one editable text value.
    pub fn begin_edit(&mut self, entity: &Entity) {
        let mut values = validation::defaults(self.schema);
        for spec in self.schema.fields {
            let input = entity
                .get(spec.name)
                .map(|v| v.to_input())
                .unwrap_or_default();
            values.insert(spec.name.to_string(), input);
        }
        self.values = values;
        self.touched.clear();
        self.editing = Some(entity.id.clone());
        debug!(schema = self.schema.name, id = %entity.id, "editing entity");
    }

    /// Leave edit mode without touching the store
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    pub fn editing(&self) -> Option<&EntityId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Back to defaults, nothing touched, create mode
    pub fn reset(&mut self) {
        self.values = validation::defaults(self.schema);
        self.touched.clear();
        self.editing = None;
    }

    /// Validate the current values without changing any state but `touched`
    ///
    /// A submit attempt makes every error visible.
    pub fn check(&mut self) -> Result<Record, ValidationErrors> {
        self.touch_all();
        validation::validate(self.schema, &self.values)
    }

    /// Validate, then create or replace an entity in `store`
    ///
    /// On failure the values are left as they were and the error map is
    /// returned. On success the form is reset.
    pub fn submit(&mut self, store: &mut CollectionStore) -> Result<SubmitOutcome, ValidationErrors> {
        let record = match self.check() {
            Ok(record) => record,
            Err(errors) => {
                debug!(schema = self.schema.name, invalid = errors.len(), "submit rejected");
                return Err(errors);
            }
        };

        let outcome = match self.editing.take() {
            Some(id) => {
                let entity = Entity::with_id(id.clone(), store.kind(), record);
                if store.replace(&id, entity) {
                    info!(kind = %store.kind(), %id, "entity updated");
                    SubmitOutcome::Updated(id)
                } else {
                    info!(kind = %store.kind(), %id, "edited entity no longer exists");
                    SubmitOutcome::Vanished(id)
                }
            }
            None => {
                let entity = Entity::new(store.kind(), record);
                create(store, entity)
            }
        };

        // a rejected add keeps the input so it can be submitted again
        if !matches!(outcome, SubmitOutcome::Duplicate(_)) {
            self.reset();
        }
        Ok(outcome)
    }

    /// Submit button caption for the current mode
    pub fn submit_label(&self, kind: EntityKind) -> String {
        let verb = if self.is_editing() { "Update" } else { "Add" };
        format!("{} {}", verb, kind.noun())
    }
}

fn create(store: &mut CollectionStore, entity: Entity) -> SubmitOutcome {
    let id = entity.id.clone();
    if store.add(entity) {
        info!(kind = %store.kind(), %id, "entity created");
        SubmitOutcome::Created(id)
    } else {
        SubmitOutcome::Duplicate(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;
    use crate::validation::Record;

    fn book(id: &str, title: &str) -> Entity {
        let mut fields = Record::new();
        fields.insert("title".to_string(), FieldValue::Text(title.to_string()));
        Entity::with_id(EntityId::from(id), EntityKind::Book, fields)
    }

    #[test]
    fn test_create_reports_duplicate_id() {
        let mut store = CollectionStore::new(EntityKind::Book);
        assert_eq!(create(&mut store, book("b1", "Dune")), SubmitOutcome::Created(EntityId::from("b1")));
        assert_eq!(create(&mut store, book("b1", "Emma")), SubmitOutcome::Duplicate(EntityId::from("b1")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.list().next().map(|e| e.text("title")), Some("Dune"));
    }

    #[test]
    fn test_submit_label_follows_mode() {
        let mut form = FormController::for_kind(EntityKind::Book);
        assert_eq!(form.submit_label(EntityKind::Book), "Add Book");
        form.begin_edit(&book("b1", "Dune"));
        assert_eq!(form.submit_label(EntityKind::Book), "Update Book");
        form.cancel_edit();
        assert_eq!(form.submit_label(EntityKind::Book), "Add Book");
    }
}
