// Integration tests for the list managers
// Tests create/edit/delete through the form controller, validation, and rendering

use anyhow::Result;
use listkeep::form::{FormController, SubmitOutcome};
use listkeep::models::{Entity, EntityId, EntityKind, FieldValue};
use listkeep::render::{self, format_money, ListAction, ListView};
use listkeep::store::{CollectionStore, Persistence, Session};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn fill(form: &mut FormController, pairs: &[(&str, &str)]) {
    for (name, value) in pairs {
        form.set_field(name, *value);
    }
}

fn fill_book(form: &mut FormController, title: &str) {
    fill(
        form,
        &[
            ("title", title),
            ("author", "Frank Herbert"),
            ("isbn", "9780441013593"),
            ("genre", "Science Fiction"),
            ("publishedYear", "1965"),
        ],
    );
}

fn add_cart_item(store: &mut CollectionStore, name: &str, price: &str, quantity: &str) -> Result<EntityId> {
    let mut form = FormController::for_kind(EntityKind::CartItem);
    fill(
        &mut form,
        &[("name", name), ("category", "Groceries"), ("price", price), ("quantity", quantity)],
    );
    match form.submit(store)? {
        SubmitOutcome::Created(id) => Ok(id),
        other => anyhow::bail!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_create_appends_with_unique_id() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    let mut ids = HashSet::new();

    for i in 0..5 {
        let before = store.len();
        fill_book(&mut form, &format!("Dune {}", i));
        let outcome = form.submit(&mut store)?;

        assert_eq!(store.len(), before + 1);
        let SubmitOutcome::Created(id) = outcome else {
            panic!("expected a created entity");
        };
        assert!(ids.insert(id));
    }

    let titles: Vec<_> = store.list().map(|e| e.text("title").to_string()).collect();
    assert_eq!(titles, vec!["Dune 0", "Dune 1", "Dune 2", "Dune 3", "Dune 4"]);
    Ok(())
}

#[test]
fn test_successful_submit_resets_form() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "Dune");
    form.mark_touched("title");
    form.submit(&mut store)?;

    assert_eq!(form.value("title"), "");
    assert!(!form.is_touched("title"));
    assert!(!form.is_editing());
    Ok(())
}

#[test]
fn test_edit_replaces_in_place() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "Dune");
    form.submit(&mut store)?;
    fill_book(&mut form, "Emma");
    form.submit(&mut store)?;

    let target = store.list().next().cloned().expect("first book");
    form.begin_edit(&target);
    assert!(form.is_editing());
    assert_eq!(form.value("title"), "Dune");
    assert_eq!(form.value("publishedYear"), "1965");
    assert_eq!(form.submit_label(EntityKind::Book), "Update Book");

    form.set_field("title", "Dune Messiah");
    form.set_field("publishedYear", "1969");
    let outcome = form.submit(&mut store)?;

    assert_eq!(outcome, SubmitOutcome::Updated(target.id.clone()));
    assert_eq!(store.len(), 2);
    let edited = store.get(&target.id).expect("edited book");
    assert_eq!(edited.text("title"), "Dune Messiah");
    assert_eq!(edited.number("publishedYear"), Some(1969.0));
    assert_eq!(store.list().next().map(|e| &e.id), Some(&target.id));
    assert_eq!(form.submit_label(EntityKind::Book), "Add Book");
    Ok(())
}

#[test]
fn test_edit_of_deleted_entity_does_not_resurrect_it() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "Dune");
    form.submit(&mut store)?;
    let book = store.list().next().cloned().expect("book");

    form.begin_edit(&book);
    store.remove(&book.id);
    let outcome = form.submit(&mut store)?;

    assert_eq!(outcome, SubmitOutcome::Vanished(book.id));
    assert!(store.is_empty());
    Ok(())
}

#[test]
fn test_delete_removes_exactly_one() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::CartItem);
    let a = add_cart_item(&mut store, "Milk", "2", "3")?;
    let b = add_cart_item(&mut store, "Bread", "5", "1")?;

    assert!(store.remove(&a));
    assert_eq!(store.len(), 1);
    assert!(store.contains(&b));

    assert!(!store.remove(&EntityId::from("missing")));
    assert!(!store.remove(&a));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_replace_unknown_id_is_noop() {
    let mut store = CollectionStore::new(EntityKind::Book);
    let ghost = Entity::new(EntityKind::Book, Default::default());
    assert!(!store.replace(&EntityId::from("ghost"), ghost));
    assert!(store.is_empty());
}

#[test]
fn test_empty_title_blocks_submit() {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "");

    let errors = form.submit(&mut store).unwrap_err();
    assert_eq!(errors.get("title"), Some("Required"));
    assert!(store.is_empty());
    // values survive a rejected submit
    assert_eq!(form.value("author"), "Frank Herbert");
    assert!(form.is_touched("title"));
}

#[test]
fn test_errors_only_visible_when_touched() {
    let mut form = FormController::for_kind(EntityKind::Book);
    assert_eq!(form.errors().get("title"), Some("Required"));
    assert_eq!(form.visible_error("title"), None);

    form.mark_touched("title");
    assert_eq!(form.visible_error("title").as_deref(), Some("Required"));

    form.set_field("title", "Dune");
    assert_eq!(form.visible_error("title"), None);
}

#[test]
fn test_contact_email_format() {
    let mut store = CollectionStore::new(EntityKind::Contact);
    let mut form = FormController::for_kind(EntityKind::Contact);
    fill(
        &mut form,
        &[
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("email", "not-an-email"),
            ("phone", "555-0100"),
            ("address", "12 St James's Square"),
        ],
    );

    let errors = form.submit(&mut store).unwrap_err();
    assert_eq!(errors.get("email"), Some("Invalid email"));
    assert_eq!(errors.len(), 1);
    assert!(store.is_empty());
}

#[test]
fn test_contact_email_single_label_domain() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Contact);
    let mut form = FormController::for_kind(EntityKind::Contact);
    fill(
        &mut form,
        &[
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("email", "ada@localhost"),
            ("phone", "555-0100"),
            ("address", "12 St James's Square"),
        ],
    );

    assert_eq!(form.errors().get("email"), None);
    form.submit(&mut store)?;
    assert_eq!(store.list().next().map(|e| e.text("email")), Some("ada@localhost"));
    Ok(())
}

#[test]
fn test_cart_quantity_minimum() {
    let mut store = CollectionStore::new(EntityKind::CartItem);
    let mut form = FormController::for_kind(EntityKind::CartItem);
    assert_eq!(form.value("quantity"), "1");
    fill(&mut form, &[("name", "Milk"), ("category", "Groceries"), ("price", "2"), ("quantity", "0")]);

    let errors = form.submit(&mut store).unwrap_err();
    assert_eq!(errors.get("quantity"), Some("Must be at least 1"));
    assert!(store.is_empty());
}

#[test]
fn test_recipe_lists_round_trip_through_edit() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Recipe);
    let mut form = FormController::for_kind(EntityKind::Recipe);
    fill(
        &mut form,
        &[
            ("name", "Shortbread"),
            ("category", "Dessert"),
            ("prepTime", "15"),
            ("cookTime", "20"),
            ("servings", "12"),
            ("ingredients", "Flour\nSugar"),
            ("instructions", "Mix\nBake"),
        ],
    );
    form.submit(&mut store)?;

    let recipe = store.list().next().cloned().expect("recipe");
    assert_eq!(recipe.list("ingredients"), ["Flour", "Sugar"]);

    form.begin_edit(&recipe);
    assert_eq!(form.value("ingredients"), "Flour\nSugar");
    form.submit(&mut store)?;

    let again = store.get(&recipe.id).expect("recipe");
    assert_eq!(
        again.get("ingredients"),
        Some(&FieldValue::List(vec!["Flour".to_string(), "Sugar".to_string()]))
    );
    assert_eq!(again, &recipe);
    Ok(())
}

#[test]
fn test_cart_grand_total() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::CartItem);
    add_cart_item(&mut store, "Milk", "2", "3")?;
    add_cart_item(&mut store, "Bread", "5", "1")?;

    let total = render::grand_total(&store);
    assert!((total - 11.0).abs() < 1e-9);
    assert_eq!(format_money(total, "$"), "$11.00");

    let ListView::Cart(table) = render::render(&store) else {
        panic!("cart renders as a table");
    };
    assert_eq!(table.rows.len(), 2);
    assert!((table.rows[0].total - 6.0).abs() < 1e-9);
    assert!((table.grand_total - 11.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_grand_total_follows_edits_and_deletes() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::CartItem);
    let milk = add_cart_item(&mut store, "Milk", "2", "3")?;
    add_cart_item(&mut store, "Bread", "5", "1")?;

    let mut form = FormController::for_kind(EntityKind::CartItem);
    render::apply_action(&ListAction::Edit(milk.clone()), &mut form, &mut store);
    form.set_field("quantity", "1");
    form.submit(&mut store)?;
    assert!((render::grand_total(&store) - 7.0).abs() < 1e-9);

    render::apply_action(&ListAction::Delete(milk), &mut form, &mut store);
    assert!((render::grand_total(&store) - 5.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_delete_of_edited_entity_leaves_edit_mode() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::CartItem);
    let milk = add_cart_item(&mut store, "Milk", "2", "3")?;
    let mut form = FormController::for_kind(EntityKind::CartItem);

    render::apply_action(&ListAction::Edit(milk.clone()), &mut form, &mut store);
    assert_eq!(form.editing(), Some(&milk));
    render::apply_action(&ListAction::Delete(milk), &mut form, &mut store);
    assert!(!form.is_editing());
    assert_eq!(form.value("name"), "");
    Ok(())
}

#[test]
fn test_book_card_projection() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Book);
    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "Dune");
    form.set_field("coverImage", "https://example.com/dune.jpg");
    form.submit(&mut store)?;

    let ListView::Cards { cards } = render::render(&store) else {
        panic!("books render as cards");
    };
    let card = &cards[0];
    assert_eq!(card.title, "Dune");
    assert!(card.details.contains(&"by Frank Herbert".to_string()));
    assert!(card.details.contains(&"Published: 1965".to_string()));
    assert_eq!(card.image.as_deref(), Some("https://example.com/dune.jpg"));
    assert_eq!(
        card.actions(),
        [ListAction::Edit(card.id.clone()), ListAction::Delete(card.id.clone())]
    );
    Ok(())
}

#[test]
fn test_recipe_card_sections() -> Result<()> {
    let mut store = CollectionStore::new(EntityKind::Recipe);
    let mut form = FormController::for_kind(EntityKind::Recipe);
    fill(
        &mut form,
        &[
            ("name", "Tea"),
            ("category", "Drinks"),
            ("prepTime", "1"),
            ("cookTime", "4"),
            ("servings", "1"),
            ("ingredients", "Water\nTea leaves"),
            ("instructions", "Boil\nSteep\nPour"),
        ],
    );
    form.submit(&mut store)?;

    let card = render::card(store.list().next().expect("recipe"));
    assert!(card.details.contains(&"Prep: 1min | Cook: 4min | Serves: 1".to_string()));
    assert_eq!(card.sections.len(), 2);
    assert!(!card.sections[0].numbered);
    assert!(card.sections[1].numbered);
    assert_eq!(card.sections[1].items, vec!["Boil", "Steep", "Pour"]);
    Ok(())
}

#[derive(Default)]
struct Recording {
    saved: Vec<String>,
    deleted: Vec<String>,
}

struct RecordingPersistence(Arc<Mutex<Recording>>, Vec<Entity>);

impl Persistence for RecordingPersistence {
    fn load(&mut self) -> Result<Vec<Entity>> {
        Ok(std::mem::take(&mut self.1))
    }

    fn save(&mut self, entity: &Entity) -> Result<()> {
        self.0.lock().unwrap().saved.push(entity.id.to_string());
        Ok(())
    }

    fn delete_by_id(&mut self, id: &EntityId) -> Result<()> {
        self.0.lock().unwrap().deleted.push(id.to_string());
        Ok(())
    }
}

#[test]
fn test_persistence_collaborator_sees_mutations() -> Result<()> {
    let log = Arc::new(Mutex::new(Recording::default()));
    let seed = Entity::with_id(EntityId::from("seed"), EntityKind::Book, Default::default());
    let persistence = RecordingPersistence(Arc::clone(&log), vec![seed]);
    let mut store = CollectionStore::with_persistence(EntityKind::Book, Box::new(persistence))?;
    assert_eq!(store.len(), 1);

    let mut form = FormController::for_kind(EntityKind::Book);
    fill_book(&mut form, "Dune");
    let SubmitOutcome::Created(id) = form.submit(&mut store)? else {
        panic!("expected create");
    };
    store.remove(&EntityId::from("seed"));

    let log = log.lock().unwrap();
    assert_eq!(log.saved, vec![id.to_string()]);
    assert_eq!(log.deleted, vec!["seed".to_string()]);
    Ok(())
}

#[test]
fn test_session_stores_are_independent() -> Result<()> {
    let mut session = Session::new();
    add_cart_item(session.store_mut(EntityKind::CartItem), "Milk", "2", "3")?;

    assert_eq!(session.store(EntityKind::CartItem).len(), 1);
    assert!(session.store(EntityKind::Book).is_empty());
    assert!(session.store(EntityKind::Contact).is_empty());
    Ok(())
}
