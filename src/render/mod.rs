//! List rendering
//!
//! Pure projections of a collection store into view models the dashboard
//! draws. Nothing here mutates state except `apply_action`, which routes the
//! per-row edit and delete actions to the form and the store.

use serde::Serialize;
use tracing::info;

use crate::form::FormController;
use crate::models::{format_number, Entity, EntityId, EntityKind};
use crate::store::CollectionStore;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Add some items to get started!";

/// Row-level actions offered next to every rendered entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Edit(EntityId),
    Delete(EntityId),
}

/// A titled block inside a card (ingredients, instructions)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSection {
    pub heading: &'static str,
    pub items: Vec<String>,
    pub numbered: bool,
}

/// One entity drawn as a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: EntityId,
    pub title: String,
    pub details: Vec<String>,
    pub sections: Vec<CardSection>,
    pub image: Option<String>,
}

impl Card {
    pub fn actions(&self) -> [ListAction; 2] {
        [ListAction::Edit(self.id.clone()), ListAction::Delete(self.id.clone())]
    }
}

/// One cart item drawn as a table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartTable {
    pub rows: Vec<CartRow>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ListView {
    Cards { cards: Vec<Card> },
    Cart(CartTable),
}

/// Project a store into its view, in store order
pub fn render(store: &CollectionStore) -> ListView {
    match store.kind() {
        EntityKind::CartItem => ListView::Cart(cart_table(store)),
        _ => ListView::Cards {
            cards: store.list().map(card).collect(),
        },
    }
}

/// `price × quantity` of one cart item; missing numbers count as zero
pub fn line_total(entity: &Entity) -> f64 {
    entity.number("price").unwrap_or(0.0) * entity.number("quantity").unwrap_or(0.0)
}

/// Sum of all line totals, recomputed on every call
pub fn grand_total(store: &CollectionStore) -> f64 {
    store.list().map(line_total).sum()
}

pub fn cart_table(store: &CollectionStore) -> CartTable {
    let rows = store
        .list()
        .map(|e| CartRow {
            id: e.id.clone(),
            name: e.text("name").to_string(),
            category: e.text("category").to_string(),
            quantity: e.number("quantity").unwrap_or(0.0),
            price: e.number("price").unwrap_or(0.0),
            total: line_total(e),
        })
        .collect();
    CartTable {
        rows,
        grand_total: grand_total(store),
    }
}

pub fn format_money(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

fn number_text(entity: &Entity, name: &str) -> String {
    entity.number(name).map(format_number).unwrap_or_default()
}

/// Card projection of a single non-cart entity
pub fn card(entity: &Entity) -> Card {
    match entity.kind {
        EntityKind::Book => Card {
            id: entity.id.clone(),
            title: entity.text("title").to_string(),
            details: vec![
                format!("by {}", entity.text("author")),
                format!("ISBN: {}", entity.text("isbn")),
                format!("Genre: {}", entity.text("genre")),
                format!("Published: {}", number_text(entity, "publishedYear")),
            ],
            sections: entity
                .optional_text("description")
                .map(|d| CardSection {
                    heading: "Description",
                    items: vec![d.to_string()],
                    numbered: false,
                })
                .into_iter()
                .collect(),
            image: entity.optional_text("coverImage").map(str::to_string),
        },
        EntityKind::Contact => {
            let mut details = vec![
                format!("Email: {}", entity.text("email")),
                format!("Phone: {}", entity.text("phone")),
                format!("Address: {}", entity.text("address")),
            ];
            if let Some(notes) = entity.optional_text("notes") {
                details.push(format!("Notes: {}", notes));
            }
            Card {
                id: entity.id.clone(),
                title: format!("{} {}", entity.text("firstName"), entity.text("lastName")),
                details,
                sections: Vec::new(),
                image: None,
            }
        }
        EntityKind::Recipe => Card {
            id: entity.id.clone(),
            title: entity.text("name").to_string(),
            details: vec![
                format!("Category: {}", entity.text("category")),
                format!(
                    "Prep: {}min | Cook: {}min | Serves: {}",
                    number_text(entity, "prepTime"),
                    number_text(entity, "cookTime"),
                    number_text(entity, "servings"),
                ),
            ],
            sections: vec![
                CardSection {
                    heading: "Ingredients",
                    items: entity.list("ingredients").to_vec(),
                    numbered: false,
                },
                CardSection {
                    heading: "Instructions",
                    items: entity.list("instructions").to_vec(),
                    numbered: true,
                },
            ],
            image: entity.optional_text("image").map(str::to_string),
        },
        EntityKind::CartItem => Card {
            id: entity.id.clone(),
            title: entity.text("name").to_string(),
            details: vec![
                format!("Category: {}", entity.text("category")),
                format!("Quantity: {}", number_text(entity, "quantity")),
                format!("Price: {}", number_text(entity, "price")),
                format!("Total: {:.2}", line_total(entity)),
            ],
            sections: Vec::new(),
            image: None,
        },
    }
}

/// Route a row action: edit loads the form, delete removes from the store
pub fn apply_action(action: &ListAction, form: &mut FormController, store: &mut CollectionStore) {
    match action {
        ListAction::Edit(id) => {
            if let Some(entity) = store.get(id) {
                form.begin_edit(entity);
            }
        }
        ListAction::Delete(id) => {
            if store.remove(id) {
                info!(kind = %store.kind(), %id, "entity deleted");
            }
            if form.editing() == Some(id) {
                form.cancel_edit();
            }
        }
    }
}
