//! Data models for listkeep entities
//!
//! Every collection holds the same generic record shape: a system-assigned
//! id plus a mapping from field name to a typed value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four kinds of list managed by the app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Book,
    Contact,
    Recipe,
    CartItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Book,
        EntityKind::Contact,
        EntityKind::Recipe,
        EntityKind::CartItem,
    ];

    /// Singular noun used on buttons ("Add Book", "Update Item")
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Book => "Book",
            EntityKind::Contact => "Contact",
            EntityKind::Recipe => "Recipe",
            EntityKind::CartItem => "Item",
        }
    }

    /// Heading of the screen that manages this collection
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Book => "Book Collection",
            EntityKind::Contact => "Contact List",
            EntityKind::Recipe => "Recipe Manager",
            EntityKind::CartItem => "Shopping Cart",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Book => write!(f, "book"),
            EntityKind::Contact => write!(f, "contact"),
            EntityKind::Recipe => write!(f, "recipe"),
            EntityKind::CartItem => write!(f, "cart"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" | "books" => Ok(EntityKind::Book),
            "contact" | "contacts" => Ok(EntityKind::Contact),
            "recipe" | "recipes" => Ok(EntityKind::Recipe),
            "cart" | "cart_item" | "item" => Ok(EntityKind::CartItem),
            _ => Err(format!(
                "Invalid entity: {}. Use: book, contact, recipe, cart",
                s
            )),
        }
    }
}

/// Opaque, never-reused identifier assigned when an entity is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, coerced field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render back to the raw text a form input would hold
    ///
    /// Lists are joined with `\n`; an entry that itself contains a newline
    /// will not survive the trip back through the form.
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::List(items) => items.join("\n"),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            other => f.write_str(&other.to_input()),
        }
    }
}

/// Formats a number the way a numeric input shows it (`1999`, `2.5`)
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A record in one of the collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Entity {
    /// Create a new entity with a freshly generated id
    pub fn new(kind: EntityKind, fields: BTreeMap<String, FieldValue>) -> Self {
        Self::with_id(EntityId::generate(), kind, fields)
    }

    pub fn with_id(id: EntityId, kind: EntityKind, fields: BTreeMap<String, FieldValue>) -> Self {
        Self { id, kind, fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text field, or "" when absent
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Optional text field, `None` when absent or blank
    pub fn optional_text(&self, name: &str) -> Option<&str> {
        Some(self.text(name)).filter(|s| !s.is_empty())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn list(&self, name: &str) -> &[String] {
        self.get(name).and_then(FieldValue::as_list).unwrap_or(&[])
    }
}
