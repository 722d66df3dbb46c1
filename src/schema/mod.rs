//! Entity schemas
//!
//! Each schema is a data-only rule table: field name -> input type plus an
//! ordered list of rules. Nothing in here evaluates a rule; see
//! `crate::validation` for the interpreter.

use serde::Serialize;

use crate::models::EntityKind;

/// Options offered by the cart category select
pub const CART_CATEGORIES: &[&str] = &["Groceries", "Electronics", "Clothing", "Books", "Other"];

/// How a raw input string is coerced before storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// Free text, stored as-is
    Text,
    /// Free text that must be one of a fixed set of options
    Choice { options: &'static [&'static str] },
    /// Parsed as a finite decimal number
    Number,
    /// Newline-delimited list, stored as an ordered sequence of lines
    Lines,
    /// Text that should be masked when displayed
    Secret,
}

/// Character classes a password-style field can be required to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Lowercase => c.is_ascii_lowercase(),
            CharClass::Uppercase => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Symbol => !c.is_ascii_alphanumeric(),
        }
    }
}

/// A single validation rule with the message shown when it is violated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required { message: &'static str },
    Email { message: &'static str },
    MinLength { min: usize, message: &'static str },
    MaxLength { max: usize, message: &'static str },
    Contains { class: CharClass, message: &'static str },
    Min { min: f64, message: &'static str },
    EqualsField { field: &'static str, message: &'static str },
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::Email { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Contains { message, .. }
            | Rule::Min { message, .. }
            | Rule::EqualsField { message, .. } => message,
        }
    }
}

/// One field of a form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    /// Raw input value a fresh form starts with
    pub default: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required { .. }))
    }
}

/// Declarative description of one form: its fields in display order
#[derive(Debug, Serialize)]
pub struct EntitySchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn for_kind(kind: EntityKind) -> &'static EntitySchema {
        match kind {
            EntityKind::Book => &BOOK,
            EntityKind::Contact => &CONTACT,
            EntityKind::Recipe => &RECIPE,
            EntityKind::CartItem => &CART_ITEM,
        }
    }
}

const REQUIRED: Rule = Rule::Required { message: "Required" };

const fn text(name: &'static str, label: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, label, field_type: FieldType::Text, default: "", rules }
}

const fn number(name: &'static str, label: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, label, field_type: FieldType::Number, default: "", rules }
}

const fn lines(name: &'static str, label: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, label, field_type: FieldType::Lines, default: "", rules }
}

const fn secret(name: &'static str, label: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, label, field_type: FieldType::Secret, default: "", rules }
}

pub static BOOK: EntitySchema = EntitySchema {
    name: "book",
    fields: &[
        text("title", "Title", &[REQUIRED]),
        text("author", "Author", &[REQUIRED]),
        text("isbn", "ISBN", &[REQUIRED]),
        text("genre", "Genre", &[REQUIRED]),
        number("publishedYear", "Published Year", &[REQUIRED]),
        text("coverImage", "Cover Image URL", &[]),
        text("description", "Description", &[]),
    ],
};

pub static CONTACT: EntitySchema = EntitySchema {
    name: "contact",
    fields: &[
        text("firstName", "First Name", &[REQUIRED]),
        text("lastName", "Last Name", &[REQUIRED]),
        text("email", "Email", &[REQUIRED, Rule::Email { message: "Invalid email" }]),
        text("phone", "Phone", &[REQUIRED]),
        text("address", "Address", &[REQUIRED]),
        text("notes", "Notes", &[]),
    ],
};

pub static RECIPE: EntitySchema = EntitySchema {
    name: "recipe",
    fields: &[
        text("name", "Recipe Name", &[REQUIRED]),
        text("category", "Category", &[REQUIRED]),
        text("image", "Image URL", &[]),
        number(
            "prepTime",
            "Prep Time (minutes)",
            &[REQUIRED, Rule::Min { min: 0.0, message: "prepTime must be greater than or equal to 0" }],
        ),
        number(
            "cookTime",
            "Cook Time (minutes)",
            &[REQUIRED, Rule::Min { min: 0.0, message: "cookTime must be greater than or equal to 0" }],
        ),
        number(
            "servings",
            "Servings",
            &[REQUIRED, Rule::Min { min: 1.0, message: "servings must be greater than or equal to 1" }],
        ),
        lines("ingredients", "Ingredients (one per line)", &[REQUIRED]),
        lines("instructions", "Instructions (one step per line)", &[REQUIRED]),
    ],
};

pub static CART_ITEM: EntitySchema = EntitySchema {
    name: "cart",
    fields: &[
        text("name", "Item Name", &[REQUIRED]),
        FieldSpec {
            name: "category",
            label: "Category",
            field_type: FieldType::Choice { options: CART_CATEGORIES },
            default: "",
            rules: &[REQUIRED],
        },
        FieldSpec {
            name: "quantity",
            label: "Quantity",
            field_type: FieldType::Number,
            default: "1",
            rules: &[REQUIRED, Rule::Min { min: 1.0, message: "Must be at least 1" }],
        },
        number("price", "Price", &[REQUIRED, Rule::Min { min: 0.0, message: "Must be at least 0" }]),
    ],
};

pub static SIGN_IN: EntitySchema = EntitySchema {
    name: "signin",
    fields: &[
        text(
            "email",
            "Email Address",
            &[
                Rule::Required { message: "Email is required" },
                Rule::Email { message: "Please enter a valid email address" },
            ],
        ),
        secret("password", "Password", &[Rule::Required { message: "Password is required" }]),
    ],
};

pub static SIGN_UP: EntitySchema = EntitySchema {
    name: "signup",
    fields: &[
        text(
            "firstName",
            "First Name",
            &[
                Rule::Required { message: "First name is required" },
                Rule::MinLength { min: 2, message: "First name must be at least 2 characters" },
                Rule::MaxLength { max: 50, message: "First name must be less than 50 characters" },
            ],
        ),
        text(
            "lastName",
            "Last Name",
            &[
                Rule::Required { message: "Last name is required" },
                Rule::MinLength { min: 2, message: "Last name must be at least 2 characters" },
                Rule::MaxLength { max: 50, message: "Last name must be less than 50 characters" },
            ],
        ),
        text(
            "email",
            "Email Address",
            &[
                Rule::Required { message: "Email is required" },
                Rule::Email { message: "Please enter a valid email address" },
            ],
        ),
        secret(
            "password",
            "Password",
            &[
                Rule::Required { message: "Password is required" },
                Rule::MinLength { min: 8, message: "Password must be at least 8 characters" },
                Rule::Contains {
                    class: CharClass::Lowercase,
                    message: "Password must contain at least one lowercase letter",
                },
                Rule::Contains {
                    class: CharClass::Uppercase,
                    message: "Password must contain at least one uppercase letter",
                },
                Rule::Contains {
                    class: CharClass::Digit,
                    message: "Password must contain at least one number",
                },
                Rule::Contains {
                    class: CharClass::Symbol,
                    message: "Password must contain at least one special character",
                },
            ],
        ),
        secret(
            "confirmPassword",
            "Confirm Password",
            &[
                Rule::Required { message: "Please confirm your password" },
                Rule::EqualsField { field: "password", message: "Passwords must match" },
            ],
        ),
    ],
};
