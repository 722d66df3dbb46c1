//! Generic validator for schema rule tables
//!
//! Works on raw form input (field name -> string) and either produces the
//! coerced record or the per-field error messages. Parse failures on numeric
//! fields are validation errors, never silent defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::models::FieldValue;
use crate::schema::{EntitySchema, FieldSpec, FieldType, Rule};

/// Raw input values, keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Coerced values ready to be stored on an entity
pub type Record = BTreeMap<String, FieldValue>;

// Single-label domains such as `localhost` are accepted; labels are at most 63 chars
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("email pattern is valid")
});

/// Field name -> first violated rule message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for (i, (field, message)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn raw<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or("")
}

fn is_blank(spec: &FieldSpec, input: &str) -> bool {
    match spec.field_type {
        FieldType::Number => input.trim().is_empty(),
        _ => input.is_empty(),
    }
}

fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Every violated rule of one field, in rule order
///
/// A blank field only reports its `Required` message (or nothing, when the
/// field is optional); type coercion failures stop further checks.
fn field_violations(spec: &FieldSpec, values: &FormValues) -> Vec<String> {
    let input = raw(values, spec.name);

    if is_blank(spec, input) {
        return spec
            .rules
            .iter()
            .find(|r| matches!(r, Rule::Required { .. }))
            .map(|r| vec![r.message().to_string()])
            .unwrap_or_default();
    }

    let number = match spec.field_type {
        FieldType::Number => match parse_number(input) {
            Some(n) => Some(n),
            None => return vec![format!("{} must be a number", spec.label)],
        },
        FieldType::Choice { options } if !options.iter().any(|o| *o == input) => {
            return vec![format!("Select a valid {}", spec.label.to_lowercase())];
        }
        _ => None,
    };

    spec.rules
        .iter()
        .filter(|rule| !rule_holds(rule, input, number, values))
        .map(|rule| rule.message().to_string())
        .collect()
}

fn rule_holds(rule: &Rule, input: &str, number: Option<f64>, values: &FormValues) -> bool {
    match rule {
        Rule::Required { .. } => true,
        Rule::Email { .. } => EMAIL_RE.is_match(input),
        Rule::MinLength { min, .. } => input.chars().count() >= *min,
        Rule::MaxLength { max, .. } => input.chars().count() <= *max,
        Rule::Contains { class, .. } => input.chars().any(|c| class.matches(c)),
        Rule::Min { min, .. } => number.map_or(true, |n| n >= *min),
        Rule::EqualsField { field, .. } => raw(values, field) == input,
    }
}

/// All violations, keyed by field; fields without violations are absent
pub fn violations(schema: &EntitySchema, values: &FormValues) -> BTreeMap<String, Vec<String>> {
    schema
        .fields
        .iter()
        .filter_map(|spec| {
            let found = field_violations(spec, values);
            (!found.is_empty()).then(|| (spec.name.to_string(), found))
        })
        .collect()
}

/// First violated rule message per field
pub fn errors(schema: &EntitySchema, values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, messages) in violations(schema, values) {
        if let Some(first) = messages.into_iter().next() {
            errors.insert(field, first);
        }
    }
    errors
}

/// Validate and coerce raw input into a storable record
///
/// Optional fields left blank are omitted from the record.
pub fn validate(schema: &EntitySchema, values: &FormValues) -> Result<Record, ValidationErrors> {
    let errors = errors(schema, values);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut record = Record::new();
    for spec in schema.fields {
        let input = raw(values, spec.name);
        if is_blank(spec, input) {
            continue;
        }
        let value = match spec.field_type {
            FieldType::Text | FieldType::Choice { .. } | FieldType::Secret => {
                FieldValue::Text(input.to_string())
            }
            FieldType::Number => match parse_number(input) {
                Some(n) => FieldValue::Number(n),
                None => continue,
            },
            FieldType::Lines => FieldValue::List(split_lines(input)),
        };
        record.insert(spec.name.to_string(), value);
    }
    Ok(record)
}

/// Split a newline-delimited input into its ordered entries
///
/// Entries are not escaped: a value containing a newline becomes two entries.
pub fn split_lines(input: &str) -> Vec<String> {
    input.split('\n').map(str::to_string).collect()
}

/// Raw form values a fresh form starts with
pub fn defaults(schema: &EntitySchema) -> FormValues {
    schema
        .fields
        .iter()
        .map(|f| (f.name.to_string(), f.default.to_string()))
        .collect()
}
