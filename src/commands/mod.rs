//! CLI commands for listkeep

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth::{AuthForm, AuthOutcome, SimulatedAuth};
use crate::config::{load_config, save_config, Config, ListkeepPaths};
use crate::models::EntityKind;
use crate::schema::{EntitySchema, FieldType, Rule};
use crate::validation::{self, FormValues};

/// Output format for commands that print structured data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Write the default config file
pub fn init(paths: &ListkeepPaths) -> Result<()> {
    if paths.is_initialized() {
        println!("listkeep is already initialized at {}", paths.root.display());
        return Ok(());
    }

    save_config(paths, &Config::default())?;
    println!("Created {}", paths.config.display());
    println!();
    println!("Next steps:");
    println!("  listkeep                      Open the dashboard");
    println!("  listkeep schema book          Show the book form rules");
    Ok(())
}

/// Print the rule table of one entity schema
pub fn schema(kind: EntityKind, format: OutputFormat) -> Result<()> {
    let schema = EntitySchema::for_kind(kind);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        OutputFormat::Summary => {
            println!("{} ({})", kind.title(), schema.name);
            println!("{:<16} {:<10} {:<9} {}", "FIELD", "TYPE", "REQUIRED", "RULES");
            println!("{}", "-".repeat(72));
            for field in schema.fields {
                let rules: Vec<String> = field
                    .rules
                    .iter()
                    .filter(|r| !matches!(r, Rule::Required { .. }))
                    .map(describe_rule)
                    .collect();
                println!(
                    "{:<16} {:<10} {:<9} {}",
                    field.name,
                    type_name(&field.field_type),
                    if field.is_required() { "yes" } else { "no" },
                    rules.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn type_name(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "text",
        FieldType::Choice { .. } => "choice",
        FieldType::Number => "number",
        FieldType::Lines => "lines",
        FieldType::Secret => "secret",
    }
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::Required { .. } => "required".to_string(),
        Rule::Email { .. } => "email".to_string(),
        Rule::MinLength { min, .. } => format!("len>={}", min),
        Rule::MaxLength { max, .. } => format!("len<={}", max),
        Rule::Contains { class, .. } => format!("has {:?}", class).to_lowercase(),
        Rule::Min { min, .. } => format!(">={}", min),
        Rule::EqualsField { field, .. } => format!("=={}", field),
    }
}

/// Parse `FIELD=VALUE` pairs; `\n` in a value stands for a line break
pub fn parse_assignments(pairs: &[String]) -> Result<FormValues> {
    let mut values = FormValues::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Expected FIELD=VALUE, got '{}'", pair);
        };
        values.insert(name.trim().to_string(), value.replace("\\n", "\n"));
    }
    Ok(values)
}

/// Validate a candidate entity; returns whether it passed
pub fn validate(kind: EntityKind, pairs: &[String], all: bool, format: OutputFormat) -> Result<bool> {
    let schema = EntitySchema::for_kind(kind);
    let mut values = validation::defaults(schema);
    let given = parse_assignments(pairs)?;
    for name in given.keys() {
        if schema.field(name).is_none() {
            bail!("Unknown field '{}' for {}", name, kind);
        }
    }
    values.extend(given);

    let report: BTreeMap<String, Vec<String>> = if all {
        validation::violations(schema, &values)
    } else {
        validation::errors(schema, &values)
            .into_map()
            .into_iter()
            .map(|(k, v)| (k, vec![v]))
            .collect()
    };

    match format {
        OutputFormat::Json => {
            let payload = match validation::validate(schema, &values) {
                Ok(record) => serde_json::json!({ "valid": true, "record": record }),
                Err(_) => serde_json::json!({ "valid": false, "errors": report }),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Summary => {
            if report.is_empty() {
                println!("✓ valid {}", kind);
            } else {
                println!("✗ invalid {}", kind);
                for (field, messages) in &report {
                    for message in messages {
                        println!("  {:<16} {}", field, message);
                    }
                }
            }
        }
    }
    Ok(report.is_empty())
}

/// Run an auth form against the simulated backend; Ctrl-C cancels
pub async fn authenticate(mut form: AuthForm, pairs: &[(&str, String)]) -> Result<bool> {
    let paths = ListkeepPaths::new()?;
    let config = load_config(&paths)?;
    let backend = SimulatedAuth::new(Duration::from_millis(config.auth_delay_ms));

    for (name, value) in pairs {
        form.form_mut().set_field(name, value.clone());
    }

    println!("{}...", form.mode().title());
    let cancel = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    match form.submit(&backend, cancel).await {
        AuthOutcome::SignedIn(session) => {
            let who = session.display_name.as_deref().unwrap_or(&session.email);
            println!("✓ Signed in as {}", who);
            Ok(true)
        }
        AuthOutcome::Invalid(errors) => {
            println!("✗ Please fix the following:");
            for (field, message) in errors.iter() {
                println!("  {:<16} {}", field, message);
            }
            Ok(false)
        }
        AuthOutcome::Failed(banner) => {
            println!("✗ {}", banner);
            Ok(false)
        }
        AuthOutcome::Cancelled => {
            println!("Cancelled");
            Ok(false)
        }
    }
}

/// Resolve the config file used by the dashboard
pub fn dashboard_config() -> Result<Config> {
    let paths = ListkeepPaths::new()?;
    load_config(&paths).context("Failed to load dashboard config")
}
