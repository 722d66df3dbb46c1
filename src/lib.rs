//! listkeep - validated in-memory list managers
//!
//! Books, contacts, recipes and a shopping cart share one pattern: a schema
//! rule table, a form controller that validates and submits, a per-session
//! collection store, and a pure list renderer.

pub mod auth;
pub mod commands;
pub mod config;
pub mod form;
pub mod logging;
pub mod models;
pub mod render;
pub mod schema;
pub mod store;
pub mod tui;
pub mod validation;
