//! # Application State
//!
//! Shared state for the module commands.
//!
//! ## Thread Safety
//! `Database` wraps a `SqlitePool`, which is inherently thread-safe and
//! cheap to clone. Axum clones the whole state per request; no explicit
//! locking is needed anywhere in the command layer.

use agro_db::Database;

/// Shared application state handed to every command.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database handle (pool + repositories).
    pub db: Database,
}

impl AppState {
    /// Creates the state from an initialized database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
