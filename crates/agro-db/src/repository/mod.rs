//! # Repository Module
//!
//! Database repository implementations for AgroFarm Manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Module command                                                        │
//! │       │                                                                 │
//! │       │  db.expenses().list(&filter)                                   │
//! │       ▼                                                                 │
//! │  ExpenseRepository                                                     │
//! │  ├── list(&self, filter)                                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, expense)                                            │
//! │  ├── update(&self, expense)                                            │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  All five repositories share one generic contract: filtered list,      │
//! │  get by id, insert, update (rows_affected check), delete by id.        │
//! │  The per-entity code is only the column lists and the filters.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`field::FieldRepository`] - Field CRUD
//! - [`crop::CropRepository`] - Crop CRUD and category filter
//! - [`plan::PlanRepository`] - Planting plan CRUD and season filter
//! - [`expense::ExpenseRepository`] - Expense CRUD and type/year filters
//! - [`harvest::HarvestRepository`] - Harvest CRUD and year filter

pub mod crop;
pub mod expense;
pub mod field;
pub mod harvest;
pub mod plan;

use uuid::Uuid;

/// Generates a new entity ID.
///
/// ## Usage
/// ```rust,ignore
/// let field = Field { id: generate_id(), ... };
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
