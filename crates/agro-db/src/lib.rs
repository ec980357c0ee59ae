//! # agro-db: Database Layer for AgroFarm Manager
//!
//! This crate provides database access for AgroFarm Manager.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AgroFarm Manager Data Flow                         │
//! │                                                                         │
//! │  Module command (list_expenses)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     agro-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (field.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │   crop.rs,    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│   expense.rs, │    │ 001_init.sql │  │   │
//! │  │   │ WAL + FKs ON  │    │   ...)        │    │ + seed crops │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/agrofarm-manager/agrofarm.db                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`seed`] - First-run default crop seeding
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agro_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/agrofarm.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let fields = db.fields().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::crop::CropRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::field::FieldRepository;
pub use repository::harvest::HarvestRepository;
pub use repository::plan::PlanRepository;
