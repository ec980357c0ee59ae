//! # agro-core: Pure Domain Logic for AgroFarm Manager
//!
//! This crate is the **heart** of AgroFarm Manager. It contains all domain
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AgroFarm Manager Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Module Commands (HTTP)                       │   │
//! │  │    list_fields, create_expense, field_report, etc.             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agro-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │   Field   │  │   Money   │  │  text     │  │   rules   │  │   │
//! │  │   │   Crop    │  │ line_total│  │ rendering │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    agro-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types (Field, Crop, PlantingPlan, Expense, Harvest)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//! - [`report`] - Plain-text report rendering
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in kopiykas (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use agro_core::Field` instead of
// `use agro_core::types::Field`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of entity names (fields, crops).
///
/// ## Business Reason
/// Keeps the grid columns and report lines readable. Imports with longer
/// names are rejected at validation, not truncated.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of free-form description / notes fields.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Quality ratings run from 1 (feed grade) to 5 (premium).
pub const QUALITY_RATING_RANGE: (i64, i64) = (1, 5);
