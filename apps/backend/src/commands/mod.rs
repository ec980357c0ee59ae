//! # Module Commands
//!
//! One command module per screen of the application:
//!
//! - [`fields`] - field management grid + dialog
//! - [`crops`] - crop catalog grid + dialog
//! - [`plans`] - planting plan dialog + grid
//! - [`expenses`] - expense tracking grid + dialog (type/year filters)
//! - [`harvest`] - harvest records grid + dialog (year filter)
//! - [`reports`] - plain-text reports
//!
//! ## One Contract, Five Modules
//! Every entity module exposes the same four commands: filtered list
//! (rows + stats line), create, update, delete. The differences are the
//! payload shape and the filter columns, nothing structural - the screens
//! are one parameterized component, not five divergent ones.

use serde::Serialize;

pub mod crops;
pub mod expenses;
pub mod fields;
pub mod harvest;
pub mod plans;
pub mod reports;

/// The uniform list response: the grid's rows plus its status line.
///
/// The stats are computed over exactly the returned row set, so the
/// number under the grid always matches what the grid shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T, S> {
    pub rows: Vec<T>,
    pub stats: S,
}
