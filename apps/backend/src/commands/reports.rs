//! # Report Commands
//!
//! Pure read/format: fetch all rows of one table, render the
//! preformatted text block (see [`agro_core::report`]), return it as
//! `text/plain`. No pagination, no export files.

use axum::extract::State;
use tracing::debug;

use agro_core::report;
use agro_db::repository::expense::ExpenseFilter;
use agro_db::repository::harvest::HarvestFilter;

use crate::error::ApiError;
use crate::state::AppState;

/// Renders the fields report.
pub async fn field_report(State(state): State<AppState>) -> Result<String, ApiError> {
    debug!("field_report command");
    let fields = state.db.fields().list().await?;
    Ok(report::field_report(&fields))
}

/// Renders the crop catalog report.
pub async fn crop_report(State(state): State<AppState>) -> Result<String, ApiError> {
    debug!("crop_report command");
    let crops = state.db.crops().list(None).await?;
    Ok(report::crop_report(&crops))
}

/// Renders the expenses report (all rows, newest first).
pub async fn expense_report(State(state): State<AppState>) -> Result<String, ApiError> {
    debug!("expense_report command");
    let rows = state.db.expenses().list(&ExpenseFilter::default()).await?;
    let expenses: Vec<_> = rows.into_iter().map(|r| r.expense).collect();
    Ok(report::expense_report(&expenses))
}

/// Renders the harvest report (all rows, newest first).
pub async fn harvest_report(State(state): State<AppState>) -> Result<String, ApiError> {
    debug!("harvest_report command");
    let rows = state.db.harvests().list(&HarvestFilter::default()).await?;
    let harvests: Vec<_> = rows.into_iter().map(|r| r.harvest).collect();
    Ok(report::harvest_report(&harvests))
}
