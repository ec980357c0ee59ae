//! # Expense Commands
//!
//! Commands for the expense tracking module.
//!
//! ## Filters
//! The grid has two dropdowns: expense type ("all types" + the seven
//! categories) and year ("all years" + recent years). Both map to query
//! parameters here and compose.
//!
//! ## Derived Total
//! The payload carries only the unit amount and the quantity. The stored
//! line total is computed by the repository; the dialog's live "total"
//! label is purely cosmetic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use agro_core::report::ExpenseStats;
use agro_core::validation::{
    validate_amount_cents, validate_non_negative, validate_optional_text, validate_uuid,
};
use agro_core::{CoreError, Expense, ExpenseType, Money};
use agro_db::repository::expense::{ExpenseFilter, ExpenseWithNames};
use agro_db::repository::generate_id;

use crate::commands::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Form payload for the expense dialog (create and edit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    /// "-- none --" in the dropdown arrives as `null`.
    pub field_id: Option<String>,
    pub crop_id: Option<String>,
    pub expense_type: ExpenseType,
    pub amount_cents: i64,
    pub quantity: f64,
    pub unit: Option<String>,
    pub date: chrono::NaiveDate,
    pub description: Option<String>,
}

/// Dropdown filters for the expense grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    #[serde(rename = "type")]
    pub expense_type: Option<ExpenseType>,
    pub year: Option<i32>,
}

struct ValidExpensePayload {
    unit: Option<String>,
    description: Option<String>,
}

impl ExpensePayload {
    fn validate(&self) -> Result<ValidExpensePayload, ApiError> {
        if let Some(field_id) = &self.field_id {
            validate_uuid(field_id)?;
        }
        if let Some(crop_id) = &self.crop_id {
            validate_uuid(crop_id)?;
        }
        validate_amount_cents(self.amount_cents)?;
        validate_non_negative("quantity", self.quantity)?;
        let unit = validate_optional_text("unit", self.unit.as_deref())?;
        let description = validate_optional_text("description", self.description.as_deref())?;

        Ok(ValidExpensePayload { unit, description })
    }
}

/// Checks optional field/crop links point at live rows.
async fn check_references(
    state: &AppState,
    field_id: Option<&str>,
    crop_id: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(field_id) = field_id {
        if state.db.fields().get_by_id(field_id).await?.is_none() {
            return Err(CoreError::UnknownReference {
                entity: "Field",
                id: field_id.to_string(),
            }
            .into());
        }
    }
    if let Some(crop_id) = crop_id {
        if state.db.crops().get_by_id(crop_id).await?.is_none() {
            return Err(CoreError::UnknownReference {
                entity: "Crop",
                id: crop_id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Lists expenses (optionally one type and/or year) with the summed
/// totals over exactly the filtered rows.
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<ListResponse<ExpenseWithNames, ExpenseStats>>, ApiError> {
    let filter = ExpenseFilter {
        expense_type: query.expense_type,
        year: query.year,
    };
    let rows = state.db.expenses().list(&filter).await?;
    let stats = ExpenseStats::compute(rows.iter().map(|r| &r.expense));

    Ok(Json(ListResponse { rows, stats }))
}

/// Creates an expense from the dialog payload.
pub async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<ExpensePayload>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    debug!(expense_type = %payload.expense_type, "create_expense command");
    let valid = payload.validate()?;
    check_references(&state, payload.field_id.as_deref(), payload.crop_id.as_deref()).await?;

    let expense = Expense {
        id: generate_id(),
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        expense_type: payload.expense_type,
        amount_cents: payload.amount_cents,
        quantity: payload.quantity,
        unit: valid.unit,
        total_cost_cents: Money::from_cents(payload.amount_cents)
            .line_total(payload.quantity)
            .cents(),
        date: payload.date,
        description: valid.description,
    };

    state.db.expenses().insert(&expense).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Updates the targeted expense from the dialog payload.
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpensePayload>,
) -> Result<Json<Expense>, ApiError> {
    debug!(id = %id, "update_expense command");
    validate_uuid(&id)?;
    let valid = payload.validate()?;

    let existing = state
        .db
        .expenses()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Expense", &id))?;
    check_references(&state, payload.field_id.as_deref(), payload.crop_id.as_deref()).await?;

    let expense = Expense {
        id: existing.id,
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        expense_type: payload.expense_type,
        amount_cents: payload.amount_cents,
        quantity: payload.quantity,
        unit: valid.unit,
        total_cost_cents: Money::from_cents(payload.amount_cents)
            .line_total(payload.quantity)
            .cents(),
        date: payload.date,
        description: valid.description,
    };

    state.db.expenses().update(&expense).await?;
    Ok(Json(expense))
}

/// Deletes the targeted expense.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_expense command");
    validate_uuid(&id)?;

    state.db.expenses().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
