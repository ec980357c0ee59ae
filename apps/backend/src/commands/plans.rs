//! # Planting Plan Commands
//!
//! Commands for the planning module. The dialog is create-first (pick a
//! field, a crop, a season, a status from the fixed set), but plans get
//! the same generic contract as every other module: filtered list with
//! stats, update, delete.
//!
//! No workflow is enforced between statuses: a cancelled plan can go
//! straight back to planned.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use agro_core::report::PlanStats;
use agro_core::validation::{validate_area, validate_season_year, validate_uuid};
use agro_core::{CoreError, PlanStatus, PlantingPlan};
use agro_db::repository::generate_id;
use agro_db::repository::plan::{PlanFilter, PlanWithNames};

use crate::commands::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Form payload for the planning dialog (create and edit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub field_id: String,
    pub crop_id: String,
    pub season_year: String,
    pub planned_area: f64,
    pub sowing_date: chrono::NaiveDate,
    pub expected_harvest_date: Option<chrono::NaiveDate>,
    /// Defaults to `planned` when the dialog leaves it untouched.
    pub status: Option<PlanStatus>,
}

/// Dropdown filters for the planning grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanListQuery {
    pub season_year: Option<String>,
    pub status: Option<PlanStatus>,
}

/// Checks the picked field and crop still exist.
///
/// The dialog fills its dropdowns from live rows, but a second window
/// may have deleted one in the meantime.
async fn check_references(state: &AppState, field_id: &str, crop_id: &str) -> Result<(), ApiError> {
    if state.db.fields().get_by_id(field_id).await?.is_none() {
        return Err(CoreError::UnknownReference {
            entity: "Field",
            id: field_id.to_string(),
        }
        .into());
    }
    if state.db.crops().get_by_id(crop_id).await?.is_none() {
        return Err(CoreError::UnknownReference {
            entity: "Crop",
            id: crop_id.to_string(),
        }
        .into());
    }
    Ok(())
}

impl PlanPayload {
    fn validate(&self) -> Result<String, ApiError> {
        validate_uuid(&self.field_id)?;
        validate_uuid(&self.crop_id)?;
        let season_year = validate_season_year(&self.season_year)?;
        validate_area(self.planned_area)?;
        Ok(season_year)
    }
}

/// Lists plans (optionally one season and/or status) with total planned
/// area and count.
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanListQuery>,
) -> Result<Json<ListResponse<PlanWithNames, PlanStats>>, ApiError> {
    let filter = PlanFilter {
        season_year: query.season_year,
        status: query.status,
    };
    let rows = state.db.plans().list(&filter).await?;
    let stats = PlanStats::compute(rows.iter().map(|r| &r.plan));

    Ok(Json(ListResponse { rows, stats }))
}

/// Creates a plan from the dialog payload.
pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<PlanPayload>,
) -> Result<(StatusCode, Json<PlantingPlan>), ApiError> {
    debug!(field_id = %payload.field_id, crop_id = %payload.crop_id, "create_plan command");
    let season_year = payload.validate()?;
    check_references(&state, &payload.field_id, &payload.crop_id).await?;

    let plan = PlantingPlan {
        id: generate_id(),
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        season_year,
        planned_area: payload.planned_area,
        sowing_date: payload.sowing_date,
        expected_harvest_date: payload.expected_harvest_date,
        status: payload.status.unwrap_or_default(),
    };

    state.db.plans().insert(&plan).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Updates the targeted plan from the dialog payload.
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlanPayload>,
) -> Result<Json<PlantingPlan>, ApiError> {
    debug!(id = %id, "update_plan command");
    validate_uuid(&id)?;
    let season_year = payload.validate()?;

    let existing = state
        .db
        .plans()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan", &id))?;
    check_references(&state, &payload.field_id, &payload.crop_id).await?;

    let plan = PlantingPlan {
        id: existing.id,
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        season_year,
        planned_area: payload.planned_area,
        sowing_date: payload.sowing_date,
        expected_harvest_date: payload.expected_harvest_date,
        status: payload.status.unwrap_or(existing.status),
    };

    state.db.plans().update(&plan).await?;
    Ok(Json(plan))
}

/// Deletes the targeted plan.
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_plan command");
    validate_uuid(&id)?;

    state.db.plans().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
