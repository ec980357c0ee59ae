//! # Harvest Commands
//!
//! Commands for the harvest records module. Every record needs a live
//! field and crop; quality is constrained 1-5 and moisture 0-100 before
//! any SQL runs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use agro_core::report::HarvestStats;
use agro_core::validation::{
    validate_moisture, validate_non_negative, validate_optional_text, validate_quality_rating,
    validate_uuid,
};
use agro_core::{CoreError, Harvest};
use agro_db::repository::generate_id;
use agro_db::repository::harvest::{HarvestFilter, HarvestWithNames};

use crate::commands::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Form payload for the harvest dialog (create and edit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestPayload {
    pub field_id: String,
    pub crop_id: String,
    pub actual_yield: f64,
    pub harvest_date: chrono::NaiveDate,
    pub quality_rating: i64,
    pub moisture_content: f64,
    pub notes: Option<String>,
}

/// Dropdown filter for the harvest grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestListQuery {
    pub year: Option<i32>,
}

impl HarvestPayload {
    fn validate(&self) -> Result<Option<String>, ApiError> {
        validate_uuid(&self.field_id)?;
        validate_uuid(&self.crop_id)?;
        validate_non_negative("actual_yield", self.actual_yield)?;
        validate_quality_rating(self.quality_rating)?;
        validate_moisture(self.moisture_content)?;
        let notes = validate_optional_text("notes", self.notes.as_deref())?;
        Ok(notes)
    }
}

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

/// Lists harvest records (optionally one year) with total yield and
/// average quality over exactly the filtered rows.
pub async fn list_harvests(
    State(state): State<AppState>,
    Query(query): Query<HarvestListQuery>,
) -> Result<Json<ListResponse<HarvestWithNames, HarvestStats>>, ApiError> {
    let filter = HarvestFilter { year: query.year };
    let rows = state.db.harvests().list(&filter).await?;
    let stats = HarvestStats::compute(rows.iter().map(|r| &r.harvest));

    Ok(Json(ListResponse { rows, stats }))
}

/// Creates a harvest record from the dialog payload.
pub async fn create_harvest(
    State(state): State<AppState>,
    Json(payload): Json<HarvestPayload>,
) -> Result<(StatusCode, Json<Harvest>), ApiError> {
    debug!(field_id = %payload.field_id, crop_id = %payload.crop_id, "create_harvest command");
    let notes = payload.validate()?;
    check_references(&state, &payload.field_id, &payload.crop_id).await?;

    let harvest = Harvest {
        id: generate_id(),
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        actual_yield: payload.actual_yield,
        harvest_date: payload.harvest_date,
        quality_rating: payload.quality_rating,
        moisture_content: payload.moisture_content,
        notes,
    };

    state.db.harvests().insert(&harvest).await?;
    Ok((StatusCode::CREATED, Json(harvest)))
}

/// Updates the targeted harvest record from the dialog payload.
pub async fn update_harvest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HarvestPayload>,
) -> Result<Json<Harvest>, ApiError> {
    debug!(id = %id, "update_harvest command");
    validate_uuid(&id)?;
    let notes = payload.validate()?;

    let existing = state
        .db
        .harvests()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Harvest", &id))?;
    check_references(&state, &payload.field_id, &payload.crop_id).await?;

    let harvest = Harvest {
        id: existing.id,
        field_id: payload.field_id,
        crop_id: payload.crop_id,
        actual_yield: payload.actual_yield,
        harvest_date: payload.harvest_date,
        quality_rating: payload.quality_rating,
        moisture_content: payload.moisture_content,
        notes,
    };

    state.db.harvests().update(&harvest).await?;
    Ok(Json(harvest))
}

/// Deletes the targeted harvest record.
pub async fn delete_harvest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_harvest command");
    validate_uuid(&id)?;

    state.db.harvests().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
