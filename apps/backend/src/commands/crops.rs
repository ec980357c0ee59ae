//! # Crop Commands
//!
//! Commands for the crop catalog module. The catalog arrives pre-seeded
//! (eight stock crops on first run) and the grid offers a category
//! dropdown backed by the exact-match filter below.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use agro_core::report::CropStats;
use agro_core::validation::{
    validate_harvest_period, validate_name, validate_non_negative, validate_optional_text,
    validate_uuid,
};
use agro_core::{Crop, CropCategory};
use agro_db::repository::generate_id;

use crate::commands::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Form payload for the crop dialog (create and edit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    pub name: String,
    pub category: CropCategory,
    pub sowing_season: String,
    pub harvest_period_months: i64,
    pub average_yield: f64,
    pub description: Option<String>,
}

struct ValidCropPayload {
    name: String,
    sowing_season: String,
    description: Option<String>,
}

impl CropPayload {
    fn validate(&self) -> Result<ValidCropPayload, ApiError> {
        let name = validate_name(&self.name)?;
        // The season dropdown is free text in the schema; blank collapses
        // to "spring" like the dialog default
        let sowing_season = validate_optional_text("sowing_season", Some(self.sowing_season.as_str()))?
            .unwrap_or_else(|| "spring".to_string());
        validate_harvest_period(self.harvest_period_months)?;
        validate_non_negative("average_yield", self.average_yield)?;
        let description = validate_optional_text("description", self.description.as_deref())?;

        Ok(ValidCropPayload {
            name,
            sowing_season,
            description,
        })
    }
}

/// Dropdown filter for the crop grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropListQuery {
    pub category: Option<CropCategory>,
}

/// Lists crops (optionally one category) with per-category counts.
pub async fn list_crops(
    State(state): State<AppState>,
    Query(query): Query<CropListQuery>,
) -> Result<Json<ListResponse<Crop, CropStats>>, ApiError> {
    let rows = state.db.crops().list(query.category).await?;
    let stats = CropStats::compute(&rows);

    Ok(Json(ListResponse { rows, stats }))
}

/// Creates a crop from the dialog payload.
pub async fn create_crop(
    State(state): State<AppState>,
    Json(payload): Json<CropPayload>,
) -> Result<(StatusCode, Json<Crop>), ApiError> {
    debug!(name = %payload.name, "create_crop command");
    let valid = payload.validate()?;

    let crop = Crop {
        id: generate_id(),
        name: valid.name,
        category: payload.category,
        sowing_season: valid.sowing_season,
        harvest_period_months: payload.harvest_period_months,
        average_yield: payload.average_yield,
        description: valid.description,
    };

    state.db.crops().insert(&crop).await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

/// Updates the targeted crop from the dialog payload.
pub async fn update_crop(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CropPayload>,
) -> Result<Json<Crop>, ApiError> {
    debug!(id = %id, "update_crop command");
    validate_uuid(&id)?;
    let valid = payload.validate()?;

    let existing = state
        .db
        .crops()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Crop", &id))?;

    let crop = Crop {
        id: existing.id,
        name: valid.name,
        category: payload.category,
        sowing_season: valid.sowing_season,
        harvest_period_months: payload.harvest_period_months,
        average_yield: payload.average_yield,
        description: valid.description,
    };

    state.db.crops().update(&crop).await?;
    Ok(Json(crop))
}

/// Deletes the targeted crop.
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_crop command");
    validate_uuid(&id)?;

    state.db.crops().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
