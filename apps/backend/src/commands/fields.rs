//! # Field Commands
//!
//! Commands for the field management module.
//!
//! ## Dialog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Fields screen                                                          │
//! │                                                                         │
//! │  [➕ Add] [✏️ Edit] [🗑️ Delete]                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Dialog collects: name, area (ha), soil type, description              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_name / validate_area  ← reject = warning, form stays open    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT or UPDATE, grid reloads, status line recomputed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use agro_core::report::FieldStats;
use agro_core::validation::{validate_area, validate_name, validate_optional_text, validate_uuid};
use agro_core::Field;
use agro_db::repository::generate_id;

use crate::commands::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Form payload for the field dialog (create and edit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPayload {
    pub name: String,
    pub area: f64,
    pub soil_type: Option<String>,
    pub description: Option<String>,
}

/// The validated form values, ready to become a row.
struct ValidFieldPayload {
    name: String,
    area: f64,
    soil_type: Option<String>,
    description: Option<String>,
}

impl FieldPayload {
    fn validate(&self) -> Result<ValidFieldPayload, ApiError> {
        let name = validate_name(&self.name)?;
        validate_area(self.area)?;
        let soil_type = validate_optional_text("soil_type", self.soil_type.as_deref())?;
        let description = validate_optional_text("description", self.description.as_deref())?;

        Ok(ValidFieldPayload {
            name,
            area: self.area,
            soil_type,
            description,
        })
    }
}

/// Lists all fields with the module's status line (total area, count).
pub async fn list_fields(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Field, FieldStats>>, ApiError> {
    let rows = state.db.fields().list().await?;
    let stats = FieldStats::compute(&rows);

    Ok(Json(ListResponse { rows, stats }))
}

/// Creates a field from the dialog payload.
///
/// ## Returns
/// `201 Created` with the stored row, or `400` when validation fails
/// (empty name, non-positive area) - no row is written in that case.
pub async fn create_field(
    State(state): State<AppState>,
    Json(payload): Json<FieldPayload>,
) -> Result<(StatusCode, Json<Field>), ApiError> {
    debug!(name = %payload.name, "create_field command");
    let valid = payload.validate()?;

    let field = Field {
        id: generate_id(),
        name: valid.name,
        area: valid.area,
        soil_type: valid.soil_type,
        description: valid.description,
        created_at: Utc::now(),
    };

    state.db.fields().insert(&field).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Updates the targeted field from the dialog payload.
///
/// ## Returns
/// The updated row; `404` when the id does not exist.
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FieldPayload>,
) -> Result<Json<Field>, ApiError> {
    debug!(id = %id, "update_field command");
    validate_uuid(&id)?;
    let valid = payload.validate()?;

    let existing = state
        .db
        .fields()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Field", &id))?;

    let field = Field {
        id: existing.id,
        name: valid.name,
        area: valid.area,
        soil_type: valid.soil_type,
        description: valid.description,
        created_at: existing.created_at,
    };

    state.db.fields().update(&field).await?;
    Ok(Json(field))
}

/// Deletes the targeted field.
///
/// ## Returns
/// `204 No Content`; `404` when the id does not exist; `400` when a
/// plan or harvest row still references the field.
pub async fn delete_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(id = %id, "delete_field command");
    validate_uuid(&id)?;

    state.db.fields().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
