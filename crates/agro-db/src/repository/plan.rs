//! # Planting Plan Repository
//!
//! Database operations for planting plans.
//!
//! ## List Shape
//! The planning grid shows the field and crop by name, so the list query
//! joins both tables and returns [`PlanWithNames`] rows. The plain entity
//! comes back from `get_by_id` for the edit dialog.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use agro_core::{PlanStatus, PlantingPlan};

const PLAN_COLUMNS: &str = "id, field_id, crop_id, season_year, planned_area, \
     sowing_date, expected_harvest_date, status";

const PLAN_COLUMNS_QUALIFIED: &str = "p.id, p.field_id, p.crop_id, p.season_year, \
     p.planned_area, p.sowing_date, p.expected_harvest_date, p.status";

/// Filters for the planning list view.
///
/// Both filters are exact matches against the stored value; `None` means
/// "all" (the dropdown's first entry).
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub season_year: Option<String>,
    pub status: Option<PlanStatus>,
}

/// A planting plan row joined with the field and crop names for the grid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlanWithNames {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub plan: PlantingPlan,
    pub field_name: String,
    pub crop_name: String,
}

/// Repository for planting plan database operations.
#[derive(Debug, Clone)]
pub struct PlanRepository {
    pool: SqlitePool,
}

impl PlanRepository {
    /// Creates a new PlanRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PlanRepository { pool }
    }

    /// Lists plans with field/crop names, newest sowing date first.
    pub async fn list(&self, filter: &PlanFilter) -> DbResult<Vec<PlanWithNames>> {
        let mut sql = format!(
            r#"
            SELECT {PLAN_COLUMNS_QUALIFIED},
                   f.name AS field_name,
                   c.name AS crop_name
            FROM planting_plans p
            INNER JOIN fields f ON p.field_id = f.id
            INNER JOIN crops c ON p.crop_id = c.id
            WHERE 1=1
            "#
        );
        if filter.season_year.is_some() {
            sql.push_str(" AND p.season_year = ?");
        }
        if filter.status.is_some() {
            sql.push_str(" AND p.status = ?");
        }
        sql.push_str(" ORDER BY p.sowing_date DESC, p.id");

        let mut query = sqlx::query_as::<_, PlanWithNames>(&sql);
        if let Some(season_year) = &filter.season_year {
            query = query.bind(season_year);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }

        let plans = query.fetch_all(&self.pool).await?;
        debug!(count = plans.len(), "Listed planting plans");
        Ok(plans)
    }

    /// Gets a plan by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PlantingPlan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM planting_plans WHERE id = ?1");
        let plan = sqlx::query_as::<_, PlantingPlan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(plan)
    }

    /// Inserts a new plan.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - field or crop id doesn't exist
    pub async fn insert(&self, plan: &PlantingPlan) -> DbResult<()> {
        debug!(field_id = %plan.field_id, crop_id = %plan.crop_id, "Inserting plan");

        sqlx::query(
            r#"
            INSERT INTO planting_plans (
                id, field_id, crop_id, season_year, planned_area,
                sowing_date, expected_harvest_date, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.field_id)
        .bind(&plan.crop_id)
        .bind(&plan.season_year)
        .bind(plan.planned_area)
        .bind(plan.sowing_date)
        .bind(plan.expected_harvest_date)
        .bind(plan.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing plan.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Plan doesn't exist
    pub async fn update(&self, plan: &PlantingPlan) -> DbResult<()> {
        debug!(id = %plan.id, "Updating plan");

        let result = sqlx::query(
            r#"
            UPDATE planting_plans SET
                field_id = ?2,
                crop_id = ?3,
                season_year = ?4,
                planned_area = ?5,
                sowing_date = ?6,
                expected_harvest_date = ?7,
                status = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.field_id)
        .bind(&plan.crop_id)
        .bind(&plan.season_year)
        .bind(plan.planned_area)
        .bind(plan.sowing_date)
        .bind(plan.expected_harvest_date)
        .bind(plan.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Plan", &plan.id));
        }

        Ok(())
    }

    /// Deletes a plan by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting plan");

        let result = sqlx::query("DELETE FROM planting_plans WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Plan", id));
        }

        Ok(())
    }

    /// Counts plans (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM planting_plans")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
