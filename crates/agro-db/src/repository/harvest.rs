//! # Harvest Repository
//!
//! Database operations for harvest records.
//!
//! Both links are required: a yield outcome without a field and crop is
//! meaningless. The grid joins both names; the year filter matches the
//! year component of the harvest date.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use agro_core::Harvest;

const HARVEST_COLUMNS: &str = "id, field_id, crop_id, actual_yield, harvest_date, \
     quality_rating, moisture_content, notes";

const HARVEST_COLUMNS_QUALIFIED: &str = "h.id, h.field_id, h.crop_id, h.actual_yield, \
     h.harvest_date, h.quality_rating, h.moisture_content, h.notes";

/// Filters for the harvest list view.
#[derive(Debug, Clone, Default)]
pub struct HarvestFilter {
    /// Match on the year of the harvest date ("all years" = `None`).
    pub year: Option<i32>,
}

/// A harvest row joined with field and crop names for the grid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HarvestWithNames {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub harvest: Harvest,
    pub field_name: String,
    pub crop_name: String,
}

/// Repository for harvest database operations.
#[derive(Debug, Clone)]
pub struct HarvestRepository {
    pool: SqlitePool,
}

impl HarvestRepository {
    /// Creates a new HarvestRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HarvestRepository { pool }
    }

    /// Lists harvest records with field/crop names, newest first.
    pub async fn list(&self, filter: &HarvestFilter) -> DbResult<Vec<HarvestWithNames>> {
        let mut sql = format!(
            r#"
            SELECT {HARVEST_COLUMNS_QUALIFIED},
                   f.name AS field_name,
                   c.name AS crop_name
            FROM harvest h
            INNER JOIN fields f ON h.field_id = f.id
            INNER JOIN crops c ON h.crop_id = c.id
            WHERE 1=1
            "#
        );
        if filter.year.is_some() {
            sql.push_str(" AND strftime('%Y', h.harvest_date) = ?");
        }
        sql.push_str(" ORDER BY h.harvest_date DESC, h.id");

        let mut query = sqlx::query_as::<_, HarvestWithNames>(&sql);
        if let Some(year) = filter.year {
            query = query.bind(format!("{year:04}"));
        }

        let harvests = query.fetch_all(&self.pool).await?;
        debug!(count = harvests.len(), ?filter, "Listed harvest records");
        Ok(harvests)
    }

    /// Gets a harvest record by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Harvest>> {
        let sql = format!("SELECT {HARVEST_COLUMNS} FROM harvest WHERE id = ?1");
        let harvest = sqlx::query_as::<_, Harvest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(harvest)
    }

    /// Inserts a new harvest record.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - field or crop id doesn't exist
    /// * `Err(DbError::CheckViolation)` - quality outside 1-5
    pub async fn insert(&self, harvest: &Harvest) -> DbResult<()> {
        debug!(field_id = %harvest.field_id, crop_id = %harvest.crop_id, "Inserting harvest");

        sqlx::query(
            r#"
            INSERT INTO harvest (
                id, field_id, crop_id, actual_yield, harvest_date,
                quality_rating, moisture_content, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&harvest.id)
        .bind(&harvest.field_id)
        .bind(&harvest.crop_id)
        .bind(harvest.actual_yield)
        .bind(harvest.harvest_date)
        .bind(harvest.quality_rating)
        .bind(harvest.moisture_content)
        .bind(&harvest.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing harvest record.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Record doesn't exist
    pub async fn update(&self, harvest: &Harvest) -> DbResult<()> {
        debug!(id = %harvest.id, "Updating harvest");

        let result = sqlx::query(
            r#"
            UPDATE harvest SET
                field_id = ?2,
                crop_id = ?3,
                actual_yield = ?4,
                harvest_date = ?5,
                quality_rating = ?6,
                moisture_content = ?7,
                notes = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&harvest.id)
        .bind(&harvest.field_id)
        .bind(&harvest.crop_id)
        .bind(harvest.actual_yield)
        .bind(harvest.harvest_date)
        .bind(harvest.quality_rating)
        .bind(harvest.moisture_content)
        .bind(&harvest.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Harvest", &harvest.id));
        }

        Ok(())
    }

    /// Deletes a harvest record by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting harvest");

        let result = sqlx::query("DELETE FROM harvest WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Harvest", id));
        }

        Ok(())
    }

    /// Counts harvest records (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM harvest")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
