//! # Crop Repository
//!
//! Database operations for the crop catalog.
//!
//! The catalog is pre-populated on first run (see [`crate::seed`]) and
//! edited rarely afterwards. The category filter backs the module's
//! dropdown; it is an exact match on the stored enum value.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use agro_core::{Crop, CropCategory};

const CROP_COLUMNS: &str =
    "id, name, category, sowing_season, harvest_period_months, average_yield, description";

/// Repository for crop database operations.
#[derive(Debug, Clone)]
pub struct CropRepository {
    pool: SqlitePool,
}

impl CropRepository {
    /// Creates a new CropRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CropRepository { pool }
    }

    /// Lists crops sorted by name, optionally narrowed to one category.
    pub async fn list(&self, category: Option<CropCategory>) -> DbResult<Vec<Crop>> {
        let mut sql = format!("SELECT {CROP_COLUMNS} FROM crops");
        if category.is_some() {
            sql.push_str(" WHERE category = ?1");
        }
        sql.push_str(" ORDER BY name");

        let mut query = sqlx::query_as::<_, Crop>(&sql);
        if let Some(category) = category {
            query = query.bind(category);
        }

        let crops = query.fetch_all(&self.pool).await?;
        debug!(count = crops.len(), ?category, "Listed crops");
        Ok(crops)
    }

    /// Gets a crop by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Crop>> {
        let sql = format!("SELECT {CROP_COLUMNS} FROM crops WHERE id = ?1");
        let crop = sqlx::query_as::<_, Crop>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(crop)
    }

    /// Inserts a new crop.
    pub async fn insert(&self, crop: &Crop) -> DbResult<()> {
        debug!(name = %crop.name, "Inserting crop");

        sqlx::query(
            r#"
            INSERT INTO crops (
                id, name, category, sowing_season,
                harvest_period_months, average_yield, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&crop.id)
        .bind(&crop.name)
        .bind(crop.category)
        .bind(&crop.sowing_season)
        .bind(crop.harvest_period_months)
        .bind(crop.average_yield)
        .bind(&crop.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing crop.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Crop doesn't exist
    pub async fn update(&self, crop: &Crop) -> DbResult<()> {
        debug!(id = %crop.id, "Updating crop");

        let result = sqlx::query(
            r#"
            UPDATE crops SET
                name = ?2,
                category = ?3,
                sowing_season = ?4,
                harvest_period_months = ?5,
                average_yield = ?6,
                description = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&crop.id)
        .bind(&crop.name)
        .bind(crop.category)
        .bind(&crop.sowing_season)
        .bind(crop.harvest_period_months)
        .bind(crop.average_yield)
        .bind(&crop.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Crop", &crop.id));
        }

        Ok(())
    }

    /// Deletes a crop by ID.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Crop doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - A plan or harvest row still
    ///   references this crop
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting crop");

        let result = sqlx::query("DELETE FROM crops WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Crop", id));
        }

        Ok(())
    }

    /// Counts crops. The seed logic uses this to decide whether the
    /// catalog needs the defaults.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM crops")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
