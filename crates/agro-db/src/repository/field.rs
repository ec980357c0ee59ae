//! # Field Repository
//!
//! Database operations for fields (land parcels).
//!
//! ## Key Operations
//! - List all fields with the grid's sort order
//! - CRUD operations
//!
//! Fields are the most referenced table: planting plans and harvest rows
//! require a field id, expenses may carry one. Deleting a field that a
//! plan or harvest row still references fails with a foreign key
//! violation; expense rows lose the link instead (SET NULL).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use agro_core::Field;

const FIELD_COLUMNS: &str = "id, name, area, soil_type, description, created_at";

/// Repository for field database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = FieldRepository::new(pool);
/// let fields = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct FieldRepository {
    pool: SqlitePool,
}

impl FieldRepository {
    /// Creates a new FieldRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FieldRepository { pool }
    }

    /// Lists all fields in creation order (the grid's order).
    pub async fn list(&self) -> DbResult<Vec<Field>> {
        let sql = format!("SELECT {FIELD_COLUMNS} FROM fields ORDER BY created_at, name");
        let fields = sqlx::query_as::<_, Field>(&sql).fetch_all(&self.pool).await?;

        debug!(count = fields.len(), "Listed fields");
        Ok(fields)
    }

    /// Gets a field by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Field))` - Field found
    /// * `Ok(None)` - Field not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Field>> {
        let sql = format!("SELECT {FIELD_COLUMNS} FROM fields WHERE id = ?1");
        let field = sqlx::query_as::<_, Field>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(field)
    }

    /// Inserts a new field.
    ///
    /// ## Arguments
    /// * `field` - Field to insert (id generated beforehand)
    pub async fn insert(&self, field: &Field) -> DbResult<()> {
        debug!(name = %field.name, "Inserting field");

        sqlx::query(
            r#"
            INSERT INTO fields (id, name, area, soil_type, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&field.id)
        .bind(&field.name)
        .bind(field.area)
        .bind(&field.soil_type)
        .bind(&field.description)
        .bind(field.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing field.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Field doesn't exist
    pub async fn update(&self, field: &Field) -> DbResult<()> {
        debug!(id = %field.id, "Updating field");

        let result = sqlx::query(
            r#"
            UPDATE fields SET
                name = ?2,
                area = ?3,
                soil_type = ?4,
                description = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&field.id)
        .bind(&field.name)
        .bind(field.area)
        .bind(&field.soil_type)
        .bind(&field.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Field", &field.id));
        }

        Ok(())
    }

    /// Deletes a field by ID.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - Field doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - A plan or harvest row still
    ///   references this field
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting field");

        let result = sqlx::query("DELETE FROM fields WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Field", id));
        }

        Ok(())
    }

    /// Counts fields (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fields")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
