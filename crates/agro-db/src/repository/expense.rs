//! # Expense Repository
//!
//! Database operations for expenses.
//!
//! ## Derived Total
//! `total_cost_cents` is stored in the table but DERIVED in exactly one
//! place: this repository computes `round(amount_cents × quantity)` on
//! every insert and update. Whatever value the passed entity carries is
//! ignored, so the stored total can never drift from its factors.
//!
//! ## Filters
//! The expenses grid filters by type (exact match on the stored enum
//! value) and by year (the year component of the date column). The two
//! compose.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use agro_core::{Expense, ExpenseType, Money};

const EXPENSE_COLUMNS: &str = "id, field_id, crop_id, expense_type, amount_cents, \
     quantity, unit, total_cost_cents, date, description";

const EXPENSE_COLUMNS_QUALIFIED: &str = "e.id, e.field_id, e.crop_id, e.expense_type, \
     e.amount_cents, e.quantity, e.unit, e.total_cost_cents, e.date, e.description";

/// Filters for the expenses list view.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Exact match on the expense type ("all types" = `None`).
    pub expense_type: Option<ExpenseType>,
    /// Match on the year of the date column ("all years" = `None`).
    pub year: Option<i32>,
}

/// An expense row joined with field and crop names for the grid.
///
/// Both links are optional, so the names are too; the grid renders a
/// dash for a missing link.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWithNames {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub expense: Expense,
    pub field_name: Option<String>,
    pub crop_name: Option<String>,
}

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Lists expenses with field/crop names, newest date first.
    pub async fn list(&self, filter: &ExpenseFilter) -> DbResult<Vec<ExpenseWithNames>> {
        let mut sql = format!(
            r#"
            SELECT {EXPENSE_COLUMNS_QUALIFIED},
                   f.name AS field_name,
                   c.name AS crop_name
            FROM expenses e
            LEFT JOIN fields f ON e.field_id = f.id
            LEFT JOIN crops c ON e.crop_id = c.id
            WHERE 1=1
            "#
        );
        if filter.expense_type.is_some() {
            sql.push_str(" AND e.expense_type = ?");
        }
        if filter.year.is_some() {
            sql.push_str(" AND strftime('%Y', e.date) = ?");
        }
        sql.push_str(" ORDER BY e.date DESC, e.id");

        let mut query = sqlx::query_as::<_, ExpenseWithNames>(&sql);
        if let Some(expense_type) = filter.expense_type {
            query = query.bind(expense_type);
        }
        if let Some(year) = filter.year {
            query = query.bind(format!("{year:04}"));
        }

        let expenses = query.fetch_all(&self.pool).await?;
        debug!(count = expenses.len(), ?filter, "Listed expenses");
        Ok(expenses)
    }

    /// Gets an expense by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1");
        let expense = sqlx::query_as::<_, Expense>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    /// Inserts a new expense.
    ///
    /// The stored total is computed here from amount × quantity; the
    /// entity's own `total_cost_cents` is not consulted.
    pub async fn insert(&self, expense: &Expense) -> DbResult<()> {
        debug!(expense_type = %expense.expense_type, "Inserting expense");

        let total_cost = Money::from_cents(expense.amount_cents).line_total(expense.quantity);

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, field_id, crop_id, expense_type, amount_cents,
                quantity, unit, total_cost_cents, date, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.field_id)
        .bind(&expense.crop_id)
        .bind(expense.expense_type)
        .bind(expense.amount_cents)
        .bind(expense.quantity)
        .bind(&expense.unit)
        .bind(total_cost.cents())
        .bind(expense.date)
        .bind(&expense.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing expense, recomputing the stored total.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Expense doesn't exist
    pub async fn update(&self, expense: &Expense) -> DbResult<()> {
        debug!(id = %expense.id, "Updating expense");

        let total_cost = Money::from_cents(expense.amount_cents).line_total(expense.quantity);

        let result = sqlx::query(
            r#"
            UPDATE expenses SET
                field_id = ?2,
                crop_id = ?3,
                expense_type = ?4,
                amount_cents = ?5,
                quantity = ?6,
                unit = ?7,
                total_cost_cents = ?8,
                date = ?9,
                description = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.field_id)
        .bind(&expense.crop_id)
        .bind(expense.expense_type)
        .bind(expense.amount_cents)
        .bind(expense.quantity)
        .bind(&expense.unit)
        .bind(total_cost.cents())
        .bind(expense.date)
        .bind(&expense.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", &expense.id));
        }

        Ok(())
    }

    /// Deletes an expense by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }

    /// Counts expenses (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
