//! # Domain Types
//!
//! Core domain types used throughout AgroFarm Manager.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Field       │   │      Crop       │   │  PlantingPlan   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  field_id (FK)  │       │
//! │  │  area (ha)      │   │  category       │   │  crop_id (FK)   │       │
//! │  │  soil_type      │   │  average_yield  │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Expense      │   │    Harvest      │   │   PlanStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  expense_type   │   │  actual_yield   │   │  Planned        │       │
//! │  │  amount_cents   │   │  quality 1-5    │   │  InProgress     │       │
//! │  │  total_cost     │   │  moisture %     │   │  Completed      │       │
//! │  └─────────────────┘   └─────────────────┘   │  Cancelled      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has an `id`: UUID v4 string, generated in code before the
//! insert, immutable afterwards. Rows reference each other by these ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Field
// =============================================================================

/// A cultivated land parcel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the grid and in reports.
    pub name: String,

    /// Area in hectares. Always positive.
    pub area: f64,

    /// Soil type (free text: chernozem, loam, clay, peat, sand).
    pub soil_type: Option<String>,

    /// Optional free-form description.
    pub description: Option<String>,

    /// When the field record was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Crop Category
// =============================================================================

/// The agronomic category of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum CropCategory {
    /// Cereal crops (wheat, corn, barley, buckwheat).
    Grain,
    /// Nitrogen-fixing crops (soybean, peas).
    Legume,
    /// Oilseed crops (sunflower, rapeseed).
    Oil,
}

impl CropCategory {
    /// All categories, in the order the dialog dropdown lists them.
    pub const ALL: [CropCategory; 3] =
        [CropCategory::Grain, CropCategory::Legume, CropCategory::Oil];

    /// The stored/wire value of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Grain => "grain",
            CropCategory::Legume => "legume",
            CropCategory::Oil => "oil",
        }
    }

    /// Report label for the category line.
    pub const fn label(&self) -> &'static str {
        match self {
            CropCategory::Grain => "Grain",
            CropCategory::Legume => "Legume",
            CropCategory::Oil => "Oil",
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Crop
// =============================================================================

/// A plantable species/variety.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name (e.g., "Winter wheat").
    pub name: String,

    /// Agronomic category, constrained to the enum.
    pub category: CropCategory,

    /// Typical sowing season (free text: "spring", "autumn").
    pub sowing_season: String,

    /// Months from sowing to harvest.
    pub harvest_period_months: i64,

    /// Expected yield in tonnes per hectare.
    pub average_yield: f64,

    /// Optional free-form description.
    pub description: Option<String>,
}

// =============================================================================
// Planting Plan
// =============================================================================

/// The status of a planting plan.
///
/// Free of workflow enforcement: any status can be set at any time.
/// The variants exist so dialogs offer a fixed set, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Sowing is scheduled but not started.
    Planned,
    /// Sowing/maintenance underway.
    InProgress,
    /// The plan ran to harvest.
    Completed,
    /// Abandoned (weather, rotation change, economics).
    Cancelled,
}

impl PlanStatus {
    /// All statuses, in the order the planning dialog lists them.
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Planned,
        PlanStatus::InProgress,
        PlanStatus::Completed,
        PlanStatus::Cancelled,
    ];

    /// The stored/wire value of this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Planned => "planned",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for PlanStatus {
    fn default() -> Self {
        PlanStatus::Planned
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled sowing of a crop on a field for a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PlantingPlan {
    pub id: String,
    /// Field being sown. Required.
    pub field_id: String,
    /// Crop being sown. Required.
    pub crop_id: String,
    /// Season label (e.g., "2024-2025").
    pub season_year: String,
    /// Area scheduled for this crop, in hectares.
    pub planned_area: f64,
    pub sowing_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub status: PlanStatus,
}

// =============================================================================
// Expense
// =============================================================================

/// Category of a recorded cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Seeds,
    Fuel,
    Fertilizers,
    Chemicals,
    Labor,
    Equipment,
    Other,
}

impl ExpenseType {
    /// All expense types, in the order the dialog dropdown lists them.
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Seeds,
        ExpenseType::Fuel,
        ExpenseType::Fertilizers,
        ExpenseType::Chemicals,
        ExpenseType::Labor,
        ExpenseType::Equipment,
        ExpenseType::Other,
    ];

    /// The stored/wire value of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Seeds => "seeds",
            ExpenseType::Fuel => "fuel",
            ExpenseType::Fertilizers => "fertilizers",
            ExpenseType::Chemicals => "chemicals",
            ExpenseType::Labor => "labor",
            ExpenseType::Equipment => "equipment",
            ExpenseType::Other => "other",
        }
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded cost, optionally tied to a field and/or crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    /// Field the cost applies to, if any.
    pub field_id: Option<String>,
    /// Crop the cost applies to, if any.
    pub crop_id: Option<String>,
    pub expense_type: ExpenseType,
    /// Unit price in kopiykas (smallest currency unit).
    pub amount_cents: i64,
    /// Purchased quantity (litres, tonnes, hours, ...).
    pub quantity: f64,
    /// Unit of the quantity (free text: "l", "t", "h").
    pub unit: Option<String>,
    /// Stored line total in kopiykas.
    ///
    /// Always written as `round(amount_cents × quantity)` by the one code
    /// path that inserts or updates an expense. Never accepted from the
    /// client, so it cannot drift from its factors.
    pub total_cost_cents: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Expense {
    /// Returns the unit price as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the stored line total as Money.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }
}

// =============================================================================
// Harvest
// =============================================================================

/// A recorded yield outcome for a field/crop on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Harvest {
    pub id: String,
    /// Field the yield came from. Required.
    pub field_id: String,
    /// Crop that was harvested. Required.
    pub crop_id: String,
    /// Gathered yield in tonnes.
    pub actual_yield: f64,
    pub harvest_date: NaiveDate,
    /// Quality rating, constrained 1-5.
    pub quality_rating: i64,
    /// Grain moisture at intake, percent (0-100).
    pub moisture_content: f64,
    pub notes: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_status_default() {
        assert_eq!(PlanStatus::default(), PlanStatus::Planned);
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(CropCategory::Grain.as_str(), "grain");
        assert_eq!(PlanStatus::InProgress.as_str(), "in_progress");
        assert_eq!(ExpenseType::Fertilizers.as_str(), "fertilizers");
    }

    #[test]
    fn test_enum_serde_matches_wire_values() {
        for status in PlanStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for ty in ExpenseType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_expense_money_accessors() {
        let expense = Expense {
            id: "e-1".to_string(),
            field_id: None,
            crop_id: None,
            expense_type: ExpenseType::Fuel,
            amount_cents: 5650,
            quantity: 2.0,
            unit: Some("l".to_string()),
            total_cost_cents: 11300,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            description: None,
        };

        assert_eq!(expense.amount().cents(), 5650);
        assert_eq!(expense.total_cost().cents(), 11300);
        assert_eq!(
            expense.amount().line_total(expense.quantity).cents(),
            expense.total_cost_cents
        );
    }
}
