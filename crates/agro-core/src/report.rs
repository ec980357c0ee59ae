//! # Report Rendering
//!
//! Plain-text report rendering and the per-module statistics lines.
//!
//! ## Shape
//! Every report follows the same layout the screens print:
//! ```text
//! FIELD REPORT
//! ========================================
//!
//! Field: North 40
//! Area: 12.50 ha
//! ...
//! ----------------------------------------
//!
//! Total area: 45.00 ha
//! Fields: 3
//! ```
//!
//! Rendering is pure: rows in, `String` out. Fetching the rows is the
//! repositories' job; serving the text is the backend's job.
//!
//! The `*Stats` types double as the status line under each module's grid:
//! they are computed from exactly the row set the grid shows, so the
//! displayed aggregate always matches the visible rows.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::money::Money;
use crate::types::{Crop, CropCategory, Expense, Field, Harvest, PlantingPlan};

const RULE_HEAVY: &str = "========================================";
const RULE_LIGHT: &str = "----------------------------------------";

// =============================================================================
// Stats Lines
// =============================================================================

/// Status line for the fields module: total area and row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    pub total_area: f64,
    pub count: usize,
}

impl FieldStats {
    pub fn compute(fields: &[Field]) -> Self {
        FieldStats {
            total_area: fields.iter().map(|f| f.area).sum(),
            count: fields.len(),
        }
    }
}

/// Status line for the crops module: row count per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropStats {
    pub grain: usize,
    pub legume: usize,
    pub oil: usize,
    pub count: usize,
}

impl CropStats {
    pub fn compute(crops: &[Crop]) -> Self {
        let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
        for crop in crops {
            *by_category.entry(crop.category.as_str()).or_default() += 1;
        }

        CropStats {
            grain: by_category.get("grain").copied().unwrap_or(0),
            legume: by_category.get("legume").copied().unwrap_or(0),
            oil: by_category.get("oil").copied().unwrap_or(0),
            count: crops.len(),
        }
    }
}

/// Status line for the planning module: total planned area and row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub total_planned_area: f64,
    pub count: usize,
}

impl PlanStats {
    pub fn compute<'a>(plans: impl IntoIterator<Item = &'a PlantingPlan>) -> Self {
        let mut stats = PlanStats {
            total_planned_area: 0.0,
            count: 0,
        };
        for plan in plans {
            stats.total_planned_area += plan.planned_area;
            stats.count += 1;
        }
        stats
    }
}

/// Status line for the expenses module: summed line totals and row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    /// Sum of `total_cost_cents` over the filtered rows.
    pub total_cost_cents: i64,
    pub count: usize,
}

impl ExpenseStats {
    pub fn compute<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut total = Money::zero();
        let mut count = 0;
        for expense in expenses {
            total += expense.total_cost();
            count += 1;
        }
        ExpenseStats {
            total_cost_cents: total.cents(),
            count,
        }
    }

    /// The summed total as Money, for report formatting.
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }
}

/// Status line for the harvest module: total yield, average quality, count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestStats {
    pub total_yield: f64,
    /// Arithmetic mean of the 1-5 ratings; `None` with no rows.
    pub average_quality: Option<f64>,
    pub count: usize,
}

impl HarvestStats {
    pub fn compute<'a>(harvests: impl IntoIterator<Item = &'a Harvest>) -> Self {
        let mut total_yield = 0.0;
        let mut quality_sum = 0i64;
        let mut count = 0usize;
        for harvest in harvests {
            total_yield += harvest.actual_yield;
            quality_sum += harvest.quality_rating;
            count += 1;
        }

        HarvestStats {
            total_yield,
            average_quality: if count == 0 {
                None
            } else {
                Some(quality_sum as f64 / count as f64)
            },
            count,
        }
    }
}

// =============================================================================
// Report Rendering
// =============================================================================

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out);
}

fn optional(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// Renders the fields report: one block per field, total area at the end.
pub fn field_report(fields: &[Field]) -> String {
    let mut out = String::new();
    header(&mut out, "FIELD REPORT");

    for field in fields {
        let _ = writeln!(out, "Field: {}", field.name);
        let _ = writeln!(out, "Area: {:.2} ha", field.area);
        let _ = writeln!(out, "Soil type: {}", optional(field.soil_type.as_deref()));
        let _ = writeln!(
            out,
            "Description: {}",
            optional(field.description.as_deref())
        );
        let _ = writeln!(out, "{RULE_LIGHT}");
    }

    let stats = FieldStats::compute(fields);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total area: {:.2} ha", stats.total_area);
    let _ = write!(out, "Fields: {}", stats.count);
    out
}

/// Renders the crops report with per-category counts at the end.
pub fn crop_report(crops: &[Crop]) -> String {
    let mut out = String::new();
    header(&mut out, "CROP REPORT");

    for crop in crops {
        let _ = writeln!(out, "Crop: {}", crop.name);
        let _ = writeln!(out, "Category: {}", crop.category);
        let _ = writeln!(out, "Season: {}", crop.sowing_season);
        let _ = writeln!(out, "Average yield: {:.1} t/ha", crop.average_yield);
        let _ = writeln!(out, "{RULE_LIGHT}");
    }

    let stats = CropStats::compute(crops);
    let _ = writeln!(out);
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(out, "{}: {}", CropCategory::Grain.label(), stats.grain);
    let _ = writeln!(out, "{}: {}", CropCategory::Legume.label(), stats.legume);
    let _ = writeln!(out, "{}: {}", CropCategory::Oil.label(), stats.oil);
    let _ = write!(out, "Total: {}", stats.count);
    out
}

/// Renders the expenses report with the summed line totals at the end.
pub fn expense_report(expenses: &[Expense]) -> String {
    let mut out = String::new();
    header(&mut out, "EXPENSE REPORT");

    for expense in expenses {
        let _ = writeln!(out, "Type: {}", expense.expense_type);
        let _ = writeln!(out, "Amount: {} UAH", expense.amount());
        let _ = writeln!(out, "Total cost: {} UAH", expense.total_cost());
        let _ = writeln!(out, "Date: {}", expense.date);
        let _ = writeln!(
            out,
            "Description: {}",
            optional(expense.description.as_deref())
        );
        let _ = writeln!(out, "{RULE_LIGHT}");
    }

    let stats = ExpenseStats::compute(expenses);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {} UAH", stats.total_cost());
    let _ = write!(out, "Records: {}", stats.count);
    out
}

/// Renders the harvest report with the summed yield at the end.
pub fn harvest_report(harvests: &[Harvest]) -> String {
    let mut out = String::new();
    header(&mut out, "HARVEST REPORT");

    for harvest in harvests {
        let _ = writeln!(out, "Yield: {:.2} t", harvest.actual_yield);
        let _ = writeln!(out, "Date: {}", harvest.harvest_date);
        let _ = writeln!(out, "Quality: {}/5", harvest.quality_rating);
        let _ = writeln!(out, "{RULE_LIGHT}");
    }

    let stats = HarvestStats::compute(harvests);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total yield: {:.2} t", stats.total_yield);
    let _ = write!(out, "Records: {}", stats.count);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpenseType, PlanStatus};
    use chrono::{NaiveDate, Utc};

    fn field(name: &str, area: f64) -> Field {
        Field {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            area,
            soil_type: Some("chernozem".to_string()),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn crop(name: &str, category: CropCategory) -> Crop {
        Crop {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
            sowing_season: "spring".to_string(),
            harvest_period_months: 5,
            average_yield: 4.0,
            description: None,
        }
    }

    fn expense(amount_cents: i64, quantity: f64) -> Expense {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            field_id: None,
            crop_id: None,
            expense_type: ExpenseType::Fuel,
            amount_cents,
            quantity,
            unit: Some("l".to_string()),
            total_cost_cents: Money::from_cents(amount_cents).line_total(quantity).cents(),
            date: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            description: None,
        }
    }

    fn harvest(actual_yield: f64, quality: i64) -> Harvest {
        Harvest {
            id: uuid::Uuid::new_v4().to_string(),
            field_id: "f".to_string(),
            crop_id: "c".to_string(),
            actual_yield,
            harvest_date: NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(),
            quality_rating: quality,
            moisture_content: 14.0,
            notes: None,
        }
    }

    #[test]
    fn test_field_stats() {
        let fields = vec![field("A", 10.0), field("B", 2.5)];
        let stats = FieldStats::compute(&fields);
        assert_eq!(stats.count, 2);
        assert!((stats.total_area - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crop_stats_counts_by_category() {
        let crops = vec![
            crop("Wheat", CropCategory::Grain),
            crop("Corn", CropCategory::Grain),
            crop("Soybean", CropCategory::Legume),
        ];
        let stats = CropStats::compute(&crops);
        assert_eq!(stats.grain, 2);
        assert_eq!(stats.legume, 1);
        assert_eq!(stats.oil, 0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_expense_stats_sums_totals() {
        let expenses = vec![expense(1000, 2.0), expense(500, 3.0)];
        let stats = ExpenseStats::compute(&expenses);
        assert_eq!(stats.total_cost_cents, 3500);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_harvest_stats_average_quality() {
        let harvests = vec![harvest(10.0, 4), harvest(5.0, 5)];
        let stats = HarvestStats::compute(&harvests);
        assert!((stats.total_yield - 15.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_quality, Some(4.5));
        assert_eq!(stats.count, 2);

        assert_eq!(HarvestStats::compute(&[]).average_quality, None);
    }

    #[test]
    fn test_plan_stats() {
        let plans = vec![PlantingPlan {
            id: "p".to_string(),
            field_id: "f".to_string(),
            crop_id: "c".to_string(),
            season_year: "2024-2025".to_string(),
            planned_area: 30.0,
            sowing_date: NaiveDate::from_ymd_opt(2024, 9, 20).unwrap(),
            expected_harvest_date: None,
            status: PlanStatus::Planned,
        }];
        let stats = PlanStats::compute(&plans);
        assert!((stats.total_planned_area - 30.0).abs() < f64::EPSILON);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn test_field_report_layout() {
        let fields = vec![field("North 40", 12.5)];
        let report = field_report(&fields);

        assert!(report.starts_with("FIELD REPORT\n========"));
        assert!(report.contains("Field: North 40"));
        assert!(report.contains("Area: 12.50 ha"));
        assert!(report.contains("Soil type: chernozem"));
        assert!(report.ends_with("Fields: 1"));
    }

    #[test]
    fn test_crop_report_trailing_statistics() {
        let crops = vec![
            crop("Sunflower", CropCategory::Oil),
            crop("Peas", CropCategory::Legume),
        ];
        let report = crop_report(&crops);

        assert!(report.contains("Crop: Sunflower"));
        assert!(report.contains("Grain: 0"));
        assert!(report.contains("Legume: 1"));
        assert!(report.contains("Oil: 1"));
        assert!(report.ends_with("Total: 2"));
    }

    #[test]
    fn test_expense_report_total_line() {
        let expenses = vec![expense(5650, 2.0)];
        let report = expense_report(&expenses);

        assert!(report.contains("Type: fuel"));
        assert!(report.contains("Amount: 56.50 UAH"));
        assert!(report.contains("Total: 113.00 UAH"));
        assert!(report.ends_with("Records: 1"));
    }

    #[test]
    fn test_harvest_report_total_line() {
        let harvests = vec![harvest(12.25, 4)];
        let report = harvest_report(&harvests);

        assert!(report.contains("Yield: 12.25 t"));
        assert!(report.contains("Quality: 4/5"));
        assert!(report.contains("Total yield: 12.25 t"));
        assert!(report.ends_with("Records: 1"));
    }

    #[test]
    fn test_empty_reports_render() {
        assert!(field_report(&[]).ends_with("Fields: 0"));
        assert!(crop_report(&[]).ends_with("Total: 0"));
        assert!(expense_report(&[]).ends_with("Records: 0"));
        assert!(harvest_report(&[]).ends_with("Records: 0"));
    }
}
