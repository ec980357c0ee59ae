//! # Default Crop Seeding
//!
//! First-run seeding of the crop catalog.
//!
//! ## How It Works
//! On startup, after migrations, the pool checks the row count of the
//! `crops` table. An empty table gets the eight stock crops below; any
//! non-zero count means a prior run (or the user) already populated the
//! catalog and NOTHING is inserted. That count check is the entire
//! idempotence mechanism - there is no seed ledger.

use agro_core::{Crop, CropCategory};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::pool::Database;

/// The stock crop catalog inserted on first run.
///
/// (name, category, sowing season, harvest period in months, avg yield t/ha)
const DEFAULT_CROPS: &[(&str, CropCategory, &str, i64, f64, &str)] = &[
    ("Winter wheat", CropCategory::Grain, "autumn", 9, 4.5, "Cereal crop"),
    ("Corn", CropCategory::Grain, "spring", 5, 8.0, "Cereal crop"),
    ("Barley", CropCategory::Grain, "autumn", 9, 4.0, "Cereal crop"),
    ("Soybean", CropCategory::Legume, "spring", 4, 2.8, "Legume crop"),
    ("Sunflower", CropCategory::Oil, "spring", 4, 2.5, "Oilseed crop"),
    ("Rapeseed", CropCategory::Oil, "autumn", 11, 3.0, "Oilseed crop"),
    ("Peas", CropCategory::Legume, "spring", 3, 2.2, "Legume crop"),
    ("Buckwheat", CropCategory::Grain, "spring", 3, 1.5, "Cereal crop"),
];

/// Inserts the default crops if the crops table is empty.
///
/// ## Returns
/// The number of rows inserted: the full catalog size on a fresh
/// database, 0 on every subsequent start.
pub async fn ensure_default_crops(db: &Database) -> DbResult<usize> {
    let crops = db.crops();

    let existing = crops.count().await?;
    if existing > 0 {
        debug!(existing, "Crop table already populated, skipping seed");
        return Ok(0);
    }

    for (name, category, season, months, avg_yield, description) in DEFAULT_CROPS {
        let crop = Crop {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            category: *category,
            sowing_season: (*season).to_string(),
            harvest_period_months: *months,
            average_yield: *avg_yield,
            description: Some((*description).to_string()),
        };
        crops.insert(&crop).await?;
    }

    Ok(DEFAULT_CROPS.len())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[tokio::test]
    async fn test_first_run_seeds_exactly_eight_crops() {
        // seed_defaults(false) so the seeding below is the only one
        let config = DbConfig::in_memory().seed_defaults(false);
        let db = Database::new(config).await.unwrap();

        let inserted = ensure_default_crops(&db).await.unwrap();
        assert_eq!(inserted, 8);
        assert_eq!(db.crops().count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_second_run_inserts_nothing() {
        let config = DbConfig::in_memory().seed_defaults(false);
        let db = Database::new(config).await.unwrap();

        assert_eq!(ensure_default_crops(&db).await.unwrap(), 8);
        assert_eq!(ensure_default_crops(&db).await.unwrap(), 0);
        assert_eq!(db.crops().count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_partial_catalog_is_left_alone() {
        let config = DbConfig::in_memory().seed_defaults(false);
        let db = Database::new(config).await.unwrap();

        let crop = Crop {
            id: Uuid::new_v4().to_string(),
            name: "Oats".to_string(),
            category: CropCategory::Grain,
            sowing_season: "spring".to_string(),
            harvest_period_months: 4,
            average_yield: 3.1,
            description: None,
        };
        db.crops().insert(&crop).await.unwrap();

        // Any existing rows suppress seeding entirely
        assert_eq!(ensure_default_crops(&db).await.unwrap(), 0);
        assert_eq!(db.crops().count().await.unwrap(), 1);
    }
}
