//! End-to-end command tests over the real router and an in-memory
//! database. Each test gets a fresh database, so the first-run seed and
//! migrations execute exactly as on a real start.

use axum_test::TestServer;
use serde_json::{json, Value};

use agro_backend::router;
use agro_backend::state::AppState;
use agro_db::{Database, DbConfig};

async fn setup_server() -> TestServer {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    TestServer::new(router(AppState::new(db))).unwrap()
}

/// Creates a field through the API and returns its id.
async fn create_field(server: &TestServer, name: &str, area: f64) -> String {
    let response = server
        .post("/api/fields")
        .json(&json!({ "name": name, "area": area, "soilType": "chernozem" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

/// Returns the id of the first seeded crop.
async fn first_crop_id(server: &TestServer) -> String {
    let response = server.get("/api/crops").await;
    response.json::<Value>()["rows"][0]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let server = setup_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
}

// =============================================================================
// Fields
// =============================================================================

#[tokio::test]
async fn test_field_create_rejections_write_no_row() {
    let server = setup_server().await;

    // Empty name
    let response = server
        .post("/api/fields")
        .json(&json!({ "name": "   ", "area": 10.0 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");

    // Non-positive area
    let response = server
        .post("/api/fields")
        .json(&json!({ "name": "North 40", "area": 0.0 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "area must be positive"
    );

    // Neither attempt wrote a row
    let list = server.get("/api/fields").await.json::<Value>();
    assert_eq!(list["rows"].as_array().unwrap().len(), 0);
    assert_eq!(list["stats"]["count"], 0);
}

#[tokio::test]
async fn test_field_crud_roundtrip() {
    let server = setup_server().await;

    let id = create_field(&server, "North 40", 12.5).await;

    let list = server.get("/api/fields").await.json::<Value>();
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
    assert_eq!(list["rows"][0]["name"], "North 40");
    assert_eq!(list["stats"]["totalArea"], 12.5);
    assert_eq!(list["stats"]["count"], 1);

    // Edit changes only the targeted row
    let other = create_field(&server, "South slope", 30.0).await;
    let response = server
        .put(&format!("/api/fields/{id}"))
        .json(&json!({ "name": "North 40 (drained)", "area": 13.0 }))
        .await;
    response.assert_status_ok();

    let list = server.get("/api/fields").await.json::<Value>();
    let rows = list["rows"].as_array().unwrap();
    let untouched = rows.iter().find(|r| r["id"] == other.as_str()).unwrap();
    assert_eq!(untouched["name"], "South slope");
    assert_eq!(untouched["area"], 30.0);
    assert_eq!(list["stats"]["totalArea"], 43.0);

    // Delete removes the row from subsequent lists
    let response = server.delete(&format!("/api/fields/{id}")).await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let list = server.get("/api/fields").await.json::<Value>();
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);

    // Deleting again is a 404
    let response = server.delete(&format!("/api/fields/{id}")).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

// =============================================================================
// Crops
// =============================================================================

#[tokio::test]
async fn test_crop_catalog_is_seeded_once() {
    let server = setup_server().await;

    let list = server.get("/api/crops").await.json::<Value>();
    assert_eq!(list["rows"].as_array().unwrap().len(), 8);
    assert_eq!(list["stats"]["grain"], 4);
    assert_eq!(list["stats"]["legume"], 2);
    assert_eq!(list["stats"]["oil"], 2);
    assert_eq!(list["stats"]["count"], 8);

    let oil = server.get("/api/crops?category=oil").await.json::<Value>();
    let rows = oil["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["category"] == "oil"));
    assert_eq!(oil["stats"]["count"], 2);
}

#[tokio::test]
async fn test_crop_create_and_update() {
    let server = setup_server().await;

    let response = server
        .post("/api/crops")
        .json(&json!({
            "name": "Oats",
            "category": "grain",
            "sowingSeason": "spring",
            "harvestPeriodMonths": 4,
            "averageYield": 3.1
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/crops/{id}"))
        .json(&json!({
            "name": "Oats (spring)",
            "category": "grain",
            "sowingSeason": "spring",
            "harvestPeriodMonths": 4,
            "averageYield": 3.3
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Oats (spring)");

    let list = server.get("/api/crops").await.json::<Value>();
    assert_eq!(list["stats"]["grain"], 5);
}

// =============================================================================
// Planting plans
// =============================================================================

#[tokio::test]
async fn test_plan_dialog_flow() {
    let server = setup_server().await;

    let field_id = create_field(&server, "West 12", 12.0).await;
    let crop_id = first_crop_id(&server).await;

    // Status omitted: defaults to planned
    let response = server
        .post("/api/plans")
        .json(&json!({
            "fieldId": field_id,
            "cropId": crop_id,
            "seasonYear": "2024-2025",
            "plannedArea": 10.0,
            "sowingDate": "2024-09-20"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["status"], "planned");

    let response = server
        .post("/api/plans")
        .json(&json!({
            "fieldId": field_id,
            "cropId": crop_id,
            "seasonYear": "2023-2024",
            "plannedArea": 5.0,
            "sowingDate": "2023-09-18",
            "status": "completed"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    // Season filter narrows to the matching rows; names are joined in
    let list = server
        .get("/api/plans?seasonYear=2024-2025")
        .await
        .json::<Value>();
    let rows = list["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["fieldName"], "West 12");
    assert_eq!(list["stats"]["totalPlannedArea"], 10.0);

    // A plan against a deleted field is rejected before the insert
    let response = server
        .post("/api/plans")
        .json(&json!({
            "fieldId": "550e8400-e29b-41d4-a716-446655440000",
            "cropId": crop_id,
            "seasonYear": "2024-2025",
            "plannedArea": 3.0,
            "sowingDate": "2024-09-20"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

// =============================================================================
// Expenses
// =============================================================================

#[tokio::test]
async fn test_expense_totals_and_filters() {
    let server = setup_server().await;

    let post = |expense_type: &str, amount_cents: i64, quantity: f64, date: &str| {
        json!({
            "expenseType": expense_type,
            "amountCents": amount_cents,
            "quantity": quantity,
            "date": date
        })
    };

    // 56.50 × 2.0 = 113.00 - the total is derived server-side
    let response = server
        .post("/api/expenses")
        .json(&post("fuel", 5650, 2.0, "2024-04-12"))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["totalCostCents"], 11300);

    server
        .post("/api/expenses")
        .json(&post("seeds", 1_250_000, 2.5, "2024-05-02"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/expenses")
        .json(&post("fuel", 6000, 1.0, "2023-04-30"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // The displayed total equals the sum over the filtered row set
    let all = server.get("/api/expenses").await.json::<Value>();
    assert_eq!(all["rows"].as_array().unwrap().len(), 3);
    assert_eq!(
        all["stats"]["totalCostCents"],
        11300 + 3_125_000 + 6000
    );

    let fuel_2024 = server
        .get("/api/expenses?type=fuel&year=2024")
        .await
        .json::<Value>();
    assert_eq!(fuel_2024["rows"].as_array().unwrap().len(), 1);
    assert_eq!(fuel_2024["stats"]["totalCostCents"], 11300);

    // Negative amount never reaches the table
    let response = server
        .post("/api/expenses")
        .json(&post("other", -100, 1.0, "2024-06-01"))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let all = server.get("/api/expenses").await.json::<Value>();
    assert_eq!(all["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_expense_update_recomputes_total() {
    let server = setup_server().await;

    let response = server
        .post("/api/expenses")
        .json(&json!({
            "expenseType": "fertilizers",
            "amountCents": 80000,
            "quantity": 1.5,
            "unit": "t",
            "date": "2024-03-15"
        }))
        .await;
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/api/expenses/{id}"))
        .json(&json!({
            "expenseType": "fertilizers",
            "amountCents": 80000,
            "quantity": 2.0,
            "unit": "t",
            "date": "2024-03-15"
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["totalCostCents"], 160_000);
}

// =============================================================================
// Harvest
// =============================================================================

#[tokio::test]
async fn test_harvest_validation_and_stats() {
    let server = setup_server().await;

    let field_id = create_field(&server, "East 8", 8.0).await;
    let crop_id = first_crop_id(&server).await;

    let payload = |yield_t: f64, quality: i64, date: &str| {
        json!({
            "fieldId": field_id,
            "cropId": crop_id,
            "actualYield": yield_t,
            "harvestDate": date,
            "qualityRating": quality,
            "moistureContent": 14.2
        })
    };

    // Quality outside 1-5 is rejected without a row
    let response = server
        .post("/api/harvests")
        .json(&payload(10.0, 6, "2024-08-02"))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    server
        .post("/api/harvests")
        .json(&payload(10.0, 4, "2024-08-02"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/harvests")
        .json(&payload(5.0, 5, "2024-08-10"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let list = server.get("/api/harvests").await.json::<Value>();
    assert_eq!(list["rows"].as_array().unwrap().len(), 2);
    assert_eq!(list["rows"][0]["fieldName"], "East 8");
    assert_eq!(list["stats"]["totalYield"], 15.0);
    assert_eq!(list["stats"]["averageQuality"], 4.5);

    let empty_year = server.get("/api/harvests?year=2020").await.json::<Value>();
    assert_eq!(empty_year["rows"].as_array().unwrap().len(), 0);
    assert_eq!(empty_year["stats"]["averageQuality"], Value::Null);
}

#[tokio::test]
async fn test_field_delete_blocked_while_harvest_references_it() {
    let server = setup_server().await;

    let field_id = create_field(&server, "East 8", 8.0).await;
    let crop_id = first_crop_id(&server).await;

    let response = server
        .post("/api/harvests")
        .json(&json!({
            "fieldId": field_id,
            "cropId": crop_id,
            "actualYield": 10.0,
            "harvestDate": "2024-08-02",
            "qualityRating": 4,
            "moistureContent": 14.2
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let harvest_id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server.delete(&format!("/api/fields/{field_id}")).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    server
        .delete(&format!("/api/harvests/{harvest_id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/fields/{field_id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_reports_render_with_aggregates() {
    let server = setup_server().await;

    create_field(&server, "North 40", 12.5).await;
    create_field(&server, "South slope", 30.0).await;

    let report = server.get("/api/reports/fields").await.text();
    assert!(report.starts_with("FIELD REPORT"));
    assert!(report.contains("Field: North 40"));
    assert!(report.contains("Total area: 42.50 ha"));
    assert!(report.ends_with("Fields: 2"));

    let report = server.get("/api/reports/crops").await.text();
    assert!(report.starts_with("CROP REPORT"));
    assert!(report.contains("Grain: 4"));
    assert!(report.ends_with("Total: 8"));

    server
        .post("/api/expenses")
        .json(&json!({
            "expenseType": "fuel",
            "amountCents": 5650,
            "quantity": 2.0,
            "date": "2024-04-12"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let report = server.get("/api/reports/expenses").await.text();
    assert!(report.contains("Type: fuel"));
    assert!(report.contains("Total: 113.00 UAH"));
    assert!(report.ends_with("Records: 1"));

    let report = server.get("/api/reports/harvest").await.text();
    assert!(report.starts_with("HARVEST REPORT"));
    assert!(report.ends_with("Records: 0"));
}
