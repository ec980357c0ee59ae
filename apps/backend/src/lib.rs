//! # AgroFarm Manager Backend
//!
//! The application shell: wires the module commands to HTTP routes and
//! owns startup (logging, database path, migrations, seed, working
//! directories).
//!
//! ## Module Organization
//! ```text
//! agro_backend/
//! ├── lib.rs          ◄─── You are here (router + startup)
//! ├── state.rs        ◄─── AppState (database handle)
//! ├── commands/
//! │   ├── mod.rs      ◄─── ListResponse + module exports
//! │   ├── fields.rs   ◄─── Field CRUD commands
//! │   ├── crops.rs    ◄─── Crop CRUD commands
//! │   ├── plans.rs    ◄─── Planting plan commands
//! │   ├── expenses.rs ◄─── Expense commands (type/year filters)
//! │   ├── harvest.rs  ◄─── Harvest commands (year filter)
//! │   └── reports.rs  ◄─── Plain-text reports
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load .env + initialize logging ───────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Create working directories ───────────────────────────────────────► │
//! │     • exports/ and reports/ next to the process                         │
//! │                                                                         │
//! │  3. Determine database path ──────────────────────────────────────────► │
//! │     • AGROFARM_DB_PATH override, else the platform data directory       │
//! │                                                                         │
//! │  4. Connect to database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, foreign keys ON                             │
//! │     • Run pending migrations, seed default crops on first run           │
//! │                                                                         │
//! │  5. Build router & serve ─────────────────────────────────────────────► │
//! │     • Register all module commands                                      │
//! │     • Bind BIND_ADDRESS (default 127.0.0.1:3000)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use axum::routing::get;
use axum::Router;
use directories::ProjectDirs;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agro_db::{Database, DbConfig};
use state::AppState;

/// Builds the application router with every module command registered.
///
/// Kept separate from [`run`] so integration tests can drive the exact
/// same routes against an in-memory database.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Field module
        .route(
            "/api/fields",
            get(commands::fields::list_fields).post(commands::fields::create_field),
        )
        .route(
            "/api/fields/:id",
            axum::routing::put(commands::fields::update_field)
                .delete(commands::fields::delete_field),
        )
        // Crop module
        .route(
            "/api/crops",
            get(commands::crops::list_crops).post(commands::crops::create_crop),
        )
        .route(
            "/api/crops/:id",
            axum::routing::put(commands::crops::update_crop).delete(commands::crops::delete_crop),
        )
        // Planning module
        .route(
            "/api/plans",
            get(commands::plans::list_plans).post(commands::plans::create_plan),
        )
        .route(
            "/api/plans/:id",
            axum::routing::put(commands::plans::update_plan).delete(commands::plans::delete_plan),
        )
        // Expense module
        .route(
            "/api/expenses",
            get(commands::expenses::list_expenses).post(commands::expenses::create_expense),
        )
        .route(
            "/api/expenses/:id",
            axum::routing::put(commands::expenses::update_expense)
                .delete(commands::expenses::delete_expense),
        )
        // Harvest module
        .route(
            "/api/harvests",
            get(commands::harvest::list_harvests).post(commands::harvest::create_harvest),
        )
        .route(
            "/api/harvests/:id",
            axum::routing::put(commands::harvest::update_harvest)
                .delete(commands::harvest::delete_harvest),
        )
        // Reports module
        .route("/api/reports/fields", get(commands::reports::field_report))
        .route("/api/reports/crops", get(commands::reports::crop_report))
        .route(
            "/api/reports/expenses",
            get(commands::reports::expense_report),
        )
        .route(
            "/api/reports/harvest",
            get(commands::reports::harvest_report),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the backend until the process is stopped.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting AgroFarm Manager backend");

    ensure_working_dirs()?;

    let db_path = get_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected, migrations applied, defaults seeded");

    let state = AppState::new(db);
    let app = router(state);

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(%bind_address, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> &'static str {
    "AgroFarm Manager backend is running"
}

/// Liveness probe: checks the database answers a trivial query.
async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<&'static str, error::ApiError> {
    if state.db.health_check().await {
        Ok("ok")
    } else {
        Err(error::ApiError::internal("database unavailable"))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=agro=trace` - Show trace for agro crates only
/// - Default: INFO level, DEBUG for the agro crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,agro=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Creates the export/report directories next to the process.
///
/// Nothing writes to them yet; they exist so users have a stable place
/// to drop spreadsheets exported by hand.
fn ensure_working_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all("exports")?;
    std::fs::create_dir_all("reports")?;
    Ok(())
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.agrofarm.manager/agrofarm.db`
/// - **Windows**: `%APPDATA%\agrofarm\manager\agrofarm.db`
/// - **Linux**: `~/.local/share/agrofarm-manager/agrofarm.db`
///
/// ## Development Override
/// Set `AGROFARM_DB_PATH` environment variable to use a custom path.
fn get_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("AGROFARM_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    // Use platform-specific app data directory
    let proj_dirs = ProjectDirs::from("com", "agrofarm", "manager")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("agrofarm.db"))
}
