//! # AgroFarm Manager Backend Entry Point
//!
//! The only entry point of the application: it brings up the HTTP bridge
//! that the desktop UI talks to.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       AgroFarm Manager                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                        Desktop UI                                │  │
//! │  │  • Fields grid          • Expenses grid + filters                │  │
//! │  │  • Crop catalog         • Harvest grid                           │  │
//! │  │  • Planning dialog      • Reports view                           │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                          HTTP (JSON)                                    │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► starts the runtime, reports fatal errors          │  │
//! │  │  lib.rs ─────► logging, database, router, serve                  │  │
//! │  │  commands/ ──► list_fields, create_expense, harvest_report, ...  │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  agrofarm.db (local file, WAL mode, foreign keys ON)             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = agro_backend::run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}
