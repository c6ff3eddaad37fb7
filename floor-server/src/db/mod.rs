//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB-backed on disk in production,
//! in-memory for tests.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "floor";
const DATABASE: &str = "floor";

/// Open the file-backed database at the given path
pub async fn open(path: impl AsRef<Path>) -> Result<Surreal<Db>, AppError> {
    let path = path.as_ref().to_string_lossy().to_string();
    let db = Surreal::new::<RocksDb>(path.as_str())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
    select_namespace(&db).await?;
    tracing::info!(path = %path, "Database opened (embedded RocksDB)");
    Ok(db)
}

/// Open an in-memory database - tests and local demos
pub async fn open_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
    select_namespace(&db).await?;
    Ok(db)
}

async fn select_namespace(db: &Surreal<Db>) -> Result<(), AppError> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))
}
