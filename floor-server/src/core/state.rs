use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, FloorEvents};
use crate::db;
use crate::utils::AppError;

/// Server state - shared handles for every service
///
/// Cheap to clone: the database handle and the event bus are both
/// internally reference-counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Floor event bus
    pub events: FloorEvents,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, events: FloorEvents) -> Self {
        Self { config, db, events }
    }

    /// Initialize server state: work directory structure, then the
    /// file-backed database under `work_dir/database/`
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {}", e)))?;

        let db = db::open(config.database_dir().join("floor.db")).await?;

        Ok(Self::new(config.clone(), db, FloorEvents::new()))
    }

    /// State backed by an in-memory database - tests and local demos
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = db::open_memory().await?;
        let config = Config::with_overrides("/tmp/floor-server-test", 0);
        Ok(Self::new(config, db, FloorEvents::new()))
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the event bus
    pub fn events(&self) -> &FloorEvents {
        &self.events
    }
}
