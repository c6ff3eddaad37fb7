//! Floor Table Repository

use shared::TableStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{FloorTable, FloorTableCreate, FloorTableUpdate};

const TABLE: &str = "floor_table";

#[derive(Clone)]
pub struct FloorTableRepository {
    base: BaseRepository,
}

impl FloorTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables, ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<FloorTable>> {
        let tables: Vec<FloorTable> = self
            .base
            .db()
            .query("SELECT * FROM floor_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FloorTable>> {
        let thing = parse_id(id)?;
        let table: Option<FloorTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by display number
    pub async fn find_by_number(&self, table_number: &str) -> RepoResult<Option<FloorTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM floor_table WHERE table_number = $number LIMIT 1")
            .bind(("number", table_number.to_string()))
            .await?;
        let tables: Vec<FloorTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table; starts EMPTY
    pub async fn create(&self, data: FloorTableCreate) -> RepoResult<FloorTable> {
        if data.table_number.trim().is_empty() {
            return Err(RepoError::Validation("Table number is required".to_string()));
        }
        let seats = data.seats.unwrap_or(4);
        if seats <= 0 {
            return Err(RepoError::Validation(format!(
                "Seats must be positive, got {}",
                seats
            )));
        }
        if self.find_by_number(&data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.table_number
            )));
        }

        let table = FloorTable {
            id: None,
            table_number: data.table_number,
            seats,
            status: TableStatus::Empty,
        };

        let created: Option<FloorTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create floor table".to_string()))
    }

    /// Update a table (partial)
    pub async fn update(&self, id: &str, data: FloorTableUpdate) -> RepoResult<FloorTable> {
        let thing = parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        if let Some(seats) = data.seats
            && seats <= 0
        {
            return Err(RepoError::Validation(format!(
                "Seats must be positive, got {}",
                seats
            )));
        }

        let table_number = data.table_number.unwrap_or(existing.table_number);
        let seats = data.seats.unwrap_or(existing.seats);
        let status = data.status.unwrap_or(existing.status);

        if let Some(found) = self.find_by_number(&table_number).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                table_number
            )));
        }

        self.base
            .db()
            .query("UPDATE $thing SET table_number = $number, seats = $seats, status = $status")
            .bind(("thing", thing))
            .bind(("number", table_number))
            .bind(("seats", seats))
            .bind(("status", status))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Set only the occupancy status; used by the order flow
    pub async fn update_status(&self, id: &str, status: TableStatus) -> RepoResult<()> {
        let thing = parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        tracing::debug!(table_id = %id, status = %status.as_str(), "Table status updated");
        Ok(())
    }

    /// Hard delete a table; orders against it are intentionally left alone
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
