//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::MenuCategory;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MenuItemsQuery {
    /// Restrict to orderable items (availability filter)
    #[serde(default)]
    pub available: bool,
    pub category: Option<MenuCategory>,
    /// Case-insensitive name search
    pub q: Option<String>,
}

/// GET /api/menu-items - list the catalog
///
/// With `available=true` the result is the ordering view: only available
/// items, optionally narrowed by category and name search.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuItemsQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = if query.available {
        repo.find_available(query.category, query.q.as_deref())
            .await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(items))
}

/// GET /api/menu-items/:id - fetch one item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items - create an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - update an item
///
/// Touches the catalog only; order lines keep their snapshots.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - delete an item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
