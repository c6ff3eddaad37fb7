//! Menu Item Repository

use shared::MenuCategory;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items, ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find available items for ordering, with optional category and
    /// case-insensitive name filters
    pub async fn find_available(
        &self,
        category: Option<MenuCategory>,
        search: Option<&str>,
    ) -> RepoResult<Vec<MenuItem>> {
        let mut sql = String::from("SELECT * FROM menu_item WHERE is_available = true");
        if category.is_some() {
            sql.push_str(" AND category = $category");
        }
        if search.is_some() {
            sql.push_str(" AND string::lowercase(name) CONTAINS string::lowercase($search)");
        }
        sql.push_str(" ORDER BY name");

        let mut query = self.base.db().query(sql);
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        if let Some(search) = search {
            query = query.bind(("search", search.to_string()));
        }

        let items: Vec<MenuItem> = query.await?.take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = parse_id(id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Item name is required".to_string()));
        }
        if !data.price.is_finite() || data.price < 0.0 {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                data.price
            )));
        }

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            is_recommended: data.is_recommended.unwrap_or(false),
            is_available: data.is_available.unwrap_or(true),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item (partial)
    ///
    /// Only affects the catalog; existing order lines keep their price and
    /// name snapshots.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(price) = data.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                price
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.or(existing.description);
        let price = data.price.unwrap_or(existing.price);
        let category = data.category.unwrap_or(existing.category);
        let image_url = data.image_url.or(existing.image_url);
        let is_recommended = data.is_recommended.unwrap_or(existing.is_recommended);
        let is_available = data.is_available.unwrap_or(existing.is_available);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, price = $price, \
                 category = $category, image_url = $image_url, \
                 is_recommended = $is_recommended, is_available = $is_available",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("price", price))
            .bind(("category", category))
            .bind(("image_url", image_url))
            .bind(("is_recommended", is_recommended))
            .bind(("is_available", is_available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
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
