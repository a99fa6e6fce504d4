use std::collections::HashSet;

use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Item, ItemListPosition, List, NewItem, PositionUpdate},
};

use super::{CatalogReader, ItemStore, LibraryReader, ListStore};

const ITEM_COLUMNS: &str = "id, list_id, category_id, title, subtitle, platform, release_year, \
     image_url, description, external_id, external_source, added_at, rating";

/// Postgres-backed store.
///
/// Reorder batches run inside one transaction; the unique position
/// constraint is deferred to commit so swaps need no staging step.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects, runs pending migrations, and returns the store.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogReader for PgStore {
    async fn items_in_category(&self, category: Category) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE category_id = $1"
        ))
        .bind(category.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!("SELECT {ITEM_COLUMNS} FROM items"))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

#[async_trait::async_trait]
impl LibraryReader for PgStore {
    async fn items_for_user(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT i.{} FROM items i \
             JOIN lists l ON l.id = i.list_id \
             WHERE l.user_id = $1",
            ITEM_COLUMNS.replace(", ", ", i.")
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

#[async_trait::async_trait]
impl ListStore for PgStore {
    async fn find_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        let list = sqlx::query_as::<_, List>(
            "SELECT id, user_id, is_public, share_slug FROM lists WHERE id = $1",
        )
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    async fn items_in_order(&self, list_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT i.{} FROM items i \
             JOIN item_list_positions p ON p.item_id = i.id AND p.list_id = i.list_id \
             WHERE p.list_id = $1 \
             ORDER BY p.position ASC, i.id ASC",
            ITEM_COLUMNS.replace(", ", ", i.")
        ))
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn apply_positions(&self, list_id: Uuid, updates: &[PositionUpdate]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let members: Vec<ItemListPosition> = sqlx::query_as(
            "SELECT list_id, item_id, position FROM item_list_positions WHERE list_id = $1",
        )
        .bind(list_id)
        .fetch_all(&mut *tx)
        .await?;

        for update in updates {
            if !members.iter().any(|m| m.item_id == update.item_id) {
                return Err(AppError::InvalidRequest(format!(
                    "item {} does not belong to list {}",
                    update.item_id, list_id
                )));
            }
        }

        // The prospective order must keep positions unique across the
        // whole list, including members the batch does not mention. The
        // deferred uq_list_position constraint backstops this at commit.
        let mut occupied = HashSet::new();
        for update in updates {
            if !occupied.insert(update.position) {
                return Err(AppError::InvalidRequest(format!(
                    "position {} assigned twice",
                    update.position
                )));
            }
        }
        for member in &members {
            if updates.iter().any(|u| u.item_id == member.item_id) {
                continue;
            }
            if !occupied.insert(member.position) {
                return Err(AppError::InvalidRequest(format!(
                    "position {} is already held by item {}",
                    member.position, member.item_id
                )));
            }
        }

        for update in updates {
            let result = sqlx::query(
                "UPDATE item_list_positions SET position = $1 WHERE list_id = $2 AND item_id = $3",
            )
            .bind(update.position)
            .bind(list_id)
            .bind(update.item_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() != 1 {
                return Err(AppError::Storage(format!(
                    "position update touched {} rows for item {}",
                    result.rows_affected(),
                    update.item_id
                )));
            }
        }

        // A commit failure must never be reported as success: the whole
        // batch either landed or the transaction rolled back. A position
        // collision the precheck raced past comes back as the deferred
        // constraint firing here; answer it the same way the precheck does.
        tx.commit().await.map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("uq_list_position") => {
                AppError::InvalidRequest("duplicate position in list order".to_string())
            }
            _ => AppError::Storage(format!("reorder commit failed: {}", e)),
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemStore for PgStore {
    async fn create_list(&self, user_id: Uuid, is_public: bool) -> AppResult<List> {
        let list = List {
            id: Uuid::new_v4(),
            user_id,
            is_public,
            share_slug: is_public.then(|| Uuid::new_v4().simple().to_string()),
        };

        sqlx::query("INSERT INTO lists (id, user_id, is_public, share_slug) VALUES ($1, $2, $3, $4)")
            .bind(list.id)
            .bind(list.user_id)
            .bind(list.is_public)
            .bind(&list.share_slug)
            .execute(&self.pool)
            .await?;

        Ok(list)
    }

    async fn insert_item(&self, new: NewItem) -> AppResult<Item> {
        let mut tx = self.pool.begin().await?;

        let list_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM lists WHERE id = $1")
            .bind(new.list_id)
            .fetch_optional(&mut *tx)
            .await?;
        if list_exists.is_none() {
            return Err(AppError::NotFound(format!("list {} not found", new.list_id)));
        }

        let item = Item {
            id: Uuid::new_v4(),
            list_id: new.list_id,
            category_id: new.category_id,
            title: new.title,
            subtitle: new.subtitle,
            platform: new.platform,
            release_year: new.release_year,
            image_url: new.image_url,
            description: new.description,
            external_id: new.external_id,
            external_source: new.external_source,
            added_at: Utc::now(),
            rating: new.rating,
        };

        sqlx::query(&format!(
            "INSERT INTO items ({ITEM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        ))
        .bind(item.id)
        .bind(item.list_id)
        .bind(item.category_id)
        .bind(&item.title)
        .bind(&item.subtitle)
        .bind(&item.platform)
        .bind(item.release_year)
        .bind(&item.image_url)
        .bind(&item.description)
        .bind(&item.external_id)
        .bind(&item.external_source)
        .bind(item.added_at)
        .bind(item.rating)
        .execute(&mut *tx)
        .await?;

        // Append at the end of the list's display order.
        let next_position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM item_list_positions WHERE list_id = $1",
        )
        .bind(item.list_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO item_list_positions (list_id, item_id, position) VALUES ($1, $2, $3)",
        )
        .bind(item.list_id)
        .bind(item.id)
        .bind(next_position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(item)
    }
}
