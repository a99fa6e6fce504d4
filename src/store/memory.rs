use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Item, List, NewItem, PositionUpdate},
};

use super::{CatalogReader, ItemStore, LibraryReader, ListStore};

/// In-memory store backing development and tests.
///
/// A single `RwLock` over the whole dataset keeps the semantics honest:
/// `apply_positions` holds the write guard for its entire batch, so
/// concurrent reorders serialize and readers never observe a half-applied
/// order.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    items: HashMap<Uuid, Item>,
    lists: HashMap<Uuid, List>,
    /// list id -> (item id -> position)
    positions: HashMap<Uuid, HashMap<Uuid, i32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CatalogReader for MemoryStore {
    async fn items_in_category(&self, category: Category) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .values()
            .filter(|item| item.category_id == category.id())
            .cloned()
            .collect())
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl LibraryReader for MemoryStore {
    async fn items_for_user(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .values()
            .filter(|item| {
                inner
                    .lists
                    .get(&item.list_id)
                    .is_some_and(|list| list.user_id == user_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ListStore for MemoryStore {
    async fn find_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        let inner = self.inner.read().await;
        Ok(inner.lists.get(&list_id).cloned())
    }

    async fn items_in_order(&self, list_id: Uuid) -> AppResult<Vec<Item>> {
        let inner = self.inner.read().await;
        let positions = match inner.positions.get(&list_id) {
            Some(positions) => positions,
            None => return Ok(Vec::new()),
        };

        let mut ordered: Vec<(i32, &Item)> = positions
            .iter()
            .filter_map(|(item_id, position)| {
                inner.items.get(item_id).map(|item| (*position, item))
            })
            .collect();
        ordered.sort_by_key(|(position, item)| (*position, item.id));

        Ok(ordered.into_iter().map(|(_, item)| item.clone()).collect())
    }

    async fn apply_positions(&self, list_id: Uuid, updates: &[PositionUpdate]) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let positions = inner
            .positions
            .get_mut(&list_id)
            .ok_or_else(|| AppError::NotFound(format!("list {} not found", list_id)))?;

        // Reject the whole batch before touching anything.
        for update in updates {
            if !positions.contains_key(&update.item_id) {
                return Err(AppError::InvalidRequest(format!(
                    "item {} does not belong to list {}",
                    update.item_id, list_id
                )));
            }
        }

        // The prospective order must keep positions unique across the
        // whole list, including members the batch does not mention.
        let mut occupied = HashSet::new();
        for update in updates {
            if !occupied.insert(update.position) {
                return Err(AppError::InvalidRequest(format!(
                    "position {} assigned twice",
                    update.position
                )));
            }
        }
        for (item_id, position) in positions.iter() {
            if updates.iter().any(|u| u.item_id == *item_id) {
                continue;
            }
            if !occupied.insert(*position) {
                return Err(AppError::InvalidRequest(format!(
                    "position {} is already held by item {}",
                    position, item_id
                )));
            }
        }

        for update in updates {
            positions.insert(update.item_id, update.position);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemStore for MemoryStore {
    async fn create_list(&self, user_id: Uuid, is_public: bool) -> AppResult<List> {
        let list = List {
            id: Uuid::new_v4(),
            user_id,
            is_public,
            share_slug: is_public.then(|| Uuid::new_v4().simple().to_string()),
        };

        let mut inner = self.inner.write().await;
        inner.positions.insert(list.id, HashMap::new());
        inner.lists.insert(list.id, list.clone());

        Ok(list)
    }

    async fn insert_item(&self, new: NewItem) -> AppResult<Item> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        if !inner.lists.contains_key(&new.list_id) {
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

        // New items land at the end of the list's order.
        let positions = inner.positions.entry(item.list_id).or_default();
        let next = positions.values().max().map_or(0, |max| max + 1);
        positions.insert(item.id, next);
        inner.items.insert(item.id, item.clone());

        Ok(item)
    }
}
