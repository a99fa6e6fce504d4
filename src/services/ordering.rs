use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::PositionUpdate,
    store::ListStore,
};

/// Applies drag-to-reorder requests as atomic units.
///
/// The manager checks ownership and batch shape, then hands the whole
/// batch to the store's transactional `apply_positions`. Either every
/// pair lands or none do; callers never observe a half-applied order.
pub struct ListOrderingManager {
    store: Arc<dyn ListStore>,
}

impl ListOrderingManager {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    pub async fn reorder(
        &self,
        list_id: Uuid,
        owner_user_id: Uuid,
        updates: &[PositionUpdate],
    ) -> AppResult<()> {
        // A list owned by someone else looks exactly like a missing list,
        // so probing cannot reveal which lists exist.
        self.store
            .find_list(list_id)
            .await?
            .filter(|list| list.user_id == owner_user_id)
            .ok_or_else(|| AppError::NotFound(format!("list {} not found", list_id)))?;

        if updates.is_empty() {
            return Err(AppError::InvalidRequest(
                "reorder request carries no positions".to_string(),
            ));
        }

        let mut seen_items = HashSet::new();
        let mut seen_positions = HashSet::new();
        for update in updates {
            if update.position < 0 {
                return Err(AppError::InvalidRequest(format!(
                    "negative position {} for item {}",
                    update.position, update.item_id
                )));
            }
            if !seen_items.insert(update.item_id) {
                return Err(AppError::InvalidRequest(format!(
                    "item {} appears twice in the request",
                    update.item_id
                )));
            }
            if !seen_positions.insert(update.position) {
                return Err(AppError::InvalidRequest(format!(
                    "position {} assigned twice",
                    update.position
                )));
            }
        }

        self.store.apply_positions(list_id, updates).await?;

        tracing::info!(
            list_id = %list_id,
            update_count = updates.len(),
            "List reordered"
        );

        Ok(())
    }
}
