/// Storage accessor abstraction
///
/// The engines never own persistence: they call these narrow traits. Two
/// implementations exist: an in-memory store for development and tests,
/// and a Postgres store for deployment. Reads are side-effect free; the
/// only mutating operations are list/item creation and `apply_positions`,
/// which must commit its whole batch or nothing.
use crate::{
    error::AppResult,
    models::{Category, Item, List, NewItem, PositionUpdate},
};
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Read-only view of the shared catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogReader: Send + Sync {
    /// Every catalog item in one category, across all lists and owners.
    async fn items_in_category(&self, category: Category) -> AppResult<Vec<Item>>;

    /// The full catalog, across all categories.
    async fn all_items(&self) -> AppResult<Vec<Item>>;
}

/// Read-only view of one user's library.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LibraryReader: Send + Sync {
    /// Every item across all of the user's lists.
    async fn items_for_user(&self, user_id: Uuid) -> AppResult<Vec<Item>>;
}

/// List lookup plus the single write path for positions.
#[async_trait::async_trait]
pub trait ListStore: Send + Sync {
    async fn find_list(&self, list_id: Uuid) -> AppResult<Option<List>>;

    /// Items of a list in ascending position order.
    async fn items_in_order(&self, list_id: Uuid) -> AppResult<Vec<Item>>;

    /// Applies a batch of position updates as one atomic unit. Every item
    /// id must already belong to the list; otherwise the whole batch is
    /// rejected and nothing changes.
    async fn apply_positions(&self, list_id: Uuid, updates: &[PositionUpdate]) -> AppResult<()>;
}

/// Write path for lists and items.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    async fn create_list(&self, user_id: Uuid, is_public: bool) -> AppResult<List>;

    /// Persists a normalized item, assigning its id and `added_at` and
    /// appending it at the end of its list's order.
    async fn insert_item(&self, new: NewItem) -> AppResult<Item>;
}

/// Everything the application state needs from one backing store.
pub trait Store: CatalogReader + LibraryReader + ListStore + ItemStore {}

impl<T: CatalogReader + LibraryReader + ListStore + ItemStore> Store for T {}
