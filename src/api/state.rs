use std::sync::Arc;

use crate::{
    services::{ListOrderingManager, RecommendationEngine, SearchEngine},
    store::{CatalogReader, ItemStore, LibraryReader, ListStore, Store},
};

/// Shared application state: the engines plus the backing store's write
/// and list surfaces. Everything is behind `Arc`, so cloning per request
/// is cheap.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
    pub lists: Arc<dyn ListStore>,
    pub search: Arc<SearchEngine>,
    pub recommendations: Arc<RecommendationEngine>,
    pub ordering: Arc<ListOrderingManager>,
}

impl AppState {
    /// Wires every engine to one backing store.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: Store + 'static,
    {
        let catalog: Arc<dyn CatalogReader> = store.clone();
        let library: Arc<dyn LibraryReader> = store.clone();
        let lists: Arc<dyn ListStore> = store.clone();

        Self {
            search: Arc::new(SearchEngine::new(catalog.clone())),
            recommendations: Arc::new(RecommendationEngine::new(catalog, library)),
            ordering: Arc::new(ListOrderingManager::new(lists.clone())),
            lists,
            items: store,
        }
    }
}
