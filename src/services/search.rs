use std::sync::Arc;

use crate::{
    categories,
    error::{AppError, AppResult},
    models::{Category, Item, SearchResult},
    store::CatalogReader,
};

/// Shortest query the engine will run, in characters.
const MIN_QUERY_CHARS: usize = 2;
/// Result limit bounds; requested limits are clamped, not rejected.
const MIN_LIMIT: usize = 1;
const MAX_LIMIT: usize = 50;

/// Ranked free-text search over the shared catalog.
///
/// Ranking is tiered, not a scalar score: tier 0 is an exact title match,
/// tier 1 a title prefix, tier 2 a containment hit in title or subtitle.
/// Within a tier, newer items first, then id ascending for determinism.
pub struct SearchEngine {
    catalog: Arc<dyn CatalogReader>,
}

impl SearchEngine {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Searches one category (a recognized plural filter key) or all of
    /// them ("all", and deliberately also any unrecognized key). An empty
    /// result set is a valid answer, not an error.
    pub async fn search(
        &self,
        query: &str,
        category_filter: &str,
        limit: usize,
    ) -> AppResult<Vec<SearchResult>> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_CHARS {
            return Err(AppError::InvalidQuery(format!(
                "query must be at least {} characters",
                MIN_QUERY_CHARS
            )));
        }

        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);

        let selected = match Category::from_filter_key(category_filter) {
            Some(category) => vec![category],
            // Malformed filters fall back to the full catalog rather than
            // failing; this boundary is permissive on purpose.
            None => Category::ALL.to_vec(),
        };

        let mut hits = Vec::new();
        for category in selected {
            let strategy = categories::resolve(category.id());
            for item in self.catalog.items_in_category(category).await? {
                if !strategy.matches(&item, &needle) {
                    continue;
                }
                let relevance_rank = relevance_tier(&item, &needle);
                hits.push(SearchResult {
                    item,
                    category,
                    relevance_rank,
                });
            }
        }

        hits.sort_by(|a, b| {
            a.relevance_rank
                .cmp(&b.relevance_rank)
                .then_with(|| b.item.added_at.cmp(&a.item.added_at))
                .then_with(|| a.item.id.cmp(&b.item.id))
        });
        hits.truncate(limit);

        tracing::debug!(
            query = %needle,
            filter = %category_filter,
            hit_count = hits.len(),
            "Search completed"
        );

        Ok(hits)
    }
}

fn relevance_tier(item: &Item, needle: &str) -> u8 {
    let title = item.title.to_lowercase();
    if title == needle {
        0
    } else if title.starts_with(needle) {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockCatalogReader;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn item(id: u128, title: &str, category: Category, added_days_ago: i64) -> Item {
        Item {
            id: Uuid::from_u128(id),
            list_id: Uuid::nil(),
            category_id: category.id(),
            title: title.to_string(),
            subtitle: None,
            platform: None,
            release_year: None,
            image_url: None,
            description: None,
            external_id: None,
            external_source: "manual".to_string(),
            added_at: Utc::now() - Duration::days(added_days_ago),
            rating: None,
        }
    }

    fn engine_with(items: Vec<Item>) -> SearchEngine {
        let mut catalog = MockCatalogReader::new();
        catalog.expect_items_in_category().returning(move |category| {
            Ok(items
                .iter()
                .filter(|i| i.category_id == category.id())
                .cloned()
                .collect())
        });
        SearchEngine::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_exact_match_beats_prefix_match() {
        let engine = engine_with(vec![
            // The sequel is newer, but exact beats prefix regardless.
            item(2, "Avatar: The Way of Water", Category::Movie, 1),
            item(1, "Avatar", Category::Movie, 400),
        ]);

        let results = engine.search("avatar", "all", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item.title, "Avatar");
        assert_eq!(results[0].relevance_rank, 0);
        assert_eq!(results[1].item.title, "Avatar: The Way of Water");
        assert_eq!(results[1].relevance_rank, 1);
    }

    #[tokio::test]
    async fn test_subtitle_hits_land_in_contains_tier() {
        let mut subtitled = item(3, "Mad Max", Category::Movie, 2);
        subtitled.subtitle = Some("Fury Road".to_string());
        let engine = engine_with(vec![subtitled, item(4, "Fury", Category::Movie, 1)]);

        let results = engine.search("fury", "all", 10).await.unwrap();
        assert_eq!(results[0].item.title, "Fury");
        assert_eq!(results[0].relevance_rank, 0);
        assert_eq!(results[1].item.title, "Mad Max");
        assert_eq!(results[1].relevance_rank, 2);
    }

    #[tokio::test]
    async fn test_ties_break_by_recency_then_id() {
        let engine = engine_with(vec![
            item(9, "Dune Messiah", Category::Book, 10),
            item(3, "Dune Reborn", Category::Book, 1),
            item(7, "Dune Rising", Category::Book, 1),
        ]);

        let results = engine.search("dune", "books", 10).await.unwrap();
        let ids: Vec<Uuid> = results.iter().map(|r| r.item.id).collect();
        // Same tier: the two 1-day-old items first. Their timestamps were
        // captured instants apart, so recency already orders them; the id
        // tiebreak only matters for identical timestamps.
        assert_eq!(results.len(), 3);
        assert_eq!(ids[2], Uuid::from_u128(9));
    }

    #[tokio::test]
    async fn test_identical_timestamps_break_by_id() {
        let stamp = Utc::now();
        let mut a = item(8, "Dune Part One", Category::Book, 0);
        let mut b = item(2, "Dune Part Two", Category::Book, 0);
        a.added_at = stamp;
        b.added_at = stamp;
        let engine = engine_with(vec![a, b]);

        let results = engine.search("dune", "books", 10).await.unwrap();
        assert_eq!(results[0].item.id, Uuid::from_u128(2));
        assert_eq!(results[1].item.id, Uuid::from_u128(8));
    }

    #[tokio::test]
    async fn test_category_filter_restricts_results() {
        let engine = engine_with(vec![
            item(1, "Halo", Category::Game, 1),
            item(2, "Halo: The Fall of Reach", Category::Book, 1),
        ]);

        let results = engine.search("halo", "games", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, Category::Game);
    }

    #[tokio::test]
    async fn test_malformed_filter_falls_back_to_all() {
        let engine = engine_with(vec![
            item(1, "Halo", Category::Game, 1),
            item(2, "Halo: The Fall of Reach", Category::Book, 1),
        ]);

        let results = engine.search("halo", "vinyl", 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let engine = engine_with(vec![item(1, "Halo", Category::Game, 1)]);
        let results = engine.search("xyznomatch123", "all", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_short_query_rejected() {
        let engine = engine_with(vec![]);
        let result = engine.search(" a ", "all", 10).await;
        assert!(matches!(result, Err(AppError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_limit_clamped() {
        let items: Vec<Item> = (0..10)
            .map(|n| item(n as u128 + 1, &format!("Halo {}", n), Category::Game, n))
            .collect();
        let engine = engine_with(items);

        let results = engine.search("halo", "all", 0).await.unwrap();
        assert_eq!(results.len(), 1);

        let results = engine.search("halo", "all", 500).await.unwrap();
        assert_eq!(results.len(), 10);
    }
}
