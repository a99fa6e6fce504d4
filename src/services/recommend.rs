use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    categories,
    error::AppResult,
    models::{Category, RecommendationCandidate},
    store::{CatalogReader, LibraryReader},
};

pub const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

/// Weight ceiling of the recency boost. Kept below the smoothed affinity
/// floor of 1/5 only for brand-new catalog rows, so recency can dominate
/// the reason for genuinely fresh content and nothing else.
const RECENCY_WEIGHT: f64 = 0.25;
/// Age at which the recency boost has halved, in days.
const RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

/// Personalized, explainable recommendations.
///
/// Scoring is affinity (a Laplace-smoothed share of the user's items per
/// category) plus a recency decay boost plus the category strategy's
/// score hint. Owned items are excluded from the pool before scoring, and
/// no category may fill more than half of the returned slots.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogReader>,
    library: Arc<dyn LibraryReader>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogReader>, library: Arc<dyn LibraryReader>) -> Self {
        Self { catalog, library }
    }

    pub async fn recommend(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<RecommendationCandidate>> {
        let limit = limit.clamp(1, MAX_LIMIT);

        let owned = self.library.items_for_user(user_id).await?;
        let owned_ids: HashSet<Uuid> = owned.iter().map(|item| item.id).collect();

        let mut owned_per_category: HashMap<i32, usize> = HashMap::new();
        for item in &owned {
            *owned_per_category.entry(item.category_id).or_default() += 1;
        }
        let total_owned = owned.len();

        let now = Utc::now();
        let mut candidates = Vec::new();
        for item in self.catalog.all_items().await? {
            // Exclusion happens before scoring; owned items never compete.
            if owned_ids.contains(&item.id) {
                continue;
            }

            let category_count = owned_per_category
                .get(&item.category_id)
                .copied()
                .unwrap_or(0);
            let affinity = (category_count + 1) as f64
                / (total_owned + Category::ALL.len()) as f64;

            let age_days =
                ((now - item.added_at).num_seconds().max(0) as f64) / 86_400.0;
            let recency = RECENCY_WEIGHT / (1.0 + age_days / RECENCY_HALF_LIFE_DAYS);

            let strategy = categories::resolve(item.category_id);
            let score = affinity + recency + strategy.score_hint();

            // One reason per candidate, from the dominant signal. With no
            // owned items in the category the affinity term is only the
            // smoothing baseline, so it cannot be cited as a reason.
            let reason = if category_count > 0 && affinity >= recency {
                format!(
                    "because you've added {} {} items",
                    category_count,
                    strategy.key()
                )
            } else {
                "recently added to the catalog".to_string()
            };

            candidates.push(RecommendationCandidate {
                item,
                score,
                reason,
            });
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item.id.cmp(&b.item.id))
        });

        // Diversity pass: cap every category at half the slots, promoting
        // lower-scored candidates from under-represented categories.
        let category_cap = limit.div_ceil(2);
        let mut slots_taken: HashMap<i32, usize> = HashMap::new();
        let mut picked = Vec::with_capacity(limit);
        for candidate in candidates {
            let taken = slots_taken.entry(candidate.item.category_id).or_default();
            if *taken >= category_cap {
                continue;
            }
            *taken += 1;
            picked.push(candidate);
            if picked.len() == limit {
                break;
            }
        }

        tracing::debug!(
            user_id = %user_id,
            owned_count = total_owned,
            recommended = picked.len(),
            "Recommendations computed"
        );

        Ok(picked)
    }
}
