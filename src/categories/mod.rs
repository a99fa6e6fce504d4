/// Per-category strategy dispatch
///
/// Each category registers one strategy implementing the capability set:
/// input validation, field normalization, a search matcher, and a scoring
/// hint for the recommendation engine. Shared logic never branches on a
/// category id; adding a sixth category means adding one strategy here.
use crate::models::{Category, Item, ItemInput, NewItem};

pub mod book;
pub mod game;
pub mod movie;
pub mod music;
pub mod tv;

pub use book::BookStrategy;
pub use game::GameStrategy;
pub use movie::MovieStrategy;
pub use music::MusicStrategy;
pub use tv::TvStrategy;

/// Category-specific behavior consulted by the normalizer, the search
/// engine, and the recommendation engine.
pub trait CategoryStrategy: Send + Sync {
    /// Singular key for this strategy, used in logs and reason strings.
    fn key(&self) -> &'static str;

    /// Category-specific validation, run after the shared presence checks.
    /// Most categories have nothing to add.
    fn validate(&self, _input: &ItemInput) -> crate::error::AppResult<()> {
        Ok(())
    }

    /// Category-specific normalization, run after the shared field cleanup.
    fn normalize(&self, item: &mut NewItem);

    /// Whether an item matches a search needle. The needle is already
    /// trimmed and lowercased.
    fn matches(&self, item: &Item, needle: &str) -> bool {
        item.title.to_lowercase().contains(needle)
            || item
                .subtitle
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }

    /// Flat additive bias folded into recommendation scores. Zero for every
    /// current category; the hook exists so a category can weigh itself
    /// without touching the engine.
    fn score_hint(&self) -> f64 {
        0.0
    }
}

/// Fallback for category ids outside the registered set. Generic validation
/// only: no category-specific fields survive.
pub struct DefaultStrategy;

impl CategoryStrategy for DefaultStrategy {
    fn key(&self) -> &'static str {
        "default"
    }

    fn normalize(&self, item: &mut NewItem) {
        item.platform = None;
    }
}

static MOVIE: MovieStrategy = MovieStrategy;
static TV: TvStrategy = TvStrategy;
static BOOK: BookStrategy = BookStrategy;
static MUSIC: MusicStrategy = MusicStrategy;
static GAME: GameStrategy = GameStrategy;
static DEFAULT: DefaultStrategy = DefaultStrategy;

/// Resolves a category id to its strategy. Unknown ids get the default
/// strategy; rejecting them is the caller's call, not the registry's.
pub fn resolve(category_id: i32) -> &'static dyn CategoryStrategy {
    match Category::from_id(category_id) {
        Some(Category::Movie) => &MOVIE,
        Some(Category::Tv) => &TV,
        Some(Category::Book) => &BOOK,
        Some(Category::Music) => &MUSIC,
        Some(Category::Game) => &GAME,
        None => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_categories() {
        assert_eq!(resolve(1).key(), "movie");
        assert_eq!(resolve(2).key(), "tv");
        assert_eq!(resolve(3).key(), "book");
        assert_eq!(resolve(4).key(), "music");
        assert_eq!(resolve(5).key(), "game");
    }

    #[test]
    fn test_resolve_unknown_id_falls_back_to_default() {
        assert_eq!(resolve(0).key(), "default");
        assert_eq!(resolve(99).key(), "default");
        assert_eq!(resolve(-7).key(), "default");
    }

    #[test]
    fn test_default_matcher_checks_title_and_subtitle() {
        let item = Item {
            id: uuid::Uuid::nil(),
            list_id: uuid::Uuid::nil(),
            category_id: 1,
            title: "Blade Runner".to_string(),
            subtitle: Some("The Final Cut".to_string()),
            platform: None,
            release_year: Some(1982),
            image_url: None,
            description: None,
            external_id: None,
            external_source: "manual".to_string(),
            added_at: chrono::Utc::now(),
            rating: None,
        };

        assert!(resolve(1).matches(&item, "blade"));
        assert!(resolve(1).matches(&item, "final cut"));
        assert!(!resolve(1).matches(&item, "alien"));
    }
}
