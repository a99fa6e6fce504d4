use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five content kinds the tracker knows about. The set is closed: ids
/// 1..5 map to movie, tv, book, music, game and nothing is registered at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movie,
    Tv,
    Book,
    Music,
    Game,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Movie,
        Category::Tv,
        Category::Book,
        Category::Music,
        Category::Game,
    ];

    /// Stable numeric identifier used in storage and on the wire.
    pub fn id(self) -> i32 {
        match self {
            Category::Movie => 1,
            Category::Tv => 2,
            Category::Book => 3,
            Category::Music => 4,
            Category::Game => 5,
        }
    }

    pub fn from_id(id: i32) -> Option<Category> {
        match id {
            1 => Some(Category::Movie),
            2 => Some(Category::Tv),
            3 => Some(Category::Book),
            4 => Some(Category::Music),
            5 => Some(Category::Game),
            _ => None,
        }
    }

    /// Singular key, used in reason strings and serialization.
    pub fn key(self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Tv => "tv",
            Category::Book => "book",
            Category::Music => "music",
            Category::Game => "game",
        }
    }

    /// Parses the plural filter keys the search endpoint accepts.
    /// Returns None for "all" and anything unrecognized.
    pub fn from_filter_key(key: &str) -> Option<Category> {
        match key {
            "movies" => Some(Category::Movie),
            "tv" => Some(Category::Tv),
            "books" => Some(Category::Book),
            "music" => Some(Category::Music),
            "games" => Some(Category::Game),
            _ => None,
        }
    }
}

/// A tracked item, owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: Uuid,
    pub list_id: Uuid,
    pub category_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    /// Meaningful only for games; every other category's strategy clears it.
    pub platform: Option<String>,
    pub release_year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub external_source: String,
    /// Set once at creation, never mutated afterwards.
    pub added_at: DateTime<Utc>,
    pub rating: Option<i32>,
}

/// Raw item fields as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemInput {
    pub list_id: Option<Uuid>,
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub platform: Option<String>,
    pub release_year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub external_source: Option<String>,
    pub rating: Option<i32>,
}

/// A validated, normalized item ready for persistence. The store assigns
/// `id` and `added_at` when it commits the row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub list_id: Uuid,
    pub category_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub platform: Option<String>,
    pub release_year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub external_source: String,
    pub rating: Option<i32>,
}

/// A user's list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_public: bool,
    pub share_slug: Option<String>,
}

/// Membership record giving an item its place within a list.
/// Positions are unique per list; ascending position is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemListPosition {
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub position: i32,
}

/// One (itemId, position) pair from a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub item_id: Uuid,
    pub position: i32,
}

/// A single search hit. Transient, produced per request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub item: Item,
    pub category: Category,
    /// Relevance tier: 0 exact title match, 1 title prefix, 2 contains.
    pub relevance_rank: u8,
}

/// A scored recommendation. Transient; the numeric score stays internal
/// and only the reason is surfaced to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCandidate {
    pub item: Item,
    #[serde(skip)]
    pub score: f64,
    pub reason: String,
}
