use super::CategoryStrategy;
use crate::models::NewItem;

/// Strategy for movies. No specialized fields.
pub struct MovieStrategy;

impl CategoryStrategy for MovieStrategy {
    fn key(&self) -> &'static str {
        "movie"
    }

    fn normalize(&self, item: &mut NewItem) {
        // Platform belongs to games only.
        item.platform = None;
    }
}
