use super::CategoryStrategy;
use crate::models::NewItem;

/// Strategy for TV series. No specialized fields.
pub struct TvStrategy;

impl CategoryStrategy for TvStrategy {
    fn key(&self) -> &'static str {
        "tv"
    }

    fn normalize(&self, item: &mut NewItem) {
        item.platform = None;
    }
}
