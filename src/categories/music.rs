use super::CategoryStrategy;
use crate::models::NewItem;

/// Strategy for music. No specialized fields.
pub struct MusicStrategy;

impl CategoryStrategy for MusicStrategy {
    fn key(&self) -> &'static str {
        "music"
    }

    fn normalize(&self, item: &mut NewItem) {
        item.platform = None;
    }
}
