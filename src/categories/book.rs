use super::CategoryStrategy;
use crate::models::NewItem;

/// Strategy for books. No specialized fields today; ISBN normalization
/// would land in `validate`/`normalize` here without touching shared code.
pub struct BookStrategy;

impl CategoryStrategy for BookStrategy {
    fn key(&self) -> &'static str {
        "book"
    }

    fn normalize(&self, item: &mut NewItem) {
        item.platform = None;
    }
}
