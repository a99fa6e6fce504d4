use super::CategoryStrategy;
use crate::models::NewItem;

/// Strategy for games. The only category that carries a platform field:
/// it is trimmed and preserved here, dropped everywhere else.
pub struct GameStrategy;

impl CategoryStrategy for GameStrategy {
    fn key(&self) -> &'static str {
        "game"
    }

    fn normalize(&self, item: &mut NewItem) {
        item.platform = item
            .platform
            .take()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn draft(platform: Option<&str>) -> NewItem {
        NewItem {
            list_id: Uuid::nil(),
            category_id: 5,
            title: "Hades".to_string(),
            subtitle: None,
            platform: platform.map(str::to_string),
            release_year: Some(2020),
            image_url: None,
            description: None,
            external_id: None,
            external_source: "manual".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_platform_trimmed_and_kept() {
        let mut item = draft(Some("  Switch  "));
        GameStrategy.normalize(&mut item);
        assert_eq!(item.platform.as_deref(), Some("Switch"));
    }

    #[test]
    fn test_blank_platform_dropped() {
        let mut item = draft(Some("   "));
        GameStrategy.normalize(&mut item);
        assert_eq!(item.platform, None);
    }
}
