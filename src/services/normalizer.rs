use crate::{
    categories,
    error::{AppError, AppResult},
    models::{ItemInput, NewItem},
};

/// Validates and normalizes raw item input into a record ready for
/// persistence. Pure: no storage access, no side effects.
///
/// Checks run in a fixed order and the first failure wins: listId,
/// categoryId, then title. Category-specific behavior comes from the
/// registry strategy, never from branching on the id here.
pub fn prepare(input: ItemInput) -> AppResult<NewItem> {
    let list_id = input
        .list_id
        .ok_or_else(|| AppError::MissingField("listId".to_string()))?;

    let category_id = input
        .category_id
        .ok_or_else(|| AppError::MissingField("categoryId".to_string()))?;
    let strategy = categories::resolve(category_id);

    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::MissingField("title".to_string()))?
        .to_string();

    if let Some(rating) = input.rating {
        if !(1..=10).contains(&rating) {
            return Err(AppError::InvalidValue {
                field: "rating".to_string(),
                reason: format!("{} is outside 1..=10", rating),
            });
        }
    }

    strategy.validate(&input)?;

    let mut item = NewItem {
        list_id,
        category_id,
        title,
        subtitle: clean(input.subtitle),
        // Left for the strategy: only the game strategy keeps it.
        platform: input.platform,
        release_year: input.release_year,
        image_url: clean(input.image_url),
        description: clean(input.description),
        external_id: clean(input.external_id),
        external_source: clean(input.external_source).unwrap_or_else(|| "manual".to_string()),
        rating: input.rating,
    };

    strategy.normalize(&mut item);

    Ok(item)
}

/// Trims an optional field and coerces blank strings to absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn base_input(category_id: i32) -> ItemInput {
        ItemInput {
            list_id: Some(Uuid::new_v4()),
            category_id: Some(category_id),
            title: Some("The Thing".to_string()),
            ..ItemInput::default()
        }
    }

    #[test]
    fn test_missing_list_id_first() {
        let input = ItemInput {
            title: Some("No list".to_string()),
            ..ItemInput::default()
        };
        match prepare(input) {
            Err(AppError::MissingField(field)) => assert_eq!(field, "listId"),
            other => panic!("expected MissingField(listId), got {:?}", other),
        }
    }

    #[test]
    fn test_missing_category_id_second() {
        let input = ItemInput {
            list_id: Some(Uuid::new_v4()),
            title: Some("No category".to_string()),
            ..ItemInput::default()
        };
        match prepare(input) {
            Err(AppError::MissingField(field)) => assert_eq!(field, "categoryId"),
            other => panic!("expected MissingField(categoryId), got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_title_is_missing() {
        let input = ItemInput {
            title: Some("   ".to_string()),
            ..base_input(1)
        };
        match prepare(input) {
            Err(AppError::MissingField(field)) => assert_eq!(field, "title"),
            other => panic!("expected MissingField(title), got {:?}", other),
        }
    }

    #[test]
    fn test_title_and_subtitle_trimmed() {
        let input = ItemInput {
            title: Some("  Dune  ".to_string()),
            subtitle: Some("  Part Two  ".to_string()),
            ..base_input(1)
        };
        let item = prepare(input).unwrap();
        assert_eq!(item.title, "Dune");
        assert_eq!(item.subtitle.as_deref(), Some("Part Two"));
    }

    #[test]
    fn test_blank_optionals_coerced_to_absent() {
        let input = ItemInput {
            subtitle: Some("".to_string()),
            description: Some("   ".to_string()),
            external_id: Some("".to_string()),
            ..base_input(2)
        };
        let item = prepare(input).unwrap();
        assert_eq!(item.subtitle, None);
        assert_eq!(item.description, None);
        assert_eq!(item.external_id, None);
    }

    #[test]
    fn test_external_source_defaults_to_manual() {
        let item = prepare(base_input(3)).unwrap();
        assert_eq!(item.external_source, "manual");

        let input = ItemInput {
            external_source: Some("openlibrary".to_string()),
            ..base_input(3)
        };
        assert_eq!(prepare(input).unwrap().external_source, "openlibrary");
    }

    #[test]
    fn test_game_keeps_trimmed_platform() {
        let input = ItemInput {
            platform: Some("  PS5 ".to_string()),
            ..base_input(5)
        };
        let item = prepare(input).unwrap();
        assert_eq!(item.platform.as_deref(), Some("PS5"));
    }

    #[test]
    fn test_non_game_categories_drop_platform() {
        for category_id in [1, 2, 3, 4] {
            let input = ItemInput {
                platform: Some("PS5".to_string()),
                ..base_input(category_id)
            };
            let item = prepare(input).unwrap();
            assert_eq!(item.platform, None, "category {}", category_id);
        }
    }

    #[test]
    fn test_unknown_category_id_uses_default_strategy() {
        let input = ItemInput {
            platform: Some("PS5".to_string()),
            ..base_input(42)
        };
        let item = prepare(input).unwrap();
        assert_eq!(item.category_id, 42);
        assert_eq!(item.platform, None);
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let input = ItemInput {
            rating: Some(11),
            ..base_input(1)
        };
        match prepare(input) {
            Err(AppError::InvalidValue { field, .. }) => assert_eq!(field, "rating"),
            other => panic!("expected InvalidValue(rating), got {:?}", other),
        }
    }
}
