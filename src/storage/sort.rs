//! Catalog ordering.
//!
//! The filtering engine deliberately preserves whatever order the catalog
//! hands it, so ordering is decided here, once, when the catalog is read.
//! The default is newest first (creation time descending), matching the
//! listing's "latest and greatest" presentation; title and rating orders
//! back the accessor's `sort_by` parameter.

use crate::domain::Recipe;
use std::cmp::Ordering;

/// Field the catalog orders by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Creation timestamp. The default.
    #[default]
    CreatedAt,

    /// Case-insensitive title.
    Title,

    /// Average rating; unrated recipes sort last regardless of direction.
    Rating,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    /// Ascending.
    Asc,

    /// Descending. The default, pairing with [`SortKey::CreatedAt`] for
    /// newest-first listings.
    #[default]
    Desc,
}

/// Sorts recipes in place by the given key and direction.
///
/// The sort is stable, so recipes that compare equal keep their relative
/// catalog order.
pub fn sort_recipes(recipes: &mut [Recipe], key: SortKey, dir: SortDir) {
    recipes.sort_by(|a, b| {
        let ordering = match key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Rating => compare_ratings(a.rating, b.rating),
        };
        match dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    // Unrated recipes belong at the end in both directions.
    if key == SortKey::Rating {
        recipes.sort_by_key(|r| r.rating.is_none());
    }
}

/// Compares optional ratings, treating absent as the lowest value.
fn compare_ratings(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn recipe(title: &str, created_at: i64, rating: Option<f32>) -> Recipe {
        Recipe {
            id: title.to_string(),
            slug: title.to_string(),
            title: title.to_string(),
            description: None,
            image: None,
            images: vec![],
            cuisine: None,
            course: None,
            diets: vec![],
            tags: vec![],
            prep_time_minutes: None,
            cook_time_minutes: None,
            total_time_minutes: None,
            servings: None,
            rating,
            author: None,
            ingredients: vec![],
            steps: vec![],
            nutrition: BTreeMap::new(),
            created_at,
        }
    }

    #[test]
    fn default_order_is_newest_first() {
        let mut recipes = vec![
            recipe("old", 100, None),
            recipe("new", 300, None),
            recipe("mid", 200, None),
        ];
        sort_recipes(&mut recipes, SortKey::default(), SortDir::default());

        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn title_order_ignores_case() {
        let mut recipes = vec![
            recipe("banana Bread", 0, None),
            recipe("Apple Pie", 0, None),
        ];
        sort_recipes(&mut recipes, SortKey::Title, SortDir::Asc);
        assert_eq!(recipes[0].title, "Apple Pie");
    }

    #[test]
    fn rating_order_puts_unrated_last() {
        let mut recipes = vec![
            recipe("unrated", 0, None),
            recipe("good", 0, Some(4.5)),
            recipe("great", 0, Some(4.9)),
        ];
        sort_recipes(&mut recipes, SortKey::Rating, SortDir::Desc);

        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["great", "good", "unrated"]);
    }
}
