//! Pure filtering and pagination over recipe summaries.
//!
//! This module is the deterministic core of the listing view: given the full
//! catalog and a [`QueryState`], it produces the matching subset and slices
//! it into the requested page. It has no side effects and no state of its
//! own, so it is safe to call on every render; identical inputs always
//! produce identical output, including element order.
//!
//! # Matching rules
//!
//! A recipe matches when all of the following hold:
//!
//! 1. The trimmed, case-folded search term is empty, or is a substring of
//!    any of title, cuisine, course, or diet (each case-folded; absent
//!    fields compare as empty).
//! 2. Each of the cuisine/course/diet filters is empty, or equals the
//!    recipe's field exactly (case-sensitive, no normalization).
//! 3. No `time_max` bound is set, or the recipe's minutes are known and lie
//!    within the bound. Recipes whose time cannot be recovered are excluded
//!    while a bound is active.
//!
//! Filtering preserves the catalog's relative order; any sort is the data
//! source's responsibility.

use crate::app::query::QueryState;
use crate::domain::RecipeSummary;

/// Result of filtering and paginating the catalog.
///
/// `items` holds only the requested page window; `total` counts every match
/// before slicing, so pagination UI can derive the page count without
/// re-filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult {
    /// Matching recipes within the requested page window, in catalog order.
    pub items: Vec<RecipeSummary>,

    /// Number of matching recipes before pagination.
    pub total: usize,

    /// The 1-indexed page this window was computed for.
    pub page: u32,

    /// Page size the window was computed with.
    pub page_size: u32,
}

impl FilteredResult {
    /// Number of pages needed to show every match, never less than 1.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }
}

/// Number of pages needed for `total` items at `page_size` per page.
///
/// An empty result still occupies one page so pagination UI always has a
/// current page to point at.
#[must_use]
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(page_size as usize);
    u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
}

/// Filters the full catalog by the query state and slices out one page.
///
/// The page window is the half-open range
/// `[(page - 1) * page_size, (page - 1) * page_size + page_size)` over the
/// matching sequence, clipped to its length. A page beyond the last valid
/// one yields an empty window while `total` stays correct.
#[must_use]
pub fn filter_and_page(
    all: &[RecipeSummary],
    state: &QueryState,
    page_size: u32,
) -> FilteredResult {
    let matching: Vec<&RecipeSummary> = all.iter().filter(|r| matches(r, state)).collect();
    let total = matching.len();

    let start = (state.page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
    let end = start.saturating_add(page_size as usize).min(total);
    let items = if start < total {
        matching[start..end].iter().map(|r| (*r).clone()).collect()
    } else {
        vec![]
    };

    FilteredResult {
        items,
        total,
        page: state.page,
        page_size,
    }
}

/// Whether one recipe satisfies every active predicate of the query state.
#[must_use]
pub fn matches(recipe: &RecipeSummary, state: &QueryState) -> bool {
    matches_text(recipe, &state.q)
        && matches_facet(recipe.cuisine.as_deref(), &state.cuisine)
        && matches_facet(recipe.course.as_deref(), &state.course)
        && matches_facet(recipe.diet.as_deref(), &state.diet)
        && matches_time(recipe, state.time_max)
}

/// Case-folded substring search over title, cuisine, course, and diet.
fn matches_text(recipe: &RecipeSummary, q: &str) -> bool {
    let q = q.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }

    let haystacks = [
        Some(recipe.title.as_str()),
        recipe.cuisine.as_deref(),
        recipe.course.as_deref(),
        recipe.diet.as_deref(),
    ];

    haystacks
        .into_iter()
        .any(|field| field.unwrap_or("").to_lowercase().contains(&q))
}

/// Exact, case-sensitive facet comparison; an empty filter matches anything.
fn matches_facet(value: Option<&str>, filter: &str) -> bool {
    filter.is_empty() || value == Some(filter)
}

/// Upper time bound check.
///
/// With no bound every recipe passes. With a bound, the recipe must have a
/// recoverable minute count at or below it; unknown times fail the filter.
fn matches_time(recipe: &RecipeSummary, time_max: Option<u32>) -> bool {
    match time_max {
        None => true,
        Some(bound) => recipe.minutes().is_some_and(|m| m <= bound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: usize, title: &str, cuisine: &str, diet: Option<&str>) -> RecipeSummary {
        RecipeSummary {
            id: format!("r{id}"),
            slug: format!("r{id}"),
            title: title.to_string(),
            image: None,
            cuisine: Some(cuisine.to_string()),
            course: Some("Main".to_string()),
            diet: diet.map(String::from),
            total_time: Some("30 min".to_string()),
            prep_time: None,
            cook_time: None,
            rating: None,
        }
    }

    /// 48 recipes of which the first 10 are Italian, matching the listing
    /// page's default dataset size.
    fn dataset() -> Vec<RecipeSummary> {
        (0..48)
            .map(|i| {
                let cuisine = if i < 10 { "Italian" } else { "Mexican" };
                recipe(i, &format!("Recipe {i}"), cuisine, None)
            })
            .collect()
    }

    fn state() -> QueryState {
        QueryState::default()
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let all = dataset();
        let mut q = state();
        q.q = "recipe".to_string();
        q.page = 2;

        let first = filter_and_page(&all, &q, 9);
        let second = filter_and_page(&all, &q, 9);
        assert_eq!(first, second);
    }

    #[test]
    fn every_returned_item_matches_all_predicates() {
        let all = dataset();
        let mut q = state();
        q.cuisine = "Italian".to_string();
        q.q = "recipe".to_string();

        let result = filter_and_page(&all, &q, 9);
        assert!(result.items.iter().all(|r| matches(r, &q)));
    }

    #[test]
    fn total_is_independent_of_page_and_page_size() {
        let all = dataset();
        let mut q = state();
        q.cuisine = "Italian".to_string();

        for (page, size) in [(1, 9), (2, 9), (1, 4), (5, 3)] {
            q.page = page;
            let result = filter_and_page(&all, &q, size);
            assert_eq!(result.total, 10);
        }
    }

    #[test]
    fn out_of_range_page_is_empty_with_correct_totals() {
        let all = dataset();
        let mut q = state();
        q.cuisine = "Italian".to_string();
        q.page = 7;

        let result = filter_and_page(&all, &q, 9);
        assert!(result.items.is_empty());
        assert_eq!(result.total, 10);
        assert_eq!(result.total_pages(), 2);
    }

    #[test]
    fn italian_pages_split_nine_and_one() {
        let all = dataset();
        let mut q = state();
        q.cuisine = "Italian".to_string();

        q.page = 1;
        let page1 = filter_and_page(&all, &q, 9);
        assert_eq!(page1.total, 10);
        assert_eq!(page1.items.len(), 9);
        assert_eq!(page1.items[0].id, "r0");
        assert_eq!(page1.items[8].id, "r8");

        q.page = 2;
        let page2 = filter_and_page(&all, &q, 9);
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].id, "r9");
    }

    #[test]
    fn filtering_preserves_catalog_order() {
        let all = dataset();
        let mut q = state();
        q.q = "recipe".to_string();

        let result = filter_and_page(&all, &q, 48);
        let ids: Vec<&str> = result.items.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (0..48).map(|i| format!("r{i}")).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn time_bound_excludes_slow_and_unknown_recipes() {
        let mut quick = recipe(1, "Quick Salad", "French", None);
        quick.total_time = None;
        quick.prep_time = Some("20 min".to_string());

        let mut slow = recipe(2, "Slow Roast", "French", None);
        slow.total_time = Some("45 min".to_string());

        let mut unknown = recipe(3, "Mystery Stew", "French", None);
        unknown.total_time = None;

        let all = vec![quick, slow, unknown];
        let mut q = state();
        q.time_max = Some(30);

        let result = filter_and_page(&all, &q, 9);
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].title, "Quick Salad");
    }

    #[test]
    fn search_matches_diet_substring_case_insensitively() {
        let vegan = recipe(1, "Chickpea Bowl", "Indian", Some("Vegan"));
        let plain = recipe(2, "Beef Stew", "French", None);

        let all = vec![vegan, plain];
        let mut q = state();
        q.q = "veg".to_string();

        let result = filter_and_page(&all, &q, 9);
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].title, "Chickpea Bowl");
    }

    #[test]
    fn facet_match_is_case_sensitive() {
        let all = vec![recipe(1, "Tacos", "Mexican", None)];
        let mut q = state();
        q.cuisine = "mexican".to_string();

        assert_eq!(filter_and_page(&all, &q, 9).total, 0);

        q.cuisine = "Mexican".to_string();
        assert_eq!(filter_and_page(&all, &q, 9).total, 1);
    }

    #[test]
    fn empty_result_is_a_valid_state() {
        let all = dataset();
        let mut q = state();
        q.q = "no such recipe anywhere".to_string();

        let result = filter_and_page(&all, &q, 9);
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages(), 1);
    }
}
