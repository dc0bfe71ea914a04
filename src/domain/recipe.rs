//! Recipe domain model and operations.
//!
//! This module defines the two shapes a recipe takes inside the plugin:
//! [`Recipe`], the full record stored in the catalog and rendered by the
//! detail view, and [`RecipeSummary`], the lightweight projection the listing
//! view filters and paginates. Summaries carry human-readable time strings
//! (e.g. `"30 min"`) from which total minutes are recovered for time
//! filtering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full recipe record as stored in the catalog.
///
/// This is the complete representation used by the detail view. The listing
/// view never consumes it directly; it works on the [`RecipeSummary`]
/// projection produced by [`Recipe::summary`].
///
/// # Fields
///
/// Optional fields default to empty/absent when missing from the catalog
/// file, so partially-filled records remain loadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Stable identifier, unique within the catalog.
    pub id: String,

    /// URL-safe identifier used for detail lookups.
    pub slug: String,

    /// Display title.
    pub title: String,

    /// Short description shown under the detail title.
    #[serde(default)]
    pub description: Option<String>,

    /// Primary image reference.
    #[serde(default)]
    pub image: Option<String>,

    /// Additional gallery image references.
    #[serde(default)]
    pub images: Vec<String>,

    /// Cuisine label (e.g. "Italian"). Exact-match filter target.
    #[serde(default)]
    pub cuisine: Option<String>,

    /// Course label (e.g. "Main"). Exact-match filter target.
    #[serde(default)]
    pub course: Option<String>,

    /// Diet labels (e.g. "Vegan"). The first entry feeds the summary's
    /// diet field, matching how the listing projects this record.
    #[serde(default)]
    pub diets: Vec<String>,

    /// Free-form tags rendered in the detail view.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,

    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,

    /// Total time in minutes; when absent, prep + cook stands in.
    #[serde(default)]
    pub total_time_minutes: Option<u32>,

    /// Number of servings the recipe yields.
    #[serde(default)]
    pub servings: Option<u32>,

    /// Average rating on a 0-5 scale.
    #[serde(default)]
    pub rating: Option<f32>,

    /// Recipe author.
    #[serde(default)]
    pub author: Option<Author>,

    /// Ingredient list in display order.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Preparation steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Per-serving nutrition facts, keyed by label (e.g. "protein_g").
    #[serde(default)]
    pub nutrition: BTreeMap<String, String>,

    /// Unix timestamp when the recipe was added to the catalog. Drives the
    /// default newest-first ordering.
    pub created_at: i64,
}

impl Recipe {
    /// Total minutes for this recipe.
    ///
    /// Prefers the explicit `total_time_minutes` field; otherwise sums prep
    /// and cook times. Returns `None` when nothing is known (a zero sum is
    /// treated as unknown, not as "instant").
    #[must_use]
    pub fn total_minutes(&self) -> Option<u32> {
        if let Some(total) = self.total_time_minutes {
            return Some(total);
        }
        let sum = self.prep_time_minutes.unwrap_or(0) + self.cook_time_minutes.unwrap_or(0);
        if sum > 0 {
            Some(sum)
        } else {
            None
        }
    }

    /// Projects this record into the listing-view summary.
    ///
    /// Minute counts become human-readable strings (`"30 min"`), and the
    /// first diet label stands in for the summary's single diet field.
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            cuisine: self.cuisine.clone(),
            course: self.course.clone(),
            diet: self.diets.first().cloned(),
            total_time: self.total_time_minutes.map(format_minutes),
            prep_time: self.prep_time_minutes.map(format_minutes),
            cook_time: self.cook_time_minutes.map(format_minutes),
            rating: self.rating,
        }
    }
}

/// Recipe author metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
}

/// A single ingredient line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (e.g. "olive oil").
    pub name: String,

    /// Quantity with unit, already formatted (e.g. "2 tbsp").
    #[serde(default)]
    pub quantity: Option<String>,

    /// Free-form note (e.g. "finely chopped").
    #[serde(default)]
    pub note: Option<String>,
}

/// A single preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based step number.
    pub number: u32,

    /// Instruction text.
    pub instruction: String,

    /// Estimated minutes for this step, when known.
    #[serde(default)]
    pub time_minutes: Option<u32>,
}

/// Listing-view projection of a recipe.
///
/// This is what the filtering/pagination engine operates on. Time fields are
/// human-readable strings as supplied by the catalog projection; minutes are
/// recovered from them via [`RecipeSummary::minutes`] when a time filter is
/// active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Stable identifier.
    pub id: String,

    /// URL-safe identifier used for detail lookups.
    pub slug: String,

    /// Display title. Free-text search target.
    pub title: String,

    /// Primary image reference.
    #[serde(default)]
    pub image: Option<String>,

    /// Cuisine label. Search and exact-match filter target.
    #[serde(default)]
    pub cuisine: Option<String>,

    /// Course label. Search and exact-match filter target.
    #[serde(default)]
    pub course: Option<String>,

    /// Primary diet label. Search and exact-match filter target.
    #[serde(default)]
    pub diet: Option<String>,

    /// Human-readable total time (e.g. "30 min").
    #[serde(default)]
    pub total_time: Option<String>,

    /// Human-readable preparation time.
    #[serde(default)]
    pub prep_time: Option<String>,

    /// Human-readable cooking time.
    #[serde(default)]
    pub cook_time: Option<String>,

    /// Average rating on a 0-5 scale.
    #[serde(default)]
    pub rating: Option<f32>,
}

impl RecipeSummary {
    /// Recovers the recipe's total minutes from its time strings.
    ///
    /// Picks the first non-empty string among `total_time`, `prep_time`,
    /// `cook_time`, then extracts the first run of ASCII digits from it.
    /// Returns `None` when no time string is present or the chosen string
    /// contains no digits: the recipe's time is unknown, which excludes it
    /// from time-bounded filtering.
    #[must_use]
    pub fn minutes(&self) -> Option<u32> {
        let time = [&self.total_time, &self.prep_time, &self.cook_time]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())?;
        first_digit_run(time)
    }
}

/// Formats a minute count as the catalog's human-readable time string.
#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}

/// Extracts the first contiguous run of ASCII digits from a string.
///
/// Returns `None` when the string contains no digits or the run does not fit
/// in a `u32`.
fn first_digit_run(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with_times(
        total: Option<&str>,
        prep: Option<&str>,
        cook: Option<&str>,
    ) -> RecipeSummary {
        RecipeSummary {
            id: "r1".to_string(),
            slug: "r1".to_string(),
            title: "Test".to_string(),
            image: None,
            cuisine: None,
            course: None,
            diet: None,
            total_time: total.map(String::from),
            prep_time: prep.map(String::from),
            cook_time: cook.map(String::from),
            rating: None,
        }
    }

    #[test]
    fn minutes_prefers_total_time() {
        let s = summary_with_times(Some("45 min"), Some("10 min"), Some("35 min"));
        assert_eq!(s.minutes(), Some(45));
    }

    #[test]
    fn minutes_falls_back_to_prep_then_cook() {
        let s = summary_with_times(None, Some("20 min"), Some("90 min"));
        assert_eq!(s.minutes(), Some(20));

        let s = summary_with_times(None, None, Some("90 min"));
        assert_eq!(s.minutes(), Some(90));
    }

    #[test]
    fn minutes_is_unknown_without_digits() {
        assert_eq!(summary_with_times(None, None, None).minutes(), None);
        // First non-empty string wins even when it holds no digits.
        let s = summary_with_times(Some("about an hour"), Some("20 min"), None);
        assert_eq!(s.minutes(), None);
    }

    #[test]
    fn minutes_reads_first_digit_run_only() {
        let s = summary_with_times(Some("1 h 30 min"), None, None);
        assert_eq!(s.minutes(), Some(1));
    }

    #[test]
    fn total_minutes_sums_prep_and_cook() {
        let recipe = Recipe {
            id: "r1".to_string(),
            slug: "r1".to_string(),
            title: "Test".to_string(),
            description: None,
            image: None,
            images: vec![],
            cuisine: None,
            course: None,
            diets: vec![],
            tags: vec![],
            prep_time_minutes: Some(10),
            cook_time_minutes: Some(25),
            total_time_minutes: None,
            servings: None,
            rating: None,
            author: None,
            ingredients: vec![],
            steps: vec![],
            nutrition: BTreeMap::new(),
            created_at: 0,
        };
        assert_eq!(recipe.total_minutes(), Some(35));

        let unknown = Recipe {
            prep_time_minutes: None,
            cook_time_minutes: None,
            ..recipe
        };
        assert_eq!(unknown.total_minutes(), None);
    }

    #[test]
    fn summary_projects_first_diet_and_formats_times() {
        let recipe = Recipe {
            id: "r2".to_string(),
            slug: "pasta".to_string(),
            title: "Pasta".to_string(),
            description: None,
            image: Some("pasta.jpg".to_string()),
            images: vec![],
            cuisine: Some("Italian".to_string()),
            course: Some("Main".to_string()),
            diets: vec!["Vegetarian".to_string(), "Gluten-Free".to_string()],
            tags: vec![],
            prep_time_minutes: Some(10),
            cook_time_minutes: None,
            total_time_minutes: Some(30),
            servings: Some(4),
            rating: Some(4.5),
            author: None,
            ingredients: vec![],
            steps: vec![],
            nutrition: BTreeMap::new(),
            created_at: 0,
        };

        let summary = recipe.summary();
        assert_eq!(summary.diet.as_deref(), Some("Vegetarian"));
        assert_eq!(summary.total_time.as_deref(), Some("30 min"));
        assert_eq!(summary.prep_time.as_deref(), Some("10 min"));
        assert_eq!(summary.cook_time, None);
    }
}
