//! Query state store backed by a URL-style query string.
//!
//! The listing view's entire selection (search term, facet filters, time
//! bound, and page) lives in one query string so that every control shares
//! a single source of truth and the whole selection stays shareable as text.
//! This module provides the pure [`parse`]/[`serialize`] boundary over that
//! string plus [`QueryStore`], the read/write API the event handler uses.
//!
//! # Managed keys
//!
//! | key       | semantics                         |
//! |-----------|-----------------------------------|
//! | `q`       | free-text search term             |
//! | `cuisine` | exact cuisine filter              |
//! | `course`  | exact course filter               |
//! | `diet`    | exact diet filter                 |
//! | `timeMin` | lower time bound, integer minutes |
//! | `timeMax` | upper time bound, integer minutes |
//! | `page`    | current page, 1-indexed           |
//!
//! An absent key means the default/unfiltered value. Keys the store does not
//! manage pass through writes untouched.
//!
//! # Invariant
//!
//! The query string is authoritative: [`QueryState`] is always re-derived by
//! parsing and never cached across writes, so an in-memory state can never
//! diverge from the string it came from.

/// Query-string key for the free-text search term.
const KEY_Q: &str = "q";
/// Query-string key for the exact cuisine filter.
const KEY_CUISINE: &str = "cuisine";
/// Query-string key for the exact course filter.
const KEY_COURSE: &str = "course";
/// Query-string key for the exact diet filter.
const KEY_DIET: &str = "diet";
/// Query-string key for the lower time bound in minutes.
const KEY_TIME_MIN: &str = "timeMin";
/// Query-string key for the upper time bound in minutes.
const KEY_TIME_MAX: &str = "timeMax";
/// Query-string key for the 1-indexed page number.
const KEY_PAGE: &str = "page";

/// Typed view of the managed query parameters.
///
/// Produced by [`parse`]; never constructed from anywhere but the query
/// string (aside from [`Default`], which equals parsing an empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Free-text search term, empty when absent.
    pub q: String,

    /// Exact cuisine filter, empty meaning "no filter".
    pub cuisine: String,

    /// Exact course filter, empty meaning "no filter".
    pub course: String,

    /// Exact diet filter, empty meaning "no filter".
    pub diet: String,

    /// Lower time bound in minutes, absent meaning unbounded.
    ///
    /// Carried by the query surface for interface compatibility; the
    /// matcher only consumes [`time_max`](Self::time_max).
    pub time_min: Option<u32>,

    /// Upper time bound in minutes, absent meaning unbounded.
    pub time_max: Option<u32>,

    /// Current page, always at least 1.
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            q: String::new(),
            cuisine: String::new(),
            course: String::new(),
            diet: String::new(),
            time_min: None,
            time_max: None,
            page: 1,
        }
    }
}

/// Partial update to the managed query parameters.
///
/// `None` leaves a field untouched. For the string fields, patching an empty
/// value removes the key; for the time bounds, the inner `Option` carries
/// "set to n" versus "clear the bound".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    /// New search term, empty to clear.
    pub q: Option<String>,

    /// New cuisine filter, empty to clear.
    pub cuisine: Option<String>,

    /// New course filter, empty to clear.
    pub course: Option<String>,

    /// New diet filter, empty to clear.
    pub diet: Option<String>,

    /// New lower time bound; `Some(None)` clears it.
    pub time_min: Option<Option<u32>>,

    /// New upper time bound; `Some(None)` clears it.
    pub time_max: Option<Option<u32>>,

    /// Explicit page. When absent, any write resets pagination to page 1.
    pub page: Option<u32>,
}

impl QueryPatch {
    /// Patch setting only the search term.
    #[must_use]
    pub fn q(value: impl Into<String>) -> Self {
        Self {
            q: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch setting only the cuisine filter.
    #[must_use]
    pub fn cuisine(value: impl Into<String>) -> Self {
        Self {
            cuisine: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch setting only the course filter.
    #[must_use]
    pub fn course(value: impl Into<String>) -> Self {
        Self {
            course: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch setting only the diet filter.
    #[must_use]
    pub fn diet(value: impl Into<String>) -> Self {
        Self {
            diet: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch setting or clearing the lower time bound.
    #[must_use]
    pub fn time_min(value: Option<u32>) -> Self {
        Self {
            time_min: Some(value),
            ..Self::default()
        }
    }

    /// Patch setting or clearing the upper time bound.
    #[must_use]
    pub fn time_max(value: Option<u32>) -> Self {
        Self {
            time_max: Some(value),
            ..Self::default()
        }
    }

    /// Patch setting only the page, preserving every filter.
    #[must_use]
    pub fn page(value: u32) -> Self {
        Self {
            page: Some(value),
            ..Self::default()
        }
    }
}

/// Parses a query string into a [`QueryState`].
///
/// Unknown keys are ignored. Numeric parameters that are absent, empty,
/// non-numeric, negative, or non-finite are treated as absent, never as
/// zero and never as an error. A missing or non-positive page defaults
/// to 1. A leading `?` is tolerated.
#[must_use]
pub fn parse(query: &str) -> QueryState {
    let pairs = parse_pairs(query);
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    QueryState {
        q: get(KEY_Q).unwrap_or_default().to_string(),
        cuisine: get(KEY_CUISINE).unwrap_or_default().to_string(),
        course: get(KEY_COURSE).unwrap_or_default().to_string(),
        diet: get(KEY_DIET).unwrap_or_default().to_string(),
        time_min: read_number(get(KEY_TIME_MIN)),
        time_max: read_number(get(KEY_TIME_MAX)),
        page: read_number(get(KEY_PAGE)).filter(|n| *n >= 1).unwrap_or(1),
    }
}

/// Applies a patch to a query string and returns the rewritten string.
///
/// Semantics, per field present in the patch:
/// - string fields with an empty value remove their key (`key=` is never
///   written);
/// - time bounds set to `None` remove their key, otherwise the value is
///   written as a decimal string;
/// - the page-reset rule: a patch without an explicit page writes `page=1`,
///   so touching any filter resets pagination; a patch carrying a page
///   preserves that value.
///
/// Keys this store does not manage are passed through unchanged, and the
/// relative position of existing keys is preserved.
#[must_use]
pub fn serialize(current: &str, patch: &QueryPatch) -> String {
    let mut pairs = parse_pairs(current);

    if let Some(q) = &patch.q {
        set_or_delete(&mut pairs, KEY_Q, non_empty(q));
    }
    if let Some(cuisine) = &patch.cuisine {
        set_or_delete(&mut pairs, KEY_CUISINE, non_empty(cuisine));
    }
    if let Some(course) = &patch.course {
        set_or_delete(&mut pairs, KEY_COURSE, non_empty(course));
    }
    if let Some(diet) = &patch.diet {
        set_or_delete(&mut pairs, KEY_DIET, non_empty(diet));
    }
    if let Some(time_min) = patch.time_min {
        set_or_delete(&mut pairs, KEY_TIME_MIN, time_min.map(|n| n.to_string()));
    }
    if let Some(time_max) = patch.time_max {
        set_or_delete(&mut pairs, KEY_TIME_MAX, time_max.map(|n| n.to_string()));
    }

    // Writes reset pagination unless the caller pins the page explicitly.
    let page = patch.page.unwrap_or(1);
    set_or_delete(&mut pairs, KEY_PAGE, Some(page.to_string()));

    encode_pairs(&pairs)
}

/// Read/write facade over the query string held by a [`Location`].
///
/// Every read re-parses the location's query string; every write runs the
/// full serialize-and-replace cycle. When the location is unavailable,
/// reads degrade to [`QueryState::default`] and writes become no-ops;
/// neither path errors.
#[derive(Debug)]
pub struct QueryStore<L> {
    location: L,
}

impl<L: Location> QueryStore<L> {
    /// Wraps a location in a store.
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Current query state, re-derived from the location.
    #[must_use]
    pub fn read(&self) -> QueryState {
        self.location
            .query()
            .map_or_else(QueryState::default, |q| parse(&q))
    }

    /// Raw query string, empty when the location is unavailable.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.location.query().unwrap_or_default()
    }

    /// Applies a partial update through the serialize boundary.
    ///
    /// Uses replace semantics: rapid successive edits rewrite the same
    /// entry rather than accumulating history.
    pub fn set_params(&mut self, patch: &QueryPatch) {
        let Some(current) = self.location.query() else {
            tracing::debug!("location unavailable, dropping query write");
            return;
        };

        let next = serialize(&current, patch);
        tracing::debug!(query = %next, "replacing query string");
        if !self.location.replace(&next) {
            tracing::debug!("query replace not applied");
        }
    }

    /// Clears every query parameter, navigating to the bare path.
    pub fn reset(&mut self) {
        tracing::debug!("resetting query string");
        if !self.location.replace("") {
            tracing::debug!("query reset not applied");
        }
    }
}

/// Abstraction over the facility that holds the current query string.
///
/// In the plugin this is an in-memory location owned by the application
/// state; tests substitute their own. Implementations signal unavailability
/// by returning `None` from [`query`](Self::query) and `false` from
/// [`replace`](Self::replace).
pub trait Location {
    /// Current query string, or `None` when the facility is unavailable.
    fn query(&self) -> Option<String>;

    /// Replaces the query string without appending history.
    ///
    /// Returns `false` when the navigation could not be applied.
    fn replace(&mut self, query: &str) -> bool;
}

/// In-memory [`Location`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    query: String,
    unavailable: bool,
}

impl MemoryLocation {
    /// A fresh, available location with an empty query string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A location that reports itself unavailable, for degraded-path use.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            query: String::new(),
            unavailable: true,
        }
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> Option<String> {
        if self.unavailable {
            None
        } else {
            Some(self.query.clone())
        }
    }

    fn replace(&mut self, query: &str) -> bool {
        if self.unavailable {
            return false;
        }
        self.query = query.to_string();
        true
    }
}

/// Splits a query string into decoded key/value pairs, preserving order.
fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Percent-decodes one component, treating `+` as a space.
///
/// Undecodable input is kept verbatim rather than rejected; malformed
/// encoding is a display problem, not a fatal one.
fn decode_component(component: &str) -> String {
    let plus_decoded = component.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}

/// Re-encodes pairs into a query string.
fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sets a key in place (first occurrence keeps its position) or removes it.
fn set_or_delete(pairs: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    match value {
        Some(value) => match pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                pairs[idx].1 = value;
                let mut i = idx + 1;
                while i < pairs.len() {
                    if pairs[i].0 == key {
                        pairs.remove(i);
                    } else {
                        i += 1;
                    }
                }
            }
            None => pairs.push((key.to_string(), value)),
        },
        None => pairs.retain(|(k, _)| k != key),
    }
}

/// `Some` for non-empty strings, `None` otherwise.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a numeric query value per the read contract.
///
/// Absent, empty, non-numeric, negative, or non-finite values are absent.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_number(value: Option<&str>) -> Option<u32> {
    let v = value?.trim();
    if v.is_empty() {
        return None;
    }
    let n: f64 = v.parse().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_string_yields_defaults() {
        let state = parse("");
        assert_eq!(state, QueryState::default());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn parse_reads_all_managed_keys() {
        let state = parse("q=pasta&cuisine=Italian&course=Main&diet=Vegan&timeMin=10&timeMax=45&page=3");
        assert_eq!(state.q, "pasta");
        assert_eq!(state.cuisine, "Italian");
        assert_eq!(state.course, "Main");
        assert_eq!(state.diet, "Vegan");
        assert_eq!(state.time_min, Some(10));
        assert_eq!(state.time_max, Some(45));
        assert_eq!(state.page, 3);
    }

    #[test]
    fn parse_tolerates_leading_question_mark_and_encoding() {
        let state = parse("?q=green%20curry&cuisine=Thai+Isan");
        assert_eq!(state.q, "green curry");
        assert_eq!(state.cuisine, "Thai Isan");
    }

    #[test]
    fn malformed_numbers_are_absent_not_zero() {
        assert_eq!(parse("timeMax=abc").time_max, None);
        assert_eq!(parse("timeMax=").time_max, None);
        assert_eq!(parse("timeMax=-5").time_max, None);
        assert_eq!(parse("timeMax=NaN").time_max, None);
        assert_eq!(parse("timeMax=inf").time_max, None);
        assert_eq!(parse("timeMax=30").time_max, Some(30));
    }

    #[test]
    fn bad_page_defaults_to_one() {
        assert_eq!(parse("page=0").page, 1);
        assert_eq!(parse("page=-2").page, 1);
        assert_eq!(parse("page=two").page, 1);
        assert_eq!(parse("page=4").page, 4);
    }

    #[test]
    fn filter_write_resets_page() {
        let next = serialize("q=pasta&page=4", &QueryPatch::cuisine("Italian"));
        let state = parse(&next);
        assert_eq!(state.cuisine, "Italian");
        assert_eq!(state.page, 1);
        // The reset is written explicitly, mirroring the listing URL shape.
        assert!(next.contains("page=1"));
    }

    #[test]
    fn page_only_patch_preserves_filters() {
        let next = serialize("q=pasta&cuisine=Italian&page=1", &QueryPatch::page(3));
        let state = parse(&next);
        assert_eq!(state.q, "pasta");
        assert_eq!(state.cuisine, "Italian");
        assert_eq!(state.page, 3);
    }

    #[test]
    fn explicit_page_in_mixed_patch_wins_over_reset() {
        let patch = QueryPatch {
            cuisine: Some("Italian".to_string()),
            page: Some(2),
            ..QueryPatch::default()
        };
        assert_eq!(parse(&serialize("", &patch)).page, 2);
    }

    #[test]
    fn empty_values_remove_keys_instead_of_writing_them() {
        let next = serialize("q=pasta&cuisine=Italian", &QueryPatch::q(""));
        assert!(!next.contains("q="));
        assert!(next.contains("cuisine=Italian"));

        let next = serialize("timeMax=30", &QueryPatch::time_max(None));
        assert!(!next.contains("timeMax"));
    }

    #[test]
    fn unmanaged_keys_pass_through_writes() {
        let next = serialize("sort=rating&q=old", &QueryPatch::q("new"));
        assert!(next.contains("sort=rating"));
        assert_eq!(parse(&next).q, "new");
    }

    #[test]
    fn values_round_trip_through_encoding() {
        let next = serialize("", &QueryPatch::q("crème brûlée & co"));
        assert_eq!(parse(&next).q, "crème brûlée & co");
    }

    #[test]
    fn store_read_after_write_round_trips() {
        let mut store = QueryStore::new(MemoryLocation::new());
        store.set_params(&QueryPatch::q("veg"));
        store.set_params(&QueryPatch::time_max(Some(30)));

        let state = store.read();
        assert_eq!(state.q, "veg");
        assert_eq!(state.time_max, Some(30));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn store_reset_clears_everything() {
        let mut store = QueryStore::new(MemoryLocation::new());
        store.set_params(&QueryPatch::cuisine("Italian"));
        store.reset();

        assert_eq!(store.read(), QueryState::default());
        assert_eq!(store.query_string(), "");
    }

    #[test]
    fn unavailable_location_degrades_without_errors() {
        let mut store = QueryStore::new(MemoryLocation::unavailable());
        assert_eq!(store.read(), QueryState::default());

        // Writes are silently dropped.
        store.set_params(&QueryPatch::q("pasta"));
        assert_eq!(store.read(), QueryState::default());
    }

    #[test]
    fn duplicate_keys_collapse_to_one_on_write() {
        let next = serialize("q=a&q=b", &QueryPatch::q("c"));
        assert_eq!(next.matches("q=").count(), 1);
        assert_eq!(parse(&next).q, "c");
    }
}
