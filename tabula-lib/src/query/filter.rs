//! Global and per-column row filtering.

use std::collections::BTreeMap;

use log::{debug, trace};
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::model::TableRow;

/// Active filter criteria.
///
/// An empty global query or an empty column entry means "no filter" on that
/// dimension.
///
/// # Example
///
/// ```
/// use tabula_lib::query::FilterState;
///
/// let state = FilterState::global("am").with_column("status", "active");
/// assert!(!state.is_empty());
/// assert!(FilterState::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Query matched against every filterable column.
    pub global: String,
    /// Per-column filter text keyed by column id.
    pub columns: BTreeMap<String, String>,
}

impl FilterState {
    /// Creates a state with only a global query.
    pub fn global(query: impl Into<String>) -> Self {
        Self {
            global: query.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Adds a column filter (builder pattern).
    pub fn with_column(mut self, column_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_column(column_id, value);
        self
    }

    /// Sets or clears a column filter. An empty value removes the entry.
    pub fn set_column(&mut self, column_id: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let column_id = column_id.into();
        if value.is_empty() {
            self.columns.remove(&column_id);
        } else {
            self.columns.insert(column_id, value);
        }
    }

    /// Returns the filter text for a column, if active.
    pub fn column(&self, column_id: &str) -> Option<&str> {
        self.columns
            .get(column_id)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Returns `true` if no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.values().all(String::is_empty)
    }

    /// Iterates over active column filters.
    pub fn active_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// How the global query is matched against cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    #[default]
    Substring,
    /// Fuzzy matching; a cell matches if it receives any score.
    Fuzzy,
}

/// Matcher for the global query, built once per filter pass.
enum GlobalMatcher {
    Substring(String),
    Fuzzy { pattern: Pattern, matcher: Matcher },
}

impl GlobalMatcher {
    fn new(query: &str, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Substring => Self::Substring(query.to_lowercase()),
            MatchMode::Fuzzy => Self::Fuzzy {
                pattern: Pattern::new(
                    query,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                matcher: Matcher::new(Config::DEFAULT),
            },
        }
    }

    fn matches(&mut self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => contains_ignore_case(text, needle),
            Self::Fuzzy { pattern, matcher } => {
                let mut buf = Vec::new();
                let haystack = Utf32Str::new(text, &mut buf);
                pattern.score(haystack, matcher).is_some()
            }
        }
    }
}

/// `needle` must already be lower-cased.
fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

/// Filters rows with case-insensitive substring matching.
///
/// Equivalent to [`filter_with`] using [`MatchMode::Substring`].
pub fn filter<'a, T: TableRow>(
    rows: &'a [T],
    columns: &[Column<T>],
    state: &FilterState,
) -> Vec<&'a T> {
    filter_with(rows, columns, state, MatchMode::Substring)
}

/// Filters rows, keeping their input order.
///
/// A row is kept when it passes the global query (if any) **and** every
/// active column filter:
///
/// - Global: any column with `filterable == true` whose stringified value
///   matches the query under `mode`.
/// - Column: the column's `filter_fn` when present, otherwise
///   case-insensitive substring containment. Filters naming unknown columns
///   are ignored.
pub fn filter_with<'a, T: TableRow>(
    rows: &'a [T],
    columns: &[Column<T>],
    state: &FilterState,
    mode: MatchMode,
) -> Vec<&'a T> {
    if state.is_empty() {
        return rows.iter().collect();
    }

    let mut global = (!state.global.is_empty()).then(|| GlobalMatcher::new(&state.global, mode));

    let active: Vec<(&Column<T>, &str, String)> = state
        .active_columns()
        .filter_map(|(id, value)| match columns.iter().find(|c| c.id == id) {
            Some(column) => Some((column, value, value.to_lowercase())),
            None => {
                debug!("Ignoring filter on unknown column '{}'", id);
                None
            }
        })
        .collect();

    let kept: Vec<&'a T> = rows
        .iter()
        .filter(|row| {
            let row: &T = row;
            if let Some(global) = global.as_mut() {
                let hit = columns
                    .iter()
                    .filter(|c| c.filterable)
                    .any(|c| global.matches(&c.resolve(row).to_string()));
                if !hit {
                    return false;
                }
            }

            active.iter().all(|&(column, raw, ref lowered)| match &column.filter_fn {
                Some(f) => f(row, raw),
                None => contains_ignore_case(&column.resolve(row).to_string(), lowered),
            })
        })
        .collect();

    trace!("filter: kept {} of {} rows", kept.len(), rows.len());
    kept
}
