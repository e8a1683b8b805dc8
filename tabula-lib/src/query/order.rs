//! Sort state and the stable sort engine.

use std::cmp::Ordering;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::TableError;
use crate::model::{TableRow, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the lowercase name of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// The active sort: one column and a direction.
///
/// "Unsorted" is represented as `Option<SortState>::None` everywhere.
///
/// # Example
///
/// ```
/// use tabula_lib::query::{Direction, SortState};
///
/// // Repeated activation of one header cycles asc -> desc -> unsorted.
/// let first = SortState::cycle(None, "name");
/// assert_eq!(first, Some(SortState::asc("name")));
///
/// let second = SortState::cycle(first.as_ref(), "name");
/// assert_eq!(second.as_ref().map(|s| s.direction), Some(Direction::Desc));
///
/// assert_eq!(SortState::cycle(second.as_ref(), "name"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Id of the sorted column.
    pub column_id: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Desc,
        }
    }

    /// Returns the state after activating the header of `column_id`.
    ///
    /// The same column cycles asc -> desc -> unsorted; a different column
    /// starts at ascending.
    pub fn cycle(current: Option<&SortState>, column_id: &str) -> Option<SortState> {
        match current {
            Some(state) if state.column_id == column_id => match state.direction {
                Direction::Asc => Some(Self::desc(column_id)),
                Direction::Desc => None,
            },
            _ => Some(Self::asc(column_id)),
        }
    }
}

/// Parses `column` or `column:asc` / `column:desc`.
impl FromStr for SortState {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.rsplit_once(':') {
            Some((column, "asc")) => (column, Direction::Asc),
            Some((column, "desc")) => (column, Direction::Desc),
            Some((_, other)) => {
                return Err(TableError::invalid_config(format!(
                    "unknown sort direction '{}'",
                    other
                )));
            }
            None => (s, Direction::Asc),
        };

        if column.is_empty() {
            return Err(TableError::invalid_config("sort column is empty"));
        }

        Ok(Self {
            column_id: column.to_string(),
            direction,
        })
    }
}

/// Default comparator for resolved cell values.
///
/// Two numbers compare numerically and two timestamps chronologically.
/// Everything else compares as case-sensitive strings, with `Null` as the
/// empty string.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// Sorts rows by the active sort state.
///
/// `None`, or a state naming an unknown column, returns the rows in their
/// input order. The sort is stable, and descending order reverses the
/// comparator rather than the output, so ties keep their input order in
/// both directions.
pub fn sort<'a, T: TableRow>(
    mut rows: Vec<&'a T>,
    columns: &[Column<T>],
    state: Option<&SortState>,
) -> Vec<&'a T> {
    let Some(state) = state else {
        return rows;
    };

    let Some(column) = columns.iter().find(|c| c.id == state.column_id) else {
        debug!("Sort column '{}' not found, leaving rows unsorted", state.column_id);
        return rows;
    };

    let direction = state.direction;
    let apply = |ordering: Ordering| match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    };

    match &column.sort_fn {
        Some(f) => rows.sort_by(|a, b| apply(f(*a, *b))),
        None => {
            // Resolve each row once instead of on every comparison
            let mut keyed: Vec<(Value, &'a T)> =
                rows.into_iter().map(|row| (column.resolve(row), row)).collect();
            keyed.sort_by(|(a, _), (b, _)| apply(compare_values(a, b)));
            rows = keyed.into_iter().map(|(_, row)| row).collect();
        }
    }

    trace!(
        "sort: {} rows by '{}' {}",
        rows.len(),
        state.column_id,
        direction.as_str()
    );
    rows
}
