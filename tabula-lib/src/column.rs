//! Column definitions and the accessor resolver.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::TableError;
use crate::model::{TableRow, Value};

/// Computes a cell value from a row.
pub type AccessorFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Column-supplied comparator with ascending semantics.
pub type SortFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Column-supplied predicate receiving the row and the raw filter text.
pub type FilterFn<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// How a column obtains its value from a row.
pub enum Accessor<T> {
    /// Look up a named field through [`TableRow::field`].
    Field(String),
    /// Compute the value with a function.
    Fn(AccessorFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Fn(f) => Accessor::Fn(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A table column definition.
///
/// By default a column reads the field named after its id and is both
/// sortable and filterable.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Record;
/// use tabula_lib::{Align, Column};
///
/// let name: Column<Record> = Column::new("name", "Name");
/// let age: Column<Record> = Column::new("age", "Age")
///     .align(Align::Right)
///     .filter_fn(|row: &Record, text: &str| {
///         let min: i64 = text.parse().unwrap_or(0);
///         matches!(row.get("age"), Some(tabula_lib::model::Value::Int(v)) if *v >= min)
///     });
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Value accessor.
    pub accessor: Accessor<T>,
    /// Whether activating the header changes the sort.
    pub sortable: bool,
    /// Whether the column takes part in global filtering.
    pub filterable: bool,
    /// Custom comparator.
    pub sort_fn: Option<SortFn<T>>,
    /// Custom column filter predicate.
    pub filter_fn: Option<FilterFn<T>>,
    /// Cell alignment.
    pub align: Align,
    /// Preferred width in characters.
    pub width: Option<u16>,
}

impl<T> Column<T> {
    /// Create a new column reading the field named `id`.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id,
            header: header.into(),
            sortable: true,
            filterable: true,
            sort_fn: None,
            filter_fn: None,
            align: Align::default(),
            width: None,
        }
    }

    /// Read a different field than the column id.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.accessor = Accessor::Field(name.into());
        self
    }

    /// Compute the cell value with a function.
    pub fn accessor(mut self, f: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Accessor::Fn(Arc::new(f));
        self
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column takes part in global filtering.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Use a custom comparator (ascending semantics).
    pub fn sort_fn(mut self, f: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort_fn = Some(Arc::new(f));
        self
    }

    /// Use a custom predicate for this column's filter.
    pub fn filter_fn(mut self, f: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.filter_fn = Some(Arc::new(f));
        self
    }

    /// Set the cell alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set a preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

impl<T: TableRow> Column<T> {
    /// Resolve this column's value for a row.
    ///
    /// Missing fields resolve to [`Value::Null`].
    pub fn resolve(&self, row: &T) -> Value {
        match &self.accessor {
            Accessor::Field(name) => row.field(name).unwrap_or_default(),
            Accessor::Fn(f) => f(row),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            sort_fn: self.sort_fn.clone(),
            filter_fn: self.filter_fn.clone(),
            align: self.align,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("sort_fn", &self.sort_fn.is_some())
            .field("filter_fn", &self.filter_fn.is_some())
            .field("align", &self.align)
            .field("width", &self.width)
            .finish()
    }
}

// =============================================================================
// Columns
// =============================================================================

/// An ordered set of columns with unique ids.
#[derive(Debug)]
pub struct Columns<T> {
    columns: Vec<Column<T>>,
}

impl<T> Columns<T> {
    /// Create a column set, rejecting duplicate ids.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::duplicate_column(&column.id));
            }
        }
        Ok(Self { columns })
    }

    /// Find a column by id.
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Get the index of a column by id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Get the columns as a slice.
    pub fn as_slice(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Iterate over the columns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T> Clone for Columns<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Columns<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
