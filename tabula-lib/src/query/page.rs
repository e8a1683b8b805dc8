//! Pagination state and page slicing.

use std::ops::Range;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Zero-indexed page position and page size.
///
/// The page size is always greater than zero; constructors and
/// deserialization reject zero.
///
/// # Example
///
/// ```
/// use tabula_lib::query::PaginationState;
///
/// let state = PaginationState::new(10, 2).unwrap();
/// // 5 rows in pages of 2 -> pages 0..=2, so page 10 clamps to 2
/// assert_eq!(state.clamped(5).page(), 2);
/// assert!(PaginationState::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaginationParts")]
pub struct PaginationState {
    page: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct PaginationParts {
    #[serde(default)]
    page: usize,
    page_size: usize,
}

impl TryFrom<PaginationParts> for PaginationState {
    type Error = TableError;

    fn try_from(parts: PaginationParts) -> Result<Self, Self::Error> {
        Self::new(parts.page, parts.page_size)
    }
}

impl PaginationState {
    /// Creates a pagination state.
    pub fn new(page: usize, page_size: usize) -> Result<Self, TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize { size: page_size });
        }
        Ok(Self { page, page_size })
    }

    /// Creates a state on the first page.
    pub fn first_page(page_size: usize) -> Result<Self, TableError> {
        Self::new(0, page_size)
    }

    /// Returns the zero-indexed page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows. Never less than 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Returns the state with its page clamped into range for `total` rows.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            page: self.page.min(self.total_pages(total) - 1),
            ..self
        }
    }

    /// Moves to a specific page, clamped into range.
    pub fn go_to(self, page: usize, total: usize) -> Self {
        Self { page, ..self }.clamped(total)
    }

    /// Moves to the first page.
    pub fn first(self) -> Self {
        Self { page: 0, ..self }
    }

    /// Moves to the last page.
    pub fn last(self, total: usize) -> Self {
        Self {
            page: self.total_pages(total) - 1,
            ..self
        }
    }

    /// Moves to the next page, staying on the last page at the end.
    pub fn next(self, total: usize) -> Self {
        self.go_to(self.page.saturating_add(1), total)
    }

    /// Moves to the previous page, staying on the first page at the start.
    pub fn prev(self, total: usize) -> Self {
        self.go_to(self.page.saturating_sub(1), total)
    }

    /// Changes the page size and returns to the first page.
    pub fn with_page_size(self, page_size: usize) -> Result<Self, TableError> {
        Self::first_page(page_size)
    }
}

/// One page of rows with navigation metadata.
///
/// `page` is the clamped page actually shown, which may differ from the
/// requested one when the row count shrank.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    rows: Vec<R>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total: usize,
}

impl<R> Page<R> {
    /// Returns the rows on this page.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Consumes the page and returns its rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Returns the zero-indexed page shown.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages (at least 1).
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the number of rows across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages - 1
    }

    /// One-based index of the first row shown, or 0 when there are no rows.
    pub fn range_start(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.page * self.page_size + 1
        }
    }

    /// One-based index of the last row shown.
    pub fn range_end(&self) -> usize {
        ((self.page + 1) * self.page_size).min(self.total)
    }

    /// The pagination state that produced this page, after clamping.
    pub fn state(&self) -> PaginationState {
        PaginationState {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Page indices to render as numbered buttons.
    ///
    /// At most `max_buttons` contiguous pages, kept as centered on the current
    /// page as the ends allow.
    pub fn page_window(&self, max_buttons: usize) -> Range<usize> {
        let width = max_buttons.min(self.total_pages);
        let start = self
            .page
            .saturating_sub(width / 2)
            .min(self.total_pages - width);
        start..start + width
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Slices the visible page out of `rows`.
///
/// Out-of-range pages are clamped to the last page rather than producing an
/// empty page.
pub fn paginate<R>(rows: Vec<R>, state: PaginationState) -> Page<R> {
    let total = rows.len();
    let state = state.clamped(total);
    let start = state.page * state.page_size;

    let rows: Vec<R> = rows.into_iter().skip(start).take(state.page_size).collect();
    trace!(
        "paginate: page {} of {}, {} rows",
        state.page + 1,
        state.total_pages(total),
        rows.len()
    );

    Page {
        rows,
        page: state.page,
        page_size: state.page_size,
        total_pages: state.total_pages(total),
        total,
    }
}
