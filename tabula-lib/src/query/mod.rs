//! The filter → sort → paginate pipeline.
//!
//! Each stage is a pure function over borrowed rows:
//!
//! - [`filter`] - keeps rows matching the global query and column filters
//! - [`sort`] - stable ordering by the active [`SortState`]
//! - [`paginate`] - slices out one [`Page`] with navigation metadata
//!
//! [`DataTable`](crate::DataTable) runs them in that order on every view.

mod filter;
mod order;
mod page;

pub use filter::FilterState;
pub use filter::MatchMode;
pub use filter::filter;
pub use filter::filter_with;
pub use order::Direction;
pub use order::SortState;
pub use order::compare_values;
pub use order::sort;
pub use page::Page;
pub use page::PaginationState;
pub use page::paginate;
