//! Tabular data engine
//!
//! Filtering, sorting, pagination and row selection for data tables, kept
//! free of any rendering concerns. A UI layer supplies rows and
//! [`Column`] definitions, forwards user intents to a [`DataTable`], and
//! renders the resulting [`TableView`].
//!
//! The pipeline stages in [`query`] are also usable on their own as pure
//! functions.

pub mod error;
pub mod model;
pub mod query;

mod column;
mod config;
mod selection;
mod table;

pub use column::*;
pub use config::TableConfig;
pub use error::TableError;
pub use selection::*;
pub use table::*;
