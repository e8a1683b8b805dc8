//! TableRow trait

use std::fmt::Debug;
use std::hash::Hash;

use super::Value;

/// Trait for rows that can be shown in a [`DataTable`](crate::DataTable).
///
/// Every row must expose a stable key. Selection is tracked by key, so two
/// rows with equal contents but different keys are distinct, and a row keeps
/// its selection when the rows are re-sorted or replaced.
///
/// Field-name accessors call [`TableRow::field`]. Rows that only use function
/// accessors can leave it at its default, which has no fields.
///
/// # Example
///
/// ```
/// use tabula_lib::model::{TableRow, Value};
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + Debug;

    /// Return a unique key for this row.
    fn key(&self) -> Self::Key;

    /// Look up a field by name.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }
}
