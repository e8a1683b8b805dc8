//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::query::{MatchMode, PaginationState};
use crate::selection::SelectionMode;

/// Per-table configuration.
///
/// Every field has a default, so a partial JSON object is a valid config.
///
/// # Example
///
/// ```
/// use tabula_lib::TableConfig;
/// use tabula_lib::query::MatchMode;
///
/// let config = TableConfig::from_json(r#"{"default_page_size": 25, "global_match": "fuzzy"}"#)
///     .unwrap();
/// assert_eq!(config.default_page_size, 25);
/// assert_eq!(config.global_match, MatchMode::Fuzzy);
/// assert_eq!(config.page_window, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page size used when no pagination state is supplied.
    pub default_page_size: usize,

    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,

    /// Matching used for the global query.
    pub global_match: MatchMode,

    /// Selection behavior.
    pub selection_mode: SelectionMode,

    /// Maximum number of numbered page buttons.
    pub page_window: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            global_match: MatchMode::Substring,
            selection_mode: SelectionMode::Multi,
            page_window: 5,
        }
    }
}

impl TableConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the default page size.
    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the offered page sizes.
    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Set the global match mode.
    pub fn global_match(mut self, mode: MatchMode) -> Self {
        self.global_match = mode;
        self
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set the number of numbered page buttons.
    pub fn page_window(mut self, buttons: usize) -> Self {
        self.page_window = buttons;
        self
    }

    /// Check the config for inconsistent values.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.default_page_size == 0 {
            return Err(TableError::InvalidPageSize { size: 0 });
        }
        if self.page_size_options.contains(&0) {
            return Err(TableError::invalid_config("page size options must be greater than zero"));
        }
        Ok(())
    }

    /// Pagination state on the first page with the default page size.
    pub fn initial_pagination(&self) -> Result<PaginationState, TableError> {
        PaginationState::first_page(self.default_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_pagination().unwrap().page_size(), 10);
        assert_eq!(config.selection_mode, SelectionMode::Multi);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        assert_eq!(TableConfig::from_json("{}").unwrap(), TableConfig::default());
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(matches!(
            TableConfig::from_json(r#"{"default_page_size": 0}"#),
            Err(TableError::InvalidPageSize { size: 0 })
        ));
        assert!(matches!(
            TableConfig::from_json(r#"{"page_size_options": [10, 0]}"#),
            Err(TableError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::default()
            .default_page_size(50)
            .page_size_options([20, 50])
            .selection_mode(SelectionMode::Single)
            .page_window(3);
        assert_eq!(config.page_size_options, vec![20, 50]);
        assert_eq!(config.page_window, 3);
        assert!(config.validate().is_ok());
    }
}
