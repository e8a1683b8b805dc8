//! TableError for table construction and configuration

/// Error type for building columns, pagination state, configuration and records.
///
/// The pipeline itself never fails: unknown columns, missing fields and
/// out-of-range pages are handled softly. These errors only surface when a
/// table is being set up.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Two columns share the same id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// A page size of zero was requested.
    #[error("Invalid page size {size}: page size must be greater than zero")]
    InvalidPageSize { size: usize },

    /// The configuration is inconsistent.
    #[error("Invalid table configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A record has no value for its identity field.
    #[error("Record is missing identity field '{field}'")]
    MissingKey { field: String },

    /// Two records share the same key.
    #[error("Duplicate row key '{key}'")]
    DuplicateKey { key: String },

    /// Input is not the JSON shape the table expects.
    #[error("Unexpected JSON: expected {expected}")]
    UnexpectedJson { expected: &'static str },

    /// JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }

    /// Creates a new duplicate row key error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a new missing key error.
    pub fn missing_key(field: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TableError::duplicate_column("name").to_string(),
            "Duplicate column id 'name'"
        );
        assert_eq!(
            TableError::InvalidPageSize { size: 0 }.to_string(),
            "Invalid page size 0: page size must be greater than zero"
        );
        assert_eq!(
            TableError::missing_key("id").to_string(),
            "Record is missing identity field 'id'"
        );
        assert_eq!(
            TableError::duplicate_key("7").to_string(),
            "Duplicate row key '7'"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TableError = err.into();
        assert!(matches!(err, TableError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
