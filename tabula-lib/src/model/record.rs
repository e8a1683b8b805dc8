//! Dynamic record row

use std::collections::{HashMap, HashSet};

use super::TableRow;
use super::Value;
use crate::error::TableError;

/// A dynamic row holding field values in a `HashMap<String, Value>`.
///
/// Useful when rows come from untyped sources such as JSON files.
///
/// # Example
///
/// ```
/// use tabula_lib::model::{Record, Value};
///
/// let record = Record::new("1")
///     .set("name", "Bob")
///     .set("age", 31i64);
///
/// assert_eq!(record.get("name"), Some(&Value::from("Bob")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: String,
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: HashMap::new(),
        }
    }

    /// Builds a record from a JSON object, using `id_field` as its key.
    pub fn from_json(value: serde_json::Value, id_field: &str) -> Result<Self, TableError> {
        let serde_json::Value::Object(map) = value else {
            return Err(TableError::UnexpectedJson {
                expected: "an object per row",
            });
        };

        let fields: HashMap<String, Value> = map
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();

        let key = match fields.get(id_field) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => return Err(TableError::missing_key(id_field)),
        };

        Ok(Self { key, fields })
    }

    /// Parses a JSON array of objects into records.
    ///
    /// Keys must be unique across the array.
    pub fn parse_array(json: &str, id_field: &str) -> Result<Vec<Self>, TableError> {
        let serde_json::Value::Array(items) = serde_json::from_str(json)? else {
            return Err(TableError::UnexpectedJson {
                expected: "an array of objects",
            });
        };

        let mut seen = HashSet::with_capacity(items.len());
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let record = Self::from_json(item, id_field)?;
            if !seen.insert(record.key.clone()) {
                return Err(TableError::duplicate_key(record.key));
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Returns the record key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl TableRow for Record {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let mut record = Record::new("7").set("name", "Cid");
        record.insert("age", 40i64);

        assert_eq!(record.key(), "7");
        assert_eq!(record.get("age"), Some(&Value::Int(40)));
        assert_eq!(record.field_names(), vec!["age", "name"]);
        assert_eq!(record.remove("age"), Some(Value::Int(40)));
        assert!(record.get("age").is_none());
    }

    #[test]
    fn test_table_row_impl() {
        let record = Record::new("1").set("name", "Amy");
        assert_eq!(TableRow::key(&record), "1");
        assert_eq!(record.field("name"), Some(Value::from("Amy")));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[{"id": 1, "name": "Bob"}, {"id": 2, "name": "Amy"}]"#;
        let records = Record::parse_array(json, "id").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "1");
        assert_eq!(records[1].get("name"), Some(&Value::from("Amy")));
    }

    #[test]
    fn test_missing_key() {
        let json = r#"[{"id": 1}, {"name": "nobody"}]"#;
        let err = Record::parse_array(json, "id").unwrap_err();
        assert!(matches!(err, TableError::MissingKey { field } if field == "id"));

        let json = r#"[{"id": null}]"#;
        assert!(Record::parse_array(json, "id").is_err());
    }

    #[test]
    fn test_duplicate_key() {
        let json = r#"[{"id": 1, "name": "Bob"}, {"id": 2}, {"id": "1", "name": "Amy"}]"#;
        let err = Record::parse_array(json, "id").unwrap_err();
        assert!(matches!(err, TableError::DuplicateKey { key } if key == "1"));
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(matches!(
            Record::parse_array(r#"{"id": 1}"#, "id"),
            Err(TableError::UnexpectedJson { .. })
        ));
        assert!(matches!(
            Record::parse_array("[1, 2]", "id"),
            Err(TableError::UnexpectedJson { .. })
        ));
        assert!(matches!(
            Record::parse_array("not json", "id"),
            Err(TableError::Json(_))
        ));
    }
}
