use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A single cell, tagged by its SQLite storage class
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// JSON mapping: null, number, number, string, and base64 string for blobs.
/// Non-finite reals are written as null by serde_json.
impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_none(),
            SqlValue::Integer(v) => serializer.serialize_i64(*v),
            SqlValue::Real(v) => serializer.serialize_f64(*v),
            SqlValue::Text(v) => serializer.serialize_str(v),
            SqlValue::Blob(v) => serializer.serialize_str(&STANDARD.encode(v)),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Blob(v)
    }
}

/// One extracted row: column name to value, in result-set column order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn with_capacity(columns: usize) -> Self {
        Self {
            cells: Vec::with_capacity(columns),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.cells.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, SqlValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_json_mapping() {
        assert_eq!(serde_json::to_value(SqlValue::Null).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(SqlValue::Integer(-7)).unwrap(), json!(-7));
        assert_eq!(serde_json::to_value(SqlValue::Real(1.5)).unwrap(), json!(1.5));
        assert_eq!(serde_json::to_value(SqlValue::from("héllo")).unwrap(), json!("héllo"));
        assert_eq!(
            serde_json::to_value(SqlValue::Blob(vec![0xde, 0xad, 0xbe, 0xef])).unwrap(),
            json!("3q2+7w==")
        );
    }

    #[test]
    fn test_non_finite_real_is_null() {
        assert_eq!(serde_json::to_string(&SqlValue::Real(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn test_row_keeps_column_order() {
        let row: Row = [
            ("zeta", SqlValue::Integer(1)),
            ("alpha", SqlValue::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"zeta":1,"alpha":null}"#
        );
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(row.get("zeta"), Some(&SqlValue::Integer(1)));
        assert!(row.get("alpha").is_some_and(SqlValue::is_null));
        assert_eq!(row.get("missing"), None);
    }
}
