//! Sort entries.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::TableError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the lowercase name used in URLs and backend queries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(TableError::invalid_argument(format!(
                "unknown sort direction {other:?}"
            ))),
        }
    }
}

/// One sort key. Position in the sorting list decides precedence.
///
/// Serialized as `{"columnId": "...", "direction": "asc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortEntry {
    /// Column the rows are ordered by.
    pub column_id: String,
    /// Direction of the ordering.
    pub direction: Direction,
}

impl SortEntry {
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
}

impl FromStr for SortEntry {
    type Err = TableError;

    /// Parses `column` or `column:direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, direction.parse()?),
            None => (s, Direction::Asc),
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(TableError::invalid_argument(format!(
                "sort entry {s:?} has no column"
            )));
        }
        Ok(Self {
            column_id: column.to_string(),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&SortEntry::desc("price")).unwrap();
        assert_eq!(json, r#"{"columnId":"price","direction":"desc"}"#);
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!("name".parse::<SortEntry>().unwrap(), SortEntry::asc("name"));
        assert_eq!(
            "price:DESC".parse::<SortEntry>().unwrap(),
            SortEntry::desc("price")
        );
        assert!(":asc".parse::<SortEntry>().is_err());
        assert!("name:up".parse::<SortEntry>().is_err());
    }
}
