//! Column filters.

use serde::Deserialize;
use serde::Serialize;

/// Filter payload. Its meaning belongs to the column definition.
pub type FilterValue = serde_json::Value;

/// A filter applied to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilter {
    /// Filtered column.
    pub column_id: String,
    /// Opaque filter value.
    pub value: FilterValue,
}

impl ColumnFilter {
    /// Creates a filter on a column.
    pub fn new(column_id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
        }
    }
}
