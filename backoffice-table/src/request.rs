//! Backend list requests derived from table state.
//!
//! The controller runs in manual mode: the backend pages, sorts and filters.
//! [`ListRequest`] turns a [`TableState`] into the query the data layer
//! sends for the current page.

use crate::params::SearchParams;
use crate::state::ColumnFilter;
use crate::state::FilterValue;
use crate::state::SortEntry;
use crate::state::TableState;

/// A paginated, sorted and filtered list query.
///
/// # Example
///
/// ```
/// use backoffice_table::request::ListRequest;
/// use backoffice_table::state::{SortEntry, TableState};
///
/// let state = TableState {
///     page: 3,
///     per_page: 20,
///     sorting: vec![SortEntry::desc("price"), SortEntry::asc("name")],
///     ..Default::default()
/// };
///
/// let request = ListRequest::from_state(&state);
/// assert_eq!(request.skip, 40);
/// assert_eq!(request.order_by_clause().as_deref(), Some("price desc,name asc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    /// Rows to skip.
    pub skip: u64,
    /// Rows to return.
    pub top: u32,
    /// Ordering in precedence order.
    pub order_by: Vec<SortEntry>,
    /// Column filters.
    pub filters: Vec<ColumnFilter>,
}

impl ListRequest {
    /// Derives the request for the state's current page.
    pub fn from_state(state: &TableState) -> Self {
        let page = u64::from(state.page.max(1));
        Self {
            skip: (page - 1) * u64::from(state.per_page),
            top: state.per_page,
            order_by: state.sorting.clone(),
            filters: state.column_filters.clone(),
        }
    }

    /// Returns the `$orderby` expression, if there is any ordering.
    pub fn order_by_clause(&self) -> Option<String> {
        if self.order_by.is_empty() {
            return None;
        }
        Some(
            self.order_by
                .iter()
                .map(|entry| format!("{} {}", entry.column_id, entry.direction))
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Returns the query pairs: `$skip`, `$top`, `$orderby` and one
    /// `filter[<column>]` per non-null filter.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("$skip".to_string(), self.skip.to_string()),
            ("$top".to_string(), self.top.to_string()),
        ];
        if let Some(order_by) = self.order_by_clause() {
            pairs.push(("$orderby".to_string(), order_by));
        }
        for filter in &self.filters {
            if let Some(value) = filter_param(&filter.value) {
                pairs.push((format!("filter[{}]", filter.column_id), value));
            }
        }
        pairs
    }

    /// Returns the query as [`SearchParams`].
    pub fn to_search_params(&self) -> SearchParams {
        self.to_query_pairs().into_iter().collect()
    }
}

/// Strings go out unquoted, other values as JSON. Null filters are skipped.
fn filter_param(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Null => None,
        FilterValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_page() {
        let request = ListRequest::from_state(&TableState::default());
        assert_eq!(request.skip, 0);
        assert_eq!(request.top, 10);
        assert_eq!(request.order_by_clause(), None);
        assert_eq!(
            request.to_search_params().to_string(),
            "%24skip=0&%24top=10"
        );
    }

    #[test]
    fn test_filters() {
        let state = TableState {
            column_filters: vec![
                ColumnFilter::new("name", "burger"),
                ColumnFilter::new("price", json!([5, 10])),
                ColumnFilter::new("category", FilterValue::Null),
                ColumnFilter::new("active", true),
            ],
            ..Default::default()
        };
        let pairs = ListRequest::from_state(&state).to_query_pairs();
        assert_eq!(
            &pairs[2..],
            &[
                ("filter[name]".to_string(), "burger".to_string()),
                ("filter[price]".to_string(), "[5,10]".to_string()),
                ("filter[active]".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_skip_does_not_overflow() {
        let state = TableState {
            page: u32::MAX,
            per_page: u32::MAX,
            ..Default::default()
        };
        let request = ListRequest::from_state(&state);
        assert_eq!(request.skip, u64::from(u32::MAX - 1) * u64::from(u32::MAX));
    }
}
