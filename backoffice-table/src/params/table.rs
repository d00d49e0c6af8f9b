//! Table keys in the query string.

use super::SearchParams;
use crate::error::ParamError;
use crate::state::SortEntry;

/// 1-based page number. Omitted when 1.
pub const PAGE_KEY: &str = "page";

/// Rows per page. Omitted when equal to the default.
pub const PER_PAGE_KEY: &str = "perPage";

/// JSON array of sort entries. Omitted when empty.
pub const SORT_KEY: &str = "sort";

fn read_positive(params: &SearchParams, key: &'static str) -> Result<Option<u32>, ParamError> {
    let Some(raw) = params.get(key) else {
        return Ok(None);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ParamError::InvalidInteger {
            key,
            value: raw.to_string(),
        })?;
    if !(1..=i64::from(u32::MAX)).contains(&value) {
        return Err(ParamError::OutOfRange { key, value });
    }
    Ok(Some(value as u32))
}

/// Reads the `page` parameter.
pub fn read_page(params: &SearchParams) -> Result<Option<u32>, ParamError> {
    read_positive(params, PAGE_KEY)
}

/// Reads the `perPage` parameter.
pub fn read_per_page(params: &SearchParams) -> Result<Option<u32>, ParamError> {
    read_positive(params, PER_PAGE_KEY)
}

/// Reads the `sort` parameter. An empty value counts as absent.
pub fn read_sort(params: &SearchParams) -> Result<Option<Vec<SortEntry>>, ParamError> {
    match params.get(SORT_KEY) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
    }
}

/// Writes `page`, removing it for the first page.
pub fn write_page(params: &mut SearchParams, page: u32) {
    if page <= 1 {
        params.remove(PAGE_KEY);
    } else {
        params.set(PAGE_KEY, page.to_string());
    }
}

/// Writes `perPage`, removing it when it equals `default`.
pub fn write_per_page(params: &mut SearchParams, per_page: u32, default: u32) {
    if per_page == default {
        params.remove(PER_PAGE_KEY);
    } else {
        params.set(PER_PAGE_KEY, per_page.to_string());
    }
}

/// Writes `sort`, removing it when there are no sort entries.
pub fn write_sort(params: &mut SearchParams, sorting: &[SortEntry]) -> Result<(), ParamError> {
    if sorting.is_empty() {
        params.remove(SORT_KEY);
    } else {
        params.set(SORT_KEY, serde_json::to_string(sorting)?);
    }
    Ok(())
}

/// The table values found in a URL.
///
/// Built leniently: a malformed value is logged and treated as absent so the
/// caller's seed applies instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlTableState {
    /// Page from `page`.
    pub page: Option<u32>,
    /// Rows per page from `perPage`.
    pub per_page: Option<u32>,
    /// Sorting from `sort`.
    pub sorting: Option<Vec<SortEntry>>,
}

impl UrlTableState {
    /// Reads every table key, discarding malformed values.
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            page: lenient(read_page(params)),
            per_page: lenient(read_per_page(params)),
            sorting: lenient(read_sort(params)),
        }
    }
}

fn lenient<T>(result: Result<Option<T>, ParamError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring query parameter `{}`: {}", e.key(), e);
            None
        }
    }
}
