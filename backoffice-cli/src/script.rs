//! Script steps applied to a table controller.

use std::str::FromStr;
use std::time::Duration;

use backoffice_table::TableController;
use backoffice_table::TableError;
use backoffice_table::state::FilterValue;
use backoffice_table::state::Pagination;
use backoffice_table::state::SortEntry;

/// One scripted interaction with the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `page=N`
    Page(u32),
    /// `per-page=N`
    PerPage(u32),
    /// `sort=col[:dir],...`; empty clears.
    Sort(Vec<SortEntry>),
    /// `paginate=INDEX:SIZE`, as a renderer would report it.
    Paginate(Pagination),
    /// `filter=col:value`; empty value clears.
    Filter(String, Option<FilterValue>),
    /// `hide=col` toggles visibility.
    ToggleColumn(String),
    /// `select=key` toggles selection.
    ToggleRow(String),
    /// `wait=MS` lets timers run.
    Wait(Duration),
    /// `unmount`
    Unmount,
}

fn number<T: FromStr>(key: &str, raw: &str) -> Result<T, TableError> {
    raw.trim()
        .parse()
        .map_err(|_| TableError::invalid_argument(format!("{key} expects a number, got {raw:?}")))
}

/// JSON when it parses, otherwise the raw text.
fn filter_value(raw: &str) -> Option<FilterValue> {
    if raw.is_empty() {
        return None;
    }
    Some(serde_json::from_str(raw).unwrap_or_else(|_| FilterValue::String(raw.to_string())))
}

impl FromStr for Step {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "unmount" {
            return Ok(Self::Unmount);
        }
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| TableError::invalid_argument(format!("expected key=value, got {s:?}")))?;

        match key {
            "page" => Ok(Self::Page(number(key, value)?)),
            "per-page" => Ok(Self::PerPage(number(key, value)?)),
            "sort" => value
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(SortEntry::from_str)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sort),
            "paginate" => {
                let (index, size) = value.split_once(':').ok_or_else(|| {
                    TableError::invalid_argument("paginate expects INDEX:SIZE")
                })?;
                Ok(Self::Paginate(Pagination::new(
                    number(key, index)?,
                    number(key, size)?,
                )))
            }
            "filter" => {
                let (column, raw) = value.split_once(':').unwrap_or((value, ""));
                if column.is_empty() {
                    return Err(TableError::invalid_argument("filter expects COLUMN:VALUE"));
                }
                Ok(Self::Filter(column.to_string(), filter_value(raw)))
            }
            "hide" => Ok(Self::ToggleColumn(value.to_string())),
            "select" => Ok(Self::ToggleRow(value.to_string())),
            "wait" => Ok(Self::Wait(Duration::from_millis(number(key, value)?))),
            other => Err(TableError::invalid_argument(format!("unknown step {other:?}"))),
        }
    }
}

impl Step {
    /// Applies the step. Waiting yields to the runtime so debounced resets fire.
    pub async fn apply(&self, table: &TableController) {
        match self {
            Self::Page(page) => table.set_page(*page),
            Self::PerPage(per_page) => table.set_per_page(*per_page),
            Self::Sort(sorting) => table.set_sorting(sorting.clone()),
            Self::Paginate(pagination) => table.on_pagination_change(*pagination),
            Self::Filter(column, value) => table.set_column_filter(column, value.clone()),
            Self::ToggleColumn(column) => {
                table.toggle_column_visibility(column);
            }
            Self::ToggleRow(key) => {
                table.toggle_row_selected(key);
            }
            Self::Wait(duration) => {
                tokio::time::sleep(*duration).await;
                // Timers due at the same instant run after us; let them finish.
                tokio::task::yield_now().await;
            }
            Self::Unmount => table.unmount(),
        }
    }
}
