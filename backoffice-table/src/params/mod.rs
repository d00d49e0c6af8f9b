//! URL query parameters.
//!
//! [`SearchParams`] is the ambient query string shared by every view, and
//! the `table` submodule maps the controller's own keys (`page`, `perPage`,
//! `sort`) in and out of it. Keys the controller does not own are never
//! touched.

mod search;
mod table;

pub use search::SearchParams;
pub use table::PAGE_KEY;
pub use table::PER_PAGE_KEY;
pub use table::SORT_KEY;
pub use table::UrlTableState;
pub use table::read_page;
pub use table::read_per_page;
pub use table::read_sort;
pub use table::write_page;
pub use table::write_per_page;
pub use table::write_sort;
