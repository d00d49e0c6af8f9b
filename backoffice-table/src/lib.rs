//! Table state for the back-office dashboard.
//!
//! Every list screen of the dashboard (menu items, stock counts, purchase
//! orders, branches, staff) drives its table through a
//! [`TableController`]. The controller keeps page, page size and sorting in
//! the URL so views survive reloads and can be shared as links, debounces
//! filter-driven page resets, and hands a [`TableModel`] to the renderer.

pub mod controller;
pub mod debounce;
pub mod error;
pub mod navigation;
pub mod params;
pub mod request;
pub mod state;

pub use controller::PageCount;
pub use controller::TableController;
pub use controller::TableEvents;
pub use controller::TableModel;
pub use controller::TableOptions;
pub use error::TableError;
