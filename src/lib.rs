pub mod api;
pub mod grid;
pub mod multi;
pub mod prefs;
pub mod query;
pub mod row_view;
pub mod ui;
