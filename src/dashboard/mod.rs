//! Dashboard module
//!
//! Provides an overview page with the statistics, charts and insights for
//! the user's expenses, optionally limited to a single month.

mod cards;
mod charts;
mod geometry;
mod handlers;

pub use handlers::get_dashboard_page;
