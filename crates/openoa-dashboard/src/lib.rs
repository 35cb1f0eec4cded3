//! openoa-dashboard — presentation logic for endpoint diagnostics.
//!
//! Maps orchestrator and beacon state into view models and plain text.
//! Views are rebuilt from a [`DiagnosticsSnapshot`](openoa_diagnostics::DiagnosticsSnapshot)
//! on every change; nothing here holds results of its own.

pub mod actions;
pub mod render;
pub mod selection;
pub mod views;

pub use actions::{Action, dispatch};
pub use render::{render_nav, render_summary, render_table};
pub use selection::Expansion;
pub use views::{
    Banner, DashboardView, DetailPanel, NavIndicator, RowView, StatusIndicator, SummaryView,
};
