//! UI layer for the desktop client: app shell and workflow cards.

pub mod app;
pub mod panels;

pub use app::ProductSearchApp;
