//! UI layer for the desktop browser: app shell and theme.

pub mod app;
pub mod theme;

pub use app::UserBrowserApp;
