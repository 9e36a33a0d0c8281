//! The headless application: tabs, filters, reloads, widget trees, and
//! the error banner, with no window attached.
//!
//! The desktop frontend is a thin event pump around [`AppShell`]; the
//! test harness drives the same type directly.

mod sections;
mod shell;

pub use sections::{compare_categories, BrowserSection, PRIORITY_CATEGORIES};
pub use shell::{AppShell, ProfileView, Tab, ERROR_BANNER_HEIGHT};
