//! Headless test harness.
//!
//! [`AppTestRule`] owns a full application on an in-memory database plus
//! a virtual clock, so integration tests drive the real shell exactly
//! the way the windowed frontend does, without a window and without
//! sleeping through debounce delays.

mod test_rule;

pub use test_rule::{recipe_fixture, AppTestRule, DEFAULT_TEST_WIDTH};
