//! Incremental medication search with debounced suggestions and
//! selection-driven form autofill.
//!
//! The headless engine lives in [`suggest`]; [`source`] answers its queries
//! and [`app`] hosts one widget on a terminal form.

pub mod app;
pub mod candidate;
pub mod config;
pub mod error;
pub mod presets;
pub mod source;
pub mod suggest;
pub mod widgets;

mod test_utils;
