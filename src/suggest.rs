//! Incremental search with selection-driven autofill
//!
//! `dispatcher` throttles keystrokes into queries, `widget` owns the dropdown
//! state machine, `autofill` copies the picked candidate into the host form.

pub mod autofill;
pub mod debouncer;
pub mod dispatcher;
pub mod selection;
pub mod suggest_render;
pub mod widget;

pub use autofill::{AutofillReport, FieldBindings, FormFields, FormHost, apply_candidate};
pub use debouncer::Debouncer;
pub use dispatcher::{Dispatch, QueryDispatcher};
pub use selection::SelectionState;
pub use widget::{
    Effect, FetchRequest, NavKey, Phase, SuggestMsg, SuggestWidget, WidgetHandles, WidgetOptions,
};
