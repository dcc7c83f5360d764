//! Terminal host for the medication entry form

mod app_events;
mod app_render;
mod app_state;
mod form;
mod mouse_click;

pub use app_state::{App, POLL_INTERVAL};
pub use form::{DROPDOWN_ID, FREQUENCY_FIELD, Form, FormField, SEARCH_FIELD, TIME_FIELDS};
