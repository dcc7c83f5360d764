//! Mouse click handling
//!
//! Clicks that the suggestion widget did not act on move focus between fields.

use super::app_state::App;

/// Handle left mouse button click on the field with id `field`
pub fn handle_click(app: &mut App, field: Option<&'static str>) {
    if let Some(id) = field
        && !app.form.is_focused(id)
    {
        app.form.focus(id);
    }
}

#[cfg(test)]
#[path = "mouse_click_tests.rs"]
mod mouse_click_tests;
