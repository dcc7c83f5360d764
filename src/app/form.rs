//! Medication entry form
//!
//! Every field is a single-line `TextArea`. The form is the `FormHost` the
//! suggestion widget writes into; values set through it never count as user
//! edits, so they do not schedule a query.

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::presets::TIME_SLOTS;
use crate::suggest::FormHost;

pub const SEARCH_FIELD: &str = "search";
/// Host element the suggestion dropdown is drawn into
pub const DROPDOWN_ID: &str = "suggestions";
pub const FREQUENCY_FIELD: &str = "frequency";
pub const TIME_FIELDS: [&str; TIME_SLOTS] = ["time_1", "time_2", "time_3", "time_4"];

const FIELD_SPECS: [(&str, &str); 9] = [
    (SEARCH_FIELD, "Medication"),
    ("dosage", "Dosage"),
    (FREQUENCY_FIELD, "Frequency"),
    ("form", "Form"),
    ("notes", "Notes"),
    ("time_1", "Time 1"),
    ("time_2", "Time 2"),
    ("time_3", "Time 3"),
    ("time_4", "Time 4"),
];

pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub textarea: TextArea<'static>,
    /// Where the field was last drawn
    pub area: Option<Rect>,
}

impl FormField {
    fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            textarea: new_textarea(""),
            area: None,
        }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }
}

fn new_textarea(value: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![value.to_string()]);
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::End);
    textarea
}

pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    pub fn new() -> Self {
        Self {
            fields: FIELD_SPECS
                .iter()
                .map(|&(id, label)| FormField::new(id, label))
                .collect(),
            focus: 0,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub(super) fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.field(id).map(FormField::text)
    }

    /// Replace a field's value, leaving the cursor at the end
    pub fn set_text(&mut self, id: &str, value: &str) -> bool {
        match self.field_mut(id) {
            Some(field) => {
                // Fields are single-line
                let value = value.lines().next().unwrap_or_default();
                field.textarea = new_textarea(value);
                true
            }
            None => false,
        }
    }

    pub fn focused(&self) -> &FormField {
        &self.fields[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.focus]
    }

    pub fn focused_id(&self) -> &'static str {
        self.fields[self.focus].id
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id() == id
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Move focus to `id`. Returns false for unknown fields.
    pub fn focus(&mut self, id: &str) -> bool {
        match self.fields.iter().position(|f| f.id == id) {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    pub fn set_area(&mut self, id: &str, area: Rect) {
        if let Some(field) = self.field_mut(id) {
            field.area = Some(area);
        }
    }

    /// Field drawn at `position`, if any
    pub fn field_at(&self, position: Position) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.area.is_some_and(|area| area.contains(position)))
            .map(|f| f.id)
    }

    /// (id, value) pairs in display order
    pub fn values(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|f| (f.id, f.text().to_string()))
            .collect()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl FormHost for Form {
    fn has_element(&self, id: &str) -> bool {
        id == DROPDOWN_ID || self.field(id).is_some()
    }

    fn value(&self, id: &str) -> Option<String> {
        self.text(id).map(str::to_string)
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        self.set_text(id, value)
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
