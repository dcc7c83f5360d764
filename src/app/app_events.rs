use std::time::Instant;

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::app_state::App;
use super::form::SEARCH_FIELD;
use super::mouse_click::handle_click;
use crate::suggest::{Effect, NavKey, SuggestMsg};

impl App {
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key, now),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse, now),
            Event::Paste(text) => self.handle_paste_event(text, now),
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.handle_global_keys(key, now) {
            return;
        }

        if self.form.is_focused(SEARCH_FIELD) {
            self.handle_search_key(key, now);
        } else {
            self.handle_field_key(key);
        }
    }

    /// Keys that work regardless of focus. Returns true if handled.
    fn handle_global_keys(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        match key.code {
            KeyCode::Tab => {
                self.leave_search(now);
                self.form.focus_next();
                true
            }
            KeyCode::BackTab => {
                self.leave_search(now);
                self.form.focus_previous();
                true
            }
            KeyCode::F(2) => {
                self.cycle_preset();
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let nav = match key.code {
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        };

        if let Some(nav) = nav {
            let effects = self.dispatch(SuggestMsg::Key(nav), now);
            if !effects.contains(&Effect::ConsumeKey) && nav == NavKey::Enter {
                self.submit();
            }
            return;
        }

        let before = self.search_text().to_string();
        self.form.focused_mut().textarea.input(key);
        let after = self.search_text().to_string();
        if after != before {
            self.dispatch(SuggestMsg::InputChanged(after), now);
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            // Single-line fields
            KeyCode::Up | KeyCode::Down | KeyCode::Esc => {}
            _ => {
                self.form.focused_mut().textarea.input(key);
            }
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::Moved => {
                self.dispatch(SuggestMsg::PointerMoved(position), now);
                return;
            }
            _ => return,
        }

        // The last frame's dropdown only shields fields if it is still showing
        let on_dropdown = self
            .suggest
            .as_ref()
            .filter(|w| w.is_dropdown_visible())
            .and_then(|w| w.dropdown_area())
            .is_some_and(|area| area.contains(position));

        let effects = self.dispatch(SuggestMsg::PointerDown(position), now);

        if effects.iter().any(|e| matches!(e, Effect::Applied { .. })) {
            self.form.focus(SEARCH_FIELD);
        } else if !on_dropdown {
            let field = self.form.field_at(position);
            handle_click(self, field);
        }
    }

    /// Pasted text goes into the focused field, first line only
    pub fn handle_paste_event(&mut self, text: String, now: Instant) {
        let line = text.lines().next().unwrap_or_default();
        if line.is_empty() {
            return;
        }

        self.form.focused_mut().textarea.insert_str(line);
        if self.form.is_focused(SEARCH_FIELD) {
            let query = self.search_text().to_string();
            self.dispatch(SuggestMsg::InputChanged(query), now);
        }
    }

    /// The dropdown belongs to the search input; close it when focus moves away
    fn leave_search(&mut self, now: Instant) {
        if self.form.is_focused(SEARCH_FIELD) {
            self.dispatch(SuggestMsg::Key(NavKey::Escape), now);
        }
    }

    fn submit(&mut self) {
        self.submitted = true;
        self.should_quit = true;
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
