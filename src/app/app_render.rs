use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::App;
use super::form::{Form, SEARCH_FIELD, TIME_FIELDS};
use crate::suggest::suggest_render;

const HELP_TEXT: &str = " Tab: Next Field | ↑/↓: Suggestions | Enter: Select | F2: Preset | Ctrl+C: Quit";

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

        let (search_area, details_row, notes_area, times_row, detail_area, status_area) =
            (layout[0], layout[1], layout[2], layout[3], layout[4], layout[5]);

        let details = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(details_row);
        let times = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(times_row);

        render_field(&mut self.form, SEARCH_FIELD, frame, search_area);
        for (id, area) in ["dosage", "frequency", "form"].into_iter().zip(details.iter()) {
            render_field(&mut self.form, id, frame, *area);
        }
        render_field(&mut self.form, "notes", frame, notes_area);
        for (id, area) in TIME_FIELDS.into_iter().zip(times.iter()) {
            render_field(&mut self.form, id, frame, *area);
        }

        self.render_status(frame, status_area);

        if let Some(widget) = self.suggest.as_mut() {
            widget.set_input_area(search_area);
            suggest_render::render_detail(widget, frame, detail_area);
            // Drawn last so it overlays the fields below the search input
            suggest_render::render_dropdown(widget, frame, search_area);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Yellow)),
            None => Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(line, area);
    }
}

fn render_field(form: &mut Form, id: &str, frame: &mut Frame, area: Rect) {
    let focused = form.is_focused(id);
    let Some(field) = form.field_mut(id) else {
        return;
    };

    // Border color - cyan when focused, gray when unfocused
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    field.textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", field.label))
            .border_style(Style::default().fg(border_color)),
    );
    // Only the focused field shows a cursor
    field.textarea.set_cursor_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });

    frame.render_widget(&field.textarea, area);
    field.area = Some(area);
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
