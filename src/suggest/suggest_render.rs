//! Dropdown and detail panel rendering
//!
//! The dropdown is redrawn from scratch every frame in candidate order; the
//! widget is told where it landed so pointer events can be hit-tested.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::widget::SuggestWidget;
use crate::candidate::Candidate;
use crate::widgets::popup;

// Dropdown display constants
const MAX_POPUP_WIDTH: usize = 70;
const MIN_POPUP_WIDTH: usize = 24;
const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_PADDING: usize = 4;
const DETAIL_SPACING: &str = "  ";

/// Text shown for one dropdown row
pub fn row_text(candidate: &Candidate) -> (String, String) {
    let mut label = candidate.display_label().to_string();
    if let Some(brand) = candidate.brand_name.as_deref().filter(|b| !b.trim().is_empty())
        && brand != label
    {
        label.push_str(&format!(" ({})", brand));
    }

    let hint = [candidate.dosage.as_deref(), candidate.form.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    (label, hint)
}

/// Render the dropdown under (or above) the search input
///
/// Records the drawn area on the widget, or clears it when hidden.
pub fn render_dropdown(widget: &mut SuggestWidget, frame: &mut Frame, input_area: Rect) {
    if !widget.is_dropdown_visible() {
        widget.set_dropdown_area(None);
        return;
    }

    let rows: Vec<(String, String)> = widget.suggestions().iter().map(row_text).collect();
    let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let content_width = rows
        .iter()
        .map(|(_, hint)| {
            if hint.is_empty() {
                label_width
            } else {
                label_width + DETAIL_SPACING.len() + hint.width()
            }
        })
        .max()
        .unwrap_or(MIN_POPUP_WIDTH)
        .clamp(MIN_POPUP_WIDTH, MAX_POPUP_WIDTH);

    let visible_count = rows.len().min(widget.options().max_visible.max(1));
    let popup_height = visible_count as u16 + POPUP_BORDER_HEIGHT;
    let popup_width = (content_width + POPUP_PADDING) as u16;

    let popup_area = popup::dropdown_rect(input_area, popup_width, popup_height, frame.area());
    if popup_area.height <= POPUP_BORDER_HEIGHT {
        widget.set_dropdown_area(None);
        return;
    }

    widget.set_viewport(usize::from(popup_area.height - POPUP_BORDER_HEIGHT));
    widget.set_dropdown_area(Some(popup_area));

    let selected = widget.selected_index();
    let offset = widget.selection().scroll_offset();
    let viewport = widget.selection().viewport();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport)
        .map(|(i, (label, hint))| {
            let padding = " ".repeat(label_width.saturating_sub(label.width()));
            let line = if Some(i) == selected {
                Line::from(vec![
                    Span::styled(
                        format!("► {}{}", label, padding),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{}{}", DETAIL_SPACING, hint),
                        Style::default().fg(Color::Black).bg(Color::Cyan),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("  {}{}", label, padding),
                        Style::default().fg(Color::White).bg(Color::Black),
                    ),
                    Span::styled(
                        format!("{}{}", DETAIL_SPACING, hint),
                        Style::default().fg(Color::Yellow).bg(Color::Black),
                    ),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    // Clear the background area to prevent transparency
    popup::clear_area(frame, popup_area);

    let title = if rows.len() > viewport {
        format!(" Suggestions {}/{} ", selected.map_or(0, |i| i + 1), rows.len())
    } else {
        " Suggestions ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(list, popup_area);
}

/// Render the panel describing the last applied candidate
pub fn render_detail(widget: &SuggestWidget, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match widget.detail() {
        Some(candidate) => detail_lines(candidate),
        None => vec![Line::from(Span::styled(
            "Select a medication to see details",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn detail_lines(candidate: &Candidate) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled("Name: ", label_style),
        Span::raw(candidate.display_label().to_string()),
    ])];

    let extra = [
        ("Brand: ", candidate.brand_name.as_deref()),
        ("Generic: ", Some(candidate.name.as_str()).filter(|_| candidate.uses_brand_name())),
        ("Form: ", candidate.form.as_deref()),
        ("Dosage: ", candidate.dosage.as_deref()),
        ("Frequency: ", candidate.frequency.as_deref()),
        ("Common uses: ", candidate.common_uses.as_deref()),
    ];
    for (label, value) in extra {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::raw(value.to_string()),
            ]));
        }
    }

    lines
}

#[cfg(test)]
#[path = "suggest_render_tests.rs"]
mod suggest_render_tests;
