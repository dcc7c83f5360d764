use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Place a popup directly under `anchor`, flipping above it when the space
/// below inside `bounds` is too short
pub fn dropdown_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let space_below = bounds.bottom().saturating_sub(anchor.bottom());
    let space_above = anchor.y.saturating_sub(bounds.y);

    if space_below >= height || space_below >= space_above {
        popup_below_anchor(anchor, width, height, bounds)
    } else {
        popup_above_anchor(anchor, width, height, bounds)
    }
}

pub fn popup_below_anchor(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let popup_y = anchor.bottom();

    Rect {
        x: anchor.x,
        y: popup_y,
        width: width.min(bounds.right().saturating_sub(anchor.x)),
        height: height.min(bounds.bottom().saturating_sub(popup_y)),
    }
}

pub fn popup_above_anchor(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let available = anchor.y.saturating_sub(bounds.y);
    let popup_height = height.min(available);

    Rect {
        x: anchor.x,
        y: anchor.y - popup_height,
        width: width.min(bounds.right().saturating_sub(anchor.x)),
        height: popup_height,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
