use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::overlays::{centered_rect, render_error_overlay, render_help_overlay};
use crate::panels::PANEL_HEIGHT;

/// Narrowest width the widget is ever drawn at, terminal permitting
pub const MIN_WIDTH: u16 = 24;

/// Clamp a requested widget width to 20%..80% of the available columns.
pub fn clamp_width(requested: u16, available: u16) -> u16 {
    let available = u32::from(available);
    let lower = (available / 5).max(u32::from(MIN_WIDTH)).min(available);
    let upper = (available * 4 / 5).max(lower);
    u32::from(requested).clamp(lower, upper) as u16
}

pub fn widget_area(area: Rect, width: u16) -> Rect {
    centered_rect(area, width, PANEL_HEIGHT)
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = widget_area(frame.area(), app.rendered_width());
    app.panel.render(frame, area, &app.tasks);

    if let Some(ref message) = app.error {
        render_error_overlay(frame, message);
    } else if app.help_visible {
        render_help_overlay(frame, &app.panel.shortcuts());
    }
}
