use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

fn recent_picker_rect(area: Rect, items_len: usize) -> Rect {
    let popup_width = area.width.saturating_sub(16).max(44);
    // At most five recent entries
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = (items_len as u16) + 5;
    let popup_height = needed_rows.min(area.height.saturating_sub(4).max(7));
    centered_popup_rect(popup_width, popup_height, area)
}

pub fn render_recent_picker_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let recent = model.document.recent();
    if recent.is_empty() {
        return;
    }
    let popup = recent_picker_rect(area, recent.len());

    let mut lines: Vec<Line> = Vec::new();
    for (idx, path) in recent.iter().enumerate() {
        let number = format!("{}: ", idx + 1);
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(
                number,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(path.display().to_string()),
        ]));
    }
    lines.push(Line::raw(" "));
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(
            "1-5 open \u{00b7} any other key cancels",
            Style::default().fg(Color::Indexed(245)),
        ),
    ]));

    let block = Block::default()
        .title("Recent Files")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", section_style));
    lines.push(Line::raw("  Ctrl+O              Open file"));
    lines.push(Line::raw("  Ctrl+S              Save"));
    lines.push(Line::raw("  F2                  Save as"));
    lines.push(Line::raw("  Ctrl+R              Recent files (1-5)"));
    lines.push(Line::raw("  Ctrl+E              Export as PDF"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit", section_style));
    lines.push(Line::raw("  Ctrl+Z / Ctrl+Y     Undo / redo"));
    lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Page movement"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Search", section_style));
    lines.push(Line::raw("  Ctrl+F              Find"));
    lines.push(Line::raw("  F3 / Shift+F3       Next / previous match"));
    lines.push(Line::raw("  Ctrl+H              Replace all"));
    lines.push(Line::raw("  Esc                 Clear highlights"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("View", section_style));
    lines.push(Line::raw("  Ctrl+T              Light / dark theme"));
    lines.push(Line::raw("  Ctrl+W              Watch file for changes"));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
