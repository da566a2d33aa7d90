use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::search::find_offsets;

use super::{overlays, status};

/// Calculate the width needed for line numbers.
pub const fn gutter_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Footer rows below the text area: status bar, plus a prompt/search bar
/// and a toast line when active.
pub fn footer_rows(model: &Model) -> u16 {
    let bar_active = model.prompt.is_some() || model.search_query.is_some();
    1 + u16::from(bar_active) + u16::from(model.active_toast().is_some())
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let bar_active = model.prompt.is_some() || model.search_query.is_some();
    let toast_active = model.active_toast().is_some();
    let footer = footer_rows(model);

    let text_area = Rect {
        height: area.height.saturating_sub(footer),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let bar_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(bar_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(bar_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };

    render_text(model, frame, text_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if model.prompt.is_some() {
        status::render_prompt_bar(model, frame, bar_area);
    } else if model.search_query.is_some() {
        status::render_search_bar(model, frame, bar_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.recent_picker_open {
        overlays::render_recent_picker_overlay(model, frame, area);
    }
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.document.buffer();
    let theme = &model.theme;
    let total_lines = buffer.line_count();
    let gutter = gutter_width(total_lines);
    let cursor = buffer.cursor();
    let query = model.search_query.as_deref().filter(|q| !q.is_empty());
    let current = model.current_match();

    let start = model.viewport.offset();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter as usize);

        let mut spans = vec![Span::styled(line_num, theme.gutter)];
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
        spans.extend(styled_line_spans(
            &line_text, theme, query, line_idx, current, cursor_col,
        ));

        // Cursor sitting past the end of the line gets a phantom cell
        if cursor_col.is_some_and(|col| col >= line_text.len()) {
            spans.push(Span::styled(" ", theme.text.patch(theme.cursor)));
        }

        content.push(Line::from(spans));
    }

    let text = Paragraph::new(content).style(theme.text);
    frame.render_widget(Clear, area);
    frame.render_widget(text, area);
}

/// Break one buffer line into styled spans: search-match highlighting with
/// the cursor cell layered on top.
fn styled_line_spans(
    line_text: &str,
    theme: &crate::ui::style::Theme,
    query: Option<&str>,
    line_idx: usize,
    current: Option<crate::search::Match>,
    cursor_col: Option<usize>,
) -> Vec<Span<'static>> {
    // Match ranges within this line, as (start, end) byte offsets
    let ranges: Vec<(usize, usize)> = query
        .map(|q| {
            find_offsets(line_text, q)
                .into_iter()
                .map(|start| (start, start + q.len()))
                .collect()
        })
        .unwrap_or_default();

    let style_at = |byte_idx: usize| -> Style {
        let mut style = theme.text;
        for &(start, end) in &ranges {
            if byte_idx >= start && byte_idx < end {
                let is_current = current
                    .is_some_and(|m| m.line == line_idx && m.col == start);
                style = if is_current {
                    theme.current_match
                } else {
                    theme.match_highlight
                };
                break;
            }
        }
        if cursor_col == Some(byte_idx) {
            style = style.patch(theme.cursor);
        }
        style
    };

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (byte_idx, ch) in line_text.char_indices() {
        let style = style_at(byte_idx);
        if run_style != Some(style) {
            if let Some(prev) = run_style.take() {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run_style = Some(style);
        }
        run.push(ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    spans
}
