use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let text = format!(
        "{}: {}\u{2588}  Enter: ok  Esc: cancel",
        prompt.title(),
        prompt.input
    );
    let bar = Paragraph::new(text).style(model.theme.prompt_bar);
    frame.render_widget(bar, area);
}

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let query = model.search_query.as_deref().unwrap_or_default();
    let match_info = model.current_search_match().map_or_else(
        || "  [no matches]".to_string(),
        |(current, total)| format!("  [{current}/{total}]"),
    );
    let text = format!("/{query}{match_info}  F3: next  Shift+F3: prev  Esc: clear");
    let bar = Paragraph::new(text).style(model.theme.prompt_bar);
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.document.file_name();
    let dirty_indicator = if model.document.is_dirty() {
        " [modified]"
    } else {
        ""
    };

    let buffer = model.document.buffer();
    let cursor = buffer.cursor();
    let position = format!(
        "Line: {} | Column: {} | Word Count: {}",
        cursor.line + 1,
        buffer.cursor_display_col() + 1,
        buffer.word_count()
    );

    let autosave_indicator = if model.autosave_enabled {
        " [autosave]"
    } else {
        ""
    };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = format!(
        " {filename}{dirty_indicator} | {position}{autosave_indicator}{watch_indicator}  F1:help"
    );

    let status_bar = Paragraph::new(status).style(model.theme.status_bar);
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
