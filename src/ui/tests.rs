use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::app::{Message, Model, Prompt, PromptKind, update};
use crate::document::Document;
use crate::ui::style::Theme;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn model_from_text(text: &str) -> Model {
    Model::new(Document::from_text(text), (80, 24), Theme::light())
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_render_empty_model_does_not_panic() {
    let model = Model::default();
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

#[test]
fn test_status_bar_shows_position_and_word_count() {
    let model = model_from_text("hello world");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let status = row_text(&terminal, 23);
    assert!(status.contains("untitled"), "status was: {status}");
    assert!(status.contains("Line: 1"));
    assert!(status.contains("Word Count: 2"));
}

#[test]
fn test_status_bar_marks_dirty_buffer() {
    let mut model = model_from_text("hello");
    model.document.mark_dirty();
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    assert!(row_text(&terminal, 23).contains("[modified]"));
}

#[test]
fn test_gutter_shows_line_numbers() {
    let model = model_from_text("alpha\nbeta");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    assert!(row_text(&terminal, 0).starts_with("1 alpha"));
    assert!(row_text(&terminal, 1).starts_with("2 beta"));
}

#[test]
fn test_search_bar_appears_with_active_query() {
    let mut model = model_from_text("cat dog cat");
    model.prompt = Some(Prompt {
        kind: PromptKind::Find,
        input: "cat".to_string(),
    });
    model = update(model, Message::PromptSubmit);

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let bar = row_text(&terminal, 22);
    assert!(bar.contains("/cat"), "bar was: {bar}");
    assert!(bar.contains("[1/2]"));
}

#[test]
fn test_prompt_bar_shows_title_and_input() {
    let mut model = model_from_text("text");
    model.prompt = Some(Prompt {
        kind: PromptKind::SaveAs,
        input: "notes.txt".to_string(),
    });

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let bar = row_text(&terminal, 22);
    assert!(bar.contains("Save as: notes.txt"), "bar was: {bar}");
}

#[test]
fn test_help_overlay_renders() {
    let mut model = model_from_text("text");
    model.help_visible = true;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let all: String = (0..24).map(|y| row_text(&terminal, y)).collect();
    assert!(all.contains("Help"));
    assert!(all.contains("Ctrl+S"));
    assert!(all.contains("Export as PDF"));
}

#[test]
fn test_recent_picker_lists_entries() {
    let mut model = model_from_text("text");
    model.document.record_opened(std::path::Path::new("/tmp/a.txt"));
    model.document.record_opened(std::path::Path::new("/tmp/b.txt"));
    model.recent_picker_open = true;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let all: String = (0..24).map(|y| row_text(&terminal, y)).collect();
    assert!(all.contains("Recent Files"));
    assert!(all.contains("/tmp/b.txt"));
}

#[test]
fn test_toast_row_appears_between_text_and_status() {
    let mut model = model_from_text("hello");
    model = update(model, Message::Redo); // nothing undone → warning toast

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    assert!(row_text(&terminal, 22).contains("No action to redo."));
}

#[test]
fn test_gutter_width_scales_with_line_count() {
    assert_eq!(gutter_width(5), 1);
    assert_eq!(gutter_width(42), 2);
    assert_eq!(gutter_width(999), 3);
    assert_eq!(gutter_width(10_000), 5);
    assert_eq!(gutter_width(1_000_000), 6);
}

#[test]
fn test_footer_rows_counts_active_bars() {
    let mut model = model_from_text("hello");
    assert_eq!(footer_rows(&model), 1);
    model.prompt = Some(Prompt::new(PromptKind::Find));
    assert_eq!(footer_rows(&model), 2);
    model = update(model, Message::Redo); // toast
    assert_eq!(footer_rows(&model), 3);
}
