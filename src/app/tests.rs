use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;

use crate::autosave::AutosaveTimer;
use crate::document::Document;
use crate::editor::Direction;
use crate::ui::style::Theme;

use super::model::{Prompt, PromptKind};
use super::{App, Message, Model, ToastLevel, update};

fn create_test_model(text: &str) -> Model {
    Model::new(Document::from_text(text), (80, 24), Theme::light())
}

fn model_with_file(dir: &Path, name: &str, content: &str) -> (Model, PathBuf) {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    let mut document = Document::new();
    document.open(&path).unwrap();
    (Model::new(document, (80, 24), Theme::light()), path)
}

fn test_timer() -> AutosaveTimer {
    AutosaveTimer::new(Duration::from_secs(300))
}

/// Run the pure update and then the effects layer, like the event loop does.
fn dispatch(model: Model, autosave: &mut AutosaveTimer, msg: Message) -> Model {
    let side_msg = msg.clone();
    let mut model = update(model, msg);
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, autosave, &side_msg);
    model
}

// --- Editing and dirty tracking ---

#[test]
fn test_insert_marks_document_dirty() {
    let model = create_test_model("hello");
    assert!(!model.document.is_dirty());

    let model = update(model, Message::InsertChar('x'));
    assert!(model.document.is_dirty());
    assert_eq!(model.document.buffer().text(), "xhello");
}

#[test]
fn test_newline_and_delete_round_trip() {
    let model = create_test_model("ab");
    let model = update(model, Message::MoveCursor(Direction::Right));
    let model = update(model, Message::InsertNewline);
    assert_eq!(model.document.buffer().text(), "a\nb");

    let model = update(model, Message::DeleteBack);
    assert_eq!(model.document.buffer().text(), "ab");
}

#[test]
fn test_undo_with_empty_history_warns() {
    let model = create_test_model("hello");
    let model = update(model, Message::Undo);
    let (message, level) = model.active_toast().expect("toast");
    assert_eq!(message, "No action to undo.");
    assert_eq!(level, ToastLevel::Warning);
}

#[test]
fn test_redo_with_empty_history_warns() {
    let model = create_test_model("hello");
    let model = update(model, Message::Redo);
    let (message, _) = model.active_toast().expect("toast");
    assert_eq!(message, "No action to redo.");
}

#[test]
fn test_undo_then_redo_round_trip() {
    let model = create_test_model("hello");
    let model = update(model, Message::InsertChar('x'));
    let model = update(model, Message::Undo);
    assert_eq!(model.document.buffer().text(), "hello");
    let model = update(model, Message::Redo);
    assert_eq!(model.document.buffer().text(), "xhello");
}

#[test]
fn test_page_down_moves_cursor_one_screen() {
    let text = (0..100).map(|i| format!("line {i}\n")).collect::<String>();
    let model = create_test_model(&text);
    let model = update(model, Message::PageDown);
    assert_eq!(model.document.buffer().cursor().line, 23);
    assert!(model.viewport.visible_range().contains(&23));
}

#[test]
fn test_wheel_scroll_leaves_cursor_in_place() {
    let text = (0..100).map(|i| format!("line {i}\n")).collect::<String>();
    let model = create_test_model(&text);
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
    assert_eq!(model.document.buffer().cursor().line, 0);
}

// --- Quit guard ---

#[test]
fn test_quit_clean_buffer_quits_immediately() {
    let model = create_test_model("hello");
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_dirty_buffer_warns_first() {
    let model = create_test_model("hello");
    let model = update(model, Message::InsertChar('x'));
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert!(model.active_toast().is_some());

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_confirmation_resets_on_other_action() {
    let model = create_test_model("hello");
    let model = update(model, Message::InsertChar('x'));
    let model = update(model, Message::Quit);
    assert!(model.quit_confirmed);

    let model = update(model, Message::MoveCursor(Direction::Left));
    assert!(!model.quit_confirmed);
}

#[test]
fn test_save_after_quit_warning_allows_quit() {
    let dir = tempdir().unwrap();
    let (model, _path) = model_with_file(dir.path(), "note.txt", "hello");
    let mut autosave = test_timer();

    let model = update(model, Message::InsertChar('x'));
    let model = update(model, Message::Quit);
    assert!(model.quit_confirmed);

    // Ctrl+S keeps the pending quit confirmation alive
    let model = dispatch(model, &mut autosave, Message::Save);
    assert!(!model.document.is_dirty());
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

// --- Search ---

fn submit_find(model: Model, query: &str) -> Model {
    let mut model = update(model, Message::StartPrompt(PromptKind::Find));
    for ch in query.chars() {
        model = update(model, Message::PromptChar(ch));
    }
    update(model, Message::PromptSubmit)
}

#[test]
fn test_find_locates_all_matches_and_jumps_to_first() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "cat");
    assert_eq!(model.search_match_count(), 2);
    assert_eq!(model.current_search_match(), Some((1, 2)));
    assert_eq!(model.document.buffer().cursor().col, 0);
}

#[test]
fn test_find_empty_input_clears_search() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "cat");
    let model = submit_find(model, "");
    assert!(model.search_query.is_none());
    assert_eq!(model.search_match_count(), 0);
}

#[test]
fn test_find_with_no_matches_toasts() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "bird");
    assert_eq!(model.search_match_count(), 0);
    let (message, _) = model.active_toast().expect("toast");
    assert_eq!(message, "No matches");
}

#[test]
fn test_next_and_prev_match_cycle() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "cat");

    let model = update(model, Message::NextMatch);
    assert_eq!(model.current_search_match(), Some((2, 2)));
    assert_eq!(model.document.buffer().cursor().col, 8);

    let model = update(model, Message::NextMatch);
    assert_eq!(model.current_search_match(), Some((1, 2)));

    let model = update(model, Message::PrevMatch);
    assert_eq!(model.current_search_match(), Some((2, 2)));
}

#[test]
fn test_clear_search_drops_highlights() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "cat");
    let model = update(model, Message::ClearSearch);
    assert!(model.search_query.is_none());
    assert_eq!(model.search_match_count(), 0);
}

#[test]
fn test_edits_refresh_search_matches() {
    let model = create_test_model("cat dog cat");
    let model = submit_find(model, "cat");
    assert_eq!(model.search_match_count(), 2);

    // Typing "cat " at the cursor (start of buffer) adds a third match
    let model = update(model, Message::InsertChar('c'));
    let model = update(model, Message::InsertChar('a'));
    let model = update(model, Message::InsertChar('t'));
    let model = update(model, Message::InsertChar(' '));
    assert_eq!(model.search_match_count(), 3);
}

// --- Replace ---

fn submit_replace(model: Model, query: &str, replacement: &str) -> Model {
    let mut model = update(model, Message::StartPrompt(PromptKind::ReplaceQuery));
    for ch in query.chars() {
        model = update(model, Message::PromptChar(ch));
    }
    let mut model = update(model, Message::PromptSubmit);
    for ch in replacement.chars() {
        model = update(model, Message::PromptChar(ch));
    }
    update(model, Message::PromptSubmit)
}

#[test]
fn test_replace_rewrites_buffer() {
    let model = create_test_model("cat dog cat");
    let model = submit_replace(model, "cat", "bat");
    assert_eq!(model.document.buffer().text(), "bat dog bat");
    let (message, _) = model.active_toast().expect("toast");
    assert!(message.contains("Replaced 2 occurrence(s)"));
}

#[test]
fn test_replace_without_occurrences_leaves_buffer_unchanged() {
    let model = create_test_model("cat dog cat");
    let model = submit_replace(model, "bird", "fish");
    assert_eq!(model.document.buffer().text(), "cat dog cat");
    assert!(!model.document.is_dirty());
}

#[test]
fn test_replace_invalidates_undo_history_and_highlights() {
    let model = create_test_model("cat dog cat");
    let model = update(model, Message::InsertChar('x'));
    let model = submit_find(model, "cat");
    let model = submit_replace(model, "cat", "bat");

    assert!(model.search_query.is_none(), "highlights cleared");
    let model = update(model, Message::Undo);
    let (message, _) = model.active_toast().expect("toast");
    assert_eq!(message, "No action to undo.", "undo history cleared");
}

#[test]
fn test_replace_query_prompt_chains_to_replacement_prompt() {
    let model = create_test_model("cat");
    let mut model = update(model, Message::StartPrompt(PromptKind::ReplaceQuery));
    for ch in "cat".chars() {
        model = update(model, Message::PromptChar(ch));
    }
    let model = update(model, Message::PromptSubmit);
    assert_eq!(
        model.prompt,
        Some(Prompt::new(PromptKind::ReplaceWith {
            query: "cat".to_string()
        }))
    );
}

// --- Prompts ---

#[test]
fn test_prompt_input_editing() {
    let model = create_test_model("");
    let model = update(model, Message::StartPrompt(PromptKind::Find));
    let model = update(model, Message::PromptChar('a'));
    let model = update(model, Message::PromptChar('b'));
    let model = update(model, Message::PromptBackspace);
    assert_eq!(model.prompt.as_ref().unwrap().input, "a");

    let model = update(model, Message::PromptCancel);
    assert!(model.prompt.is_none());
}

#[test]
fn test_open_prompt_with_dirty_buffer_warns_first() {
    let model = create_test_model("hello");
    let model = update(model, Message::InsertChar('x'));

    let model = update(model, Message::StartPrompt(PromptKind::Open));
    assert!(model.prompt.is_none());
    assert!(model.open_confirmed);
    assert!(model.active_toast().is_some());

    let model = update(model, Message::StartPrompt(PromptKind::Open));
    assert!(model.prompt.is_some());
}

// --- File operations through the effects layer ---

#[test]
fn test_open_prompt_loads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.txt");
    std::fs::write(&path, "loaded content").unwrap();
    let mut autosave = test_timer();

    let model = create_test_model("");
    let mut model = update(model, Message::StartPrompt(PromptKind::Open));
    for ch in path.display().to_string().chars() {
        model = update(model, Message::PromptChar(ch));
    }
    let model = dispatch(model, &mut autosave, Message::PromptSubmit);

    assert_eq!(model.document.buffer().text(), "loaded content");
    assert_eq!(model.document.path(), Some(path.as_path()));
    assert_eq!(model.document.recent().get(0), Some(&path));
}

#[test]
fn test_save_as_prompt_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saved.txt");
    let mut autosave = test_timer();

    let model = create_test_model("content to save");
    let mut model = update(model, Message::StartPrompt(PromptKind::SaveAs));
    for ch in path.display().to_string().chars() {
        model = update(model, Message::PromptChar(ch));
    }
    let model = dispatch(model, &mut autosave, Message::PromptSubmit);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "content to save");
    assert!(!model.document.is_dirty());
}

#[test]
fn test_save_on_unnamed_buffer_opens_save_as_prompt() {
    let model = create_test_model("text");
    let model = update(model, Message::Save);
    assert_eq!(model.prompt, Some(Prompt::new(PromptKind::SaveAs)));
}

#[test]
fn test_save_persists_to_existing_path() {
    let dir = tempdir().unwrap();
    let (model, path) = model_with_file(dir.path(), "note.txt", "one");
    let mut autosave = test_timer();

    let model = update(model, Message::InsertChar('x'));
    let model = dispatch(model, &mut autosave, Message::Save);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "xone");
    assert!(!model.document.is_dirty());
}

#[test]
fn test_select_recent_opens_listed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recent.txt");
    std::fs::write(&path, "from recent list").unwrap();
    let mut autosave = test_timer();

    let mut model = create_test_model("");
    model.document.record_opened(&path);

    let model = update(model, Message::OpenRecentPicker);
    assert!(model.recent_picker_open);

    let model = dispatch(model, &mut autosave, Message::SelectRecent(1));
    assert!(!model.recent_picker_open);
    assert_eq!(model.document.buffer().text(), "from recent list");
}

#[test]
fn test_recent_picker_with_no_entries_toasts() {
    let model = create_test_model("");
    let model = update(model, Message::OpenRecentPicker);
    assert!(!model.recent_picker_open);
    let (message, _) = model.active_toast().expect("toast");
    assert_eq!(message, "No recent files");
}

#[test]
fn test_select_recent_out_of_range_is_ignored() {
    let model = create_test_model("");
    let model = update(model, Message::SelectRecent(3));
    assert!(model.pending_file_action.is_none());
}

// --- Autosave ---

#[test]
fn test_autosave_tick_persists_dirty_buffer() {
    let dir = tempdir().unwrap();
    let (model, path) = model_with_file(dir.path(), "note.txt", "one");
    let mut autosave = test_timer();

    let model = update(model, Message::InsertChar('x'));
    let model = dispatch(model, &mut autosave, Message::AutosaveTick);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "xone");
    assert!(!model.document.is_dirty());
    assert!(autosave.last_saved().is_some());
}

#[test]
fn test_autosave_tick_without_path_is_noop() {
    let mut autosave = test_timer();
    let model = create_test_model("text");
    let model = update(model, Message::InsertChar('x'));
    assert!(model.document.is_dirty());

    let model = dispatch(model, &mut autosave, Message::AutosaveTick);
    assert!(model.document.is_dirty(), "dirty flag must be unchanged");
    assert!(model.active_toast().is_none());
    assert!(autosave.last_saved().is_none());
}

#[test]
fn test_autosave_tick_with_clean_buffer_is_noop() {
    let dir = tempdir().unwrap();
    let (model, path) = model_with_file(dir.path(), "note.txt", "one");
    let mut autosave = test_timer();

    let _model = dispatch(model, &mut autosave, Message::AutosaveTick);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
    assert!(autosave.last_saved().is_none());
}

#[test]
fn test_autosave_disabled_never_persists() {
    let dir = tempdir().unwrap();
    let (mut model, path) = model_with_file(dir.path(), "note.txt", "one");
    model.autosave_enabled = false;
    let mut autosave = test_timer();

    let model = update(model, Message::InsertChar('x'));
    let model = dispatch(model, &mut autosave, Message::AutosaveTick);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
    assert!(model.document.is_dirty());
}

#[test]
fn test_autosave_failure_toasts_and_keeps_running() {
    let dir = tempdir().unwrap();
    // A path whose parent directory does not exist: every save fails
    let path = dir.path().join("missing").join("note.txt");
    let mut autosave = test_timer();

    let mut document = Document::new();
    document.open(&path).unwrap();
    let model = Model::new(document, (80, 24), Theme::light());

    let model = update(model, Message::InsertChar('x'));
    let model = dispatch(model, &mut autosave, Message::AutosaveTick);

    let (message, level) = model.active_toast().expect("toast");
    assert!(message.starts_with("Autosave failed:"), "was: {message}");
    assert_eq!(level, ToastLevel::Warning);
    assert!(model.document.is_dirty());
    assert!(autosave.last_saved().is_none());
}

// --- External changes ---

#[test]
fn test_file_changed_reloads_clean_buffer() {
    let dir = tempdir().unwrap();
    let (model, path) = model_with_file(dir.path(), "note.txt", "one");
    let mut autosave = test_timer();

    std::fs::write(&path, "two").unwrap();
    let model = dispatch(model, &mut autosave, Message::FileChanged);
    assert_eq!(model.document.buffer().text(), "two");
}

#[test]
fn test_file_changed_keeps_dirty_buffer() {
    let dir = tempdir().unwrap();
    let (model, path) = model_with_file(dir.path(), "note.txt", "one");
    let mut autosave = test_timer();

    let model = update(model, Message::InsertChar('x'));
    std::fs::write(&path, "two").unwrap();
    let model = dispatch(model, &mut autosave, Message::FileChanged);

    assert_eq!(model.document.buffer().text(), "xone");
    let (message, level) = model.active_toast().expect("toast");
    assert!(message.contains("keeping unsaved changes"));
    assert_eq!(level, ToastLevel::Warning);
}

// --- PDF export ---

#[test]
fn test_export_pdf_writes_next_to_document() {
    let dir = tempdir().unwrap();
    let (model, _path) = model_with_file(dir.path(), "note.txt", "buffer text");
    let mut autosave = test_timer();

    let model = dispatch(model, &mut autosave, Message::ExportPdf);

    let pdf = dir.path().join("note.pdf");
    assert!(pdf.exists());
    let bytes = std::fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    let (message, _) = model.active_toast().expect("toast");
    assert!(message.contains("note.pdf"));
}

#[test]
fn test_export_pdf_without_path_warns() {
    let mut autosave = test_timer();
    let model = create_test_model("text");
    let model = dispatch(model, &mut autosave, Message::ExportPdf);
    let (message, level) = model.active_toast().expect("toast");
    assert_eq!(message, "Save the file first before exporting to PDF.");
    assert_eq!(level, ToastLevel::Warning);
}

// --- View ---

#[test]
fn test_toggle_theme_flips_mode() {
    use crate::config::ThemeMode;
    let model = create_test_model("text");
    assert_eq!(model.theme.mode, ThemeMode::Light);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme.mode, ThemeMode::Dark);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme.mode, ThemeMode::Light);
}

#[test]
fn test_toggle_watch_changes_state() {
    let model = create_test_model("text");
    assert!(!model.watch_enabled);
    let model = update(model, Message::ToggleWatch);
    assert!(model.watch_enabled);
}

#[test]
fn test_toggle_watch_without_path_reverts_with_warning() {
    let mut autosave = test_timer();
    let model = create_test_model("text");
    let model = dispatch(model, &mut autosave, Message::ToggleWatch);
    assert!(!model.watch_enabled);
    assert!(model.active_toast().is_some());
}

#[test]
fn test_toggle_help_changes_visibility() {
    let model = create_test_model("text");
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_resize_updates_viewport() {
    let model = create_test_model("text");
    let model = update(model, Message::Resize(100, 40));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), 39);
}

// --- Key handling ---

mod keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_plain_char_inserts() {
        let model = create_test_model("");
        assert_eq!(
            App::handle_key(key(KeyCode::Char('a')), &model),
            Some(Message::InsertChar('a'))
        );
    }

    #[test]
    fn test_ctrl_shortcuts_map_to_commands() {
        let model = create_test_model("");
        assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::Save));
        assert_eq!(App::handle_key(ctrl('q'), &model), Some(Message::Quit));
        assert_eq!(
            App::handle_key(ctrl('f'), &model),
            Some(Message::StartPrompt(PromptKind::Find))
        );
        assert_eq!(
            App::handle_key(ctrl('h'), &model),
            Some(Message::StartPrompt(PromptKind::ReplaceQuery))
        );
        assert_eq!(App::handle_key(ctrl('z'), &model), Some(Message::Undo));
        assert_eq!(App::handle_key(ctrl('e'), &model), Some(Message::ExportPdf));
        assert_eq!(
            App::handle_key(ctrl('t'), &model),
            Some(Message::ToggleTheme)
        );
    }

    #[test]
    fn test_prompt_captures_typing() {
        let model = update(
            create_test_model(""),
            Message::StartPrompt(PromptKind::Find),
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Char('a')), &model),
            Some(Message::PromptChar('a'))
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Enter), &model),
            Some(Message::PromptSubmit)
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Esc), &model),
            Some(Message::PromptCancel)
        );
    }

    #[test]
    fn test_recent_picker_captures_digits() {
        let mut model = create_test_model("");
        model.recent_picker_open = true;
        assert_eq!(
            App::handle_key(key(KeyCode::Char('2')), &model),
            Some(Message::SelectRecent(2))
        );
        assert_eq!(
            App::handle_key(key(KeyCode::Char('x')), &model),
            Some(Message::CancelRecentPicker)
        );
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut model = create_test_model("");
        model.help_visible = true;
        assert_eq!(
            App::handle_key(key(KeyCode::Char('a')), &model),
            Some(Message::HideHelp)
        );
    }

    #[test]
    fn test_esc_clears_active_search() {
        let model = submit_find(create_test_model("cat"), "cat");
        assert_eq!(
            App::handle_key(key(KeyCode::Esc), &model),
            Some(Message::ClearSearch)
        );
    }
}
