use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{FileAction, Prompt, PromptKind, ToastLevel};
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,

    // Cursor movement
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, byte column) — mouse click
    MoveTo(usize, usize),
    /// Move cursor up one screen
    PageUp,
    /// Move cursor down one screen
    PageDown,
    /// Scroll viewport up without moving the cursor (mouse wheel)
    ScrollUp(usize),
    /// Scroll viewport down without moving the cursor (mouse wheel)
    ScrollDown(usize),

    // Footer prompts
    /// Open a footer prompt
    StartPrompt(PromptKind),
    /// Append a character to the prompt input
    PromptChar(char),
    /// Delete the last prompt input character
    PromptBackspace,
    /// Confirm the prompt input (Enter)
    PromptSubmit,
    /// Dismiss the prompt (Esc)
    PromptCancel,

    // Search
    /// Go to next search match
    NextMatch,
    /// Go to previous search match
    PrevMatch,
    /// Clear search query and highlights
    ClearSearch,

    // Recent files
    /// Open the recent-files picker overlay
    OpenRecentPicker,
    /// Open the numbered entry from the picker
    SelectRecent(u8),
    /// Close the picker
    CancelRecentPicker,

    // Files
    /// Save the buffer to its path (prompts for a path when unnamed)
    Save,
    /// File changed on disk (watcher)
    FileChanged,
    /// Autosave timer fired
    AutosaveTick,
    /// Export the buffer as a single-page PDF
    ExportPdf,

    // View
    /// Switch between light and dark theme
    ToggleTheme,
    /// Toggle external-change watching
    ToggleWatch,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File I/O never happens here; updates that need it queue a
/// [`FileAction`] for the effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(
        msg,
        Message::StartPrompt(PromptKind::Open) | Message::OpenRecentPicker
    ) {
        model.open_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.document.buffer_mut().insert_char(ch);
            after_edit(&mut model);
        }
        Message::InsertNewline => {
            model.document.buffer_mut().split_line();
            after_edit(&mut model);
        }
        Message::DeleteBack => {
            if model.document.buffer_mut().delete_back() {
                after_edit(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.document.buffer_mut().delete_forward() {
                after_edit(&mut model);
            }
        }
        Message::Undo => {
            if model.document.buffer_mut().undo() {
                after_edit(&mut model);
            } else {
                model.show_toast(ToastLevel::Warning, "No action to undo.");
            }
        }
        Message::Redo => {
            if model.document.buffer_mut().redo() {
                after_edit(&mut model);
            } else {
                model.show_toast(ToastLevel::Warning, "No action to redo.");
            }
        }

        // Cursor movement
        Message::MoveCursor(dir) => {
            model.document.buffer_mut().move_cursor(dir);
            ensure_cursor_visible(&mut model);
        }
        Message::MoveHome => {
            model.document.buffer_mut().move_home();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveEnd => {
            model.document.buffer_mut().move_end();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveWordLeft => {
            model.document.buffer_mut().move_word_left();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveWordRight => {
            model.document.buffer_mut().move_word_right();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveToStart => {
            model.document.buffer_mut().move_to_start();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveToEnd => {
            model.document.buffer_mut().move_to_end();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveTo(line, col) => {
            model.document.buffer_mut().move_to(line, col);
            ensure_cursor_visible(&mut model);
        }
        Message::PageUp => {
            let page = model.viewport.height() as usize;
            for _ in 0..page {
                model.document.buffer_mut().move_cursor(Direction::Up);
            }
            ensure_cursor_visible(&mut model);
        }
        Message::PageDown => {
            let page = model.viewport.height() as usize;
            for _ in 0..page {
                model.document.buffer_mut().move_cursor(Direction::Down);
            }
            ensure_cursor_visible(&mut model);
        }
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
        }

        // Footer prompts
        Message::StartPrompt(kind) => {
            if matches!(kind, PromptKind::Open)
                && model.document.is_dirty()
                && !model.open_confirmed
            {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+O again to discard them, or Ctrl+S to save",
                );
                model.open_confirmed = true;
            } else {
                model.prompt = Some(Prompt::new(kind));
            }
        }
        Message::PromptChar(ch) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.push(ch);
            }
        }
        Message::PromptBackspace => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input.pop();
            }
        }
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                submit_prompt(&mut model, prompt);
            }
        }
        Message::PromptCancel => {
            model.prompt = None;
        }

        // Search
        Message::NextMatch => {
            if !model.search_matches.is_empty() {
                let next = match model.search_match_index {
                    Some(idx) => (idx + 1) % model.search_matches.len(),
                    None => 0,
                };
                go_to_match(&mut model, next);
            }
        }
        Message::PrevMatch => {
            if !model.search_matches.is_empty() {
                let prev = match model.search_match_index {
                    Some(0) | None => model.search_matches.len() - 1,
                    Some(idx) => idx - 1,
                };
                go_to_match(&mut model, prev);
            }
        }
        Message::ClearSearch => {
            model.search_query = None;
            model.search_matches.clear();
            model.search_match_index = None;
        }

        // Recent files
        Message::OpenRecentPicker => {
            if model.document.is_dirty() && !model.open_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+R again to discard them, or Ctrl+S to save",
                );
                model.open_confirmed = true;
            } else if model.document.recent().is_empty() {
                model.show_toast(ToastLevel::Info, "No recent files");
            } else {
                model.recent_picker_open = true;
            }
        }
        Message::SelectRecent(index) => {
            model.recent_picker_open = false;
            if index >= 1
                && let Some(path) = model.document.recent().get(usize::from(index) - 1)
            {
                model.pending_file_action = Some(FileAction::Open(path.clone()));
            }
        }
        Message::CancelRecentPicker => {
            model.recent_picker_open = false;
        }

        // Files
        Message::Save => {
            if model.document.path().is_none() {
                // Unnamed buffer: ask for a path first
                model.prompt = Some(Prompt::new(PromptKind::SaveAs));
            }
            // Saving itself is a side effect
        }
        // FileChanged/AutosaveTick/ExportPdf: handled in effects
        Message::FileChanged | Message::AutosaveTick | Message::ExportPdf => {}

        // View
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
        }
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            ensure_cursor_visible(&mut model);
        }

        // Application
        Message::Quit => {
            if model.document.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Shared bookkeeping after any buffer mutation: track the new line count,
/// keep the cursor on screen and recompute stale search highlights.
fn after_edit(model: &mut Model) {
    let total = model.document.buffer().line_count();
    model.viewport.set_total_lines(total);
    ensure_cursor_visible(model);
    refresh_search_matches(model, false);
}

fn ensure_cursor_visible(model: &mut Model) {
    let line = model.document.buffer().cursor().line;
    model.viewport.ensure_visible(line);
}

fn go_to_match(model: &mut Model, index: usize) {
    model.search_match_index = Some(index);
    if let Some(m) = model.search_matches.get(index).copied() {
        model.document.buffer_mut().move_to(m.line, m.col);
        ensure_cursor_visible(model);
    }
}

fn submit_prompt(model: &mut Model, prompt: Prompt) {
    let input = prompt.input;
    match prompt.kind {
        PromptKind::Find => {
            if input.is_empty() {
                model.search_query = None;
                model.search_matches.clear();
                model.search_match_index = None;
            } else {
                model.search_query = Some(input);
                refresh_search_matches(model, true);
                if model.search_matches.is_empty() {
                    model.show_toast(ToastLevel::Info, "No matches");
                }
            }
        }
        PromptKind::ReplaceQuery => {
            if !input.is_empty() {
                model.prompt = Some(Prompt::new(PromptKind::ReplaceWith { query: input }));
            }
        }
        PromptKind::ReplaceWith { query } => {
            let count = model.document.buffer_mut().replace_all(&query, &input);
            // The rewrite invalidates highlights along with the undo history
            model.search_query = None;
            model.search_matches.clear();
            model.search_match_index = None;
            after_edit(model);
            model.show_toast(
                ToastLevel::Info,
                format!("Replaced {count} occurrence(s) of \"{query}\""),
            );
        }
        PromptKind::Open => {
            if !input.is_empty() {
                model.pending_file_action = Some(FileAction::Open(PathBuf::from(input)));
            }
        }
        PromptKind::SaveAs => {
            if !input.is_empty() {
                model.pending_file_action = Some(FileAction::SaveAs(PathBuf::from(input)));
            }
        }
    }
}

/// Recompute the match list for the current query.
pub(super) fn refresh_search_matches(model: &mut Model, jump_to_first: bool) {
    let Some(query) = model.search_query.as_deref() else {
        model.search_matches.clear();
        model.search_match_index = None;
        return;
    };

    model.search_matches = crate::search::find_matches(model.document.buffer(), query);
    if model.search_matches.is_empty() {
        model.search_match_index = None;
        return;
    }

    if jump_to_first || model.search_match_index.is_none() {
        go_to_match(model, 0);
    } else if let Some(idx) = model.search_match_index {
        let clamped = idx.min(model.search_matches.len() - 1);
        model.search_match_index = Some(clamped);
    }
}
