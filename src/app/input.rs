use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Message, Model};
use crate::app::model::PromptKind;
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            let _ = key;
            return Some(Message::HideHelp);
        }

        if model.recent_picker_open {
            return match key.code {
                KeyCode::Char(c) if ('1'..='5').contains(&c) => {
                    Some(Message::SelectRecent((c as u8) - b'0'))
                }
                _ => Some(Message::CancelRecentPicker),
            };
        }

        if model.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Backspace => Some(Message::PromptBackspace),
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::PromptChar(c))
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            return match key.code {
                // File
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('o') => Some(Message::StartPrompt(PromptKind::Open)),
                KeyCode::Char('r') => Some(Message::OpenRecentPicker),
                KeyCode::Char('e') => Some(Message::ExportPdf),

                // Edit
                KeyCode::Char('z') => Some(Message::Undo),
                KeyCode::Char('y') => Some(Message::Redo),

                // Search
                KeyCode::Char('f') => Some(Message::StartPrompt(PromptKind::Find)),
                KeyCode::Char('h') => Some(Message::StartPrompt(PromptKind::ReplaceQuery)),

                // View
                KeyCode::Char('t') => Some(Message::ToggleTheme),
                KeyCode::Char('w') => Some(Message::ToggleWatch),

                // Word / buffer movement
                KeyCode::Left => Some(Message::MoveWordLeft),
                KeyCode::Right => Some(Message::MoveWordRight),
                KeyCode::Home => Some(Message::MoveToStart),
                KeyCode::End => Some(Message::MoveToEnd),

                // Quit
                KeyCode::Char('q') | KeyCode::Char('c') => Some(Message::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::StartPrompt(PromptKind::SaveAs)),
            KeyCode::F(3) if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Message::PrevMatch)
            }
            KeyCode::F(3) => Some(Message::NextMatch),
            KeyCode::Esc if model.search_query.is_some() => Some(Message::ClearSearch),

            // Editing
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::InsertChar('\t')),

            // Cursor
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),

            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.recent_picker_open || model.prompt.is_some() {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let text_rows = model
                    .viewport
                    .height()
                    .saturating_sub(crate::ui::footer_rows(model).saturating_sub(1));
                if mouse.row >= text_rows {
                    return None;
                }
                let line_count = model.document.buffer().line_count();
                let line =
                    (model.viewport.offset() + mouse.row as usize).min(line_count.saturating_sub(1));

                let gutter = crate::ui::gutter_width(line_count) + 1;
                let display_col = usize::from(mouse.column.saturating_sub(gutter));
                let text = model.document.buffer().line_at(line).unwrap_or_default();
                let col = byte_col_for_display_col(&text, display_col);
                Some(Message::MoveTo(line, col))
            }
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Map a rendered column back to a byte offset, accounting for wide glyphs.
fn byte_col_for_display_col(line: &str, display_col: usize) -> usize {
    let mut width = 0usize;
    for (idx, ch) in line.char_indices() {
        if width >= display_col {
            return idx;
        }
        width += ch.width().unwrap_or(0).max(1);
    }
    line.len()
}

#[cfg(test)]
mod tests {
    use super::byte_col_for_display_col;

    #[test]
    fn test_display_col_maps_ascii_one_to_one() {
        assert_eq!(byte_col_for_display_col("hello", 0), 0);
        assert_eq!(byte_col_for_display_col("hello", 3), 3);
        assert_eq!(byte_col_for_display_col("hello", 99), 5);
    }

    #[test]
    fn test_display_col_accounts_for_multibyte() {
        // 'é' is 2 bytes but 1 column wide
        assert_eq!(byte_col_for_display_col("café!", 4), 5);
    }

    #[test]
    fn test_display_col_accounts_for_wide_glyphs() {
        // '日' is 3 bytes and 2 columns wide
        assert_eq!(byte_col_for_display_col("日本", 2), 3);
    }
}
