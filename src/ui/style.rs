//! Theming and color definitions.
//!
//! Two built-in themes, light and dark, mirroring the editor's classic
//! black-on-white / white-on-black presets. Every widget takes its colors
//! from the active [`Theme`] so a toggle restyles the whole frame.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Resolved styles for every themed surface of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Editor text area.
    pub text: Style,
    /// Line-number gutter.
    pub gutter: Style,
    /// The cell under the cursor.
    pub cursor: Style,
    /// Bottom status bar.
    pub status_bar: Style,
    /// Footer prompt bar (find/replace/open/save-as input).
    pub prompt_bar: Style,
    /// Search match highlight.
    pub match_highlight: Style,
    /// The currently selected search match.
    pub current_match: Style,
}

impl Theme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Black text on a white background.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            text: Style::default().bg(Color::White).fg(Color::Black),
            gutter: Style::default().bg(Color::White).fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            prompt_bar: Style::default().bg(Color::Blue).fg(Color::White),
            match_highlight: Style::default().bg(Color::Yellow).fg(Color::Black),
            current_match: Style::default().bg(Color::Cyan).fg(Color::Black),
        }
    }

    /// White text on a black background.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            text: Style::default().bg(Color::Black).fg(Color::White),
            gutter: Style::default().bg(Color::Black).fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            prompt_bar: Style::default().bg(Color::Blue).fg(Color::White),
            match_highlight: Style::default().bg(Color::Yellow).fg(Color::Black),
            current_match: Style::default().bg(Color::Cyan).fg(Color::Black),
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Light => Self::dark(),
            ThemeMode::Dark => Self::light(),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_light() {
        assert_eq!(Theme::default().mode, ThemeMode::Light);
    }

    #[test]
    fn test_toggle_flips_between_light_and_dark() {
        let theme = Theme::light();
        assert_eq!(theme.toggled().mode, ThemeMode::Dark);
        assert_eq!(theme.toggled().toggled().mode, ThemeMode::Light);
    }

    #[test]
    fn test_light_and_dark_swap_fg_bg() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_eq!(light.text.bg, Some(Color::White));
        assert_eq!(light.text.fg, Some(Color::Black));
        assert_eq!(dark.text.bg, Some(Color::Black));
        assert_eq!(dark.text.fg, Some(Color::White));
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::light().name(), "light");
        assert_eq!(Theme::dark().name(), "dark");
    }
}
